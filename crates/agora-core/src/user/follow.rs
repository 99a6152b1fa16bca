//! Follow relationship bookkeeping
//!
//! Both directions are kept so follower and following lookups are O(1) map
//! hits; the two maps are always updated together.

use crate::error::{AgoraError, Result};
use crate::types::UserId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Follower/following counts for one user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowStats {
    pub followers: usize,
    pub following: usize,
}

/// The follow graph over all users
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FollowGraph {
    /// Who each user follows, in follow order
    following: HashMap<UserId, Vec<UserId>>,
    /// Who follows each user, in follow order
    followers: HashMap<UserId, Vec<UserId>>,
}

impl FollowGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `follower` follow `target`.
    ///
    /// Returns `false` when the relationship already existed. Following
    /// yourself is rejected.
    pub fn follow(&mut self, follower: UserId, target: UserId) -> Result<bool> {
        if follower == target {
            return Err(AgoraError::Validation(
                "you cannot follow yourself".to_string(),
            ));
        }

        let following = self.following.entry(follower).or_default();
        if following.contains(&target) {
            return Ok(false);
        }

        following.push(target);
        self.followers.entry(target).or_default().push(follower);
        Ok(true)
    }

    /// Make `follower` unfollow `target`.
    ///
    /// Returns `false` when there was no relationship to remove.
    pub fn unfollow(&mut self, follower: UserId, target: UserId) -> bool {
        let Some(following) = self.following.get_mut(&follower) else {
            return false;
        };
        let Some(pos) = following.iter().position(|id| *id == target) else {
            return false;
        };
        following.remove(pos);

        if let Some(followers) = self.followers.get_mut(&target) {
            followers.retain(|id| *id != follower);
        }
        true
    }

    /// Check whether `follower` follows `target`
    pub fn is_following(&self, follower: UserId, target: UserId) -> bool {
        self.following
            .get(&follower)
            .is_some_and(|f| f.contains(&target))
    }

    /// Users that `user` follows, in follow order
    pub fn following_of(&self, user: UserId) -> &[UserId] {
        self.following.get(&user).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Users following `user`, in follow order
    pub fn followers_of(&self, user: UserId) -> &[UserId] {
        self.followers.get(&user).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Follower/following counts for `user`
    pub fn stats(&self, user: UserId) -> FollowStats {
        FollowStats {
            followers: self.followers_of(user).len(),
            following: self.following_of(user).len(),
        }
    }

    /// Number of followers of `user`
    pub fn follower_count(&self, user: UserId) -> usize {
        self.followers_of(user).len()
    }
}
