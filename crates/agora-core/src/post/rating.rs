//! Like/dislike ratings on posts and comments

use crate::types::{CommentId, PostId, RatingId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a rating applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatingTarget {
    Post(PostId),
    Comment(CommentId),
}

/// Direction of a rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingKind {
    Like,
    Dislike,
}

/// A single user's rating of one target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    /// Unique rating identifier
    pub id: RatingId,
    /// The rating user
    pub user_id: UserId,
    /// The rated post or comment
    pub target: RatingTarget,
    /// Like or dislike
    pub kind: RatingKind,
    /// When the rating was given
    pub created_at: DateTime<Utc>,
}

/// Store for ratings; at most one rating per (user, target)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatingStore {
    ratings: Vec<Rating>,
    next_id: i64,
}

impl RatingStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            ratings: Vec::new(),
            next_id: 1,
        }
    }

    /// Rate a target. Re-rating replaces the previous rating and returns it.
    pub fn rate(
        &mut self,
        user_id: UserId,
        target: RatingTarget,
        kind: RatingKind,
    ) -> Option<Rating> {
        let previous = self.unrate(user_id, target);

        self.ratings.push(Rating {
            id: RatingId::new(self.next_id),
            user_id,
            target,
            kind,
            created_at: Utc::now(),
        });
        self.next_id += 1;

        previous
    }

    /// Remove a user's rating of a target, returning it when present
    pub fn unrate(&mut self, user_id: UserId, target: RatingTarget) -> Option<Rating> {
        let pos = self
            .ratings
            .iter()
            .position(|r| r.user_id == user_id && r.target == target)?;
        Some(self.ratings.remove(pos))
    }

    /// The rating a user gave a target, if any
    pub fn rating_of(&self, user_id: UserId, target: RatingTarget) -> Option<&Rating> {
        self.ratings
            .iter()
            .find(|r| r.user_id == user_id && r.target == target)
    }

    /// (likes, dislikes) counts for a target
    pub fn counts(&self, target: RatingTarget) -> (usize, usize) {
        let mut likes = 0;
        let mut dislikes = 0;
        for rating in self.ratings.iter().filter(|r| r.target == target) {
            match rating.kind {
                RatingKind::Like => likes += 1,
                RatingKind::Dislike => dislikes += 1,
            }
        }
        (likes, dislikes)
    }

    /// Remove every rating attached to a target (after deletion cascades)
    pub fn purge_target(&mut self, target: RatingTarget) -> usize {
        let before = self.ratings.len();
        self.ratings.retain(|r| r.target != target);
        before - self.ratings.len()
    }

    /// Total rating count
    pub fn count(&self) -> usize {
        self.ratings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_and_counts() {
        let mut store = RatingStore::new();
        let target = RatingTarget::Post(PostId::new(1));

        store.rate(UserId::new(1), target, RatingKind::Like);
        store.rate(UserId::new(2), target, RatingKind::Like);
        store.rate(UserId::new(3), target, RatingKind::Dislike);

        assert_eq!(store.counts(target), (2, 1));
    }

    #[test]
    fn test_rerate_replaces() {
        let mut store = RatingStore::new();
        let target = RatingTarget::Post(PostId::new(1));
        let user = UserId::new(1);

        assert!(store.rate(user, target, RatingKind::Like).is_none());
        let previous = store.rate(user, target, RatingKind::Dislike).unwrap();
        assert_eq!(previous.kind, RatingKind::Like);

        assert_eq!(store.counts(target), (0, 1));
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_unrate() {
        let mut store = RatingStore::new();
        let target = RatingTarget::Comment(CommentId::new(7));
        let user = UserId::new(1);

        store.rate(user, target, RatingKind::Like);
        assert!(store.unrate(user, target).is_some());
        assert!(store.rating_of(user, target).is_none());
        assert!(store.unrate(user, target).is_none());
    }

    #[test]
    fn test_purge_target() {
        let mut store = RatingStore::new();
        let post = RatingTarget::Post(PostId::new(1));
        let comment = RatingTarget::Comment(CommentId::new(1));

        store.rate(UserId::new(1), post, RatingKind::Like);
        store.rate(UserId::new(2), post, RatingKind::Like);
        store.rate(UserId::new(1), comment, RatingKind::Like);

        assert_eq!(store.purge_target(post), 2);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_post_and_comment_targets_are_distinct() {
        let mut store = RatingStore::new();
        store.rate(UserId::new(1), RatingTarget::Post(PostId::new(5)), RatingKind::Like);
        store.rate(
            UserId::new(1),
            RatingTarget::Comment(CommentId::new(5)),
            RatingKind::Like,
        );
        assert_eq!(store.count(), 2);
    }
}
