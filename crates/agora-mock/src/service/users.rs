//! User and post service facade

use crate::context::AppContext;
use crate::latency::Latency;
use agora_core::error::Result;
use agora_core::post::{NewPost, Post, PostStats, Rating, RatingKind};
use agora_core::types::{PostId, UserId};
use agora_core::user::{FollowStats, NewUser, ProfileUpdate, User};
use agora_core::AgoraError;
use std::cell::RefCell;
use std::rc::Rc;

/// Account, profile, follow and post operations
pub struct UserService {
    ctx: Rc<RefCell<AppContext>>,
    latency: Latency,
}

impl UserService {
    pub fn new(ctx: Rc<RefCell<AppContext>>) -> Self {
        let latency = super::latency_of(&ctx);
        Self { ctx, latency }
    }

    /// Register a new account
    pub fn register(&self, form: NewUser) -> Result<User> {
        self.latency.simulate();
        self.ctx.borrow_mut().register_user(form)
    }

    /// Fetch a user by id
    pub fn get(&self, id: UserId) -> Result<User> {
        self.latency.simulate();
        self.ctx.borrow().users.ensure_exists(id).map(User::clone)
    }

    /// Fetch a user by username
    pub fn by_username(&self, username: &str) -> Result<User> {
        self.latency.simulate();
        let ctx = self.ctx.borrow();
        ctx.users
            .by_username(username)
            .cloned()
            .ok_or_else(|| AgoraError::Validation(format!("unknown username '{username}'")))
    }

    /// Update profile fields
    pub fn update_profile(&self, id: UserId, update: ProfileUpdate) -> Result<User> {
        self.latency.simulate();
        self.ctx.borrow_mut().update_profile(id, update)
    }

    /// Shareable profile URL for a user
    pub fn profile_link(&self, id: UserId) -> Result<String> {
        self.latency.simulate();
        let ctx = self.ctx.borrow();
        let user = ctx.users.ensure_exists(id)?;
        Ok(format!(
            "{}/u/{}",
            ctx.config.services.base_url.trim_end_matches('/'),
            user.username
        ))
    }

    /// Follow another user
    pub fn follow(&self, follower: UserId, target: UserId) -> Result<bool> {
        self.latency.simulate();
        self.ctx.borrow_mut().follow(follower, target)
    }

    /// Stop following another user
    pub fn unfollow(&self, follower: UserId, target: UserId) -> bool {
        self.latency.simulate();
        self.ctx.borrow_mut().unfollow(follower, target)
    }

    /// Whether `follower` currently follows `target`
    pub fn is_following(&self, follower: UserId, target: UserId) -> bool {
        self.latency.simulate();
        self.ctx.borrow().follows.is_following(follower, target)
    }

    /// Case-insensitive search over usernames and bios
    pub fn search(&self, query: &str) -> Vec<User> {
        self.latency.simulate();
        let ctx = self.ctx.borrow();
        let limit = ctx.config.search.max_results;
        ctx.users.search(query, limit).into_iter().cloned().collect()
    }

    /// Follower and following counts
    pub fn follow_stats(&self, id: UserId) -> Result<FollowStats> {
        self.latency.simulate();
        let ctx = self.ctx.borrow();
        ctx.users.ensure_exists(id)?;
        Ok(ctx.follows.stats(id))
    }

    /// Publish a post
    pub fn create_post(&self, author_id: UserId, form: NewPost) -> Result<Post> {
        self.latency.simulate();
        self.ctx.borrow_mut().create_post(author_id, form)
    }

    /// Delete a post with its comment threads and ratings
    pub fn delete_post(&self, id: PostId) -> Result<Post> {
        self.latency.simulate();
        self.ctx.borrow_mut().delete_post(id)
    }

    /// Posts by one author, newest first
    pub fn posts_of(&self, author_id: UserId) -> Result<Vec<Post>> {
        self.latency.simulate();
        let ctx = self.ctx.borrow();
        ctx.users.ensure_exists(author_id)?;
        Ok(ctx.posts.by_author(author_id).into_iter().cloned().collect())
    }

    /// Posts from the user and everyone they follow, newest first
    pub fn timeline(&self, id: UserId) -> Result<Vec<Post>> {
        self.latency.simulate();
        self.ctx.borrow().timeline(id)
    }

    /// Like or dislike a post
    pub fn rate_post(
        &self,
        user_id: UserId,
        post_id: PostId,
        kind: RatingKind,
    ) -> Result<Option<Rating>> {
        self.latency.simulate();
        self.ctx.borrow_mut().rate_post(user_id, post_id, kind)
    }

    /// Remove a rating from a post
    pub fn unrate_post(&self, user_id: UserId, post_id: PostId) -> Option<Rating> {
        self.latency.simulate();
        self.ctx.borrow_mut().unrate_post(user_id, post_id)
    }

    /// Engagement numbers for a post
    pub fn post_stats(&self, id: PostId) -> Result<PostStats> {
        self.latency.simulate();
        self.ctx.borrow().post_stats(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::demo_context;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_profile_link_uses_base_url() {
        let ctx = demo_context();
        let service = UserService::new(ctx.clone());
        let alice = service.by_username("alice").unwrap();

        let link = service.profile_link(alice.id).unwrap();
        assert_eq!(link, "https://agora.example/u/alice");
    }

    #[test]
    fn test_follow_stats_from_seed() {
        let ctx = demo_context();
        let service = UserService::new(ctx);
        let alice = service.by_username("alice").unwrap();

        let stats = service.follow_stats(alice.id).unwrap();
        assert_eq!(stats.followers, 3);
        assert_eq!(stats.following, 1);
    }

    #[test]
    fn test_unknown_username_is_an_error() {
        let ctx = demo_context();
        let service = UserService::new(ctx);
        assert!(service.by_username("nobody").is_err());
    }
}
