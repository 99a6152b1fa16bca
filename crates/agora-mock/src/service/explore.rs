//! Explore service facade

use crate::context::{AppContext, SearchResults};
use crate::latency::Latency;
use agora_core::group::Group;
use agora_core::post::{Post, PostStats};
use agora_core::tag::Tag;
use agora_core::types::UserId;
use agora_core::user::User;
use std::cell::RefCell;
use std::rc::Rc;

/// Discovery surfaces: trending, suggestions, popular tags,
/// active groups and global search
pub struct ExploreService {
    ctx: Rc<RefCell<AppContext>>,
    latency: Latency,
}

impl ExploreService {
    pub fn new(ctx: Rc<RefCell<AppContext>>) -> Self {
        let latency = super::latency_of(&ctx);
        Self { ctx, latency }
    }

    /// Posts with the highest engagement, with their stats
    pub fn trending(&self) -> Vec<(Post, PostStats)> {
        self.latency.simulate();
        let ctx = self.ctx.borrow();
        ctx.trending(ctx.config.feed.trending_limit)
    }

    /// Users worth following, most followed first
    pub fn suggested_users(&self, for_user: UserId) -> Vec<User> {
        self.latency.simulate();
        let ctx = self.ctx.borrow();
        ctx.suggested_users(for_user, ctx.config.feed.suggested_users)
    }

    /// Most-followed tags
    pub fn popular_tags(&self) -> Vec<Tag> {
        self.latency.simulate();
        let ctx = self.ctx.borrow();
        ctx.popular_tags(ctx.config.feed.popular_tags)
    }

    /// Groups with the most members
    pub fn active_groups(&self) -> Vec<Group> {
        self.latency.simulate();
        let ctx = self.ctx.borrow();
        ctx.active_groups(ctx.config.feed.active_groups)
    }

    /// Search across users, posts, tags and groups
    pub fn search(&self, query: &str) -> SearchResults {
        self.latency.simulate();
        self.ctx.borrow().search(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::demo_context;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_trending_leads_with_most_engaged_post() {
        let ctx = demo_context();
        let service = ExploreService::new(ctx);

        let trending = service.trending();
        assert_eq!(trending.len(), 3);
        // the sunrise post has three likes and four comments
        assert_eq!(trending[0].1.likes, 3);
        assert_eq!(trending[0].1.comments, 4);
    }

    #[test]
    fn test_suggested_users_are_not_followed() {
        let ctx = demo_context();
        let (dave, alice) = {
            let ctx = ctx.borrow();
            (
                ctx.users.by_username("dave").expect("seeded").id,
                ctx.users.by_username("alice").expect("seeded").id,
            )
        };
        let service = ExploreService::new(ctx);

        let suggested = service.suggested_users(dave);
        assert!(suggested.iter().all(|u| u.id != dave && u.id != alice));
        // bob is the most followed remaining candidate
        assert_eq!(suggested[0].username, "bob");
    }

    #[test]
    fn test_popular_tags_ranked_by_followers() {
        let ctx = demo_context();
        let service = ExploreService::new(ctx);

        let tags = service.popular_tags();
        assert_eq!(tags[0].name, "photography");
    }

    #[test]
    fn test_search_finds_groups() {
        let ctx = demo_context();
        let service = ExploreService::new(ctx);

        let results = service.search("shutter");
        assert_eq!(results.groups.len(), 1);
        assert!(!results.is_empty());
    }
}
