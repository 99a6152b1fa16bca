//! Application context tying all stores together
//!
//! `AppContext` is the composition root of the mock backend. It owns the
//! configuration and every agora-core store, and implements the
//! cross-store operations (cascading deletes, notification fan-out,
//! timeline and explore queries) that no single store can do alone.

use agora_core::comment::{Comment, CommentNode, CommentStore, ContentValidator, NewComment};
use agora_core::config::Config;
use agora_core::error::Result;
use agora_core::group::{Group, GroupStore};
use agora_core::message::{Conversation, Message, MessageStore, NewMessage};
use agora_core::notification::{NotificationKind, NotificationStore};
use agora_core::post::{NewPost, Post, PostStats, PostStore, Rating, RatingKind, RatingStore, RatingTarget};
use agora_core::tag::{Tag, TagStore};
use agora_core::types::{CommentId, GroupId, PostId, TagId, UserId};
use agora_core::user::{FollowGraph, NewUser, ProfileUpdate, User, UserStore};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Combined results of a global search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    pub users: Vec<User>,
    pub posts: Vec<Post>,
    pub tags: Vec<Tag>,
    pub groups: Vec<Group>,
}

impl SearchResults {
    /// Total number of hits across all kinds
    pub fn total(&self) -> usize {
        self.users.len() + self.posts.len() + self.tags.len() + self.groups.len()
    }

    /// Whether the search matched nothing
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// In-memory application state for the mock backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppContext {
    pub config: Config,
    pub users: UserStore,
    pub follows: FollowGraph,
    pub posts: PostStore,
    pub ratings: RatingStore,
    pub comments: CommentStore,
    pub messages: MessageStore,
    pub notifications: NotificationStore,
    pub tags: TagStore,
    pub groups: GroupStore,
}

impl AppContext {
    /// Create an empty context with the given configuration
    pub fn new(config: Config) -> Self {
        Self {
            config,
            users: UserStore::new(),
            follows: FollowGraph::new(),
            posts: PostStore::new(),
            ratings: RatingStore::new(),
            comments: CommentStore::new(),
            messages: MessageStore::new(),
            notifications: NotificationStore::new(),
            tags: TagStore::new(),
            groups: GroupStore::new(),
        }
    }

    fn content_validator(&self) -> ContentValidator {
        ContentValidator::with_max_length(self.config.comments.max_content_length)
    }

    /// Serialize the whole application state to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restore application state from a JSON snapshot; store indexes are
    /// rebuilt during deserialization
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    // ---- users ----

    /// Register a new user
    pub fn register_user(&mut self, form: NewUser) -> Result<User> {
        self.users.create(form)
    }

    /// Apply a partial profile update
    pub fn update_profile(&mut self, id: UserId, update: ProfileUpdate) -> Result<User> {
        self.users.update_profile(id, update)
    }

    /// Follow a user. Returns `false` when already following.
    /// A new follow notifies the target.
    pub fn follow(&mut self, follower: UserId, target: UserId) -> Result<bool> {
        let actor = self.users.ensure_exists(follower)?.username.clone();
        self.users.ensure_exists(target)?;

        let started = self.follows.follow(follower, target)?;
        if started {
            self.notifications.push(
                target,
                follower,
                NotificationKind::Follow {
                    follower_id: follower,
                },
                format!("{} started following you", actor),
            );
        }
        Ok(started)
    }

    /// Stop following a user. Returns `false` when there was no follow.
    pub fn unfollow(&mut self, follower: UserId, target: UserId) -> bool {
        self.follows.unfollow(follower, target)
    }

    // ---- posts ----

    /// Create a post on behalf of a user
    pub fn create_post(&mut self, author_id: UserId, form: NewPost) -> Result<Post> {
        self.users.ensure_exists(author_id)?;
        self.content_validator().validate(&form.content)?;
        self.posts.create(author_id, form)
    }

    /// Delete a post together with its comment threads and ratings
    pub fn delete_post(&mut self, id: PostId) -> Result<Post> {
        let post = self.posts.delete(id)?;

        // repeatedly cascade from any remaining comment of the post;
        // each pass removes a whole subtree
        loop {
            let next = self.comments.for_post(id).first().map(|c| c.id);
            match next {
                Some(comment_id) => {
                    for removed in self.comments.delete_cascade(comment_id)? {
                        self.ratings.purge_target(RatingTarget::Comment(removed.id));
                    }
                }
                None => break,
            }
        }
        self.ratings.purge_target(RatingTarget::Post(id));

        debug!(post = %id, "deleted post with comments and ratings");
        Ok(post)
    }

    /// Aggregate engagement numbers for a post
    pub fn post_stats(&self, id: PostId) -> Result<PostStats> {
        self.posts.ensure_exists(id)?;
        let (likes, dislikes) = self.ratings.counts(RatingTarget::Post(id));
        Ok(PostStats {
            post_id: id,
            likes,
            dislikes,
            comments: self.comments.count_for_post(id),
        })
    }

    /// Rate a post. Re-rating replaces; a fresh like notifies the author.
    pub fn rate_post(
        &mut self,
        user_id: UserId,
        post_id: PostId,
        kind: RatingKind,
    ) -> Result<Option<Rating>> {
        let actor = self.users.ensure_exists(user_id)?.username.clone();
        let author_id = self.posts.ensure_exists(post_id)?.author_id;

        let previous = self.ratings.rate(user_id, RatingTarget::Post(post_id), kind);
        if kind == RatingKind::Like && previous.is_none() && author_id != user_id {
            self.notifications.push(
                author_id,
                user_id,
                NotificationKind::Like { post_id },
                format!("{} liked your post", actor),
            );
        }
        Ok(previous)
    }

    /// Remove a user's rating from a post
    pub fn unrate_post(&mut self, user_id: UserId, post_id: PostId) -> Option<Rating> {
        self.ratings.unrate(user_id, RatingTarget::Post(post_id))
    }

    /// Posts from the user and everyone they follow, newest first
    pub fn timeline(&self, user_id: UserId) -> Result<Vec<Post>> {
        self.users.ensure_exists(user_id)?;
        let following = self.follows.following_of(user_id);

        let mut posts: Vec<Post> = self
            .posts
            .recent()
            .into_iter()
            .filter(|p| p.author_id == user_id || following.contains(&p.author_id))
            .cloned()
            .collect();
        posts.truncate(self.config.feed.page_size);
        Ok(posts)
    }

    // ---- comments ----

    /// Create a comment or reply, notifying the post or parent author
    pub fn create_comment(&mut self, author_id: UserId, form: NewComment) -> Result<Comment> {
        let author = self.users.ensure_exists(author_id)?.author_info();
        let post_author = self.posts.ensure_exists(form.post_id)?.author_id;
        self.content_validator().validate(&form.content)?;

        let parent_author = match form.parent_id {
            Some(parent_id) => self.comments.get(parent_id).map(|p| p.author_id),
            None => None,
        };

        let comment = self.comments.create(author_id, author.clone(), form)?;

        match (comment.parent_id, parent_author) {
            (Some(parent_id), Some(recipient)) if recipient != author_id => {
                self.notifications.push(
                    recipient,
                    author_id,
                    NotificationKind::Reply {
                        parent_id,
                        comment_id: comment.id,
                    },
                    format!("{} replied to your comment", author.username),
                );
            }
            (None, _) if post_author != author_id => {
                self.notifications.push(
                    post_author,
                    author_id,
                    NotificationKind::Comment {
                        post_id: comment.post_id,
                        comment_id: comment.id,
                    },
                    format!("{} commented on your post", author.username),
                );
            }
            _ => {}
        }

        Ok(comment)
    }

    /// Edit a comment's content
    pub fn update_comment(&mut self, id: CommentId, content: String) -> Result<()> {
        self.content_validator().validate(&content)?;
        self.comments.update_content(id, content)
    }

    /// The ordered comment forest for a post
    pub fn comment_forest(&self, post_id: PostId) -> Result<Vec<CommentNode>> {
        self.posts.ensure_exists(post_id)?;
        Ok(self.comments.forest(post_id))
    }

    /// Delete a comment and all its descendants, including their ratings
    pub fn delete_comment(&mut self, id: CommentId) -> Result<Vec<Comment>> {
        let removed = self.comments.delete_cascade(id)?;
        for comment in &removed {
            self.ratings.purge_target(RatingTarget::Comment(comment.id));
        }
        Ok(removed)
    }

    /// Rate a comment. Re-rating replaces.
    pub fn rate_comment(
        &mut self,
        user_id: UserId,
        comment_id: CommentId,
        kind: RatingKind,
    ) -> Result<Option<Rating>> {
        self.users.ensure_exists(user_id)?;
        if self.comments.get(comment_id).is_none() {
            return Err(agora_core::AgoraError::CommentNotFound(comment_id));
        }
        Ok(self
            .ratings
            .rate(user_id, RatingTarget::Comment(comment_id), kind))
    }

    // ---- messages ----

    /// Send a direct message, notifying the receiver
    pub fn send_message(&mut self, sender_id: UserId, form: NewMessage) -> Result<Message> {
        let sender = self.users.ensure_exists(sender_id)?.username.clone();
        self.users.ensure_exists(form.receiver_id)?;
        self.content_validator().validate(&form.content)?;

        let message = self.messages.send(sender_id, form)?;
        self.notifications.push(
            message.receiver_id,
            sender_id,
            NotificationKind::Message {
                message_id: message.id,
            },
            format!("{} sent you a message", sender),
        );
        Ok(message)
    }

    /// Conversation summaries for a user, most recent first
    pub fn conversations(&self, user_id: UserId) -> Result<Vec<Conversation>> {
        self.users.ensure_exists(user_id)?;
        Ok(self.messages.conversations_for(user_id))
    }

    // ---- explore ----

    /// Posts with the highest engagement first
    pub fn trending(&self, limit: usize) -> Vec<(Post, PostStats)> {
        let mut scored: Vec<(Post, PostStats)> = self
            .posts
            .recent()
            .into_iter()
            .map(|p| {
                let (likes, dislikes) = self.ratings.counts(RatingTarget::Post(p.id));
                let stats = PostStats {
                    post_id: p.id,
                    likes,
                    dislikes,
                    comments: self.comments.count_for_post(p.id),
                };
                (p.clone(), stats)
            })
            .collect();
        scored.sort_by(|a, b| {
            b.1.engagement()
                .cmp(&a.1.engagement())
                .then(b.0.id.cmp(&a.0.id))
        });
        scored.truncate(limit);
        scored
    }

    /// Users the given user does not follow yet, most followed first
    pub fn suggested_users(&self, for_user: UserId, limit: usize) -> Vec<User> {
        let following = self.follows.following_of(for_user);
        let mut candidates: Vec<&User> = self
            .users
            .all()
            .into_iter()
            .filter(|u| u.id != for_user && !following.contains(&u.id))
            .collect();
        candidates.sort_by(|a, b| {
            self.follows
                .follower_count(b.id)
                .cmp(&self.follows.follower_count(a.id))
                .then(a.id.cmp(&b.id))
        });
        candidates.truncate(limit);
        candidates.into_iter().cloned().collect()
    }

    /// Most-followed tags
    pub fn popular_tags(&self, limit: usize) -> Vec<Tag> {
        self.tags.popular(limit).into_iter().cloned().collect()
    }

    /// Groups with the most members
    pub fn active_groups(&self, limit: usize) -> Vec<Group> {
        self.groups.active(limit).into_iter().cloned().collect()
    }

    /// Case-insensitive search across users, posts, tags and groups
    pub fn search(&self, query: &str) -> SearchResults {
        let limit = self.config.search.max_results;
        SearchResults {
            users: self.users.search(query, limit).into_iter().cloned().collect(),
            posts: self.posts.search(query, limit).into_iter().cloned().collect(),
            tags: self.tags.search(query, limit).into_iter().cloned().collect(),
            groups: self.groups.search(query, limit).into_iter().cloned().collect(),
        }
    }

    // ---- tags and groups ----

    /// Follow a tag
    pub fn follow_tag(&mut self, user_id: UserId, tag_id: TagId) -> Result<bool> {
        self.users.ensure_exists(user_id)?;
        self.tags.follow(user_id, tag_id)
    }

    /// Join a group
    pub fn join_group(&mut self, user_id: UserId, group_id: GroupId) -> Result<bool> {
        self.users.ensure_exists(user_id)?;
        self.groups.join(user_id, group_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn ctx_with_users() -> (AppContext, UserId, UserId) {
        let mut ctx = AppContext::new(Config::default());
        let alice = ctx
            .register_user(NewUser {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1994, 3, 14).unwrap(),
            })
            .unwrap();
        let bob = ctx
            .register_user(NewUser {
                username: "bob".to_string(),
                email: "bob@example.com".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1990, 7, 2).unwrap(),
            })
            .unwrap();
        (ctx, alice.id, bob.id)
    }

    #[test]
    fn test_comment_notifies_post_author() {
        let (mut ctx, alice, bob) = ctx_with_users();
        let post = ctx.create_post(alice, NewPost::text("Hello")).unwrap();

        ctx.create_comment(bob, NewComment::on_post(post.id, "Hi!"))
            .unwrap();

        let inbox = ctx.notifications.for_user(alice);
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].body, "bob commented on your post");
    }

    #[test]
    fn test_own_comment_does_not_notify() {
        let (mut ctx, alice, _) = ctx_with_users();
        let post = ctx.create_post(alice, NewPost::text("Hello")).unwrap();

        ctx.create_comment(alice, NewComment::on_post(post.id, "First!"))
            .unwrap();

        assert_eq!(ctx.notifications.for_user(alice).len(), 0);
    }

    #[test]
    fn test_reply_notifies_parent_author_not_post_author() {
        let (mut ctx, alice, bob) = ctx_with_users();
        let post = ctx.create_post(alice, NewPost::text("Hello")).unwrap();
        let root = ctx
            .create_comment(bob, NewComment::on_post(post.id, "Hi"))
            .unwrap();

        ctx.create_comment(alice, NewComment::reply_to(post.id, root.id, "Welcome"))
            .unwrap();

        let bob_inbox = ctx.notifications.for_user(bob);
        assert_eq!(bob_inbox.len(), 1);
        assert_eq!(bob_inbox[0].body, "alice replied to your comment");
        // alice only has the original comment notification
        assert_eq!(ctx.notifications.for_user(alice).len(), 1);
    }

    #[test]
    fn test_delete_post_removes_comments_and_ratings() {
        let (mut ctx, alice, bob) = ctx_with_users();
        let post = ctx.create_post(alice, NewPost::text("Hello")).unwrap();
        let root = ctx
            .create_comment(bob, NewComment::on_post(post.id, "Hi"))
            .unwrap();
        ctx.create_comment(alice, NewComment::reply_to(post.id, root.id, "Yo"))
            .unwrap();
        ctx.rate_post(bob, post.id, RatingKind::Like).unwrap();
        ctx.rate_comment(alice, root.id, RatingKind::Like).unwrap();

        ctx.delete_post(post.id).unwrap();

        assert!(ctx.posts.get(post.id).is_none());
        assert_eq!(ctx.comments.count(), 0);
        assert_eq!(ctx.ratings.count(), 0);
    }

    #[test]
    fn test_fresh_like_notifies_author_once() {
        let (mut ctx, alice, bob) = ctx_with_users();
        let post = ctx.create_post(alice, NewPost::text("Hello")).unwrap();

        ctx.rate_post(bob, post.id, RatingKind::Like).unwrap();
        // re-rating replaces and stays silent
        ctx.rate_post(bob, post.id, RatingKind::Like).unwrap();

        assert_eq!(ctx.notifications.for_user(alice).len(), 1);
        let (likes, _) = ctx.ratings.counts(RatingTarget::Post(post.id));
        assert_eq!(likes, 1);
    }

    #[test]
    fn test_timeline_includes_own_and_followed_posts() {
        let (mut ctx, alice, bob) = ctx_with_users();
        let own = ctx.create_post(alice, NewPost::text("mine")).unwrap();
        let followed = ctx.create_post(bob, NewPost::text("theirs")).unwrap();
        ctx.follow(alice, bob).unwrap();

        let carol = ctx
            .register_user(NewUser {
                username: "carol".to_string(),
                email: "carol@example.com".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1998, 11, 30).unwrap(),
            })
            .unwrap();
        ctx.create_post(carol.id, NewPost::text("invisible")).unwrap();

        let timeline = ctx.timeline(alice).unwrap();
        let ids: Vec<_> = timeline.iter().map(|p| p.id).collect();
        assert!(ids.contains(&own.id));
        assert!(ids.contains(&followed.id));
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_follow_notifies_target() {
        let (mut ctx, alice, bob) = ctx_with_users();

        assert!(ctx.follow(alice, bob).unwrap());
        assert!(!ctx.follow(alice, bob).unwrap());

        assert_eq!(ctx.notifications.for_user(bob).len(), 1);
    }

    #[test]
    fn test_post_stats() {
        let (mut ctx, alice, bob) = ctx_with_users();
        let post = ctx.create_post(alice, NewPost::text("Hello")).unwrap();
        ctx.rate_post(bob, post.id, RatingKind::Like).unwrap();
        ctx.create_comment(bob, NewComment::on_post(post.id, "Hi"))
            .unwrap();

        let stats = ctx.post_stats(post.id).unwrap();
        assert_eq!(stats.likes, 1);
        assert_eq!(stats.dislikes, 0);
        assert_eq!(stats.comments, 1);
    }

    #[test]
    fn test_trending_ranks_by_engagement() {
        let (mut ctx, alice, bob) = ctx_with_users();
        let quiet = ctx.create_post(alice, NewPost::text("quiet")).unwrap();
        let busy = ctx.create_post(alice, NewPost::text("busy")).unwrap();
        ctx.rate_post(bob, busy.id, RatingKind::Like).unwrap();
        ctx.create_comment(bob, NewComment::on_post(busy.id, "nice"))
            .unwrap();

        let trending = ctx.trending(10);
        assert_eq!(trending[0].0.id, busy.id);
        assert_eq!(trending[1].0.id, quiet.id);
    }

    #[test]
    fn test_suggested_users_excludes_followed() {
        let (mut ctx, alice, bob) = ctx_with_users();
        ctx.follow(alice, bob).unwrap();

        let suggested = ctx.suggested_users(alice, 10);
        assert!(suggested.is_empty());
    }

    #[test]
    fn test_search_spans_all_kinds() {
        let (mut ctx, alice, _) = ctx_with_users();
        ctx.create_post(alice, NewPost::text("rust is great")).unwrap();
        ctx.tags.create("rustlang").unwrap();
        ctx.groups.create(alice, "Rust Meetup", "").unwrap();

        let results = ctx.search("rust");
        assert_eq!(results.posts.len(), 1);
        assert_eq!(results.tags.len(), 1);
        assert_eq!(results.groups.len(), 1);
        assert_eq!(results.total(), 3);
    }

    #[test]
    fn test_send_message_notifies_receiver() {
        let (mut ctx, alice, bob) = ctx_with_users();

        ctx.send_message(
            alice,
            NewMessage {
                receiver_id: bob,
                content: "hey".to_string(),
            },
        )
        .unwrap();

        let inbox = ctx.notifications.for_user(bob);
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].body, "alice sent you a message");
        assert_eq!(ctx.conversations(bob).unwrap().len(), 1);
    }

    #[test]
    fn test_json_snapshot_round_trip() {
        let (mut ctx, alice, bob) = ctx_with_users();
        let post = ctx.create_post(alice, NewPost::text("Hello")).unwrap();
        let root = ctx
            .create_comment(bob, NewComment::on_post(post.id, "Hi"))
            .unwrap();
        ctx.create_comment(alice, NewComment::reply_to(post.id, root.id, "Yo"))
            .unwrap();

        let snapshot = ctx.to_json().unwrap();
        let restored = AppContext::from_json(&snapshot).unwrap();

        assert_eq!(restored.users.count(), 2);
        // the comment store's parent index survives the round trip
        let forest = restored.comment_forest(post.id).unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].replies.len(), 1);
    }

    #[test]
    fn test_comment_length_cap_enforced() {
        let (mut ctx, alice, _) = ctx_with_users();
        ctx.config.comments.max_content_length = 10;
        let post = ctx.create_post(alice, NewPost::text("Hello")).unwrap();

        let result = ctx.create_comment(
            alice,
            NewComment::on_post(post.id, "way past the ten character cap"),
        );
        assert!(result.is_err());
    }
}
