//! Comment service facade

use crate::context::AppContext;
use crate::latency::Latency;
use agora_core::comment::{Comment, CommentNode, NewComment};
use agora_core::error::Result;
use agora_core::post::{Rating, RatingKind};
use agora_core::types::{CommentId, PostId, UserId};
use std::cell::RefCell;
use std::rc::Rc;

/// Comment operations: threads, replies, edits, deletes and ratings
pub struct CommentService {
    ctx: Rc<RefCell<AppContext>>,
    latency: Latency,
}

impl CommentService {
    pub fn new(ctx: Rc<RefCell<AppContext>>) -> Self {
        let latency = super::latency_of(&ctx);
        Self { ctx, latency }
    }

    /// The ordered comment forest for a post
    pub fn thread(&self, post_id: PostId) -> Result<Vec<CommentNode>> {
        self.latency.simulate();
        self.ctx.borrow().comment_forest(post_id)
    }

    /// All comments on a post in storage order, unthreaded
    pub fn flat(&self, post_id: PostId) -> Result<Vec<Comment>> {
        self.latency.simulate();
        let ctx = self.ctx.borrow();
        ctx.posts.ensure_exists(post_id)?;
        Ok(ctx.comments.for_post(post_id).into_iter().cloned().collect())
    }

    /// Number of comments on a post, replies included
    pub fn count(&self, post_id: PostId) -> Result<usize> {
        self.latency.simulate();
        let ctx = self.ctx.borrow();
        ctx.posts.ensure_exists(post_id)?;
        Ok(ctx.comments.count_for_post(post_id))
    }

    /// Post a comment or reply
    pub fn create(&self, author_id: UserId, form: NewComment) -> Result<Comment> {
        self.latency.simulate();
        self.ctx.borrow_mut().create_comment(author_id, form)
    }

    /// Edit a comment
    pub fn update(&self, id: CommentId, content: String) -> Result<()> {
        self.latency.simulate();
        self.ctx.borrow_mut().update_comment(id, content)
    }

    /// Delete a comment with all its descendants; returns what was removed
    pub fn delete(&self, id: CommentId) -> Result<Vec<Comment>> {
        self.latency.simulate();
        self.ctx.borrow_mut().delete_comment(id)
    }

    /// Like or dislike a comment
    pub fn rate(
        &self,
        user_id: UserId,
        comment_id: CommentId,
        kind: RatingKind,
    ) -> Result<Option<Rating>> {
        self.latency.simulate();
        self.ctx.borrow_mut().rate_comment(user_id, comment_id, kind)
    }
}
