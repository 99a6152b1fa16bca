//! Comment data models

use crate::types::{CommentId, PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment on a post, optionally replying to another comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment identifier, increasing in creation order
    pub id: CommentId,
    /// The post this comment belongs to
    pub post_id: PostId,
    /// The commenting user
    pub author_id: UserId,
    /// Parent comment on the same post; absent for root comments
    pub parent_id: Option<CommentId>,
    /// Comment content
    pub content: String,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
    /// When the comment was last updated
    pub updated_at: DateTime<Utc>,
    /// Denormalized author display fields (not authoritative)
    #[serde(default)]
    pub author: AuthorInfo,
}

impl Comment {
    /// Check whether this comment anchors a thread
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Update the content and refresh updated_at
    pub fn update_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.updated_at = Utc::now();
    }
}

/// Display fields denormalized from the author's profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorInfo {
    /// Author's username at creation time
    pub username: String,
    /// Author's profile photo at creation time
    pub profile_photo: Option<String>,
}

/// Submission form for a new comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    /// The post to comment on
    pub post_id: PostId,
    /// Parent comment when replying
    pub parent_id: Option<CommentId>,
    /// Comment content
    pub content: String,
}

impl NewComment {
    /// A root comment on a post
    pub fn on_post(post_id: PostId, content: impl Into<String>) -> Self {
        Self {
            post_id,
            parent_id: None,
            content: content.into(),
        }
    }

    /// A reply to an existing comment
    pub fn reply_to(post_id: PostId, parent_id: CommentId, content: impl Into<String>) -> Self {
        Self {
            post_id,
            parent_id: Some(parent_id),
            content: content.into(),
        }
    }
}
