//! Notification data models

use crate::types::{CommentId, MessageId, NotificationId, PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What triggered a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationKind {
    /// Someone commented on the recipient's post
    Comment { post_id: PostId, comment_id: CommentId },
    /// Someone replied to the recipient's comment
    Reply { parent_id: CommentId, comment_id: CommentId },
    /// Someone liked the recipient's post
    Like { post_id: PostId },
    /// Someone started following the recipient
    Follow { follower_id: UserId },
    /// Someone sent the recipient a direct message
    Message { message_id: MessageId },
}

impl NotificationKind {
    /// Short display title for this kind of notification
    pub fn title(&self) -> &'static str {
        match self {
            NotificationKind::Comment { .. } => "New comment",
            NotificationKind::Reply { .. } => "New reply",
            NotificationKind::Like { .. } => "New like",
            NotificationKind::Follow { .. } => "New follower",
            NotificationKind::Message { .. } => "New message",
        }
    }
}

/// A notification delivered to one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification identifier
    pub id: NotificationId,
    /// Receiving user
    pub recipient_id: UserId,
    /// The user whose action triggered this
    pub actor_id: UserId,
    /// What happened
    pub kind: NotificationKind,
    /// Short display title, derived from the kind
    pub title: String,
    /// Short human-readable body
    pub body: String,
    /// When it was created
    pub created_at: DateTime<Utc>,
    /// Whether the recipient has seen it
    #[serde(default)]
    pub is_read: bool,
}
