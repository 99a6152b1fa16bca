//! Error types for agora

use crate::types::{CommentId, GroupId, MessageId, NotificationId, PostId, TagId, UserId};
use thiserror::Error;

/// Main error type for the agora data layer
#[derive(Debug, Error)]
pub enum AgoraError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// User not found
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Post not found
    #[error("Post not found: {0}")]
    PostNotFound(PostId),

    /// Comment not found
    #[error("Comment not found: {0}")]
    CommentNotFound(CommentId),

    /// Message not found
    #[error("Message not found: {0}")]
    MessageNotFound(MessageId),

    /// Notification not found
    #[error("Notification not found: {0}")]
    NotificationNotFound(NotificationId),

    /// Tag not found
    #[error("Tag not found: {0}")]
    TagNotFound(TagId),

    /// Group not found
    #[error("Group not found: {0}")]
    GroupNotFound(GroupId),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<AgoraError>,
    },
}

impl AgoraError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        AgoraError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for the agora data layer
pub type Result<T> = std::result::Result<T, AgoraError>;
