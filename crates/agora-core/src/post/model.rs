//! Post data models

use crate::types::{PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post on the timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique post identifier
    pub id: PostId,
    /// The posting user
    pub author_id: UserId,
    /// Post content
    pub content: String,
    /// Kind of post
    pub kind: PostKind,
    /// When the post was created
    pub created_at: DateTime<Utc>,
    /// When the post was last updated
    pub updated_at: DateTime<Utc>,
}

/// Kind of post content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    /// Plain text post
    Text,
    /// Post with an attached image
    Image,
}

impl Default for PostKind {
    fn default() -> Self {
        PostKind::Text
    }
}

/// Submission form for a new post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    /// Post content
    pub content: String,
    /// Kind of post
    #[serde(default)]
    pub kind: PostKind,
}

impl NewPost {
    /// A plain text post
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: PostKind::Text,
        }
    }
}

/// Engagement statistics for a post, computed on demand from the rating
/// and comment stores rather than cached on the post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostStats {
    pub post_id: PostId,
    pub likes: usize,
    pub dislikes: usize,
    pub comments: usize,
}

impl PostStats {
    /// Likes minus dislikes
    pub fn net_score(&self) -> i64 {
        self.likes as i64 - self.dislikes as i64
    }

    /// Ranking score for trending: net score plus comment activity
    pub fn engagement(&self) -> i64 {
        self.net_score() + self.comments as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&PostKind::Text).unwrap(), "\"text\"");
        assert_eq!(serde_json::to_string(&PostKind::Image).unwrap(), "\"image\"");
    }

    #[test]
    fn test_stats_scores() {
        let stats = PostStats {
            post_id: PostId::new(1),
            likes: 10,
            dislikes: 3,
            comments: 4,
        };
        assert_eq!(stats.net_score(), 7);
        assert_eq!(stats.engagement(), 11);
    }
}
