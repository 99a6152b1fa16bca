//! Configuration for the agora data layer

use crate::error::{AgoraError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mock service settings
    pub services: ServiceConfig,
    /// Comment settings
    pub comments: CommentConfig,
    /// Feed and explore settings
    pub feed: FeedConfig,
    /// Search settings
    pub search: SearchConfig,
}

impl Config {
    /// Parse a configuration from a TOML string
    pub fn from_toml(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| AgoraError::Config(e.to_string()))
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            AgoraError::Config(format!(
                "failed to read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }
}

/// Mock service behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Simulated network latency in milliseconds (0 disables)
    pub latency_ms: u64,
    /// Base URL used when generating share links
    pub base_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            latency_ms: 0,
            base_url: "https://agora.example".to_string(),
        }
    }
}

/// Comment-related limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentConfig {
    /// Maximum comment content length
    pub max_content_length: usize,
}

impl Default for CommentConfig {
    fn default() -> Self {
        Self {
            max_content_length: 2000,
        }
    }
}

/// Feed and explore limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Number of posts per timeline page
    pub page_size: usize,
    /// Number of trending posts returned by explore
    pub trending_limit: usize,
    /// Number of suggested users returned by explore
    pub suggested_users: usize,
    /// Number of popular tags returned by explore
    pub popular_tags: usize,
    /// Number of active groups returned by explore
    pub active_groups: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            trending_limit: 10,
            suggested_users: 6,
            popular_tags: 6,
            active_groups: 6,
        }
    }
}

/// Search limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum results per entity kind
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_results: 10 }
    }
}
