//! Content validation shared by comments, posts and messages

use crate::error::{AgoraError, Result};

/// Default maximum content length
pub const MAX_CONTENT_LENGTH: usize = 2000;

/// Validator for user-submitted text content
pub struct ContentValidator {
    max_length: usize,
}

impl ContentValidator {
    /// Create a validator with the default maximum length
    pub fn new() -> Self {
        Self {
            max_length: MAX_CONTENT_LENGTH,
        }
    }

    /// Create a validator with a custom maximum length
    pub fn with_max_length(max_length: usize) -> Self {
        Self { max_length }
    }

    /// Validate content: non-empty after trimming, within the length cap
    pub fn validate(&self, content: &str) -> Result<()> {
        let trimmed = content.trim();

        if trimmed.is_empty() {
            return Err(AgoraError::Validation(
                "content cannot be empty".to_string(),
            ));
        }

        if trimmed.chars().count() > self.max_length {
            return Err(AgoraError::Validation(format!(
                "content exceeds maximum length of {} characters",
                self.max_length
            )));
        }

        Ok(())
    }
}

impl Default for ContentValidator {
    fn default() -> Self {
        Self::new()
    }
}
