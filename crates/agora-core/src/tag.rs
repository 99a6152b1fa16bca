//! Interest tags users can follow

use crate::error::{AgoraError, Result};
use crate::types::{TagId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An interest tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    /// Unique tag identifier
    pub id: TagId,
    /// Tag name, unique case-insensitively
    pub name: String,
    /// When the tag was created
    pub created_at: DateTime<Utc>,
}

/// Store for tags and their followers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagStore {
    tags: HashMap<TagId, Tag>,
    /// Followers per tag, in follow order
    followers: HashMap<TagId, Vec<UserId>>,
    next_id: i64,
}

impl TagStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            tags: HashMap::new(),
            followers: HashMap::new(),
            next_id: 1,
        }
    }

    /// Create a tag; names are unique ignoring case
    pub fn create(&mut self, name: impl Into<String>) -> Result<Tag> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(AgoraError::Validation("tag name cannot be empty".to_string()));
        }
        if self.by_name(trimmed).is_some() {
            return Err(AgoraError::Validation(format!(
                "tag '{}' already exists",
                trimmed
            )));
        }

        let tag = Tag {
            id: TagId::new(self.next_id),
            name: trimmed.to_string(),
            created_at: Utc::now(),
        };
        self.next_id += 1;

        self.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    /// Get a tag by id
    pub fn get(&self, id: TagId) -> Option<&Tag> {
        self.tags.get(&id)
    }

    /// Look up a tag by name, ignoring case
    pub fn by_name(&self, name: &str) -> Option<&Tag> {
        let lower = name.to_lowercase();
        self.tags.values().find(|t| t.name.to_lowercase() == lower)
    }

    /// Follow a tag; returns `false` when already following
    pub fn follow(&mut self, user: UserId, tag: TagId) -> Result<bool> {
        if !self.tags.contains_key(&tag) {
            return Err(AgoraError::TagNotFound(tag));
        }
        let followers = self.followers.entry(tag).or_default();
        if followers.contains(&user) {
            return Ok(false);
        }
        followers.push(user);
        Ok(true)
    }

    /// Unfollow a tag; returns `false` when there was nothing to remove
    pub fn unfollow(&mut self, user: UserId, tag: TagId) -> bool {
        self.followers
            .get_mut(&tag)
            .map(|f| {
                let before = f.len();
                f.retain(|u| *u != user);
                f.len() < before
            })
            .unwrap_or(false)
    }

    /// Number of users following a tag
    pub fn follower_count(&self, tag: TagId) -> usize {
        self.followers.get(&tag).map(Vec::len).unwrap_or(0)
    }

    /// Most-followed tags first
    pub fn popular(&self, limit: usize) -> Vec<&Tag> {
        let mut tags: Vec<&Tag> = self.tags.values().collect();
        tags.sort_by(|a, b| {
            self.follower_count(b.id)
                .cmp(&self.follower_count(a.id))
                .then(a.id.cmp(&b.id))
        });
        tags.truncate(limit);
        tags
    }

    /// Case-insensitive name search
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Tag> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        let mut matches: Vec<&Tag> = self
            .tags
            .values()
            .filter(|t| t.name.to_lowercase().contains(&query))
            .collect();
        matches.sort_by_key(|t| t.id);
        matches.truncate(limit);
        matches
    }

    /// Total tag count
    pub fn count(&self) -> usize {
        self.tags.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_lookup() {
        let mut store = TagStore::new();
        let tag = store.create("rust").unwrap();

        assert_eq!(store.get(tag.id).unwrap().name, "rust");
        assert!(store.by_name("RUST").is_some());
    }

    #[test]
    fn test_duplicate_name_rejected_case_insensitively() {
        let mut store = TagStore::new();
        store.create("Rust").unwrap();
        assert!(store.create("rust").is_err());
    }

    #[test]
    fn test_follow_unfollow() {
        let mut store = TagStore::new();
        let tag = store.create("rust").unwrap();
        let user = UserId::new(1);

        assert!(store.follow(user, tag.id).unwrap());
        assert!(!store.follow(user, tag.id).unwrap());
        assert_eq!(store.follower_count(tag.id), 1);

        assert!(store.unfollow(user, tag.id));
        assert!(!store.unfollow(user, tag.id));
        assert_eq!(store.follower_count(tag.id), 0);
    }

    #[test]
    fn test_follow_missing_tag() {
        let mut store = TagStore::new();
        assert!(store.follow(UserId::new(1), TagId::new(9)).is_err());
    }

    #[test]
    fn test_popular_ranks_by_followers() {
        let mut store = TagStore::new();
        let quiet = store.create("quiet").unwrap();
        let busy = store.create("busy").unwrap();
        for user in 1..=3 {
            store.follow(UserId::new(user), busy.id).unwrap();
        }
        store.follow(UserId::new(1), quiet.id).unwrap();

        let popular = store.popular(2);
        assert_eq!(popular[0].id, busy.id);
        assert_eq!(popular[1].id, quiet.id);
    }

    #[test]
    fn test_search() {
        let mut store = TagStore::new();
        store.create("rustlang").unwrap();
        store.create("gardening").unwrap();

        assert_eq!(store.search("rust", 10).len(), 1);
        assert_eq!(store.search("", 10).len(), 0);
    }
}
