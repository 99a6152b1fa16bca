//! In-memory post store

use super::model::{NewPost, Post};
use crate::error::{AgoraError, Result};
use crate::types::{PostId, UserId};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Store for posts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostStore {
    posts: HashMap<PostId, Post>,
    next_id: i64,
}

impl PostStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            posts: HashMap::new(),
            next_id: 1,
        }
    }

    /// Create a post, assigning the next id
    pub fn create(&mut self, author_id: UserId, form: NewPost) -> Result<Post> {
        if form.content.trim().is_empty() {
            return Err(AgoraError::Validation(
                "post content cannot be empty".to_string(),
            ));
        }

        let now = Utc::now();
        let post = Post {
            id: PostId::new(self.next_id),
            author_id,
            content: form.content,
            kind: form.kind,
            created_at: now,
            updated_at: now,
        };
        self.next_id += 1;

        self.posts.insert(post.id, post.clone());
        Ok(post)
    }

    /// Get a post by id
    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.get(&id)
    }

    /// Check a post exists, returning an error when not
    pub fn ensure_exists(&self, id: PostId) -> Result<&Post> {
        self.posts.get(&id).ok_or(AgoraError::PostNotFound(id))
    }

    /// Remove a post
    pub fn delete(&mut self, id: PostId) -> Result<Post> {
        self.posts.remove(&id).ok_or(AgoraError::PostNotFound(id))
    }

    /// All posts by one author, newest first
    pub fn by_author(&self, author_id: UserId) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self
            .posts
            .values()
            .filter(|p| p.author_id == author_id)
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        posts
    }

    /// All posts, newest first
    pub fn recent(&self) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.posts.values().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        posts
    }

    /// Case-insensitive content search, newest first
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Post> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<&Post> = self
            .posts
            .values()
            .filter(|p| p.content.to_lowercase().contains(&query))
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        matches.truncate(limit);
        matches
    }

    /// Total post count
    pub fn count(&self) -> usize {
        self.posts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::model::PostKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_and_get() {
        let mut store = PostStore::new();
        let post = store
            .create(UserId::new(1), NewPost::text("hello world"))
            .unwrap();

        assert_eq!(post.id, PostId::new(1));
        assert_eq!(post.kind, PostKind::Text);
        assert_eq!(store.get(post.id).unwrap().content, "hello world");
    }

    #[test]
    fn test_empty_content_rejected() {
        let mut store = PostStore::new();
        assert!(store.create(UserId::new(1), NewPost::text("  ")).is_err());
    }

    #[test]
    fn test_delete() {
        let mut store = PostStore::new();
        let post = store.create(UserId::new(1), NewPost::text("bye")).unwrap();

        store.delete(post.id).unwrap();
        assert!(store.get(post.id).is_none());
        assert!(store.delete(post.id).is_err());
    }

    #[test]
    fn test_by_author_newest_first() {
        let mut store = PostStore::new();
        let author = UserId::new(1);
        let first = store.create(author, NewPost::text("first")).unwrap();
        let second = store.create(author, NewPost::text("second")).unwrap();
        store.create(UserId::new(2), NewPost::text("other")).unwrap();

        let posts = store.by_author(author);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, second.id);
        assert_eq!(posts[1].id, first.id);
    }

    #[test]
    fn test_search() {
        let mut store = PostStore::new();
        store.create(UserId::new(1), NewPost::text("Rust is great")).unwrap();
        store.create(UserId::new(2), NewPost::text("I prefer gardening")).unwrap();

        assert_eq!(store.search("rust", 10).len(), 1);
        assert_eq!(store.search("", 10).len(), 0);
    }
}
