//! In-memory comment store with post and parent indexes

use super::model::{AuthorInfo, Comment, NewComment};
use super::thread::{build_forest, CommentNode};
use crate::error::{AgoraError, Result};
use crate::types::{CommentId, PostId, UserId};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// Store for all comments, indexed by post and by parent comment
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommentStore {
    /// All comments by id
    comments: HashMap<CommentId, Comment>,
    /// Next id to assign
    next_id: i64,
    /// Comment ids per post, in insertion order
    #[serde(skip)]
    by_post: HashMap<PostId, Vec<CommentId>>,
    /// Direct reply ids per parent comment, in insertion order
    #[serde(skip)]
    by_parent: HashMap<CommentId, Vec<CommentId>>,
}

impl CommentStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            comments: HashMap::new(),
            next_id: 1,
            by_post: HashMap::new(),
            by_parent: HashMap::new(),
        }
    }

    /// Create a comment from a submission form, assigning the next id.
    ///
    /// A present parent must already exist and belong to the same post;
    /// since the new id is always fresh, no write through this path can
    /// ever close a parent cycle.
    pub fn create(
        &mut self,
        author_id: UserId,
        author: AuthorInfo,
        form: NewComment,
    ) -> Result<Comment> {
        if form.content.trim().is_empty() {
            return Err(AgoraError::Validation(
                "comment content cannot be empty".to_string(),
            ));
        }

        if let Some(parent_id) = form.parent_id {
            let parent = self
                .comments
                .get(&parent_id)
                .ok_or(AgoraError::CommentNotFound(parent_id))?;
            if parent.post_id != form.post_id {
                return Err(AgoraError::Validation(format!(
                    "parent comment {} belongs to post {}, not post {}",
                    parent_id, parent.post_id, form.post_id
                )));
            }
        }

        let now = Utc::now();
        let comment = Comment {
            id: CommentId::new(self.next_id),
            post_id: form.post_id,
            author_id,
            parent_id: form.parent_id,
            content: form.content,
            created_at: now,
            updated_at: now,
            author,
        };
        self.next_id += 1;

        self.index(&comment);
        self.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    /// Insert a pre-built comment with a caller-assigned id.
    ///
    /// Used for fixtures and bulk loads; parent references are not
    /// validated here, which is what keeps the lenient read path of
    /// [`build_forest`] reachable.
    pub fn insert(&mut self, comment: Comment) -> Result<CommentId> {
        if self.comments.contains_key(&comment.id) {
            return Err(AgoraError::Validation(format!(
                "comment with id {} already exists",
                comment.id
            )));
        }

        self.next_id = self.next_id.max(comment.id.raw() + 1);
        self.index(&comment);
        let id = comment.id;
        self.comments.insert(id, comment);
        Ok(id)
    }

    /// Get a comment by id
    pub fn get(&self, id: CommentId) -> Option<&Comment> {
        self.comments.get(&id)
    }

    /// Update comment content
    pub fn update_content(&mut self, id: CommentId, content: impl Into<String>) -> Result<()> {
        let comment = self
            .comments
            .get_mut(&id)
            .ok_or(AgoraError::CommentNotFound(id))?;
        comment.update_content(content);
        Ok(())
    }

    /// All comments of a post, in insertion order
    pub fn for_post(&self, post_id: PostId) -> Vec<&Comment> {
        self.by_post
            .get(&post_id)
            .map(|ids| ids.iter().filter_map(|id| self.comments.get(id)).collect())
            .unwrap_or_default()
    }

    /// Number of comments on a post
    pub fn count_for_post(&self, post_id: PostId) -> usize {
        self.by_post.get(&post_id).map(Vec::len).unwrap_or(0)
    }

    /// The reply forest of a post (see [`build_forest`] for ordering rules)
    pub fn forest(&self, post_id: PostId) -> Vec<CommentNode> {
        let flat: Vec<Comment> = self
            .for_post(post_id)
            .into_iter()
            .cloned()
            .collect();
        build_forest(flat)
    }

    /// Delete a comment and, transitively, every reply beneath it.
    ///
    /// Traversal is breadth-first over the parent index with a seen-set, so
    /// a cyclic parent chain in raw-inserted data cannot loop it. Returns
    /// the removed comments.
    pub fn delete_cascade(&mut self, id: CommentId) -> Result<Vec<Comment>> {
        if !self.comments.contains_key(&id) {
            return Err(AgoraError::CommentNotFound(id));
        }

        let mut removed = Vec::new();
        let mut seen: HashSet<CommentId> = HashSet::from([id]);
        let mut queue: VecDeque<CommentId> = VecDeque::from([id]);

        while let Some(current) = queue.pop_front() {
            for child in self.by_parent.get(&current).cloned().unwrap_or_default() {
                if seen.insert(child) {
                    queue.push_back(child);
                }
            }
            if let Some(comment) = self.remove_entry(current) {
                removed.push(comment);
            }
        }

        Ok(removed)
    }

    /// Total comment count
    pub fn count(&self) -> usize {
        self.comments.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    fn index(&mut self, comment: &Comment) {
        self.by_post.entry(comment.post_id).or_default().push(comment.id);
        if let Some(parent_id) = comment.parent_id {
            self.by_parent.entry(parent_id).or_default().push(comment.id);
        }
    }

    fn remove_entry(&mut self, id: CommentId) -> Option<Comment> {
        let comment = self.comments.remove(&id)?;

        if let Some(ids) = self.by_post.get_mut(&comment.post_id) {
            ids.retain(|c| *c != id);
            if ids.is_empty() {
                self.by_post.remove(&comment.post_id);
            }
        }
        if let Some(parent_id) = comment.parent_id {
            if let Some(ids) = self.by_parent.get_mut(&parent_id) {
                ids.retain(|c| *c != id);
                if ids.is_empty() {
                    self.by_parent.remove(&parent_id);
                }
            }
        }
        self.by_parent.remove(&id);

        Some(comment)
    }

    /// Rebuild indexes (after deserialization)
    fn rebuild_indexes(&mut self) {
        self.by_post.clear();
        self.by_parent.clear();
        let mut ids: Vec<CommentId> = self.comments.keys().copied().collect();
        // Insertion order is recoverable from the ids.
        ids.sort_unstable();
        for id in ids {
            if let Some(comment) = self.comments.get(&id) {
                let comment = comment.clone();
                self.index(&comment);
            }
        }
    }
}

// Custom deserialization to rebuild the indexes
impl<'de> Deserialize<'de> for CommentStore {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct CommentStoreHelper {
            comments: HashMap<CommentId, Comment>,
            next_id: i64,
        }

        let helper = CommentStoreHelper::deserialize(deserializer)?;
        let mut store = Self {
            comments: helper.comments,
            next_id: helper.next_id,
            by_post: HashMap::new(),
            by_parent: HashMap::new(),
        };
        store.rebuild_indexes();
        Ok(store)
    }
}
