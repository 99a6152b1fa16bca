//! In-memory notification store

use super::model::{Notification, NotificationKind};
use crate::error::{AgoraError, Result};
use crate::types::{NotificationId, UserId};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Store for notifications
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationStore {
    /// All notifications in creation order
    notifications: Vec<Notification>,
    next_id: i64,
}

impl NotificationStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            notifications: Vec::new(),
            next_id: 1,
        }
    }

    /// Deliver a notification
    pub fn push(
        &mut self,
        recipient_id: UserId,
        actor_id: UserId,
        kind: NotificationKind,
        body: impl Into<String>,
    ) -> NotificationId {
        let id = NotificationId::new(self.next_id);
        self.next_id += 1;

        self.notifications.push(Notification {
            id,
            recipient_id,
            actor_id,
            kind,
            title: kind.title().to_string(),
            body: body.into(),
            created_at: Utc::now(),
            is_read: false,
        });
        id
    }

    /// All notifications for a user, newest first
    pub fn for_user(&self, user: UserId) -> Vec<&Notification> {
        let mut out: Vec<&Notification> = self
            .notifications
            .iter()
            .filter(|n| n.recipient_id == user)
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        out
    }

    /// Unread notification count for a user
    pub fn unread_count(&self, user: UserId) -> usize {
        self.notifications
            .iter()
            .filter(|n| n.recipient_id == user && !n.is_read)
            .count()
    }

    /// Mark one notification as read
    pub fn mark_read(&mut self, id: NotificationId) -> Result<()> {
        let notification = self
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(AgoraError::NotificationNotFound(id))?;
        notification.is_read = true;
        Ok(())
    }

    /// Mark every notification of a user as read; returns how many changed
    pub fn mark_all_read(&mut self, user: UserId) -> usize {
        let mut changed = 0;
        for notification in self
            .notifications
            .iter_mut()
            .filter(|n| n.recipient_id == user && !n.is_read)
        {
            notification.is_read = true;
            changed += 1;
        }
        changed
    }

    /// Remove a notification
    pub fn delete(&mut self, id: NotificationId) -> Result<Notification> {
        let pos = self
            .notifications
            .iter()
            .position(|n| n.id == id)
            .ok_or(AgoraError::NotificationNotFound(id))?;
        Ok(self.notifications.remove(pos))
    }

    /// Total notification count
    pub fn count(&self) -> usize {
        self.notifications.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PostId;

    fn like(post: i64) -> NotificationKind {
        NotificationKind::Like {
            post_id: PostId::new(post),
        }
    }

    #[test]
    fn test_push_and_list_newest_first() {
        let mut store = NotificationStore::new();
        let user = UserId::new(1);
        let first = store.push(user, UserId::new(2), like(1), "bob liked your post");
        let second = store.push(user, UserId::new(3), like(1), "carol liked your post");
        store.push(UserId::new(9), UserId::new(2), like(2), "elsewhere");

        let list = store.for_user(user);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, second);
        assert_eq!(list[1].id, first);
    }

    #[test]
    fn test_unread_and_mark_read() {
        let mut store = NotificationStore::new();
        let user = UserId::new(1);
        let id = store.push(user, UserId::new(2), like(1), "liked");
        store.push(user, UserId::new(3), like(1), "liked");

        assert_eq!(store.unread_count(user), 2);
        store.mark_read(id).unwrap();
        assert_eq!(store.unread_count(user), 1);
    }

    #[test]
    fn test_mark_all_read() {
        let mut store = NotificationStore::new();
        let user = UserId::new(1);
        store.push(user, UserId::new(2), like(1), "a");
        store.push(user, UserId::new(3), like(1), "b");

        assert_eq!(store.mark_all_read(user), 2);
        assert_eq!(store.unread_count(user), 0);
        assert_eq!(store.mark_all_read(user), 0);
    }

    #[test]
    fn test_delete() {
        let mut store = NotificationStore::new();
        let id = store.push(UserId::new(1), UserId::new(2), like(1), "a");

        store.delete(id).unwrap();
        assert_eq!(store.count(), 0);
        assert!(store.delete(id).is_err());
    }

    #[test]
    fn test_mark_read_missing() {
        let mut store = NotificationStore::new();
        assert!(store.mark_read(NotificationId::new(5)).is_err());
    }
}
