//! Notification service facade

use crate::context::AppContext;
use crate::latency::Latency;
use agora_core::error::Result;
use agora_core::notification::Notification;
use agora_core::types::{NotificationId, UserId};
use std::cell::RefCell;
use std::rc::Rc;

/// Notification inbox operations
pub struct NotificationService {
    ctx: Rc<RefCell<AppContext>>,
    latency: Latency,
}

impl NotificationService {
    pub fn new(ctx: Rc<RefCell<AppContext>>) -> Self {
        let latency = super::latency_of(&ctx);
        Self { ctx, latency }
    }

    /// All notifications for a user, newest first
    pub fn list(&self, user_id: UserId) -> Result<Vec<Notification>> {
        self.latency.simulate();
        let ctx = self.ctx.borrow();
        ctx.users.ensure_exists(user_id)?;
        Ok(ctx.notifications.for_user(user_id).into_iter().cloned().collect())
    }

    /// Unread notification count
    pub fn unread_count(&self, user_id: UserId) -> usize {
        self.latency.simulate();
        self.ctx.borrow().notifications.unread_count(user_id)
    }

    /// Mark a single notification as read
    pub fn mark_read(&self, id: NotificationId) -> Result<()> {
        self.latency.simulate();
        self.ctx.borrow_mut().notifications.mark_read(id)
    }

    /// Mark every notification for a user as read; returns how many changed
    pub fn mark_all_read(&self, user_id: UserId) -> usize {
        self.latency.simulate();
        self.ctx.borrow_mut().notifications.mark_all_read(user_id)
    }

    /// Delete a notification
    pub fn delete(&self, id: NotificationId) -> Result<Notification> {
        self.latency.simulate();
        self.ctx.borrow_mut().notifications.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::demo_context;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mark_all_read() {
        let ctx = demo_context();
        let alice = ctx.borrow().users.by_username("alice").expect("seeded").id;
        let service = NotificationService::new(ctx);

        let unread = service.unread_count(alice);
        assert!(unread > 0);
        assert_eq!(service.mark_all_read(alice), unread);
        assert_eq!(service.unread_count(alice), 0);
    }

    #[test]
    fn test_delete_removes_from_list() {
        let ctx = demo_context();
        let alice = ctx.borrow().users.by_username("alice").expect("seeded").id;
        let service = NotificationService::new(ctx);

        let before = service.list(alice).unwrap();
        service.delete(before[0].id).unwrap();
        assert_eq!(service.list(alice).unwrap().len(), before.len() - 1);
    }
}
