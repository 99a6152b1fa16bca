//! Direct message service facade

use crate::context::AppContext;
use crate::latency::Latency;
use agora_core::error::Result;
use agora_core::message::{Conversation, Message, NewMessage};
use agora_core::types::UserId;
use std::cell::RefCell;
use std::rc::Rc;

/// Direct messaging between users
pub struct MessageService {
    ctx: Rc<RefCell<AppContext>>,
    latency: Latency,
}

impl MessageService {
    pub fn new(ctx: Rc<RefCell<AppContext>>) -> Self {
        let latency = super::latency_of(&ctx);
        Self { ctx, latency }
    }

    /// Send a message
    pub fn send(&self, sender_id: UserId, form: NewMessage) -> Result<Message> {
        self.latency.simulate();
        self.ctx.borrow_mut().send_message(sender_id, form)
    }

    /// Conversation summaries, most recently active first
    pub fn conversations(&self, user_id: UserId) -> Result<Vec<Conversation>> {
        self.latency.simulate();
        self.ctx.borrow().conversations(user_id)
    }

    /// Full message history with one other user, in send order
    pub fn history(&self, user_id: UserId, other: UserId) -> Result<Vec<Message>> {
        self.latency.simulate();
        let ctx = self.ctx.borrow();
        ctx.users.ensure_exists(user_id)?;
        ctx.users.ensure_exists(other)?;
        Ok(ctx.messages.between(user_id, other).into_iter().cloned().collect())
    }

    /// Mark every message from `other` to `user_id` as read
    pub fn mark_read(&self, user_id: UserId, other: UserId) -> usize {
        self.latency.simulate();
        self.ctx.borrow_mut().messages.mark_conversation_read(user_id, other)
    }

    /// Unread message count across all conversations
    pub fn unread_count(&self, user_id: UserId) -> usize {
        self.latency.simulate();
        self.ctx.borrow().messages.unread_count(user_id)
    }
}
