//! In-memory message store and conversation derivation

use super::model::{Conversation, Message, MessageStatus, NewMessage};
use crate::error::{AgoraError, Result};
use crate::types::{MessageId, UserId};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Store for direct messages
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageStore {
    /// All messages in send order
    messages: Vec<Message>,
    next_id: i64,
}

impl MessageStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            next_id: 1,
        }
    }

    /// Send a message from `sender_id`
    pub fn send(&mut self, sender_id: UserId, form: NewMessage) -> Result<Message> {
        if form.content.trim().is_empty() {
            return Err(AgoraError::Validation(
                "message content cannot be empty".to_string(),
            ));
        }

        let message = Message {
            id: MessageId::new(self.next_id),
            sender_id,
            receiver_id: form.receiver_id,
            content: form.content,
            status: MessageStatus::Sent,
            sent_at: Utc::now(),
            received_at: None,
            read_at: None,
        };
        self.next_id += 1;

        self.messages.push(message.clone());
        Ok(message)
    }

    /// Get a message by id
    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// All messages between two users, in send order
    pub fn between(&self, a: UserId, b: UserId) -> Vec<&Message> {
        self.messages
            .iter()
            .filter(|m| {
                (m.sender_id == a && m.receiver_id == b)
                    || (m.sender_id == b && m.receiver_id == a)
            })
            .collect()
    }

    /// Conversation summaries for one user, most recent activity first
    pub fn conversations_for(&self, user: UserId) -> Vec<Conversation> {
        let mut by_other: HashMap<UserId, Conversation> = HashMap::new();

        for message in &self.messages {
            let other = if message.sender_id == user {
                message.receiver_id
            } else if message.receiver_id == user {
                message.sender_id
            } else {
                continue;
            };

            let unread = (message.receiver_id == user && message.status != MessageStatus::Read)
                as usize;

            by_other
                .entry(other)
                .and_modify(|conv| {
                    conv.message_count += 1;
                    conv.unread_count += unread;
                    if message.sent_at >= conv.last_message_at {
                        conv.last_message_at = message.sent_at;
                        conv.last_message = message.content.clone();
                    }
                })
                .or_insert_with(|| Conversation {
                    other_user_id: other,
                    last_message_at: message.sent_at,
                    last_message: message.content.clone(),
                    message_count: 1,
                    unread_count: unread,
                });
        }

        let mut conversations: Vec<Conversation> = by_other.into_values().collect();
        conversations.sort_by(|a, b| {
            b.last_message_at
                .cmp(&a.last_message_at)
                .then(b.other_user_id.cmp(&a.other_user_id))
        });
        conversations
    }

    /// Mark every message sent to `user` by `other` as read; returns how
    /// many changed state
    pub fn mark_conversation_read(&mut self, user: UserId, other: UserId) -> usize {
        let mut changed = 0;
        for message in self
            .messages
            .iter_mut()
            .filter(|m| m.receiver_id == user && m.sender_id == other)
        {
            if message.status != MessageStatus::Read {
                message.mark_read();
                changed += 1;
            }
        }
        changed
    }

    /// Unread message count for a user across all conversations
    pub fn unread_count(&self, user: UserId) -> usize {
        self.messages
            .iter()
            .filter(|m| m.receiver_id == user && m.status != MessageStatus::Read)
            .count()
    }

    /// Total message count
    pub fn count(&self) -> usize {
        self.messages.len()
    }
}
