//! Message data models

use crate::types::{MessageId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Delivery status of a message. Transitions are monotone:
/// sent -> received -> read, never backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Sent,
    Received,
    Read,
}

/// A direct message between two users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier
    pub id: MessageId,
    /// Sending user
    pub sender_id: UserId,
    /// Receiving user
    pub receiver_id: UserId,
    /// Message content
    pub content: String,
    /// Delivery status
    pub status: MessageStatus,
    /// When the message was sent
    pub sent_at: DateTime<Utc>,
    /// When the message was received
    pub received_at: Option<DateTime<Utc>>,
    /// When the message was read
    pub read_at: Option<DateTime<Utc>>,
}

impl Message {
    /// Mark as received; a no-op once already received or read
    pub fn mark_received(&mut self) {
        if self.status < MessageStatus::Received {
            self.status = MessageStatus::Received;
            self.received_at = Some(Utc::now());
        }
    }

    /// Mark as read; fills in received_at when delivery was never recorded
    pub fn mark_read(&mut self) {
        if self.status < MessageStatus::Read {
            let now = Utc::now();
            if self.received_at.is_none() {
                self.received_at = Some(now);
            }
            self.status = MessageStatus::Read;
            self.read_at = Some(now);
        }
    }
}

/// Submission form for a new message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
    /// Receiving user
    pub receiver_id: UserId,
    /// Message content
    pub content: String,
}

/// Summary of all messages between one pair of users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// The other party, from the perspective of the requesting user
    pub other_user_id: UserId,
    /// When the most recent message was sent
    pub last_message_at: DateTime<Utc>,
    /// Content of the most recent message
    pub last_message: String,
    /// Total messages exchanged
    pub message_count: usize,
    /// Messages to the requesting user not yet read
    pub unread_count: usize,
}
