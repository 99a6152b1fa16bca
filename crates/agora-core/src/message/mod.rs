//! Direct messages and conversation summaries

pub mod model;
pub mod store;

pub use model::{Conversation, Message, MessageStatus, NewMessage};
pub use store::MessageStore;
