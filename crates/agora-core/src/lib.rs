//! agora-core - Core data layer for the agora social networking app
//!
//! This crate provides the domain model and in-memory stores that stand in
//! for a future backend: users and their follow graph, posts and ratings,
//! comment threads, direct messages, notifications, tags and groups.

pub mod error;
pub mod types;
pub mod config;
pub mod comment;
pub mod user;
pub mod post;
pub mod message;
pub mod notification;
pub mod tag;
pub mod group;

pub use error::{AgoraError, Result};
pub use types::*;
