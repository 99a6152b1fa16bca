//! agora-mock - Mock backend for the agora social networking app
//!
//! This crate composes the agora-core stores into a single in-memory
//! application context and exposes service facades that mimic a remote
//! API, including optional simulated latency and seeded demo data.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agora_mock::{demo_context, CommentService};
//!
//! let ctx = demo_context();
//! let comments = CommentService::new(ctx.clone());
//! let thread = comments.thread(post_id)?;
//! ```

pub mod context;
pub mod latency;
pub mod seed;
pub mod service;

pub use context::{AppContext, SearchResults};
pub use latency::Latency;
pub use seed::demo_context;
pub use service::{
    CommentService, ExploreService, MessageService, NotificationService, UserService,
};
