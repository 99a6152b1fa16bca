//! Comment system module
//!
//! Handles comment records, thread reconstruction and validation.

pub mod model;
pub mod store;
pub mod thread;
pub mod validator;

pub use model::{AuthorInfo, Comment, NewComment};
pub use store::CommentStore;
pub use thread::{build_forest, CommentNode};
pub use validator::ContentValidator;
