//! Posts and ratings

pub mod model;
pub mod rating;
pub mod store;

pub use model::{NewPost, Post, PostKind, PostStats};
pub use rating::{Rating, RatingKind, RatingStore, RatingTarget};
pub use store::PostStore;
