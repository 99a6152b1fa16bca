//! User profiles and the follow graph

pub mod follow;
pub mod model;
pub mod store;

pub use follow::{FollowGraph, FollowStats};
pub use model::{NewUser, ProfileUpdate, User};
pub use store::UserStore;
