//! User notifications

pub mod model;
pub mod store;

pub use model::{Notification, NotificationKind};
pub use store::NotificationStore;
