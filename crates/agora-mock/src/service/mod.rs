//! Service facades over the application context
//!
//! Each service mimics one remote API surface: it borrows the shared
//! context, applies the configured simulated latency, and returns owned
//! values so callers never hold a borrow across calls.

pub mod comments;
pub mod explore;
pub mod messages;
pub mod notifications;
pub mod users;

pub use comments::CommentService;
pub use explore::ExploreService;
pub use messages::MessageService;
pub use notifications::NotificationService;
pub use users::UserService;

use crate::context::AppContext;
use crate::latency::Latency;
use std::cell::RefCell;
use std::rc::Rc;

fn latency_of(ctx: &Rc<RefCell<AppContext>>) -> Latency {
    Latency::from_millis(ctx.borrow().config.services.latency_ms)
}
