//! Core identifier types for agora
//!
//! Every entity is addressed by a caller-visible sequential integer id,
//! assigned by its store in creation order.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Create an id from a raw integer
            pub fn new(raw: i64) -> Self {
                $name(raw)
            }

            /// Get the raw integer value
            pub fn raw(&self) -> i64 {
                self.0
            }

            /// The id that follows this one in creation order
            pub fn next(&self) -> Self {
                $name(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                $name(raw)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a user
    UserId
);
define_id!(
    /// Unique identifier for a post
    PostId
);
define_id!(
    /// Unique identifier for a comment
    ///
    /// Comment ids are monotonically increasing in creation order, which
    /// makes insertion order recoverable from the ids alone.
    CommentId
);
define_id!(
    /// Unique identifier for a rating
    RatingId
);
define_id!(
    /// Unique identifier for a direct message
    MessageId
);
define_id!(
    /// Unique identifier for a notification
    NotificationId
);
define_id!(
    /// Unique identifier for a tag
    TagId
);
define_id!(
    /// Unique identifier for a group
    GroupId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(CommentId::new(42).to_string(), "42");
        assert_eq!(UserId::from(7).to_string(), "7");
    }

    #[test]
    fn test_id_ordering_follows_creation_order() {
        let first = PostId::new(1);
        let second = first.next();
        assert!(first < second);
        assert_eq!(second.raw(), 2);
    }

    #[test]
    fn test_id_serializes_transparently() {
        let id = CommentId::new(3);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "3");

        let back: CommentId = serde_json::from_str("3").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_distinct_id_types_hash_independently() {
        use std::collections::HashMap;
        let mut map: HashMap<UserId, &str> = HashMap::new();
        map.insert(UserId::new(1), "alice");
        assert_eq!(map.get(&UserId::new(1)), Some(&"alice"));
    }
}
