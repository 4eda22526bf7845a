//! Identifier types for upstream resources.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! upstream_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw upstream identifier.
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the raw upstream identifier.
            #[must_use]
            pub const fn value(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

upstream_id!(
    /// Identifier of a project (bucket).
    ProjectId
);
upstream_id!(
    /// Identifier of a todo-list.
    TodoListId
);
upstream_id!(
    /// Identifier of a group inside a todo-list.
    GroupId
);
upstream_id!(
    /// Identifier of a todo item; the canonical task key.
    ItemId
);
