//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Items and actors each get a strongly-typed ID so an item id can never be
//! handed to an actor lookup. All IDs use UUID v7 (time-ordered), which keeps
//! save-file entries roughly in creation order when sorted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for an item placed in the world.
    ItemId
}

define_id! {
    /// Unique identifier for an actor (player character or creature).
    ActorId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_values() {
        let a = ItemId::new();
        let b = ItemId::new();
        assert_ne!(a, b);
        assert_ne!(a.into_inner(), Uuid::nil());
    }

    #[test]
    fn ids_serialize_as_plain_uuid_strings() {
        let id = ActorId::new();
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, format!("\"{id}\""));
    }

    #[test]
    fn uuid_round_trip() {
        let raw = Uuid::now_v7();
        let id = ItemId::from(raw);
        let back: Uuid = id.into();
        assert_eq!(raw, back);
        assert_eq!(id.to_string(), raw.to_string());
    }
}
