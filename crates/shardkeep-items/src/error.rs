//! Error types for the `shardkeep-items` crate.

use shardkeep_core::timer::TimerError;
use shardkeep_persist::PersistError;
use shardkeep_types::{ActorId, ItemId, ItemKind};

/// Errors that can occur during world operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// No live item has this id.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// No actor has this id.
    #[error("actor not found: {0}")]
    ActorNotFound(ActorId),

    /// An item with this id already exists.
    #[error("duplicate item id: {0}")]
    DuplicateItem(ItemId),

    /// The operation needs a different kind of item.
    #[error("item {item} is a {found}, expected a {expected}")]
    WrongKind {
        /// The offending item.
        item: ItemId,
        /// Kind the operation works on.
        expected: ItemKind,
        /// Kind the item actually is.
        found: ItemKind,
    },

    /// The world state does not allow the operation.
    #[error("precondition failed: {reason}")]
    PreconditionFailed {
        /// What was not satisfied.
        reason: String,
    },

    /// A construction argument is missing, extra, or malformed.
    #[error("invalid construction argument {index} for {kind}: {reason}")]
    InvalidArgument {
        /// The kind being constructed.
        kind: ItemKind,
        /// Zero-based argument position.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// Scheduling or driving a delayed action failed.
    #[error("timer error: {source}")]
    Timer {
        /// The underlying timer error.
        #[from]
        source: TimerError,
    },

    /// Encoding world state failed.
    #[error("persistence error: {source}")]
    Persist {
        /// The underlying persistence error.
        #[from]
        source: PersistError,
    },
}
