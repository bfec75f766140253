//! Shared type definitions for the Shardkeep item server.
//!
//! This crate is the single source of truth for identifiers, coordinates,
//! actors, and the small enumerations shared by the scheduler, the
//! persistence layer, and the item behaviors.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for items and actors
//! - [`enums`] -- Timer priority tiers, item kinds, actor kinds, resources
//! - [`structs`] -- [`Point3D`] and the [`Actor`] record

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{ActorKind, ItemKind, ResourceKind, TimerPriority};
pub use ids::{ActorId, ItemId};
pub use structs::{Actor, Point3D};
