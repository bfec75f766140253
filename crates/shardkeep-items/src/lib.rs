//! Item behaviors and the item world for Shardkeep.
//!
//! A [`World`] holds the items and actors of one shard together with the
//! world clock and the delayed-action queue that drives item expiry. Six
//! item classes live here:
//!
//! | Class | Behavior |
//! |-------|----------|
//! | [`Blood`] | Deletes itself after a short random lifespan. |
//! | [`SpeedProbe`] | Reports time between crossings to players. |
//! | [`DropBlocker`] | Refuses drops on its cell. |
//! | [`ResurrectionGate`] | Offers resurrection to dead actors that fit. |
//! | [`Keepsake`] | Thrown once, then cleaned up after a delay. |
//! | [`StackableResource`] | Splits into smaller stacks. |
//!
//! Every item persists as two records: the shared [`ItemBase`] and its
//! class record. Both go through the versioned codec in `shardkeep-persist`.
//!
//! Side effects meant for players (messages, sounds, effects, resurrection
//! offers) are queued as [`Notice`]s and drained by the host.

pub mod base;
pub mod construct;
pub mod error;
pub mod item;
pub mod items;
pub mod notice;
pub mod spatial;
pub mod world;

pub use base::ItemBase;
pub use construct::ConstructArg;
pub use error::WorldError;
pub use item::{Item, ItemBody};
pub use items::{Blood, DropBlocker, Keepsake, ResurrectionGate, SpeedProbe, StackableResource};
pub use notice::Notice;
pub use spatial::{OpenTerrain, Spatial};
pub use world::{DropOutcome, EntryRef, LoadFailure, LoadReport, MoveOverResult, ThrowOutcome, World};
