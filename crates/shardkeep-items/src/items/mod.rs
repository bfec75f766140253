//! The item classes.
//!
//! Each class owns its class-layer record schema, its default base layer,
//! and the pure parts of its behavior. The [`World`](crate::World) decides
//! when a behavior runs and applies its results.

mod blood;
mod drop_blocker;
mod keepsake;
mod resurrection_gate;
mod speed_probe;
mod stackable;

pub use blood::{BLOOD_GRAPHICS, Blood};
pub use drop_blocker::{DROP_BLOCKER_GRAPHIC, DROP_REFUSED, DropBlocker};
pub use keepsake::{KEEPSAKE_ALREADY_THROWN, KEEPSAKE_GRAPHIC, Keepsake};
pub use resurrection_gate::{
    CANNOT_RESURRECT_HERE, GATE_EFFECT, GATE_EFFECT_DURATION, GATE_EFFECT_SPEED, GATE_FIT_HEIGHT,
    GATE_GRAPHIC, GATE_SOUND, ResurrectionGate,
};
pub use speed_probe::{SPEED_PROBE_GRAPHIC, SpeedProbe};
pub use stackable::{LEGACY_HUE, REMAPPED_HUE, StackableResource};
