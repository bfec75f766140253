//! Core entity structs shared by the item server crates.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::enums::ActorKind;
use crate::ids::ActorId;

/// A cell in the world: map coordinates plus altitude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point3D {
    /// West-east coordinate.
    pub x: i32,
    /// North-south coordinate.
    pub y: i32,
    /// Altitude.
    pub z: i32,
}

impl Point3D {
    /// Construct a point from its coordinates.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Shift the point on the map plane, keeping the altitude.
    ///
    /// Returns `None` if either coordinate would overflow.
    pub const fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        let Some(x) = self.x.checked_add(dx) else {
            return None;
        };
        let Some(y) = self.y.checked_add(dy) else {
            return None;
        };
        Some(Self { x, y, z: self.z })
    }
}

impl core::fmt::Display for Point3D {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// An entity able to move around and trigger item interactions.
///
/// Only the state the items read or write is modelled here; everything
/// else about an actor belongs to the surrounding world simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Unique identifier.
    pub id: ActorId,
    /// Display name.
    pub name: String,
    /// Player or creature.
    pub kind: ActorKind,
    /// Whether the actor is alive. Dead actors may be resurrected.
    pub alive: bool,
    /// Current cell.
    pub location: Point3D,
    /// World time at which a speed probe last marked this actor.
    ///
    /// `None` until the actor first crosses a probe.
    pub last_move_mark: Option<Duration>,
}

impl Actor {
    /// Create a living actor at the given location.
    pub fn new(name: impl Into<String>, kind: ActorKind, location: Point3D) -> Self {
        Self {
            id: ActorId::new(),
            name: name.into(),
            kind,
            alive: true,
            location,
            last_move_mark: None,
        }
    }

    /// Whether a connected player drives this actor.
    pub fn is_player(&self) -> bool {
        self.kind == ActorKind::Player
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_keeps_altitude() {
        let p = Point3D::new(10, 20, 5);
        assert_eq!(p.offset(-2, 3), Some(Point3D::new(8, 23, 5)));
    }

    #[test]
    fn offset_overflow_is_none() {
        let p = Point3D::new(i32::MAX, 0, 0);
        assert_eq!(p.offset(1, 0), None);
    }

    #[test]
    fn new_actor_is_alive_without_mark() {
        let actor = Actor::new("Iolo", ActorKind::Player, Point3D::default());
        assert!(actor.alive);
        assert!(actor.is_player());
        assert_eq!(actor.last_move_mark, None);
    }
}
