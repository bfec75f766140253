//! A gate that offers resurrection to dead players who walk over it.

use shardkeep_persist::{PersistError, RecordReader, RecordWriter, Versioned};
use shardkeep_types::{Actor, Point3D};

use crate::base::ItemBase;
use crate::notice::Notice;

/// Art id of a resurrection gate.
pub const GATE_GRAPHIC: u16 = 0x1F18;
/// Sound played when the gate accepts a dead actor.
pub const GATE_SOUND: u16 = 0x214;
/// Effect shown when the gate accepts a dead actor.
pub const GATE_EFFECT: u16 = 0x376A;
/// Animation speed of [`GATE_EFFECT`].
pub const GATE_EFFECT_SPEED: u8 = 10;
/// Animation length of [`GATE_EFFECT`].
pub const GATE_EFFECT_DURATION: u8 = 16;
/// Body height that must fit on the gate's cell.
pub const GATE_FIT_HEIGHT: u32 = 16;
/// Message sent when a dead actor cannot stand on the gate's cell.
pub const CANNOT_RESURRECT_HERE: &str = "Thou can not be resurrected there!";

/// A gate that offers resurrection to dead actors walking over it.
///
/// The gate never blocks movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResurrectionGate;

impl ResurrectionGate {
    /// Visible, fixed base layer.
    pub const fn base(location: Point3D) -> ItemBase {
        ItemBase::new(GATE_GRAPHIC, location).fixed()
    }

    /// Notices produced when `actor` walks onto the gate at `location`.
    ///
    /// `can_fit` is only consulted for dead actors.
    pub fn react(actor: &Actor, location: Point3D, can_fit: impl FnOnce() -> bool) -> Vec<Notice> {
        if actor.alive {
            return Vec::new();
        }
        if !can_fit() {
            return vec![Notice::message(actor.id, CANNOT_RESURRECT_HERE)];
        }
        vec![
            Notice::Sound {
                location,
                sound: GATE_SOUND,
            },
            Notice::Effect {
                location,
                effect: GATE_EFFECT,
                speed: GATE_EFFECT_SPEED,
                duration: GATE_EFFECT_DURATION,
            },
            Notice::ResurrectionOffer {
                actor: actor.id,
                location,
            },
        ]
    }
}

impl Versioned for ResurrectionGate {
    const SCHEMA: &'static str = "resurrection_gate";
    const CURRENT_VERSION: u32 = 0;

    fn write_fields(&self, _writer: &mut RecordWriter) {}

    fn read_fields(_version: u32, _reader: &mut RecordReader<'_>) -> Result<Self, PersistError> {
        Ok(Self)
    }
}

#[cfg(test)]
mod tests {
    use shardkeep_types::ActorKind;

    use super::*;

    fn ghost() -> Actor {
        let mut actor = Actor::new("Shamino", ActorKind::Player, Point3D::default());
        actor.alive = false;
        actor
    }

    #[test]
    fn living_actors_trigger_nothing() {
        let actor = Actor::new("Shamino", ActorKind::Player, Point3D::default());
        let notices = ResurrectionGate::react(&actor, Point3D::default(), || true);
        assert!(notices.is_empty());
    }

    #[test]
    fn dead_actor_that_fits_gets_an_offer() {
        let actor = ghost();
        let here = Point3D::new(3, 4, 0);
        let notices = ResurrectionGate::react(&actor, here, || true);
        assert_eq!(notices.len(), 3);
        assert_eq!(
            notices.last(),
            Some(&Notice::ResurrectionOffer {
                actor: actor.id,
                location: here,
            })
        );
    }

    #[test]
    fn dead_actor_without_room_is_told_why() {
        let actor = ghost();
        let notices = ResurrectionGate::react(&actor, Point3D::default(), || false);
        assert_eq!(notices, vec![Notice::message(actor.id, CANNOT_RESURRECT_HERE)]);
    }
}
