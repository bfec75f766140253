//! Side effects queued for the host to deliver.

use shardkeep_types::{ActorId, Point3D};

/// Something an item wants the outside world to see or do.
///
/// The world never talks to clients directly. Item behaviors push notices
/// into an outbox and the host drains it with
/// [`World::drain_notices`](crate::World::drain_notices).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A text message addressed to one actor.
    Message {
        /// Recipient.
        actor: ActorId,
        /// Message text.
        text: String,
    },

    /// A sound played at a location.
    Sound {
        /// Where the sound originates.
        location: Point3D,
        /// Sound id.
        sound: u16,
    },

    /// A stationary visual effect at a location.
    Effect {
        /// Where the effect plays.
        location: Point3D,
        /// Effect art id.
        effect: u16,
        /// Animation speed.
        speed: u8,
        /// Animation length in frames.
        duration: u8,
    },

    /// Ask the recovery workflow to offer resurrection to a dead actor.
    ResurrectionOffer {
        /// The dead actor.
        actor: ActorId,
        /// Where the offer was triggered.
        location: Point3D,
    },
}

impl Notice {
    /// Build a [`Notice::Message`].
    pub fn message(actor: ActorId, text: impl Into<String>) -> Self {
        Self::Message {
            actor,
            text: text.into(),
        }
    }
}
