//! Actor-driven interactions: walking over items, dropping, throwing, and
//! splitting stacks.

use shardkeep_core::timer::delay_from_secs_f64;
use shardkeep_types::{ActorId, ItemId, ItemKind, Point3D};
use tracing::{debug, info};

use super::World;
use crate::error::WorldError;
use crate::item::{Item, ItemBody};
use crate::items::{
    DROP_REFUSED, GATE_FIT_HEIGHT, KEEPSAKE_ALREADY_THROWN, ResurrectionGate, SpeedProbe,
    StackableResource,
};
use crate::notice::Notice;

/// What happened when an actor entered a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOverResult {
    /// Whether the move is allowed. No current item blocks movement.
    pub allowed: bool,
    /// Number of items on the cell that reacted to the actor.
    pub triggered: usize,
}

/// Result of dropping an item on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The item now lies on the cell.
    Dropped {
        /// Where it landed.
        location: Point3D,
    },
    /// A drop blocker on the cell refused the drop.
    Refused {
        /// The refusing blocker.
        blocker: ItemId,
    },
}

/// Result of throwing a keepsake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrowOutcome {
    /// The keepsake landed and its cleanup is scheduled.
    Landed {
        /// Where it landed.
        location: Point3D,
    },
    /// The keepsake had already been thrown; nothing changed.
    AlreadyThrown,
}

impl World {
    /// Move `actor` onto `location` and let the items there react.
    ///
    /// Speed probes time player crossings and resurrection gates offer
    /// resurrection to dead actors. Neither blocks the move.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ActorNotFound`] for an unknown actor.
    pub fn move_over(
        &mut self,
        actor: ActorId,
        location: Point3D,
    ) -> Result<MoveOverResult, WorldError> {
        let walker = self
            .actors
            .get_mut(&actor)
            .ok_or(WorldError::ActorNotFound(actor))?;
        walker.location = location;

        let reactive: Vec<ItemKind> = self
            .items_at(location)
            .map(Item::kind)
            .filter(|kind| matches!(kind, ItemKind::SpeedProbe | ItemKind::ResurrectionGate))
            .collect();
        let triggered = reactive.len();
        for kind in reactive {
            match kind {
                ItemKind::SpeedProbe => self.probe_crossed(actor),
                ItemKind::ResurrectionGate => self.gate_crossed(actor, location),
                _ => {}
            }
        }

        Ok(MoveOverResult {
            allowed: true,
            triggered,
        })
    }

    fn probe_crossed(&mut self, actor: ActorId) {
        let now = self.clock.now();
        let Some(walker) = self.actors.get_mut(&actor) else {
            return;
        };
        if let Some(report) = SpeedProbe::cross(walker, now) {
            debug!(actor = %actor, report = %report, "speed probe crossed");
            self.push_notice(Notice::message(actor, report));
        }
    }

    fn gate_crossed(&mut self, actor: ActorId, location: Point3D) {
        let Some(walker) = self.actors.get(&actor) else {
            return;
        };
        let spatial = &self.spatial;
        let notices = ResurrectionGate::react(walker, location, || {
            spatial.can_fit(location, GATE_FIT_HEIGHT)
        });
        if !notices.is_empty() {
            debug!(actor = %actor, location = %location, notices = notices.len(), "resurrection gate crossed");
        }
        self.notices.extend(notices);
    }

    /// Drop `item` held by `actor` onto `location`.
    ///
    /// A drop blocker on the cell refuses the drop and the actor is told.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ActorNotFound`] or [`WorldError::ItemNotFound`]
    /// for unknown ids, or [`WorldError::PreconditionFailed`] if the item is
    /// fixed in place.
    pub fn drop_item_at(
        &mut self,
        actor: ActorId,
        item: ItemId,
        location: Point3D,
    ) -> Result<DropOutcome, WorldError> {
        if !self.actors.contains_key(&actor) {
            return Err(WorldError::ActorNotFound(actor));
        }
        let dropped = self.items.get(&item).ok_or(WorldError::ItemNotFound(item))?;
        if !dropped.base.movable {
            return Err(WorldError::PreconditionFailed {
                reason: format!("item {item} is fixed in place"),
            });
        }

        let blocker = self
            .items_at(location)
            .find(|candidate| matches!(candidate.body, ItemBody::DropBlocker(_)))
            .map(Item::id);
        if let Some(blocker) = blocker {
            debug!(actor = %actor, item = %item, blocker = %blocker, "drop refused");
            self.push_notice(Notice::message(actor, DROP_REFUSED));
            return Ok(DropOutcome::Refused { blocker });
        }

        if let Some(dropped) = self.items.get_mut(&item) {
            dropped.base.location = location;
        }
        Ok(DropOutcome::Dropped { location })
    }

    /// Throw a keepsake at `target`.
    ///
    /// The keepsake lands on a spawn-safe cell near the target (or the
    /// target itself), becomes consumed, and is deleted after the configured
    /// cleanup delay. Throwing an already consumed keepsake only tells the
    /// actor.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ActorNotFound`] or [`WorldError::ItemNotFound`]
    /// for unknown ids, [`WorldError::WrongKind`] if the item is not a
    /// keepsake, or [`WorldError::Timer`] if the cleanup delay is invalid.
    pub fn throw_keepsake(
        &mut self,
        actor: ActorId,
        item: ItemId,
        target: Point3D,
    ) -> Result<ThrowOutcome, WorldError> {
        if !self.actors.contains_key(&actor) {
            return Err(WorldError::ActorNotFound(actor));
        }
        let thrown = self.items.get(&item).ok_or(WorldError::ItemNotFound(item))?;
        let ItemBody::Keepsake(keepsake) = thrown.body else {
            return Err(WorldError::WrongKind {
                item,
                expected: ItemKind::Keepsake,
                found: thrown.kind(),
            });
        };
        if keepsake.consumed {
            self.push_notice(Notice::message(actor, KEEPSAKE_ALREADY_THROWN));
            return Ok(ThrowOutcome::AlreadyThrown);
        }

        let cleanup = delay_from_secs_f64(self.settings.keepsake_cleanup_secs)?;
        let landing = self
            .spatial
            .find_spawn_near(target, self.settings.keepsake_throw_range)
            .unwrap_or(target);
        if let Some(thrown) = self.items.get_mut(&item) {
            thrown.base.location = landing;
            if let ItemBody::Keepsake(keepsake) = &mut thrown.body {
                keepsake.consume();
            }
        }
        self.schedule_deletion(item, cleanup)?;

        info!(actor = %actor, item = %item, location = %landing, "keepsake thrown");
        Ok(ThrowOutcome::Landed { location: landing })
    }

    /// Take `amount` off a resource stack into a new stack on the same cell.
    ///
    /// Returns the id of the new stack; the original keeps the remainder.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ItemNotFound`] for an unknown item,
    /// [`WorldError::WrongKind`] if it is not a stack, or
    /// [`WorldError::PreconditionFailed`] unless `0 < amount < current`.
    pub fn split_stack(&mut self, item: ItemId, amount: u32) -> Result<ItemId, WorldError> {
        let stack = self.items.get_mut(&item).ok_or(WorldError::ItemNotFound(item))?;
        let ItemBody::StackableResource(pile) = stack.body else {
            return Err(WorldError::WrongKind {
                item,
                expected: ItemKind::StackableResource,
                found: stack.kind(),
            });
        };
        let current = stack.base.amount;
        let remainder = StackableResource::split_remainder(current, amount).ok_or_else(|| {
            WorldError::PreconditionFailed {
                reason: format!("cannot split {amount} from a stack of {current}"),
            }
        })?;
        stack.base.amount = remainder;
        let base = stack.base.clone().with_amount(amount);

        let split = self.spawn_item(base, ItemBody::StackableResource(pile))?;
        debug!(item = %item, split = %split, amount, remainder, "stack split");
        Ok(split)
    }
}
