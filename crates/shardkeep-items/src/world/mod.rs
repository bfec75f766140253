//! The item world: items, actors, the clock, and the delayed-action queue.
//!
//! # Ownership
//!
//! The world owns every item and its own [`TimerQueue`]. A delayed action
//! never holds an item, only its [`ItemId`]; when it fires it looks the
//! item up again and does nothing if the item is gone. Deleting an item
//! cancels its pending action.

mod interact;
mod persist;

use core::time::Duration;
use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use shardkeep_core::clock::GameClock;
use shardkeep_core::config::ItemsConfig;
use shardkeep_core::timer::{self, TimerHost, TimerQueue};
use shardkeep_types::{Actor, ActorId, ItemId, ItemKind, Point3D, TimerPriority};
use tracing::{debug, info};

use crate::base::ItemBase;
use crate::construct::{self, ConstructArg};
use crate::error::WorldError;
use crate::item::{Item, ItemBody};
use crate::items::Blood;
use crate::notice::Notice;
use crate::spatial::Spatial;

pub use interact::{DropOutcome, MoveOverResult, ThrowOutcome};
pub use persist::{EntryRef, LoadFailure, LoadReport};

/// All state of one shard's item layer.
pub struct World {
    clock: GameClock,
    timers: TimerQueue<Self>,
    items: BTreeMap<ItemId, Item>,
    actors: BTreeMap<ActorId, Actor>,
    spatial: Box<dyn Spatial>,
    settings: ItemsConfig,
    rng: StdRng,
    notices: Vec<Notice>,
}

impl core::fmt::Debug for World {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("World")
            .field("now", &self.clock.now())
            .field("items", &self.items.len())
            .field("actors", &self.actors.len())
            .field("pending_timers", &self.timers.len())
            .field("notices", &self.notices.len())
            .finish_non_exhaustive()
    }
}

impl TimerHost for World {
    fn clock(&self) -> &GameClock {
        &self.clock
    }

    fn clock_mut(&mut self) -> &mut GameClock {
        &mut self.clock
    }

    fn timers(&mut self) -> &mut TimerQueue<Self> {
        &mut self.timers
    }
}

impl World {
    /// Create an empty world at the epoch.
    ///
    /// `seed` fixes every random draw (blood graphics and lifespans).
    pub fn new(settings: ItemsConfig, seed: u64, spatial: Box<dyn Spatial>) -> Self {
        Self {
            clock: GameClock::new(),
            timers: TimerQueue::new(),
            items: BTreeMap::new(),
            actors: BTreeMap::new(),
            spatial,
            settings,
            rng: StdRng::seed_from_u64(seed),
            notices: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Time
    // -----------------------------------------------------------------------

    /// Current world time.
    pub const fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Advance world time by `by`, firing every delayed action that
    /// becomes due. Returns the number fired.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Timer`] if the clock would overflow.
    pub fn advance(&mut self, by: Duration) -> Result<usize, WorldError> {
        Ok(timer::advance(self, by)?)
    }

    /// Number of delayed actions waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Time until `item`'s pending delayed action fires.
    pub fn time_until_expiry(&self, item: ItemId) -> Option<Duration> {
        let handle = self.items.get(&item)?.timer()?;
        self.timers.remaining(handle, self.clock.now())
    }

    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    /// Place a new item and run its creation hook.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Timer`] if the creation hook cannot schedule
    /// its delayed action. The item is not placed in that case.
    pub fn spawn_item(&mut self, base: ItemBase, body: ItemBody) -> Result<ItemId, WorldError> {
        let id = ItemId::new();
        self.insert_item(Item::new(id, base, body))?;
        if let Err(err) = self.on_created(id) {
            self.items.remove(&id);
            return Err(err);
        }
        debug!(item = %id, kind = %body.kind(), "item spawned");
        Ok(id)
    }

    /// Build and place an item of `kind` from primitive arguments.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidArgument`] for arguments that do not
    /// fit the kind, or the errors of [`World::spawn_item`].
    pub fn construct(
        &mut self,
        kind: ItemKind,
        location: Point3D,
        args: &[ConstructArg],
    ) -> Result<ItemId, WorldError> {
        let (base, body) = construct::build(kind, location, args, &mut self.rng)?;
        self.spawn_item(base, body)
    }

    /// Remove an item and cancel its pending delayed action.
    ///
    /// Returns `false` if the item was already gone.
    pub fn delete_item(&mut self, id: ItemId) -> bool {
        let Some(mut item) = self.items.remove(&id) else {
            return false;
        };
        if let Some(handle) = item.take_timer() {
            self.timers.cancel(handle);
        }
        debug!(item = %id, kind = %item.kind(), "item deleted");
        true
    }

    /// Look up a live item.
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Look up a live item for modification.
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    /// Whether an item is still in the world.
    pub fn contains_item(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Number of live items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Live items, ordered by id.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Live items on `location`, ordered by id.
    pub fn items_at(&self, location: Point3D) -> impl Iterator<Item = &Item> {
        self.items
            .values()
            .filter(move |item| item.base.location == location)
    }

    // -----------------------------------------------------------------------
    // Actors
    // -----------------------------------------------------------------------

    /// Add an actor, replacing any actor with the same id.
    pub fn add_actor(&mut self, actor: Actor) -> ActorId {
        let id = actor.id;
        self.actors.insert(id, actor);
        id
    }

    /// Look up an actor.
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    /// Look up an actor for modification.
    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    /// Number of actors.
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    // -----------------------------------------------------------------------
    // Notices
    // -----------------------------------------------------------------------

    /// Take every queued notice, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        core::mem::take(&mut self.notices)
    }

    /// Queued notices, oldest first.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn insert_item(&mut self, item: Item) -> Result<(), WorldError> {
        let id = item.id();
        if self.items.contains_key(&id) {
            return Err(WorldError::DuplicateItem(id));
        }
        self.items.insert(id, item);
        Ok(())
    }

    /// Creation hook: blood starts its lifespan.
    fn on_created(&mut self, id: ItemId) -> Result<(), WorldError> {
        if let Some(ItemBody::Blood(_)) = self.items.get(&id).map(|item| item.body) {
            self.start_blood_lifespan(id)?;
        }
        Ok(())
    }

    fn start_blood_lifespan(&mut self, id: ItemId) -> Result<(), WorldError> {
        let lifespan = Blood::random_lifespan(
            &mut self.rng,
            self.settings.blood_min_secs,
            self.settings.blood_max_secs,
        )?;
        self.schedule_deletion(id, lifespan)
    }

    /// Schedule `id` for deletion after `delay`, replacing any pending
    /// action the item already had.
    fn schedule_deletion(&mut self, id: ItemId, delay: Duration) -> Result<(), WorldError> {
        if !self.items.contains_key(&id) {
            return Err(WorldError::ItemNotFound(id));
        }
        let priority = TimerPriority::for_delay(delay);
        let handle = self.schedule_action(delay, priority, move |world: &mut Self| {
            if world.delete_item(id) {
                info!(item = %id, "item expired");
            }
        })?;
        if let Some(item) = self.items.get_mut(&id) {
            if let Some(previous) = item.replace_timer(handle) {
                self.timers.cancel(previous);
            }
        }
        debug!(item = %id, delay = ?delay, priority = ?priority, "deletion scheduled");
        Ok(())
    }
}
