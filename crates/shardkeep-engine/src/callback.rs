//! Per-tick work done by the shard between timing-loop iterations.
//!
//! [`ShardCallback`] delivers the notices items queued during the tick and
//! writes an autosave every `autosave_interval_ticks` iterations. A failed
//! autosave is logged and the shard keeps running; the shutdown save in
//! `main` is the one that must succeed.

use shardkeep_core::runner::{TickCallback, TickSummary};
use shardkeep_items::{Notice, World};
use shardkeep_persist::SaveStore;
use tracing::{debug, info, warn};

/// Tick callback that drains notices and autosaves.
pub struct ShardCallback {
    store: SaveStore,
    autosave_interval_ticks: u64,
    saves_written: u64,
}

impl ShardCallback {
    /// Create a callback saving to `store` every `autosave_interval_ticks`
    /// iterations (0 disables autosave).
    pub const fn new(store: SaveStore, autosave_interval_ticks: u64) -> Self {
        Self {
            store,
            autosave_interval_ticks,
            saves_written: 0,
        }
    }

    /// Number of autosaves written so far.
    pub const fn saves_written(&self) -> u64 {
        self.saves_written
    }

    fn autosave_due(&self, tick: u64) -> bool {
        self.autosave_interval_ticks > 0 && tick.checked_rem(self.autosave_interval_ticks) == Some(0)
    }

    fn autosave(&mut self, tick: u64, world: &World) {
        let result = world
            .snapshot()
            .map_err(|e| e.to_string())
            .and_then(|save| self.store.save(&save).map_err(|e| e.to_string()));
        match result {
            Ok(()) => {
                self.saves_written = self.saves_written.saturating_add(1);
                info!(tick, items = world.item_count(), path = %self.store.path().display(), "autosave written");
            }
            Err(error) => warn!(tick, error = %error, "autosave failed"),
        }
    }
}

impl TickCallback<World> for ShardCallback {
    fn on_tick(&mut self, summary: &TickSummary, world: &mut World) {
        for notice in world.drain_notices() {
            deliver(&notice);
        }
        if summary.fired > 0 {
            debug!(tick = summary.tick, fired = summary.fired, items = world.item_count(), "items expired");
        }
        if self.autosave_due(summary.tick) {
            self.autosave(summary.tick, world);
        }
    }
}

/// Hand a notice to the outside world.
///
/// This shard has no client connections, so notices are logged.
fn deliver(notice: &Notice) {
    match notice {
        Notice::Message { actor, text } => info!(actor = %actor, text = %text, "message"),
        Notice::Sound { location, sound } => {
            info!(location = %location, sound = format_args!("{sound:#x}"), "sound");
        }
        Notice::Effect {
            location,
            effect,
            speed,
            duration,
        } => info!(
            location = %location,
            effect = format_args!("{effect:#x}"),
            speed,
            duration,
            "effect"
        ),
        Notice::ResurrectionOffer { actor, location } => {
            info!(actor = %actor, location = %location, "resurrection offered");
        }
    }
}
