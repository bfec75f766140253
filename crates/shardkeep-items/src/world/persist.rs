//! Saving the world to a [`SaveFile`] and restoring it.
//!
//! Each item is written as two records, base then class. On restore every
//! entry is decoded on its own: a damaged entry is reported in the
//! [`LoadReport`] and the rest of the world still loads. Per-class load
//! hooks then run:
//!
//! - blood draws a fresh lifespan,
//! - a consumed keepsake is deleted,
//! - a resource stack has its legacy hue remapped.

use shardkeep_core::clock::GameClock;
use shardkeep_core::timer::TimerQueue;
use shardkeep_persist::{
    ActorEntry, ItemEntry, PersistError, SaveFile, VersionedRecord, decode_bytes, encode_bytes,
};
use shardkeep_types::{Actor, ActorId, ItemId, ItemKind};
use tracing::{info, warn};

use super::World;
use crate::base::ItemBase;
use crate::error::WorldError;
use crate::item::{Item, ItemBody};
use crate::items::StackableResource;

/// Which save entry a [`LoadFailure`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRef {
    /// An item entry.
    Item(ItemId),
    /// An actor entry.
    Actor(ActorId),
}

/// One save entry that could not be restored.
#[derive(Debug)]
pub struct LoadFailure {
    /// The entry that failed.
    pub entry: EntryRef,
    /// Why it failed.
    pub error: WorldError,
}

/// Summary of a [`World::restore`].
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Items now live in the world.
    pub restored_items: usize,
    /// Actors now in the world.
    pub restored_actors: usize,
    /// Items that decoded but were deleted by their load hook.
    pub discarded_items: usize,
    /// Entries that could not be restored.
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// Whether every entry was restored.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of restoring one item entry.
enum Restored {
    Live,
    Discarded,
}

impl World {
    /// Capture the world as a save file.
    ///
    /// Pending delayed actions are not saved; load hooks recreate the ones
    /// that matter.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Persist`] if a record cannot be encoded.
    pub fn snapshot(&self) -> Result<SaveFile, WorldError> {
        let mut save = SaveFile::new(self.clock.now());
        for (id, actor) in &self.actors {
            save.actors.push(ActorEntry {
                id: *id,
                record: encode_bytes(actor)?,
            });
        }
        for (id, item) in &self.items {
            save.items.push(ItemEntry {
                id: *id,
                kind_code: item.kind().code(),
                base: encode_bytes(&item.base)?,
                class: item.body.encode_class().to_bytes()?,
            });
        }
        Ok(save)
    }

    /// Replace the world's contents with those of `save`.
    ///
    /// Items, actors, pending actions, and queued notices are discarded
    /// first, and the clock is set to the saved world time.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Persist`] with
    /// [`PersistError::UnsupportedVersion`] if the save file's format is
    /// newer than this build reads. The world is left untouched in that
    /// case. Failures of individual entries are reported in the
    /// [`LoadReport`] instead.
    pub fn restore(&mut self, save: SaveFile) -> Result<LoadReport, WorldError> {
        if save.format_version > SaveFile::CURRENT_FORMAT {
            return Err(PersistError::UnsupportedVersion {
                schema: "save file".to_owned(),
                found: save.format_version,
                supported: SaveFile::CURRENT_FORMAT,
            }
            .into());
        }

        self.clock = GameClock::starting_at(save.world_time);
        self.timers = TimerQueue::new();
        self.items.clear();
        self.actors.clear();
        self.notices.clear();

        let mut report = LoadReport::default();
        for entry in save.actors {
            match decode_actor(&entry) {
                Ok(actor) => {
                    self.actors.insert(actor.id, actor);
                    report.restored_actors = report.restored_actors.saturating_add(1);
                }
                Err(error) => {
                    warn!(actor = %entry.id, error = %error, "actor entry failed to load");
                    report.failures.push(LoadFailure {
                        entry: EntryRef::Actor(entry.id),
                        error,
                    });
                }
            }
        }
        for entry in &save.items {
            match self.restore_item(entry) {
                Ok(Restored::Live) => {
                    report.restored_items = report.restored_items.saturating_add(1);
                }
                Ok(Restored::Discarded) => {
                    report.discarded_items = report.discarded_items.saturating_add(1);
                }
                Err(error) => {
                    warn!(item = %entry.id, kind_code = entry.kind_code, error = %error, "item entry failed to load");
                    report.failures.push(LoadFailure {
                        entry: EntryRef::Item(entry.id),
                        error,
                    });
                }
            }
        }

        info!(
            world_time = ?save.world_time,
            saved_at = %save.saved_at,
            items = report.restored_items,
            actors = report.restored_actors,
            discarded = report.discarded_items,
            failures = report.failures.len(),
            "world restored"
        );
        Ok(report)
    }

    fn restore_item(&mut self, entry: &ItemEntry) -> Result<Restored, WorldError> {
        let kind = ItemKind::from_code(entry.kind_code).ok_or_else(|| PersistError::InvalidValue {
            field: "item.kind_code",
            reason: format!("unknown item kind code {}", entry.kind_code),
        })?;
        let mut base: ItemBase = decode_bytes(&entry.base)?;
        let class = VersionedRecord::from_bytes(&entry.class)?;
        let body = ItemBody::decode_class(kind, &class)?;

        if let ItemBody::StackableResource(_) = body {
            base.hue = StackableResource::remap_legacy_hue(base.hue);
        }
        self.insert_item(Item::new(entry.id, base, body))?;

        match body {
            ItemBody::Keepsake(keepsake) if keepsake.consumed => {
                self.delete_item(entry.id);
                info!(item = %entry.id, "consumed keepsake removed on load");
                Ok(Restored::Discarded)
            }
            ItemBody::Blood(_) => {
                if let Err(err) = self.start_blood_lifespan(entry.id) {
                    self.items.remove(&entry.id);
                    return Err(err);
                }
                Ok(Restored::Live)
            }
            _ => Ok(Restored::Live),
        }
    }
}

/// Decode one actor entry, checking the record belongs to the entry's id.
fn decode_actor(entry: &ActorEntry) -> Result<Actor, WorldError> {
    let actor: Actor = decode_bytes(&entry.record)?;
    if actor.id != entry.id {
        return Err(PersistError::InvalidValue {
            field: "actor.id",
            reason: format!("record holds actor {} under entry {}", actor.id, entry.id),
        }
        .into());
    }
    Ok(actor)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use core::time::Duration;

    use shardkeep_core::config::ItemsConfig;
    use shardkeep_types::{ActorKind, Point3D};

    use super::*;
    use crate::construct::ConstructArg;
    use crate::spatial::OpenTerrain;

    fn world() -> World {
        World::new(ItemsConfig::default(), 5, Box::new(OpenTerrain))
    }

    #[test]
    fn snapshot_then_restore_keeps_ids_and_state() {
        let mut source = world();
        let actor = source.add_actor(Actor::new("Katrina", ActorKind::Player, Point3D::default()));
        let stack = source
            .construct(ItemKind::StackableResource, Point3D::new(1, 2, 0), &[ConstructArg::Int(12)])
            .unwrap();
        let probe = source.construct(ItemKind::SpeedProbe, Point3D::new(3, 3, 0), &[]).unwrap();
        source.advance(Duration::from_secs(30)).unwrap();

        let save = source.snapshot().unwrap();
        let mut target = world();
        let report = target.restore(save).unwrap();

        assert!(report.is_clean());
        assert_eq!(report.restored_items, 2);
        assert_eq!(report.restored_actors, 1);
        assert_eq!(target.now(), Duration::from_secs(30));
        assert_eq!(target.item(stack), source.item(stack));
        assert_eq!(target.item(probe), source.item(probe));
        assert_eq!(target.actor(actor), source.actor(actor));
    }

    #[test]
    fn snapshot_is_deterministic() {
        let mut world = world();
        world.construct(ItemKind::DropBlocker, Point3D::default(), &[]).unwrap();
        world.construct(ItemKind::Keepsake, Point3D::default(), &[]).unwrap();
        let first = world.snapshot().unwrap();
        let second = world.snapshot().unwrap();
        assert_eq!(first.items, second.items);
    }

    #[test]
    fn corrupt_entry_fails_alone() {
        let mut source = world();
        let good = source.construct(ItemKind::DropBlocker, Point3D::default(), &[]).unwrap();
        let bad = source.construct(ItemKind::Keepsake, Point3D::default(), &[]).unwrap();
        let mut save = source.snapshot().unwrap();
        for entry in &mut save.items {
            if entry.id == bad {
                entry.class = vec![0xFF];
            }
        }

        let mut target = world();
        let report = target.restore(save).unwrap();
        assert_eq!(report.restored_items, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures.first().map(|f| f.entry), Some(EntryRef::Item(bad)));
        assert!(target.contains_item(good));
        assert!(!target.contains_item(bad));
    }

    #[test]
    fn corrupt_actor_entry_fails_alone() {
        let mut source = world();
        let good = source.add_actor(Actor::new("Dupre", ActorKind::Player, Point3D::default()));
        let bad = source.add_actor(Actor::new("Shamino", ActorKind::Player, Point3D::new(4, 4, 0)));
        let gate = source.construct(ItemKind::ResurrectionGate, Point3D::default(), &[]).unwrap();
        let mut save = source.snapshot().unwrap();
        for entry in &mut save.actors {
            if entry.id == bad {
                entry.record = vec![0xFF, 0x00];
            }
        }

        let mut target = world();
        let report = target.restore(save).unwrap();
        assert_eq!(report.restored_actors, 1);
        assert_eq!(report.restored_items, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures.first().map(|f| f.entry), Some(EntryRef::Actor(bad)));
        assert!(target.actor(good).is_some());
        assert!(target.actor(bad).is_none());
        assert!(target.contains_item(gate));
    }

    #[test]
    fn actor_record_under_foreign_entry_id_is_rejected() {
        let mut source = world();
        let actor = source.add_actor(Actor::new("Jaana", ActorKind::Player, Point3D::default()));
        let mut save = source.snapshot().unwrap();
        let foreign = ActorId::new();
        if let Some(entry) = save.actors.first_mut() {
            entry.id = foreign;
        }

        let mut target = world();
        let report = target.restore(save).unwrap();
        assert!(!report.is_clean());
        assert_eq!(report.restored_actors, 0);
        let failure = report.failures.first().unwrap();
        assert_eq!(failure.entry, EntryRef::Actor(foreign));
        assert!(matches!(
            failure.error,
            WorldError::Persist { source: PersistError::InvalidValue { field: "actor.id", .. } }
        ));
        assert!(target.actor(actor).is_none());
        assert!(target.actor(foreign).is_none());
    }

    #[test]
    fn unknown_kind_code_fails_alone() {
        let mut source = world();
        source.construct(ItemKind::DropBlocker, Point3D::default(), &[]).unwrap();
        let mut save = source.snapshot().unwrap();
        if let Some(entry) = save.items.first_mut() {
            entry.kind_code = 999;
        }
        let report = world().restore(save).unwrap();
        assert_eq!(report.restored_items, 0);
        assert!(matches!(
            report.failures.first().map(|f| &f.error),
            Some(WorldError::Persist { source: PersistError::InvalidValue { .. } })
        ));
    }

    #[test]
    fn newer_save_format_leaves_world_untouched() {
        let mut target = world();
        let kept = target.construct(ItemKind::SpeedProbe, Point3D::default(), &[]).unwrap();
        let mut save = world().snapshot().unwrap();
        save.format_version = SaveFile::CURRENT_FORMAT.saturating_add(1);

        let err = target.restore(save).unwrap_err();
        assert!(matches!(
            err,
            WorldError::Persist { source: PersistError::UnsupportedVersion { .. } }
        ));
        assert!(target.contains_item(kept));
    }

    #[test]
    fn restore_clears_previous_timers() {
        let mut target = world();
        target.construct(ItemKind::Blood, Point3D::default(), &[]).unwrap();
        assert_eq!(target.pending_timers(), 1);

        let empty = world().snapshot().unwrap();
        target.restore(empty).unwrap();
        assert_eq!(target.pending_timers(), 0);
        assert_eq!(target.item_count(), 0);
    }
}
