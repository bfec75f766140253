//! Integration tests for carrying a world across save and load.
//!
//! Each test builds a world, writes it through the on-disk save store, and
//! loads it into a fresh world, checking the per-class load hooks.

#![allow(clippy::unwrap_used)]

use core::time::Duration;
use std::path::PathBuf;

use shardkeep_core::config::ItemsConfig;
use shardkeep_items::{ConstructArg, ItemBody, OpenTerrain, StackableResource, World};
use shardkeep_persist::{ItemEntry, SaveStore, VersionedRecord, encode_bytes};
use shardkeep_types::{ItemId, ItemKind, Point3D, ResourceKind};

fn world(settings: ItemsConfig) -> World {
    World::new(settings, 77, Box::new(OpenTerrain))
}

fn scratch_store() -> (PathBuf, SaveStore) {
    let dir = std::env::temp_dir().join(format!("shardkeep-items-{}", uuid::Uuid::new_v4()));
    let store = SaveStore::new(dir.join("world.bin"));
    (dir, store)
}

fn reload(source: &World, settings: ItemsConfig) -> World {
    let (dir, store) = scratch_store();
    store.save(&source.snapshot().unwrap()).unwrap();
    let save = store.load().unwrap().unwrap();
    std::fs::remove_dir_all(&dir).unwrap();

    let mut target = world(settings);
    let report = target.restore(save).unwrap();
    assert!(report.is_clean(), "load failures: {:?}", report.failures);
    target
}

#[test]
fn legacy_hue_is_remapped_on_reload() {
    let mut source = world(ItemsConfig::default());
    let legacy = source
        .construct(ItemKind::StackableResource, Point3D::new(1, 1, 0), &[ConstructArg::Int(10)])
        .unwrap();
    let plain = source
        .construct(ItemKind::StackableResource, Point3D::new(2, 1, 0), &[ConstructArg::Int(10)])
        .unwrap();
    source.item_mut(legacy).unwrap().base.hue = 4;
    source.item_mut(plain).unwrap().base.hue = 5;

    let target = reload(&source, ItemsConfig::default());
    let legacy = target.item(legacy).unwrap();
    assert_eq!(legacy.base.amount, 10);
    assert_eq!(legacy.base.hue, 6);
    assert_eq!(target.item(plain).unwrap().base.hue, 5);
}

#[test]
fn consumed_keepsake_is_deleted_on_reload() {
    let mut source = world(ItemsConfig::default());
    let thrower = source.add_actor(shardkeep_types::Actor::new(
        "Mariah",
        shardkeep_types::ActorKind::Player,
        Point3D::default(),
    ));
    let thrown = source.construct(ItemKind::Keepsake, Point3D::default(), &[]).unwrap();
    let kept = source.construct(ItemKind::Keepsake, Point3D::default(), &[]).unwrap();
    source.throw_keepsake(thrower, thrown, Point3D::new(5, 5, 0)).unwrap();

    let (dir, store) = scratch_store();
    store.save(&source.snapshot().unwrap()).unwrap();
    let save = store.load().unwrap().unwrap();
    std::fs::remove_dir_all(&dir).unwrap();

    let mut target = world(ItemsConfig::default());
    let report = target.restore(save).unwrap();
    assert_eq!(report.discarded_items, 1);
    assert_eq!(report.restored_items, 1);
    assert!(!target.contains_item(thrown));
    assert!(target.contains_item(kept));
    assert_eq!(target.pending_timers(), 0);
}

#[test]
fn blood_gets_a_fresh_lifespan_on_reload() {
    let settings = ItemsConfig {
        blood_min_secs: 3.0,
        blood_max_secs: 3.0,
        ..ItemsConfig::default()
    };
    let mut source = world(settings.clone());
    let blood = source.construct(ItemKind::Blood, Point3D::default(), &[]).unwrap();
    source.advance(Duration::from_secs(2)).unwrap();

    let mut target = reload(&source, settings);
    assert_eq!(target.now(), Duration::from_secs(2));
    assert_eq!(target.time_until_expiry(blood), Some(Duration::from_secs(3)));

    target.advance(Duration::from_millis(2900)).unwrap();
    assert!(target.contains_item(blood));
    target.advance(Duration::from_millis(100)).unwrap();
    assert!(!target.contains_item(blood));
}

#[test]
fn stack_written_before_resource_kinds_loads_as_iron() {
    let id = ItemId::new();
    let base = StackableResource::default().base(7, Point3D::default());
    let mut save = world(ItemsConfig::default()).snapshot().unwrap();
    save.items.push(ItemEntry {
        id,
        kind_code: ItemKind::StackableResource.code(),
        base: encode_bytes(&base).unwrap(),
        class: VersionedRecord::new(0, Vec::new()).to_bytes().unwrap(),
    });

    let mut target = world(ItemsConfig::default());
    let report = target.restore(save).unwrap();
    assert!(report.is_clean());
    let stack = target.item(id).unwrap();
    assert_eq!(stack.base, base);
    assert_eq!(
        stack.body,
        ItemBody::StackableResource(StackableResource::new(ResourceKind::Iron))
    );
}
