//! Integration tests for item behaviors driven through the public world API.

#![allow(clippy::unwrap_used)]

use core::time::Duration;

use shardkeep_core::config::ItemsConfig;
use shardkeep_items::{Notice, OpenTerrain, World};
use shardkeep_types::{Actor, ActorKind, ItemKind, Point3D};

fn world() -> World {
    let settings = ItemsConfig {
        blood_min_secs: 3.0,
        blood_max_secs: 3.0,
        ..ItemsConfig::default()
    };
    World::new(settings, 3, Box::new(OpenTerrain))
}

#[test]
fn blood_present_at_2_9_and_gone_at_3_0() {
    let mut world = world();
    let blood = world.construct(ItemKind::Blood, Point3D::new(8, 8, 0), &[]).unwrap();

    world.advance(Duration::from_millis(2900)).unwrap();
    assert!(world.contains_item(blood));

    let fired = world.advance(Duration::from_millis(100)).unwrap();
    assert_eq!(fired, 1);
    assert!(!world.contains_item(blood));
    assert_eq!(world.now(), Duration::from_secs(3));
}

#[test]
fn splatters_expire_within_the_lifespan_range() {
    let mut world = World::new(ItemsConfig::default(), 12, Box::new(OpenTerrain));
    let splatters: Vec<_> = (0..20)
        .map(|x| world.construct(ItemKind::Blood, Point3D::new(x, 0, 0), &[]).unwrap())
        .collect();

    world.advance(Duration::from_millis(2999)).unwrap();
    assert_eq!(world.item_count(), 20);

    world.advance(Duration::from_millis(3001)).unwrap();
    assert_eq!(world.item_count(), 0);
    assert!(splatters.iter().all(|id| !world.contains_item(*id)));
}

#[test]
fn probe_pair_times_a_run() {
    let mut world = world();
    let runner = world.add_actor(Actor::new("Sentri", ActorKind::Player, Point3D::default()));
    let start = Point3D::new(0, 5, 0);
    let finish = Point3D::new(0, 50, 0);
    world.construct(ItemKind::SpeedProbe, start, &[]).unwrap();
    world.construct(ItemKind::SpeedProbe, finish, &[]).unwrap();

    world.move_over(runner, start).unwrap();
    world.drain_notices();
    world.advance(Duration::from_millis(5500)).unwrap();
    world.move_over(runner, finish).unwrap();

    assert_eq!(world.drain_notices(), vec![Notice::message(runner, "05.50 seconds")]);
}
