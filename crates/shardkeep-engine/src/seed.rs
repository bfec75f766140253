//! Fixtures placed in a brand-new world that has no save file yet.

use shardkeep_items::{ConstructArg, World, WorldError};
use shardkeep_types::{ItemKind, Point3D};
use tracing::info;

/// A speed-probe track, a resurrection gate, a drop-blocked shrine cell,
/// a keepsake, and a starter pile of ingots.
///
/// # Errors
///
/// Returns the [`WorldError`] of the first fixture that fails to build.
pub fn seed_starting_items(world: &mut World) -> Result<(), WorldError> {
    let fixtures: [(ItemKind, Point3D, Vec<ConstructArg>); 6] = [
        (ItemKind::SpeedProbe, Point3D::new(1400, 1600, 0), Vec::new()),
        (ItemKind::SpeedProbe, Point3D::new(1400, 1640, 0), Vec::new()),
        (ItemKind::ResurrectionGate, Point3D::new(1420, 1620, 0), Vec::new()),
        (ItemKind::DropBlocker, Point3D::new(1430, 1620, 0), Vec::new()),
        (
            ItemKind::StackableResource,
            Point3D::new(1425, 1615, 0),
            vec![ConstructArg::Int(50)],
        ),
        (ItemKind::Keepsake, Point3D::new(1425, 1616, 0), Vec::new()),
    ];
    for (kind, location, args) in &fixtures {
        world.construct(*kind, *location, args)?;
    }
    info!(items = world.item_count(), "starting items placed");
    Ok(())
}
