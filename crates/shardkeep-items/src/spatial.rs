//! The spatial service items consult about the map.

use shardkeep_types::Point3D;

/// Map queries the world cannot answer from its own item list.
pub trait Spatial {
    /// Whether a body `height` units tall can stand at `location`.
    fn can_fit(&self, location: Point3D, height: u32) -> bool;

    /// A spawn-safe cell within `range` of `center`, if any.
    fn find_spawn_near(&self, center: Point3D, range: u32) -> Option<Point3D>;
}

/// Flat, obstacle-free terrain: everything fits everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenTerrain;

impl Spatial for OpenTerrain {
    fn can_fit(&self, _location: Point3D, _height: u32) -> bool {
        true
    }

    fn find_spawn_near(&self, center: Point3D, _range: u32) -> Option<Point3D> {
        Some(center)
    }
}
