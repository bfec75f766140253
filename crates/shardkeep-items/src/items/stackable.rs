//! Stackable resources, including the legacy hue remap applied on load.

use shardkeep_persist::{PersistError, RecordReader, RecordWriter, Versioned};
use shardkeep_types::{Point3D, ResourceKind};

use crate::base::ItemBase;

/// Hue written by builds that predate the current resource palette.
pub const LEGACY_HUE: u16 = 4;
/// Hue that [`LEGACY_HUE`] is rewritten to on load.
pub const REMAPPED_HUE: u16 = 6;

/// A pile of a raw resource that can be split into smaller piles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StackableResource {
    /// What the pile is made of.
    pub resource: ResourceKind,
}

impl StackableResource {
    /// Create a pile of `resource`.
    pub const fn new(resource: ResourceKind) -> Self {
        Self { resource }
    }

    /// Movable base layer with the resource's art and the given amount.
    pub const fn base(self, amount: u32, location: Point3D) -> ItemBase {
        ItemBase::new(self.graphic(), location).with_amount(amount)
    }

    /// Art id for this resource.
    pub const fn graphic(self) -> u16 {
        match self.resource {
            ResourceKind::Iron | ResourceKind::Copper => 0x1BF2,
            ResourceKind::Log => 0x1BDD,
            ResourceKind::Leather => 0x1081,
            ResourceKind::Cloth => 0x1766,
        }
    }

    /// Rewrite [`LEGACY_HUE`] to [`REMAPPED_HUE`]; other hues pass through.
    pub const fn remap_legacy_hue(hue: u16) -> u16 {
        if hue == LEGACY_HUE { REMAPPED_HUE } else { hue }
    }

    /// Amount left on the original pile after taking `amount` from
    /// `current`.
    ///
    /// Returns `None` unless `0 < amount < current`.
    pub const fn split_remainder(current: u32, amount: u32) -> Option<u32> {
        if amount == 0 || amount >= current {
            return None;
        }
        current.checked_sub(amount)
    }
}

impl Versioned for StackableResource {
    const SCHEMA: &'static str = "stackable_resource";
    const CURRENT_VERSION: u32 = 1;

    fn write_fields(&self, writer: &mut RecordWriter) {
        writer.write_u16(self.resource.code());
    }

    fn read_fields(version: u32, reader: &mut RecordReader<'_>) -> Result<Self, PersistError> {
        let resource = match version {
            0 => ResourceKind::default(),
            _ => {
                let code = reader.read_u16()?;
                ResourceKind::from_code(code).ok_or_else(|| PersistError::InvalidValue {
                    field: "stackable_resource.resource",
                    reason: format!("unknown resource code {code}"),
                })?
            }
        };
        Ok(Self { resource })
    }
}
