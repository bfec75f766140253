//! The base layer shared by every item.

use shardkeep_persist::{PersistError, RecordReader, RecordWriter, Versioned};
use shardkeep_types::Point3D;

/// Appearance, quantity, and placement common to all items.
///
/// Persisted as its own record ahead of the item's class record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemBase {
    /// Art id shown to clients.
    pub graphic: u16,
    /// Color tint; 0 means the art's own colors.
    pub hue: u16,
    /// Stack size. Non-stackable items keep 1.
    pub amount: u32,
    /// Cell the item occupies.
    pub location: Point3D,
    /// Whether actors may pick the item up.
    pub movable: bool,
    /// Whether clients are shown the item.
    pub visible: bool,
    /// Custom name overriding the art's default label.
    pub name: Option<String>,
}

impl ItemBase {
    /// A visible, movable single item with no hue or custom name.
    pub const fn new(graphic: u16, location: Point3D) -> Self {
        Self {
            graphic,
            hue: 0,
            amount: 1,
            location,
            movable: true,
            visible: true,
            name: None,
        }
    }

    /// Make the item fixed in place.
    #[must_use]
    pub const fn fixed(mut self) -> Self {
        self.movable = false;
        self
    }

    /// Hide the item from clients.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Set the stack size.
    #[must_use]
    pub const fn with_amount(mut self, amount: u32) -> Self {
        self.amount = amount;
        self
    }

    /// Set the hue.
    #[must_use]
    pub const fn with_hue(mut self, hue: u16) -> Self {
        self.hue = hue;
        self
    }

    /// Set a custom name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl Versioned for ItemBase {
    const SCHEMA: &'static str = "item_base";
    const CURRENT_VERSION: u32 = 0;

    fn write_fields(&self, writer: &mut RecordWriter) {
        writer
            .write_u16(self.graphic)
            .write_u16(self.hue)
            .write_u32(self.amount)
            .write_point(self.location)
            .write_bool(self.movable)
            .write_bool(self.visible)
            .write_opt_text(self.name.as_deref());
    }

    fn read_fields(_version: u32, reader: &mut RecordReader<'_>) -> Result<Self, PersistError> {
        Ok(Self {
            graphic: reader.read_u16()?,
            hue: reader.read_u16()?,
            amount: reader.read_u32()?,
            location: reader.read_point()?,
            movable: reader.read_bool()?,
            visible: reader.read_bool()?,
            name: reader.read_opt_text()?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shardkeep_persist::{decode, encode};

    use super::*;

    #[test]
    fn base_roundtrip() {
        let base = ItemBase::new(0x1BF2, Point3D::new(100, 200, 5))
            .with_amount(10)
            .with_hue(6)
            .with_name("iron ingots");
        let record = encode(&base);
        assert_eq!(record.version, 0);
        assert_eq!(decode::<ItemBase>(&record).unwrap(), base);
    }

    #[test]
    fn builders_set_flags() {
        let base = ItemBase::new(1, Point3D::default()).fixed().hidden();
        assert!(!base.movable);
        assert!(!base.visible);
        assert_eq!(base.amount, 1);
    }
}
