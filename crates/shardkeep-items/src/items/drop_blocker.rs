//! An immovable item that refuses anything dropped onto it.

use shardkeep_persist::{PersistError, RecordReader, RecordWriter, Versioned};
use shardkeep_types::Point3D;

use crate::base::ItemBase;

/// Art id of a drop blocker.
pub const DROP_BLOCKER_GRAPHIC: u16 = 0x21A4;

/// Message sent to an actor whose drop was refused.
pub const DROP_REFUSED: &str = "You cannot drop that here.";

/// An invisible marker that refuses every drop on its cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropBlocker;

impl DropBlocker {
    /// Hidden, fixed base layer.
    pub const fn base(location: Point3D) -> ItemBase {
        ItemBase::new(DROP_BLOCKER_GRAPHIC, location).fixed().hidden()
    }
}

impl Versioned for DropBlocker {
    const SCHEMA: &'static str = "drop_blocker";
    const CURRENT_VERSION: u32 = 0;

    fn write_fields(&self, _writer: &mut RecordWriter) {}

    fn read_fields(_version: u32, _reader: &mut RecordReader<'_>) -> Result<Self, PersistError> {
        Ok(Self)
    }
}
