//! A keepsake that can be thrown once, then is cleaned up after a delay.

use shardkeep_persist::{PersistError, RecordReader, RecordWriter, Versioned};
use shardkeep_types::Point3D;

use crate::base::ItemBase;

/// Art id of a keepsake.
pub const KEEPSAKE_GRAPHIC: u16 = 0x1F14;

/// Message sent when an actor throws a keepsake that was already thrown.
pub const KEEPSAKE_ALREADY_THROWN: &str = "That keepsake has already been thrown.";

/// A one-shot throwable. Once thrown it is consumed and cleaned up after a
/// delay; a consumed keepsake found in a save is deleted on load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keepsake {
    /// Whether the keepsake has been thrown.
    pub consumed: bool,
}

impl Keepsake {
    /// Visible, movable base layer.
    pub fn base(location: Point3D) -> ItemBase {
        ItemBase::new(KEEPSAKE_GRAPHIC, location).with_name("a keepsake")
    }

    /// Mark the keepsake thrown. Returns `false` if it already was.
    pub const fn consume(&mut self) -> bool {
        if self.consumed {
            return false;
        }
        self.consumed = true;
        true
    }
}

impl Versioned for Keepsake {
    const SCHEMA: &'static str = "keepsake";
    const CURRENT_VERSION: u32 = 0;

    fn write_fields(&self, writer: &mut RecordWriter) {
        writer.write_bool(self.consumed);
    }

    fn read_fields(_version: u32, reader: &mut RecordReader<'_>) -> Result<Self, PersistError> {
        Ok(Self {
            consumed: reader.read_bool()?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shardkeep_persist::{decode, encode};

    use super::*;

    #[test]
    fn consume_only_once() {
        let mut keepsake = Keepsake::default();
        assert!(keepsake.consume());
        assert!(!keepsake.consume());
        assert!(keepsake.consumed);
    }

    #[test]
    fn consumed_flag_persists() {
        let keepsake = Keepsake { consumed: true };
        assert_eq!(decode::<Keepsake>(&encode(&keepsake)).unwrap(), keepsake);
    }
}
