//! The versioned record: a version tag plus an ordered list of typed fields.

use core::fmt;
use core::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shardkeep_types::Point3D;
use uuid::Uuid;

use crate::error::PersistError;

/// One primitive value inside a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Boolean flag.
    Bool(bool),
    /// Unsigned 8-bit integer.
    U8(u8),
    /// Unsigned 16-bit integer (graphics, hues, kind codes).
    U16(u16),
    /// Signed 32-bit integer.
    I32(i32),
    /// Unsigned 32-bit integer.
    U32(u32),
    /// Signed 64-bit integer.
    I64(i64),
    /// 64-bit float.
    F64(f64),
    /// UTF-8 string.
    Text(String),
    /// World coordinates.
    Point(Point3D),
    /// Identifier.
    Uuid(Uuid),
    /// Wall-clock instant.
    Timestamp(DateTime<Utc>),
    /// Span of world time.
    Duration(Duration),
}

impl FieldValue {
    /// The primitive type of this value.
    pub const fn field_type(&self) -> FieldType {
        match self {
            Self::Bool(_) => FieldType::Bool,
            Self::U8(_) => FieldType::U8,
            Self::U16(_) => FieldType::U16,
            Self::I32(_) => FieldType::I32,
            Self::U32(_) => FieldType::U32,
            Self::I64(_) => FieldType::I64,
            Self::F64(_) => FieldType::F64,
            Self::Text(_) => FieldType::Text,
            Self::Point(_) => FieldType::Point,
            Self::Uuid(_) => FieldType::Uuid,
            Self::Timestamp(_) => FieldType::Timestamp,
            Self::Duration(_) => FieldType::Duration,
        }
    }
}

/// Discriminant of a [`FieldValue`], used in decode errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// [`FieldValue::Bool`].
    Bool,
    /// [`FieldValue::U8`].
    U8,
    /// [`FieldValue::U16`].
    U16,
    /// [`FieldValue::I32`].
    I32,
    /// [`FieldValue::U32`].
    U32,
    /// [`FieldValue::I64`].
    I64,
    /// [`FieldValue::F64`].
    F64,
    /// [`FieldValue::Text`].
    Text,
    /// [`FieldValue::Point`].
    Point,
    /// [`FieldValue::Uuid`].
    Uuid,
    /// [`FieldValue::Timestamp`].
    Timestamp,
    /// [`FieldValue::Duration`].
    Duration,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::I64 => "i64",
            Self::F64 => "f64",
            Self::Text => "text",
            Self::Point => "point",
            Self::Uuid => "uuid",
            Self::Timestamp => "timestamp",
            Self::Duration => "duration",
        };
        f.write_str(name)
    }
}

/// A version tag followed by the fields written for that version.
///
/// Fields carry no names. Their meaning is fixed by the position at which
/// the owning type's [`Versioned`](crate::Versioned) impl writes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedRecord {
    /// Schema version the fields were written with.
    pub version: u32,
    /// Fields in write order.
    pub fields: Vec<FieldValue>,
}

impl VersionedRecord {
    /// Create a record from a version and its fields.
    pub const fn new(version: u32, fields: Vec<FieldValue>) -> Self {
        Self { version, fields }
    }

    /// Encode the record into its byte form (bincode, little-endian).
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Serialization`] if encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistError> {
        bincode::serialize(self).map_err(|e| PersistError::serialization(&e))
    }

    /// Decode a record from its byte form.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Corrupt`] if the bytes are not a record.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistError> {
        bincode::deserialize(bytes).map_err(|e| PersistError::corrupt(&e))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn record_bytes_roundtrip() {
        let record = VersionedRecord::new(
            2,
            vec![
                FieldValue::Bool(true),
                FieldValue::U16(0x122A),
                FieldValue::Text("iron ingot".to_owned()),
                FieldValue::Point(Point3D::new(1, -2, 3)),
                FieldValue::Duration(Duration::from_millis(2500)),
            ],
        );
        let bytes = record.to_bytes().unwrap();
        assert_eq!(VersionedRecord::from_bytes(&bytes).unwrap(), record);
    }

    #[test]
    fn truncated_bytes_are_corrupt() {
        let record = VersionedRecord::new(0, vec![FieldValue::Text("keepsake".to_owned())]);
        let bytes = record.to_bytes().unwrap();
        let cut = bytes.get(..bytes.len().saturating_sub(3)).unwrap();
        let err = VersionedRecord::from_bytes(cut).unwrap_err();
        assert!(matches!(err, PersistError::Corrupt { .. }));
    }

    #[test]
    fn field_type_names() {
        assert_eq!(FieldValue::I64(-1).field_type(), FieldType::I64);
        assert_eq!(FieldType::Timestamp.to_string(), "timestamp");
    }
}
