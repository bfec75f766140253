//! Sequential field writer.

use core::time::Duration;

use chrono::{DateTime, Utc};
use shardkeep_types::Point3D;
use uuid::Uuid;

use crate::record::{FieldValue, VersionedRecord};

/// Appends typed fields to a record in order.
///
/// A writer is created for one version and consumed by
/// [`RecordWriter::finish`]. Writing never fails.
#[derive(Debug, Clone)]
pub struct RecordWriter {
    version: u32,
    fields: Vec<FieldValue>,
}

impl RecordWriter {
    /// Start a record for `version`.
    pub const fn new(version: u32) -> Self {
        Self {
            version,
            fields: Vec::new(),
        }
    }

    /// Version this writer tags the record with.
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Append an already-built field.
    pub fn push(&mut self, value: FieldValue) -> &mut Self {
        self.fields.push(value);
        self
    }

    /// Append a boolean.
    pub fn write_bool(&mut self, value: bool) -> &mut Self {
        self.push(FieldValue::Bool(value))
    }

    /// Append an unsigned byte.
    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.push(FieldValue::U8(value))
    }

    /// Append an unsigned 16-bit integer.
    pub fn write_u16(&mut self, value: u16) -> &mut Self {
        self.push(FieldValue::U16(value))
    }

    /// Append a signed 32-bit integer.
    pub fn write_i32(&mut self, value: i32) -> &mut Self {
        self.push(FieldValue::I32(value))
    }

    /// Append an unsigned 32-bit integer.
    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        self.push(FieldValue::U32(value))
    }

    /// Append a signed 64-bit integer.
    pub fn write_i64(&mut self, value: i64) -> &mut Self {
        self.push(FieldValue::I64(value))
    }

    /// Append a float.
    pub fn write_f64(&mut self, value: f64) -> &mut Self {
        self.push(FieldValue::F64(value))
    }

    /// Append a string.
    pub fn write_text(&mut self, value: impl Into<String>) -> &mut Self {
        self.push(FieldValue::Text(value.into()))
    }

    /// Append world coordinates.
    pub fn write_point(&mut self, value: Point3D) -> &mut Self {
        self.push(FieldValue::Point(value))
    }

    /// Append an identifier.
    pub fn write_uuid(&mut self, value: Uuid) -> &mut Self {
        self.push(FieldValue::Uuid(value))
    }

    /// Append a wall-clock instant.
    pub fn write_timestamp(&mut self, value: DateTime<Utc>) -> &mut Self {
        self.push(FieldValue::Timestamp(value))
    }

    /// Append a span of world time.
    pub fn write_duration(&mut self, value: Duration) -> &mut Self {
        self.push(FieldValue::Duration(value))
    }

    /// Append an optional string as a presence flag followed by the value.
    pub fn write_opt_text(&mut self, value: Option<&str>) -> &mut Self {
        self.write_bool(value.is_some());
        if let Some(text) = value {
            self.write_text(text);
        }
        self
    }

    /// Append an optional span as a presence flag followed by the value.
    pub fn write_opt_duration(&mut self, value: Option<Duration>) -> &mut Self {
        self.write_bool(value.is_some());
        if let Some(span) = value {
            self.write_duration(span);
        }
        self
    }

    /// Number of fields written so far.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields have been written.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Close the writer and return the finished record.
    pub fn finish(self) -> VersionedRecord {
        VersionedRecord::new(self.version, self.fields)
    }
}
