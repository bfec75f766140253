//! Sequential field reader.
//!
//! A [`RecordReader`] walks a record's fields in write order. Each typed
//! read checks the stored primitive and fails with
//! [`PersistError::FieldTypeMismatch`] or [`PersistError::MissingField`]
//! instead of guessing.

use core::time::Duration;

use chrono::{DateTime, Utc};
use shardkeep_types::Point3D;
use uuid::Uuid;

use crate::error::PersistError;
use crate::record::{FieldType, FieldValue, VersionedRecord};

/// Reads typed fields from a record in order.
#[derive(Debug)]
pub struct RecordReader<'a> {
    version: u32,
    fields: &'a [FieldValue],
    position: usize,
}

macro_rules! typed_read {
    ($(#[$doc:meta])* $name:ident, $variant:ident, $ty:ty) => {
        $(#[$doc])*
        ///
        /// # Errors
        ///
        /// Returns [`PersistError::MissingField`] past the last field or
        /// [`PersistError::FieldTypeMismatch`] if the field has another type.
        pub fn $name(&mut self) -> Result<$ty, PersistError> {
            let index = self.position;
            match self.next_field(FieldType::$variant)? {
                FieldValue::$variant(value) => Ok(*value),
                other => Err(PersistError::FieldTypeMismatch {
                    index,
                    expected: FieldType::$variant,
                    found: other.field_type(),
                }),
            }
        }
    };
}

impl<'a> RecordReader<'a> {
    /// Start reading `record` from its first field.
    pub fn new(record: &'a VersionedRecord) -> Self {
        Self {
            version: record.version,
            fields: &record.fields,
            position: 0,
        }
    }

    /// Version the record was written with.
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Number of fields not yet read.
    pub const fn remaining(&self) -> usize {
        self.fields.len().saturating_sub(self.position)
    }

    fn next_field(&mut self, expected: FieldType) -> Result<&'a FieldValue, PersistError> {
        let index = self.position;
        let field = self
            .fields
            .get(index)
            .ok_or(PersistError::MissingField { index, expected })?;
        self.position = index.saturating_add(1);
        Ok(field)
    }

    typed_read!(
        /// Read a boolean.
        read_bool, Bool, bool
    );
    typed_read!(
        /// Read an unsigned byte.
        read_u8, U8, u8
    );
    typed_read!(
        /// Read an unsigned 16-bit integer.
        read_u16, U16, u16
    );
    typed_read!(
        /// Read a signed 32-bit integer.
        read_i32, I32, i32
    );
    typed_read!(
        /// Read an unsigned 32-bit integer.
        read_u32, U32, u32
    );
    typed_read!(
        /// Read a signed 64-bit integer.
        read_i64, I64, i64
    );
    typed_read!(
        /// Read a float.
        read_f64, F64, f64
    );
    typed_read!(
        /// Read world coordinates.
        read_point, Point, Point3D
    );
    typed_read!(
        /// Read an identifier.
        read_uuid, Uuid, Uuid
    );
    typed_read!(
        /// Read a wall-clock instant.
        read_timestamp, Timestamp, DateTime<Utc>
    );
    typed_read!(
        /// Read a span of world time.
        read_duration, Duration, Duration
    );

    /// Read a string.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::MissingField`] past the last field or
    /// [`PersistError::FieldTypeMismatch`] if the field has another type.
    pub fn read_text(&mut self) -> Result<String, PersistError> {
        let index = self.position;
        match self.next_field(FieldType::Text)? {
            FieldValue::Text(value) => Ok(value.clone()),
            other => Err(PersistError::FieldTypeMismatch {
                index,
                expected: FieldType::Text,
                found: other.field_type(),
            }),
        }
    }

    /// Read an optional string written by
    /// [`RecordWriter::write_opt_text`](crate::RecordWriter::write_opt_text).
    ///
    /// # Errors
    ///
    /// Propagates the errors of the underlying flag and value reads.
    pub fn read_opt_text(&mut self) -> Result<Option<String>, PersistError> {
        if self.read_bool()? {
            self.read_text().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Read an optional span written by
    /// [`RecordWriter::write_opt_duration`](crate::RecordWriter::write_opt_duration).
    ///
    /// # Errors
    ///
    /// Propagates the errors of the underlying flag and value reads.
    pub fn read_opt_duration(&mut self) -> Result<Option<Duration>, PersistError> {
        if self.read_bool()? {
            self.read_duration().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Check that every field was consumed.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::TrailingFields`] if fields remain unread.
    pub fn finish(&self, schema: &str) -> Result<(), PersistError> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(PersistError::TrailingFields {
                schema: schema.to_owned(),
                remaining,
            }),
        }
    }
}
