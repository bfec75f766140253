//! The [`Versioned`] trait and the generic encode/decode entry points.

use crate::error::PersistError;
use crate::reader::RecordReader;
use crate::record::VersionedRecord;
use crate::writer::RecordWriter;

/// A type persisted as a [`VersionedRecord`].
///
/// Implementors write their current version's fields in a fixed order and
/// read any version up to [`CURRENT_VERSION`](Versioned::CURRENT_VERSION),
/// substituting defaults for fields an older version did not have. When a
/// type gains a field, bump `CURRENT_VERSION`, append the write, and guard
/// the read with `if version >= new_version`.
pub trait Versioned: Sized {
    /// Schema name used in error messages.
    const SCHEMA: &'static str;

    /// Version written by [`encode`].
    const CURRENT_VERSION: u32;

    /// Write the current version's fields in order.
    fn write_fields(&self, writer: &mut RecordWriter);

    /// Read the fields of a record written with `version`.
    ///
    /// `version` is never greater than `CURRENT_VERSION`.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistError`] if a field is missing, has the wrong type,
    /// or holds a value the schema cannot accept.
    fn read_fields(version: u32, reader: &mut RecordReader<'_>) -> Result<Self, PersistError>;
}

/// Encode `value` at its current version.
pub fn encode<T: Versioned>(value: &T) -> VersionedRecord {
    let mut writer = RecordWriter::new(T::CURRENT_VERSION);
    value.write_fields(&mut writer);
    writer.finish()
}

/// Decode a record into `T`.
///
/// # Errors
///
/// Returns [`PersistError::UnsupportedVersion`] if the record is newer than
/// `T::CURRENT_VERSION`, [`PersistError::TrailingFields`] if `T` left
/// fields unread, or whatever `T::read_fields` reports.
pub fn decode<T: Versioned>(record: &VersionedRecord) -> Result<T, PersistError> {
    if record.version > T::CURRENT_VERSION {
        return Err(PersistError::UnsupportedVersion {
            schema: T::SCHEMA.to_owned(),
            found: record.version,
            supported: T::CURRENT_VERSION,
        });
    }
    let mut reader = RecordReader::new(record);
    let value = T::read_fields(record.version, &mut reader)?;
    reader.finish(T::SCHEMA)?;
    Ok(value)
}

/// Encode `value` straight to bytes.
///
/// # Errors
///
/// Returns [`PersistError::Serialization`] if the record cannot be encoded.
pub fn encode_bytes<T: Versioned>(value: &T) -> Result<Vec<u8>, PersistError> {
    encode(value).to_bytes()
}

/// Decode `T` straight from bytes.
///
/// # Errors
///
/// Returns [`PersistError::Corrupt`] for undecodable bytes, otherwise the
/// errors of [`decode`].
pub fn decode_bytes<T: Versioned>(bytes: &[u8]) -> Result<T, PersistError> {
    decode(&VersionedRecord::from_bytes(bytes)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    struct Counter {
        count: u32,
    }

    impl Versioned for Counter {
        const SCHEMA: &'static str = "counter";
        const CURRENT_VERSION: u32 = 0;

        fn write_fields(&self, writer: &mut RecordWriter) {
            writer.write_u32(self.count);
        }

        fn read_fields(_version: u32, reader: &mut RecordReader<'_>) -> Result<Self, PersistError> {
            Ok(Self {
                count: reader.read_u32()?,
            })
        }
    }

    #[test]
    fn encode_tags_current_version() {
        let record = encode(&Counter { count: 9 });
        assert_eq!(record.version, 0);
        assert_eq!(decode::<Counter>(&record).unwrap(), Counter { count: 9 });
    }

    #[test]
    fn newer_version_is_rejected() {
        let mut record = encode(&Counter { count: 9 });
        record.version = 1;
        let err = decode::<Counter>(&record).unwrap_err();
        assert!(matches!(
            err,
            PersistError::UnsupportedVersion {
                found: 1,
                supported: 0,
                ..
            }
        ));
    }

    #[test]
    fn extra_fields_are_trailing() {
        let mut record = encode(&Counter { count: 9 });
        record.fields.push(crate::FieldValue::Bool(true));
        let err = decode::<Counter>(&record).unwrap_err();
        assert!(matches!(err, PersistError::TrailingFields { remaining: 1, .. }));
    }
}
