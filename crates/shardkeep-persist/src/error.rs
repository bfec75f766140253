//! Error types for record decoding and save-file I/O.

use crate::record::FieldType;

/// Errors raised while encoding, decoding, saving, or loading records.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// A record was written by a newer schema version than this build reads.
    #[error("unsupported {schema} version {found} (this build reads up to {supported})")]
    UnsupportedVersion {
        /// Name of the schema being decoded.
        schema: String,
        /// Version found in the record.
        found: u32,
        /// Highest version this build understands.
        supported: u32,
    },

    /// The reader asked for more fields than the record holds.
    #[error("missing field {index}: expected {expected}")]
    MissingField {
        /// Zero-based field position.
        index: usize,
        /// Type the reader asked for.
        expected: FieldType,
    },

    /// A field held a different primitive type than the reader asked for.
    #[error("field {index} type mismatch: expected {expected}, found {found}")]
    FieldTypeMismatch {
        /// Zero-based field position.
        index: usize,
        /// Type the reader asked for.
        expected: FieldType,
        /// Type actually stored.
        found: FieldType,
    },

    /// The reader finished but the record still had unread fields.
    #[error("{schema} record has {remaining} unread trailing fields")]
    TrailingFields {
        /// Name of the schema being decoded.
        schema: String,
        /// Number of fields left over.
        remaining: usize,
    },

    /// A field decoded but its value is not meaningful for the schema.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Bytes could not be decoded into a record or save file.
    #[error("corrupt data: {reason}")]
    Corrupt {
        /// Decoder message.
        reason: String,
    },

    /// Encoding a record or save file into bytes failed.
    #[error("serialization failed: {reason}")]
    Serialization {
        /// Encoder message.
        reason: String,
    },

    /// Reading or writing the save file failed.
    #[error("save file I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

impl PersistError {
    pub(crate) fn corrupt(err: &bincode::Error) -> Self {
        Self::Corrupt {
            reason: err.to_string(),
        }
    }

    pub(crate) fn serialization(err: &bincode::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}
