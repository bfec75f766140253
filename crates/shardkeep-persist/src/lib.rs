//! Versioned record codec and world save files for Shardkeep.
//!
//! Every persisted object is written as a [`VersionedRecord`]: a schema
//! version tag followed by an ordered list of typed primitive fields. The
//! record is produced by a [`RecordWriter`] and consumed by a
//! [`RecordReader`]; types opt in by implementing [`Versioned`], which
//! pairs a field order with a per-version read function.
//!
//! # Versioning Rules
//!
//! - A writer always writes the type's current version.
//! - A reader accepts any version up to its own current version and
//!   defaults fields that older versions lack.
//! - A record from a newer version is rejected with
//!   [`PersistError::UnsupportedVersion`] instead of being misread.
//!
//! # Modules
//!
//! - [`record`] -- [`FieldValue`], [`FieldType`], and [`VersionedRecord`]
//!   with its byte form.
//! - [`writer`] / [`reader`] -- typed field sequencing.
//! - [`codec`] -- the [`Versioned`] trait with [`encode`] and [`decode`].
//! - [`actor`] -- the [`Versioned`] schema for [`Actor`].
//! - [`save`] -- whole-world [`SaveFile`]s and the atomic [`SaveStore`].
//!
//! [`Actor`]: shardkeep_types::Actor

pub mod actor;
pub mod codec;
pub mod error;
pub mod reader;
pub mod record;
pub mod save;
pub mod writer;

pub use codec::{Versioned, decode, decode_bytes, encode, encode_bytes};
pub use error::PersistError;
pub use reader::RecordReader;
pub use record::{FieldType, FieldValue, VersionedRecord};
pub use save::{ActorEntry, ItemEntry, SaveFile, SaveStore};
pub use writer::RecordWriter;
