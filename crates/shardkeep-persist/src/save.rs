//! Whole-world save files.
//!
//! # File Format
//!
//! ```text
//! +--------+------------------+-------------------------+
//! | "SKSV" | format version   | bincode(SaveBody)       |
//! | 4 B    | u32 little-endian| ...                     |
//! +--------+------------------+-------------------------+
//! ```
//!
//! The format version sits outside the bincode payload so a file written
//! by a newer build is rejected before its body is decoded. Inside the
//! body every item and actor keeps its records as separate byte blobs, so
//! one damaged entry fails on its own and its siblings still load.
//!
//! Files are written to a `.tmp` sibling and renamed into place.

use core::time::Duration;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shardkeep_types::{ActorId, ItemId};

use crate::error::PersistError;

const MAGIC: &[u8; 4] = b"SKSV";
const HEADER_LEN: usize = 8;

/// One persisted item: identity, kind code, and its two layered records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEntry {
    /// Item identity, preserved across save and load.
    pub id: ItemId,
    /// Kind code selecting the item type on load.
    pub kind_code: u16,
    /// Encoded base-item record.
    pub base: Vec<u8>,
    /// Encoded item-class record.
    pub class: Vec<u8>,
}

/// One persisted actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorEntry {
    /// Actor identity.
    pub id: ActorId,
    /// Encoded actor record.
    pub record: Vec<u8>,
}

/// A snapshot of the world as written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFile {
    /// Save-file layout version.
    pub format_version: u32,
    /// Wall-clock time the snapshot was taken.
    pub saved_at: DateTime<Utc>,
    /// World clock at the time of the snapshot.
    pub world_time: Duration,
    /// Persisted actors.
    pub actors: Vec<ActorEntry>,
    /// Persisted items.
    pub items: Vec<ItemEntry>,
}

#[derive(Serialize, Deserialize)]
struct SaveBody {
    saved_at: DateTime<Utc>,
    world_time: Duration,
    actors: Vec<ActorEntry>,
    items: Vec<ItemEntry>,
}

impl SaveFile {
    /// Save-file layout version written by this build.
    pub const CURRENT_FORMAT: u32 = 1;

    /// Start an empty snapshot at `world_time`, stamped with the current
    /// wall-clock time.
    pub fn new(world_time: Duration) -> Self {
        Self {
            format_version: Self::CURRENT_FORMAT,
            saved_at: Utc::now(),
            world_time,
            actors: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Encode the snapshot into its on-disk byte form.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Serialization`] if the body cannot be encoded.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistError> {
        let body = SaveBody {
            saved_at: self.saved_at,
            world_time: self.world_time,
            actors: self.actors.clone(),
            items: self.items.clone(),
        };
        let payload = bincode::serialize(&body).map_err(|e| PersistError::serialization(&e))?;
        let mut bytes = Vec::with_capacity(HEADER_LEN.saturating_add(payload.len()));
        bytes.extend_from_slice(MAGIC);
        bytes.extend_from_slice(&self.format_version.to_le_bytes());
        bytes.extend_from_slice(&payload);
        Ok(bytes)
    }

    /// Decode a snapshot from its on-disk byte form.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::UnsupportedVersion`] if the file was written
    /// by a newer build, or [`PersistError::Corrupt`] if the header or body
    /// cannot be decoded.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistError> {
        let magic = bytes.get(..MAGIC.len());
        if magic != Some(MAGIC.as_slice()) {
            return Err(PersistError::Corrupt {
                reason: "missing save file header".to_owned(),
            });
        }
        let version_bytes: [u8; 4] = bytes
            .get(MAGIC.len()..HEADER_LEN)
            .and_then(|slice| slice.try_into().ok())
            .ok_or_else(|| PersistError::Corrupt {
                reason: "truncated save file header".to_owned(),
            })?;
        let format_version = u32::from_le_bytes(version_bytes);
        if format_version > Self::CURRENT_FORMAT {
            return Err(PersistError::UnsupportedVersion {
                schema: "save file".to_owned(),
                found: format_version,
                supported: Self::CURRENT_FORMAT,
            });
        }

        let payload = bytes.get(HEADER_LEN..).unwrap_or_default();
        let body: SaveBody = bincode::deserialize(payload).map_err(|e| PersistError::corrupt(&e))?;
        Ok(Self {
            format_version,
            saved_at: body.saved_at,
            world_time: body.world_time,
            actors: body.actors,
            items: body.items,
        })
    }
}

/// Reads and writes the world save file at a fixed path.
#[derive(Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    /// Create a store for the save file at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the save file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `save` atomically, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Io`] if the file cannot be written, or
    /// [`PersistError::Serialization`] if encoding fails.
    pub fn save(&self, save: &SaveFile) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let bytes = save.to_bytes()?;
        let temp_path = self.temp_path();
        fs::write(&temp_path, &bytes)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            items = save.items.len(),
            actors = save.actors.len(),
            bytes = bytes.len(),
            "saved world"
        );
        Ok(())
    }

    /// Load the save file. Returns `None` if no save exists yet.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Io`] if the file exists but cannot be read,
    /// otherwise the errors of [`SaveFile::from_bytes`].
    pub fn load(&self) -> Result<Option<SaveFile>, PersistError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&self.path)?;
        let save = SaveFile::from_bytes(&bytes)?;

        tracing::debug!(
            path = %self.path.display(),
            format_version = save.format_version,
            items = save.items.len(),
            actors = save.actors.len(),
            "loaded world"
        );
        Ok(Some(save))
    }

    /// Whether a save file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> SaveFile {
        let mut save = SaveFile::new(Duration::from_secs(90));
        save.items.push(ItemEntry {
            id: ItemId::new(),
            kind_code: 6,
            base: vec![1, 2, 3],
            class: vec![4, 5],
        });
        save.actors.push(ActorEntry {
            id: ActorId::new(),
            record: vec![9],
        });
        save
    }

    #[test]
    fn bytes_roundtrip() {
        let save = sample();
        let bytes = save.to_bytes().unwrap();
        assert_eq!(bytes.get(..4), Some(MAGIC.as_slice()));
        assert_eq!(SaveFile::from_bytes(&bytes).unwrap(), save);
    }

    #[test]
    fn newer_format_fails_whole_load() {
        let mut save = sample();
        save.format_version = SaveFile::CURRENT_FORMAT.saturating_add(1);
        let bytes = save.to_bytes().unwrap();
        let err = SaveFile::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, PersistError::UnsupportedVersion { found: 2, supported: 1, .. }));
    }

    #[test]
    fn missing_magic_is_corrupt() {
        let err = SaveFile::from_bytes(b"nope").unwrap_err();
        assert!(matches!(err, PersistError::Corrupt { .. }));
    }

    #[test]
    fn store_roundtrip_through_disk() {
        let dir = std::env::temp_dir().join(format!("shardkeep-save-{}", uuid::Uuid::new_v4()));
        let store = SaveStore::new(dir.join("world.bin"));
        assert!(store.load().unwrap().is_none());

        let save = sample();
        store.save(&save).unwrap();
        assert!(store.exists());
        assert!(!store.temp_path().exists());
        assert_eq!(store.load().unwrap(), Some(save));

        fs::remove_dir_all(&dir).unwrap();
    }
}
