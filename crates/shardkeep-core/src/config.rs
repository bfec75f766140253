//! Configuration loading and typed config structures for Shardkeep.
//!
//! The canonical configuration lives in `shardkeep-config.yaml` next to the
//! engine binary. This module defines strongly-typed structs mirroring the
//! YAML structure, and a loader that reads and validates the file. Every
//! field has a default, so an empty file (or no file) is a valid config.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable overriding `persistence.save_path`.
pub const SAVE_PATH_ENV: &str = "SHARDKEEP_SAVE_PATH";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is out of range.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level shard configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ShardConfig {
    /// World-level settings (name, seed, timing).
    #[serde(default)]
    pub world: WorldConfig,

    /// Item tuning values.
    #[serde(default)]
    pub items: ItemsConfig,

    /// Save-file settings.
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

impl ShardConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// The `SHARDKEEP_SAVE_PATH` environment variable overrides
    /// `persistence.save_path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.persistence.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that the type system cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let items = &self.items;
        for (name, value) in [
            ("items.blood_min_secs", items.blood_min_secs),
            ("items.blood_max_secs", items.blood_max_secs),
            ("items.keepsake_cleanup_secs", items.keepsake_cleanup_secs),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    reason: format!("{name} must be a non-negative number of seconds, got {value}"),
                });
            }
        }
        if items.blood_min_secs > items.blood_max_secs {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "items.blood_min_secs ({}) exceeds items.blood_max_secs ({})",
                    items.blood_min_secs, items.blood_max_secs
                ),
            });
        }
        if self.world.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                reason: "world.tick_interval_ms must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable shard name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Seed for the world's random number generator.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Real-time milliseconds between timing-loop iterations.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Stop after this many loop iterations (0 = run until stopped).
    #[serde(default)]
    pub max_ticks: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: 0,
        }
    }
}

/// Tuning values for item behaviors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemsConfig {
    /// Shortest lifespan of a blood splatter, in seconds.
    #[serde(default = "default_blood_min_secs")]
    pub blood_min_secs: f64,

    /// Longest lifespan of a blood splatter, in seconds.
    #[serde(default = "default_blood_max_secs")]
    pub blood_max_secs: f64,

    /// Delay before a thrown keepsake is cleaned up, in seconds.
    #[serde(default = "default_keepsake_cleanup_secs")]
    pub keepsake_cleanup_secs: f64,

    /// Search radius around the target when placing a thrown keepsake.
    #[serde(default = "default_keepsake_throw_range")]
    pub keepsake_throw_range: u32,
}

impl Default for ItemsConfig {
    fn default() -> Self {
        Self {
            blood_min_secs: default_blood_min_secs(),
            blood_max_secs: default_blood_max_secs(),
            keepsake_cleanup_secs: default_keepsake_cleanup_secs(),
            keepsake_throw_range: default_keepsake_throw_range(),
        }
    }
}

/// Save-file configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersistenceConfig {
    /// Path of the world save file.
    #[serde(default = "default_save_path")]
    pub save_path: PathBuf,

    /// Save every this many loop iterations (0 = only on shutdown).
    #[serde(default = "default_autosave_interval_ticks")]
    pub autosave_interval_ticks: u64,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            save_path: default_save_path(),
            autosave_interval_ticks: default_autosave_interval_ticks(),
        }
    }
}

impl PersistenceConfig {
    /// Apply environment overrides. Unset or empty variables are ignored.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides read through `lookup`, keyed by variable name.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(SAVE_PATH_ENV).filter(|path| !path.is_empty()) {
            self.save_path = PathBuf::from(path);
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    "Shardkeep".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_tick_interval_ms() -> u64 {
    50
}

const fn default_blood_min_secs() -> f64 {
    3.0
}

const fn default_blood_max_secs() -> f64 {
    6.0
}

const fn default_keepsake_cleanup_secs() -> f64 {
    60.0
}

const fn default_keepsake_throw_range() -> u32 {
    2
}

fn default_save_path() -> PathBuf {
    PathBuf::from("saves/world.bin")
}

const fn default_autosave_interval_ticks() -> u64 {
    6000
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_uses_defaults() {
        let config = ShardConfig::parse("{}").unwrap();
        assert_eq!(config.world.name, "Shardkeep");
        assert_eq!(config.world.tick_interval_ms, 50);
        assert_eq!(config.items.keepsake_throw_range, 2);
        assert_eq!(config.persistence.autosave_interval_ticks, 6000);
    }

    #[test]
    fn partial_yaml_overrides_fields() {
        let yaml = r"
world:
  name: Trinsic
  seed: 7
items:
  blood_min_secs: 1.5
  blood_max_secs: 2.5
persistence:
  autosave_interval_ticks: 0
";
        let config = ShardConfig::parse(yaml).unwrap();
        assert_eq!(config.world.name, "Trinsic");
        assert_eq!(config.world.seed, 7);
        assert_eq!(config.world.tick_interval_ms, 50);
        assert!((config.items.blood_min_secs - 1.5).abs() < f64::EPSILON);
        assert_eq!(config.persistence.autosave_interval_ticks, 0);
    }

    #[test]
    fn inverted_blood_range_is_rejected() {
        let yaml = "items:\n  blood_min_secs: 9.0\n  blood_max_secs: 2.0\n";
        let err = ShardConfig::parse(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn negative_cleanup_delay_is_rejected() {
        let yaml = "items:\n  keepsake_cleanup_secs: -1.0\n";
        assert!(ShardConfig::parse(yaml).is_err());
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let yaml = "world:\n  tick_interval_ms: 0\n";
        assert!(ShardConfig::parse(yaml).is_err());
    }

    #[test]
    fn save_path_override_replaces_configured_path() {
        let mut persistence = PersistenceConfig::default();
        persistence.apply_overrides(|key| (key == SAVE_PATH_ENV).then(|| "/srv/shard/world.bin".to_owned()));
        assert_eq!(persistence.save_path, PathBuf::from("/srv/shard/world.bin"));
    }

    #[test]
    fn unset_or_empty_override_keeps_configured_path() {
        let mut persistence = PersistenceConfig::default();
        persistence.apply_overrides(|_| None);
        assert_eq!(persistence.save_path, default_save_path());

        persistence.apply_overrides(|_| Some(String::new()));
        assert_eq!(persistence.save_path, default_save_path());
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        let err = ShardConfig::parse("world: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }
}
