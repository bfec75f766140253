//! Error types for the shard binary.

/// Top-level error for the shard binary.
///
/// Each variant wraps a subsystem error so `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: shardkeep_core::config::ConfigError,
    },

    /// A world operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: shardkeep_items::WorldError,
    },

    /// Reading or writing the save file failed.
    #[error("save error: {source}")]
    Persist {
        /// The underlying persistence error.
        #[from]
        source: shardkeep_persist::PersistError,
    },

    /// The timing loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: shardkeep_core::runner::RunnerError,
    },
}
