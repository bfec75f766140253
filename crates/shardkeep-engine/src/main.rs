//! Shard binary for Shardkeep.
//!
//! Wires together configuration, the item world, the save store, and the
//! timing loop, then runs until the tick cap is reached or the process
//! receives Ctrl-C. The world is saved on the way out.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `shardkeep-config.yaml`
//! 3. Create the world and restore the save file, or place starting items
//! 4. Create shard control and install the Ctrl-C handler
//! 5. Run the timing loop with the autosave callback
//! 6. Write the shutdown save

mod callback;
mod error;
mod seed;

use std::path::Path;
use std::sync::Arc;

use shardkeep_core::config::ShardConfig;
use shardkeep_core::control::ShardControl;
use shardkeep_core::runner;
use shardkeep_items::{OpenTerrain, World};
use shardkeep_persist::SaveStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::callback::ShardCallback;
use crate::error::EngineError;

const CONFIG_PATH: &str = "shardkeep-config.yaml";

/// Application entry point for the shard.
///
/// # Errors
///
/// Returns an error if configuration, restore, the timing loop, or the
/// shutdown save fails.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("shardkeep-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        tick_interval_ms = config.world.tick_interval_ms,
        max_ticks = config.world.max_ticks,
        save_path = %config.persistence.save_path.display(),
        "Configuration loaded"
    );

    // 3. Create the world and bring back the last save.
    let mut world = World::new(config.items.clone(), config.world.seed, Box::new(OpenTerrain));
    let store = SaveStore::new(&config.persistence.save_path);
    match store.load()? {
        Some(save) => {
            let report = world.restore(save)?;
            for failure in &report.failures {
                warn!(entry = ?failure.entry, error = %failure.error, "save entry skipped");
            }
        }
        None => {
            info!("No save file found, placing starting items");
            seed::seed_starting_items(&mut world)?;
        }
    }

    // 4. Create shard control and listen for Ctrl-C.
    let control = Arc::new(ShardControl::new(
        config.world.tick_interval_ms,
        config.world.max_ticks,
    ));
    {
        let control = Arc::clone(&control);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Ctrl-C received, stopping shard");
                    control.request_stop();
                }
                Err(e) => warn!(error = %e, "failed to listen for Ctrl-C"),
            }
        });
    }

    // 5. Run the timing loop.
    let mut callback = ShardCallback::new(store.clone(), config.persistence.autosave_interval_ticks);
    let result = runner::run_shard(&mut world, &control, &mut callback).await?;

    // 6. Save on the way out.
    store.save(&world.snapshot()?)?;

    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        total_fired = result.total_fired,
        autosaves = callback.saves_written(),
        items = world.item_count(),
        "shardkeep-engine shutdown complete"
    );

    Ok(())
}

/// Load the shard configuration from `shardkeep-config.yaml`.
///
/// Looks for the file relative to the current working directory and falls
/// back to defaults when it is missing.
fn load_config() -> Result<ShardConfig, EngineError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        Ok(ShardConfig::from_file(config_path)?)
    } else {
        info!("Config file not found, using defaults");
        let mut config = ShardConfig::default();
        config.persistence.apply_env_overrides();
        Ok(config)
    }
}
