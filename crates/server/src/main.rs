//! Guild arena server entry point.
//!
//! Composition root: loads `.env`, installs logging, loads the game data,
//! restores the war state snapshot and runs the war scheduler until ctrl-c.
//! Request handlers embed the same [`ArenaRuntime`].
mod dirs;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use arena_content::ContentFactory;
use arena_runtime::{ArenaRuntime, InMemoryWarStore, RuntimeConfig};
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Seconds between state snapshots while running.
const DEFAULT_AUTOSAVE_SECS: u64 = 300;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging()?;

    let factory = ContentFactory::new(dirs::content_dir());
    let data = factory
        .load_game_data()
        .with_context(|| format!("loading game data from {}", factory.data_dir().display()))?;
    let combat = factory.load_combat_config()?;
    let config = RuntimeConfig::from_env().with_combat(combat);

    let state_path = dirs::state_path();
    let store = load_store(&state_path)?;

    let runtime = ArenaRuntime::builder(data)
        .config(config)
        .store(store)
        .build();
    let scheduler = runtime.spawn_scheduler();

    let autosave_secs = std::env::var("ARENA_AUTOSAVE_SECS")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_AUTOSAVE_SECS);
    let mut autosave = tokio::time::interval(Duration::from_secs(autosave_secs));
    autosave.tick().await;

    info!(state = %state_path.display(), autosave_secs, "guild arena running, ctrl-c to stop");

    loop {
        tokio::select! {
            _ = autosave.tick() => {
                if let Err(err) = save(&runtime, &state_path) {
                    error!(%err, "autosave failed");
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("listening for ctrl-c")?;
                break;
            }
        }
    }

    info!("shutting down");
    scheduler.shutdown().await.context("scheduler task")?;
    save(&runtime, &state_path)?;
    info!("state saved");
    Ok(())
}

fn load_store(path: &Path) -> Result<InMemoryWarStore> {
    if !path.exists() {
        warn!(path = %path.display(), "no state snapshot, starting empty");
        return Ok(InMemoryWarStore::new());
    }
    let store = InMemoryWarStore::load_snapshot(path)
        .with_context(|| format!("loading state snapshot {}", path.display()))?;
    info!(path = %path.display(), "state restored");
    Ok(store)
}

fn save(runtime: &ArenaRuntime, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    runtime
        .store()
        .save_snapshot(path)
        .with_context(|| format!("saving state snapshot {}", path.display()))
}

/// Setup logging to both stderr and a file in the log directory.
fn setup_logging() -> Result<()> {
    let log_dir = dirs::log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "arena.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    // Keep the file writer alive for the whole process.
    std::mem::forget(guard);

    info!(log_dir = %log_dir.display(), "logging initialized");
    Ok(())
}
