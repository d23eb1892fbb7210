//! Platform-specific directory utilities.

use std::env;
use std::path::PathBuf;

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "guild-arena")
}

/// Log directory, `ARENA_LOG_DIR` or the platform cache directory.
///
/// - macOS: `~/Library/Caches/guild-arena/logs`
/// - Linux: `~/.cache/guild-arena/logs` (or `$XDG_CACHE_HOME/guild-arena/logs`)
/// - Windows: `%LOCALAPPDATA%\guild-arena\logs`
/// - Fallback: `/tmp/guild-arena/logs`
pub fn log_dir() -> PathBuf {
    if let Some(dir) = env::var_os("ARENA_LOG_DIR") {
        return PathBuf::from(dir);
    }
    project_dirs()
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/guild-arena"))
        .join("logs")
}

/// Game data directory, `ARENA_DATA_DIR` or the bundled content.
pub fn content_dir() -> PathBuf {
    env::var_os("ARENA_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("crates/game/content/data"))
}

/// War state snapshot, `ARENA_STATE_PATH` or `state.json` in the platform
/// data directory.
pub fn state_path() -> PathBuf {
    if let Some(path) = env::var_os("ARENA_STATE_PATH") {
        return PathBuf::from(path);
    }
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
        .join("state.json")
}
