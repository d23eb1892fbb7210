//! Content loaders for reading game data from files.
//!
//! RON carries the stat catalogs (realms, equipment, passives, roots); TOML
//! carries tuning and tagged tables (combat config, skills, trials, guild tiers).

pub mod catalog;
pub mod config;
pub mod factory;
pub mod tables;

pub use catalog::CatalogLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use tables::TablesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
