//! Content factory for building the game data snapshot from data files.

use std::path::{Path, PathBuf};

use arena_core::{CombatConfig, GameData};

use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult, TablesLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// ├── tables.toml
/// ├── realms.ron
/// ├── equipment.ron
/// ├── passives.ron
/// └── spiritual_roots.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat tuning from `combat.toml`.
    pub fn load_combat_config(&self) -> LoadResult<CombatConfig> {
        ConfigLoader::load(&self.data_dir.join("combat.toml"))
    }

    /// Load every catalog and table into one immutable snapshot.
    pub fn load_game_data(&self) -> LoadResult<GameData> {
        let tables = TablesLoader::load(&self.data_dir.join("tables.toml"))?;

        Ok(GameData {
            realms: CatalogLoader::realms(&self.data_dir.join("realms.ron"))?,
            equipment: CatalogLoader::equipment(&self.data_dir.join("equipment.ron"))?,
            passives: CatalogLoader::passives(&self.data_dir.join("passives.ron"))?,
            spiritual_roots: CatalogLoader::spiritual_roots(
                &self.data_dir.join("spiritual_roots.ron"),
            )?,
            skills: tables.skills,
            trial_zones: tables.trial_zones,
            guild_levels: tables.guild_levels,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
