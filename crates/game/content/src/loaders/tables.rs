//! Tagged game tables loader (TOML): skills, trial zones, guild tiers.

use std::path::Path;

use arena_core::{GuildLevelBonus, SkillDefinition, TrialZone};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TablesToml {
    skills: Vec<SkillDefinition>,
    trials: Vec<TrialZone>,
    guild_levels: Vec<GuildLevelBonus>,
}

/// Game rules tables.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tables {
    pub skills: Vec<SkillDefinition>,
    pub trial_zones: Vec<TrialZone>,
    pub guild_levels: Vec<GuildLevelBonus>,
}

/// Loader for `tables.toml`.
///
/// File format:
/// ```toml
/// [[skills]]
/// id = "thunder-palm"
/// name = "Thunder Palm"
/// cost = 50
/// energy_cost = 60
/// effect = { type = "strike", multiplier = 1.8, armor_pierce = 0.2 }
///
/// [[guild_levels]]
/// level = 2
/// bonuses = [{ kind = "hp_add", value = 50.0 }]
/// ```
pub struct TablesLoader;

impl TablesLoader {
    pub fn load(path: &Path) -> LoadResult<Tables> {
        let content = read_file(path)?;
        let raw: TablesToml = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tables TOML: {}", e))?;

        Ok(Tables {
            skills: raw.skills,
            trial_zones: raw.trials,
            guild_levels: raw.guild_levels,
        })
    }
}
