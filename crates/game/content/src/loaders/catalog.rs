//! Stat catalog loaders (RON).

use std::path::Path;

use arena_core::{EquipmentDefinition, PassiveDefinition, RealmDefinition, SpiritualRoot};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Deserialize)]
struct RealmCatalog {
    realms: Vec<RealmDefinition>,
}

#[derive(Debug, Deserialize)]
struct EquipmentCatalog {
    equipment: Vec<EquipmentDefinition>,
}

#[derive(Debug, Deserialize)]
struct PassiveCatalog {
    passives: Vec<PassiveDefinition>,
}

#[derive(Debug, Deserialize)]
struct SpiritualRootCatalog {
    roots: Vec<SpiritualRoot>,
}

fn parse<T: DeserializeOwned>(path: &Path, what: &str) -> LoadResult<T> {
    let content = read_file(path)?;
    ron::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {} RON at {}: {}", what, path.display(), e))
}

/// Loader for the RON stat catalogs.
///
/// File format (realms):
/// ```ron
/// (
///     realms: [
///         (name: "Qi Refining", base_hp: 100.0, base_atk: 10.0, base_def: 5.0),
///     ],
/// )
/// ```
pub struct CatalogLoader;

impl CatalogLoader {
    /// Realms in tier order.
    pub fn realms(path: &Path) -> LoadResult<Vec<RealmDefinition>> {
        Ok(parse::<RealmCatalog>(path, "realm catalog")?.realms)
    }

    pub fn equipment(path: &Path) -> LoadResult<Vec<EquipmentDefinition>> {
        Ok(parse::<EquipmentCatalog>(path, "equipment catalog")?.equipment)
    }

    pub fn passives(path: &Path) -> LoadResult<Vec<PassiveDefinition>> {
        Ok(parse::<PassiveCatalog>(path, "passive catalog")?.passives)
    }

    pub fn spiritual_roots(path: &Path) -> LoadResult<Vec<SpiritualRoot>> {
        Ok(parse::<SpiritualRootCatalog>(path, "spiritual root catalog")?.roots)
    }
}
