//! Immutable game data snapshot.
//!
//! [`GameData`] replaces any notion of ambient "current game data": callers
//! receive a snapshot explicitly and pass it to [`crate::aggregate`] and the
//! adapters. Reloading swaps the whole snapshot; an in-flight resolution keeps
//! reading the one it started with.
mod bonus;
mod definitions;

pub use bonus::{BonusKind, StatBonus};
pub use definitions::{
    EquipmentDefinition, GuildLevelBonus, MonsterTemplate, PassiveDefinition, RealmDefinition,
    Reward, SkillDefinition, SpiritualRoot, TrialZone,
};

use crate::combat::Ability;

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameData {
    /// Realms ordered by tier; a character's realm index points into this list.
    pub realms: Vec<RealmDefinition>,
    pub equipment: Vec<EquipmentDefinition>,
    pub passives: Vec<PassiveDefinition>,
    pub spiritual_roots: Vec<SpiritualRoot>,
    pub skills: Vec<SkillDefinition>,
    pub trial_zones: Vec<TrialZone>,
    pub guild_levels: Vec<GuildLevelBonus>,
}

impl GameData {
    pub fn realm(&self, index: usize) -> Option<&RealmDefinition> {
        self.realms.get(index)
    }

    pub fn equipment(&self, id: &str) -> Option<&EquipmentDefinition> {
        self.equipment.iter().find(|item| item.id == id)
    }

    pub fn passive(&self, id: &str) -> Option<&PassiveDefinition> {
        self.passives.iter().find(|passive| passive.id == id)
    }

    pub fn spiritual_root(&self, id: &str) -> Option<&SpiritualRoot> {
        self.spiritual_roots.iter().find(|root| root.id == id)
    }

    pub fn skill(&self, id: &str) -> Option<&SkillDefinition> {
        self.skills.iter().find(|skill| skill.id == id)
    }

    pub fn trial_zone(&self, id: &str) -> Option<&TrialZone> {
        self.trial_zones.iter().find(|zone| zone.id == id)
    }

    /// Bonus entries of every guild tier at or below `level`.
    pub fn guild_bonuses(&self, level: u32) -> impl Iterator<Item = &StatBonus> {
        self.guild_levels
            .iter()
            .filter(move |tier| tier.level <= level)
            .flat_map(|tier| tier.bonuses.iter())
    }

    /// Resolves learned skill ids into combat abilities, preserving order.
    ///
    /// Unknown ids are skipped.
    pub fn abilities<'a>(&self, skill_ids: impl IntoIterator<Item = &'a str>) -> Vec<Ability> {
        skill_ids
            .into_iter()
            .filter_map(|id| self.skill(id))
            .map(Ability::from)
            .collect()
    }
}
