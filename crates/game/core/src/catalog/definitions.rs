//! Static definitions making up the game data snapshot.

use crate::combat::AbilityEffect;
use crate::stats::CombatStats;

use super::StatBonus;

/// Cultivation realm: the tier base every character's stats start from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RealmDefinition {
    pub name: String,
    pub base_hp: f64,
    pub base_atk: f64,
    pub base_def: f64,
    pub base_speed: f64,
    pub base_crit_rate: f64,
    pub base_crit_damage: f64,
    pub base_dodge_rate: f64,
    pub base_hit_rate: f64,
    pub base_crit_resist: f64,
    pub base_lifesteal_resist: f64,
    pub base_counter_resist: f64,
}

impl Default for RealmDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            base_hp: 0.0,
            base_atk: 0.0,
            base_def: 0.0,
            base_speed: 0.0,
            base_crit_rate: 0.0,
            base_crit_damage: 1.5,
            base_dodge_rate: 0.0,
            base_hit_rate: 0.0,
            base_crit_resist: 0.0,
            base_lifesteal_resist: 0.0,
            base_counter_resist: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentDefinition {
    pub id: String,
    pub name: String,
    pub slot: String,
    pub bonuses: Vec<StatBonus>,
}

/// Passive unlock (insight) granting permanent bonuses.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveDefinition {
    pub id: String,
    pub name: String,
    pub bonuses: Vec<StatBonus>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpiritualRoot {
    pub id: String,
    pub name: String,
    pub bonus: StatBonus,
}

/// Learnable PvP technique; becomes an [`crate::Ability`] in combat.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: String,
    pub name: String,
    /// Honor points required to learn.
    pub cost: u64,
    pub energy_cost: u32,
    pub effect: AbilityEffect,
}

/// Bonuses unlocked once a guild reaches `level`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuildLevelBonus {
    pub level: u32,
    pub bonuses: Vec<StatBonus>,
}

/// Fixed opponent of a PvE trial.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTemplate {
    pub name: String,
    pub hp: u32,
    pub attack: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed: u32,
}

impl MonsterTemplate {
    /// Monster stats: raw hp/attack/defense/speed, no secondary rates.
    pub fn stats(&self) -> CombatStats {
        CombatStats {
            hp: self.hp.max(1),
            attack: self.attack,
            defense: self.defense,
            speed: self.speed,
            crit_damage: 1.0,
            ..CombatStats::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialZone {
    pub id: String,
    pub name: String,
    pub required_realm: usize,
    pub cooldown_secs: u64,
    pub monster: MonsterTemplate,
    pub rewards: Vec<Reward>,
}

/// Typed reward entry granted by trials and guild wars.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Reward {
    /// Spirit stones added to the wallet.
    Currency { amount: u64 },
    /// Named consumable (pill) stacked in the bag.
    Consumable { item_id: String, amount: u32 },
    /// One new instance of a named equipment piece.
    Equipment { item_id: String },
    /// Honor points.
    Points { amount: u64 },
}
