//! Deterministic combat rules and stat aggregation for the guild arena.
//!
//! `arena-core` defines the canonical rules (stat folding, turn-based combat,
//! seeded randomness) and exposes pure APIs reused by the runtime adapters
//! (PvE trials, PvP challenges, guild-war duels) and by offline tools. Nothing
//! in this crate performs I/O; every input arrives as an explicit value, most
//! notably the immutable [`GameData`] catalog snapshot.
pub mod catalog;
pub mod combat;
pub mod config;
pub mod error;
pub mod rng;
pub mod stats;

pub use catalog::{
    BonusKind, EquipmentDefinition, GameData, GuildLevelBonus, MonsterTemplate,
    PassiveDefinition, RealmDefinition, Reward, SkillDefinition, SpiritualRoot, StatBonus,
    TrialZone,
};
pub use combat::{
    Ability, AbilityEffect, CombatLogEntry, CombatOutcome, Combatant, CombatantSnapshot, LogKind,
    Side, Winner, resolve,
};
pub use config::{CombatConfig, CombatMode, CombatRules, TieBreak};
pub use error::{ErrorSeverity, GameError};
pub use rng::{CombatRng, PcgRng, RngOracle, RollContext, compute_seed};
pub use stats::{
    BonusStack, CharacterProfile, CombatStats, GlobalModifier, StatsError, aggregate,
};
