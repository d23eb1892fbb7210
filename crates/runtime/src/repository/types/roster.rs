//! Guild, player and PvP history rows.

use std::collections::BTreeMap;

use arena_core::{CharacterProfile, CombatLogEntry, Reward};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::GuildId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guild {
    pub id: GuildId,
    pub name: String,
    pub level: u32,
    /// The only member allowed to register for wars and submit lineups.
    #[serde(default)]
    pub leader: Option<String>,
}

impl Guild {
    pub fn new(id: GuildId, name: impl Into<String>, level: u32) -> Self {
        Self {
            id,
            name: name.into(),
            level,
            leader: None,
        }
    }

    #[must_use]
    pub fn with_leader(mut self, leader: impl Into<String>) -> Self {
        self.leader = Some(leader.into());
        self
    }

    /// A guild without a leader accepts no one.
    pub fn is_led_by(&self, name: &str) -> bool {
        self.leader.as_deref() == Some(name)
    }
}

/// Everything a reward can land in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wallet {
    pub currency: u64,
    pub honor: u64,
    /// Grows when a higher-realm attacker beats a lower-realm defender.
    pub karma: u64,
    /// Consumable id -> count.
    pub consumables: BTreeMap<String, u64>,
    /// Owned equipment instances (ids may repeat).
    pub equipment: Vec<String>,
}

impl Wallet {
    pub fn apply(&mut self, reward: &Reward) {
        match reward {
            Reward::Currency { amount } => {
                self.currency = self.currency.saturating_add(*amount);
            }
            Reward::Consumable { item_id, amount } => {
                let count = self.consumables.entry(item_id.clone()).or_default();
                *count = count.saturating_add(u64::from(*amount));
            }
            Reward::Equipment { item_id } => self.equipment.push(item_id.clone()),
            Reward::Points { amount } => {
                self.honor = self.honor.saturating_add(*amount);
            }
        }
    }
}

/// Persisted character state the combat core reads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub guild_id: Option<GuildId>,
    pub profile: CharacterProfile,
    #[serde(default)]
    pub equipped: Vec<String>,
    #[serde(default)]
    pub passives: Vec<String>,
    /// Learned PvP skill ids, in declaration order.
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub wallet: Wallet,
    #[serde(default)]
    pub last_pvp_at: Option<DateTime<Utc>>,
    /// Trial zone id -> last attempt.
    #[serde(default)]
    pub trial_attempts: BTreeMap<String, DateTime<Utc>>,
}

impl Player {
    pub fn new(name: impl Into<String>, profile: CharacterProfile) -> Self {
        Self {
            name: name.into(),
            guild_id: None,
            profile,
            equipped: Vec::new(),
            passives: Vec::new(),
            skills: Vec::new(),
            wallet: Wallet::default(),
            last_pvp_at: None,
            trial_attempts: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_guild(mut self, guild: GuildId) -> Self {
        self.guild_id = Some(guild);
        self
    }

    #[must_use]
    pub fn with_equipment<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.equipped = items.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_passives<I, S>(mut self, passives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.passives = passives.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }
}

/// One PvP challenge, kept for replay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PvpRecord {
    pub id: u64,
    pub attacker: String,
    pub defender: String,
    /// `None` only if the fight was drawn.
    pub winner: Option<String>,
    pub attacker_honor_change: i64,
    pub defender_honor_change: i64,
    #[serde(default)]
    pub attacker_karma_gain: u64,
    pub fought_at: DateTime<Utc>,
    pub log: Vec<CombatLogEntry>,
}
