//! Guild war, match, lineup and fight rows.

use arena_core::{CombatLogEntry, Reward};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{GuildId, MatchId, WarId};

/// Fighters per lineup, duels per round.
pub const LINEUP_SIZE: usize = 3;

/// Rounds per match.
pub const MAX_ROUNDS: u8 = 3;

/// Round wins that end a match early.
pub const ROUNDS_TO_WIN: u8 = 2;

/// War lifecycle. Variants are ordered; a war only ever moves forward.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum WarStatus {
    Pending,
    Registration,
    InProgress,
    Completed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuildWar {
    pub id: WarId,
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub status: WarStatus,
    pub rewards: Vec<Reward>,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    PendingLineup,
    InProgress,
    Completed,
}

/// Best-of-three series between two guilds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub war_id: WarId,
    pub guilds: [GuildId; 2],
    /// 1-based round awaiting lineups (or last resolved once completed).
    pub current_round: u8,
    pub round_wins: [u8; 2],
    pub status: MatchStatus,
    pub winner: Option<GuildId>,
    /// Drawn at pairing; every duel seed derives from it.
    pub seed: u64,
    pub rewards_settled: bool,
}

impl Match {
    pub fn new(id: MatchId, war_id: WarId, guilds: [GuildId; 2], seed: u64) -> Self {
        Self {
            id,
            war_id,
            guilds,
            current_round: 1,
            round_wins: [0, 0],
            status: MatchStatus::PendingLineup,
            winner: None,
            seed,
            rewards_settled: false,
        }
    }

    /// Index (0 or 1) of `guild` in this match.
    pub fn side_of(&self, guild: GuildId) -> Option<usize> {
        self.guilds.iter().position(|g| *g == guild)
    }

    pub fn opponent_of(&self, guild: GuildId) -> Option<GuildId> {
        self.side_of(guild).map(|side| self.guilds[1 - side])
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }
}

/// Three fighters a guild sends into one round, in duel order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineup {
    pub match_id: MatchId,
    pub round: u8,
    pub guild_id: GuildId,
    pub fighters: [String; LINEUP_SIZE],
    pub submitted_at: DateTime<Utc>,
}

/// One positional duel.
///
/// Index 0 of the paired arrays is the match's first guild.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FightResult {
    pub match_id: MatchId,
    pub round: u8,
    /// 1-based position within the round.
    pub position: u8,
    /// `None` when the side had no lineup or the fighter record vanished.
    pub fighters: [Option<String>; 2],
    pub winner: Option<String>,
    pub winner_guild: Option<GuildId>,
    pub remaining_hp: [u32; 2],
    pub max_hp: [u32; 2],
    /// Decided without a fight because at least one side was absent.
    pub walkover: bool,
    pub log: Vec<CombatLogEntry>,
}
