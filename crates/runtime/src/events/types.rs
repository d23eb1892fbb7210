//! Event types for different topics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repository::{GuildId, MatchId, WarId, WarStatus};

/// War lifecycle events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WarEvent {
    Scheduled {
        war: WarId,
        name: String,
        start_time: DateTime<Utc>,
    },

    StatusChanged {
        war: WarId,
        from: WarStatus,
        to: WarStatus,
    },

    GuildRegistered { war: WarId, guild: GuildId },
}

/// Match progress events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    Paired {
        war: WarId,
        match_id: MatchId,
        guilds: [GuildId; 2],
    },

    LineupSubmitted {
        match_id: MatchId,
        round: u8,
        guild: GuildId,
    },

    /// Three duels fought (or walked over); `round_winner` is `None` for a
    /// drawn round.
    RoundResolved {
        match_id: MatchId,
        round: u8,
        round_winner: Option<GuildId>,
        forced: bool,
    },

    Completed { match_id: MatchId, winner: GuildId },

    RewardsSettled {
        match_id: MatchId,
        guild: GuildId,
        members: usize,
    },
}

/// Single-fight events outside guild wars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    TrialFinished {
        player: String,
        zone: String,
        victory: bool,
    },

    PvpResolved {
        attacker: String,
        defender: String,
        winner: Option<String>,
    },
}
