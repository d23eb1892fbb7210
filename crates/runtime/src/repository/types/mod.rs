//! Row types stored by the war repository.

mod ids;
mod roster;
mod war;

pub use ids::{GuildId, MatchId, WarId};
pub use roster::{Guild, Player, PvpRecord, Wallet};
pub use war::{
    FightResult, GuildWar, LINEUP_SIZE, Lineup, MAX_ROUNDS, Match, MatchStatus, ROUNDS_TO_WIN,
    WarStatus,
};
