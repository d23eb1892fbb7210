//! Repository layer for mutable arena data.
//!
//! Repositories hold data that CHANGES during play:
//! - Wars, registrations, matches, lineups and fight results
//! - Guild and player rows (wallets, cooldowns)
//! - PvP history
//!
//! Static game content (realms, items, skills) lives in the
//! [`GameDataOracle`](crate::oracle::GameDataOracle), not here.

mod error;
mod history;
mod memory;
mod tables;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use history::History;
pub use memory::InMemoryWarStore;
pub use tables::WarTables;
pub use traits::WarStore;
pub use types::{
    FightResult, Guild, GuildId, GuildWar, LINEUP_SIZE, Lineup, MAX_ROUNDS, Match, MatchId,
    MatchStatus, Player, PvpRecord, ROUNDS_TO_WIN, Wallet, WarId, WarStatus,
};
