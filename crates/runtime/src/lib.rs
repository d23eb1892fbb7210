//! Runtime orchestration for the guild arena.
//!
//! This crate wires the pure rules of `arena-core` to persistent state: the
//! war tables behind a transactional store, the guild-war match state
//! machine, the war scheduler, and thin PvE/PvP adapters. Consumers embed
//! [`ArenaRuntime`] and call it from their request handlers; the periodic
//! scheduler runs as a background task started with
//! [`ArenaRuntime::spawn_scheduler`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the façade and builder
//! - [`matches`] and [`scheduler`] hold the war state machines
//! - [`adapters`] turn stored characters into combatants for each call site
//! - [`repository`] defines the tables and the [`WarStore`] contract
//! - [`oracle`] holds the swappable game data snapshot
//! - [`events`] provides the topic-based event bus
//! - [`views`] builds read models for guild UIs and replays
//! - `workers` keeps background tasks internal to the crate
pub mod adapters;
pub mod api;
pub mod clock;
pub mod config;
pub mod context;
pub mod events;
pub mod matches;
pub mod oracle;
pub mod repository;
pub mod runtime;
pub mod scheduler;
pub mod views;

mod workers;

pub use adapters::{PvpReport, TrialReport};
pub use api::{Result, StateConflict, ValidationError, WarError};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::RuntimeConfig;
pub use context::{ArenaContext, Outbox};
pub use events::{CombatEvent, Event, EventBus, MatchEvent, Topic, WarEvent};
pub use matches::{AdvanceMode, RoundReport};
pub use oracle::GameDataOracle;
pub use repository::{
    FightResult, Guild, GuildId, GuildWar, InMemoryWarStore, Lineup, Match, MatchId, MatchStatus,
    Player, PvpRecord, RepositoryError, Wallet, WarId, WarStatus, WarStore, WarTables,
};
pub use runtime::{ArenaRuntime, RuntimeBuilder};
pub use scheduler::TickReport;
pub use views::{MatchView, MemberEligibility, WarOverview};
pub use workers::SchedulerHandle;
