//! Unified error types surfaced by the runtime API.
//!
//! Three families, handled differently by callers:
//! - [`ValidationError`]: the request itself is wrong; surfaced verbatim and
//!   never retried.
//! - [`StateConflict`]: the request does not fit the current war/match state;
//!   the scheduler treats it as a benign no-op, explicit actions surface it.
//! - [`RepositoryError`]: storage failed; the whole transaction rolled back.
use arena_core::{ErrorSeverity, GameError, StatsError};
use thiserror::Error;

pub use crate::repository::RepositoryError;
use crate::repository::{GuildId, MatchId, MatchStatus, WarId, WarStatus};

pub type Result<T> = std::result::Result<T, WarError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("a lineup names exactly {expected} fighters, got {actual}")]
    LineupSize { expected: usize, actual: usize },

    #[error("fighter {0} is named more than once")]
    DuplicateFighter(String),

    #[error("{name} already fought in {match_id}")]
    AlreadyParticipated { name: String, match_id: MatchId },

    #[error("{guild} already submitted a lineup for round {round} of {match_id}")]
    LineupAlreadySubmitted {
        match_id: MatchId,
        round: u8,
        guild: GuildId,
    },

    #[error("{name} is not a member of {guild}")]
    NotAMember { name: String, guild: GuildId },

    #[error("{name} is not the leader of {guild}")]
    NotGuildLeader { name: String, guild: GuildId },

    #[error("{guild} is not playing in {match_id}")]
    GuildNotInMatch { match_id: MatchId, guild: GuildId },

    #[error("round {submitted} is not open, {match_id} is on round {current}")]
    WrongRound {
        match_id: MatchId,
        submitted: u8,
        current: u8,
    },

    #[error("{name} has realm {actual}, realm {required} required")]
    RealmTooLow {
        name: String,
        required: usize,
        actual: usize,
    },

    #[error("{0} cannot challenge themselves")]
    SelfChallenge(String),

    #[error("{name} is on cooldown for {remaining_secs}s")]
    Cooldown { name: String, remaining_secs: i64 },

    #[error("invalid combat stats for {name}")]
    InvalidStats {
        name: String,
        #[source]
        source: StatsError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateConflict {
    #[error("{war} is {actual}, expected {expected}")]
    WarStatus {
        war: WarId,
        actual: WarStatus,
        expected: WarStatus,
    },

    #[error("{match_id} is {status}")]
    MatchStatus {
        match_id: MatchId,
        status: MatchStatus,
    },

    #[error("{match_id} round {round} is still waiting for lineups")]
    LineupsIncomplete { match_id: MatchId, round: u8 },
}

#[derive(Debug, Error)]
pub enum WarError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    StateConflict(#[from] StateConflict),

    #[error("{table} row not found: {key}")]
    NotFound { table: &'static str, key: String },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl WarError {
    pub fn not_found(table: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            table,
            key: key.to_string(),
        }
    }

    /// Conflicts the scheduler may swallow.
    pub fn is_state_conflict(&self) -> bool {
        matches!(self, Self::StateConflict(_))
    }
}

impl GameError for WarError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Validation(_) | Self::NotFound { .. } => ErrorSeverity::Validation,
            Self::StateConflict(_) => ErrorSeverity::Recoverable,
            Self::Repository(RepositoryError::LockPoisoned) => ErrorSeverity::Fatal,
            Self::Repository(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "WAR_VALIDATION",
            Self::StateConflict(_) => "WAR_STATE_CONFLICT",
            Self::NotFound { .. } => "WAR_NOT_FOUND",
            Self::Repository(_) => "WAR_PERSISTENCE",
        }
    }
}
