//! War scheduler: status progression and periodic match advancement.
//!
//! ```text
//! PENDING ──start──▶ REGISTRATION ──start + window──▶ IN_PROGRESS ──all matches done──▶ COMPLETED
//!                                     (pair guilds)
//! ```
//!
//! [`tick`] is one scheduler pass. It is idempotent per status: a war only
//! moves when it is still in the status the pass read, and a match only
//! advances from `PENDING_LINEUP`, so overlapping or repeated ticks never
//! pair a war twice or fight a round twice.

mod lifecycle;
mod pairing;

pub use lifecycle::{complete_if_finished, register_guild, schedule_war, transition};
pub use pairing::pair_guilds;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::api::Result;
use crate::context::{ArenaContext, Outbox};
use crate::matches::{AdvanceMode, advance_round};
use crate::repository::{MatchStatus, WarId, WarStatus, WarTables};

/// What one scheduler pass changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Wars that opened registration.
    pub opened: Vec<WarId>,
    /// Wars that closed registration and were paired.
    pub started: Vec<WarId>,
    pub matches_created: usize,
    pub rounds_resolved: usize,
    pub matches_completed: usize,
    pub wars_completed: Vec<WarId>,
}

impl TickReport {
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Runs one scheduler pass at `ctx.now`.
///
/// 1. `PENDING` wars whose start time has passed open registration.
/// 2. `REGISTRATION` wars whose window has closed start: registered guilds
///    are paired with a shuffle seeded by `pairing_seed`. A war left without
///    any match completes on the spot.
/// 3. Every `PENDING_LINEUP` match with both lineups in resolves its round.
pub fn tick(
    tables: &mut WarTables,
    ctx: &ArenaContext<'_>,
    outbox: &mut Outbox,
    pairing_seed: u64,
) -> Result<TickReport> {
    let mut report = TickReport::default();

    for war in tables.wars_with_status(WarStatus::Pending) {
        let due = tables.war(war).is_some_and(|w| w.start_time <= ctx.now);
        if due {
            transition(tables, outbox, war, WarStatus::Pending, WarStatus::Registration)?;
            report.opened.push(war);
        }
    }

    let mut rng = StdRng::seed_from_u64(pairing_seed);
    for war in tables.wars_with_status(WarStatus::Registration) {
        let closed = tables.war(war).is_some_and(|w| {
            w.start_time
                .checked_add_signed(ctx.config.registration_window)
                .is_none_or(|end| end <= ctx.now)
        });
        if !closed {
            continue;
        }

        transition(tables, outbox, war, WarStatus::Registration, WarStatus::InProgress)?;
        report.started.push(war);

        let created = pair_guilds(tables, outbox, war, &mut rng);
        report.matches_created += created.len();
        if created.is_empty() && complete_if_finished(tables, outbox, war)? {
            report.wars_completed.push(war);
        }
    }

    for match_id in tables.matches_with_status(MatchStatus::PendingLineup) {
        match advance_round(tables, ctx, outbox, match_id, AdvanceMode::WhenReady) {
            Ok(round) => {
                report.rounds_resolved += 1;
                if round.winner.is_some() {
                    report.matches_completed += 1;
                }
                if round.war_completed
                    && let Some(war) = tables.get_match(match_id).map(|m| m.war_id)
                {
                    report.wars_completed.push(war);
                }
            }
            Err(err) if err.is_state_conflict() => {
                debug!(%match_id, %err, "match not ready");
            }
            Err(err) => return Err(err),
        }
    }

    Ok(report)
}
