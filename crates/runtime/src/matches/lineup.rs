//! Lineup submission.

use std::collections::BTreeSet;

use tracing::info;

use crate::api::{Result, StateConflict, ValidationError, WarError};
use crate::context::{ArenaContext, Outbox};
use crate::events::MatchEvent;
use crate::repository::{
    GuildId, LINEUP_SIZE, Lineup, MatchId, MatchStatus, RepositoryError, WarTables,
};

/// Records a guild's three fighters for the match's current round.
///
/// Submission is one-shot: a second lineup for the same (match, round, guild)
/// is rejected and the first stays as it was. Checks, in order:
///
/// 1. the guild plays this match and `by` leads it
/// 2. the match is waiting for lineups on `round`
/// 3. exactly three distinct names
/// 4. no lineup yet for this (match, round, guild)
/// 5. every fighter is a member of the guild who has not fought in this match
#[allow(clippy::too_many_arguments)]
pub fn submit_lineup<S: AsRef<str>>(
    tables: &mut WarTables,
    ctx: &ArenaContext<'_>,
    outbox: &mut Outbox,
    match_id: MatchId,
    guild: GuildId,
    by: &str,
    round: u8,
    fighters: &[S],
) -> Result<()> {
    let m = tables
        .get_match(match_id)
        .ok_or_else(|| WarError::not_found("matches", match_id))?;

    if m.side_of(guild).is_none() {
        return Err(ValidationError::GuildNotInMatch { match_id, guild }.into());
    }
    let led_by = tables.guild(guild).is_some_and(|g| g.is_led_by(by));
    if !led_by {
        return Err(ValidationError::NotGuildLeader {
            name: by.to_owned(),
            guild,
        }
        .into());
    }
    if m.status != MatchStatus::PendingLineup {
        return Err(StateConflict::MatchStatus {
            match_id,
            status: m.status,
        }
        .into());
    }
    if round != m.current_round {
        return Err(ValidationError::WrongRound {
            match_id,
            submitted: round,
            current: m.current_round,
        }
        .into());
    }

    let names: Vec<&str> = fighters.iter().map(AsRef::as_ref).collect();
    let names: [&str; LINEUP_SIZE] = names.as_slice().try_into().map_err(|_| {
        ValidationError::LineupSize {
            expected: LINEUP_SIZE,
            actual: fighters.len(),
        }
    })?;

    let mut seen = BTreeSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ValidationError::DuplicateFighter(name.to_owned()).into());
        }
    }

    if tables.lineup(match_id, round, guild).is_some() {
        return Err(ValidationError::LineupAlreadySubmitted {
            match_id,
            round,
            guild,
        }
        .into());
    }

    for name in names {
        let member = tables
            .player(name)
            .is_some_and(|p| p.guild_id == Some(guild));
        if !member {
            return Err(ValidationError::NotAMember {
                name: name.to_owned(),
                guild,
            }
            .into());
        }
        if tables.has_participated(match_id, name) {
            return Err(ValidationError::AlreadyParticipated {
                name: name.to_owned(),
                match_id,
            }
            .into());
        }
    }

    tables
        .insert_lineup(Lineup {
            match_id,
            round,
            guild_id: guild,
            fighters: names.map(str::to_owned),
            submitted_at: ctx.now,
        })
        .map_err(|err| match err {
            RepositoryError::UniqueViolation { .. } => WarError::from(
                ValidationError::LineupAlreadySubmitted {
                    match_id,
                    round,
                    guild,
                },
            ),
            other => other.into(),
        })?;

    info!(%match_id, %guild, round, "lineup submitted");
    outbox.push(MatchEvent::LineupSubmitted {
        match_id,
        round,
        guild,
    });
    Ok(())
}
