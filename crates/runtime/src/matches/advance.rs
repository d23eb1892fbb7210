//! Round advancement: three positional duels, tally, completion.

use std::cmp::Ordering;

use arena_core::Combatant;
use tracing::info;

use crate::adapters::{combatant_for, duel_seed, fight_slot};
use crate::api::{Result, StateConflict, WarError};
use crate::context::{ArenaContext, Outbox};
use crate::events::MatchEvent;
use crate::repository::{
    FightResult, GuildId, LINEUP_SIZE, MAX_ROUNDS, Match, MatchId, MatchStatus, ROUNDS_TO_WIN,
    WarTables,
};
use crate::scheduler::complete_if_finished;

use super::rewards::settle_rewards;

/// Duel wins that take a round.
pub const DUELS_TO_WIN_ROUND: usize = 2;

/// Label used in replay logs for a side without a lineup.
const ABSENT: &str = "(absent)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceMode {
    /// Resolve only once both guilds submitted a lineup for the round.
    WhenReady,
    /// Administrative bypass: a missing lineup forfeits its duels.
    Forced,
}

/// What one advancement did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundReport {
    pub match_id: MatchId,
    pub round: u8,
    /// Winning guild of each position; `None` for a drawn duel.
    pub duel_winners: [Option<GuildId>; LINEUP_SIZE],
    /// `None` when no guild took two duels.
    pub round_winner: Option<GuildId>,
    /// Match status after this round.
    pub status: MatchStatus,
    pub winner: Option<GuildId>,
    /// Members credited by reward settlement (0 unless the match completed).
    pub rewarded_members: usize,
    pub war_completed: bool,
}

/// Resolves the match's current round.
///
/// The match status is the fencing token: only a `PENDING_LINEUP` match
/// advances, so a repeated call after completion is a [`StateConflict`] and
/// never fights the round twice. In [`AdvanceMode::WhenReady`] a missing
/// lineup is a [`StateConflict::LineupsIncomplete`] and nothing changes.
pub fn advance_round(
    tables: &mut WarTables,
    ctx: &ArenaContext<'_>,
    outbox: &mut Outbox,
    match_id: MatchId,
    mode: AdvanceMode,
) -> Result<RoundReport> {
    let mut m = tables
        .get_match(match_id)
        .cloned()
        .ok_or_else(|| WarError::not_found("matches", match_id))?;

    if m.status != MatchStatus::PendingLineup {
        return Err(StateConflict::MatchStatus {
            match_id,
            status: m.status,
        }
        .into());
    }

    let round = m.current_round;
    let lineups = m.guilds.map(|guild| tables.lineup(match_id, round, guild).cloned());
    if mode == AdvanceMode::WhenReady && lineups.iter().any(Option::is_none) {
        return Err(StateConflict::LineupsIncomplete { match_id, round }.into());
    }

    set_status(tables, match_id, MatchStatus::InProgress)?;

    let mut duel_winners = [None; LINEUP_SIZE];
    for (slot, duel_winner) in duel_winners.iter_mut().enumerate() {
        let position = slot as u8 + 1;
        let names = [0, 1].map(|side| {
            lineups[side]
                .as_ref()
                .map(|lineup| lineup.fighters[slot].as_str())
        });

        let mut combatants: [Option<Combatant>; 2] = [None, None];
        for (side, combatant) in combatants.iter_mut().enumerate() {
            if let Some(player) = names[side].and_then(|name| tables.player(name)) {
                *combatant = Some(combatant_for(tables, ctx.data, player, ctx.now)?);
            }
        }

        let outcome = fight_slot(
            duel_seed(m.seed, round, position),
            combatants[0].as_ref(),
            combatants[1].as_ref(),
            names.map(|name| name.unwrap_or(ABSENT)),
            &ctx.config.combat,
        );

        let fighters = combatants
            .each_ref()
            .map(|c| c.as_ref().map(|c| c.name().to_owned()));
        let winner_side = outcome.winner.side();
        *duel_winner = winner_side.map(|side| m.guilds[side.index()]);

        tables.push_fight(FightResult {
            match_id,
            round,
            position,
            winner: winner_side.and_then(|side| fighters[side.index()].clone()),
            winner_guild: *duel_winner,
            walkover: combatants.iter().any(Option::is_none),
            fighters,
            remaining_hp: outcome.remaining_hp,
            max_hp: outcome.max_hp,
            log: outcome.log,
        });
    }

    for lineup in lineups.iter().flatten() {
        for name in &lineup.fighters {
            tables.add_participant(match_id, name);
        }
    }

    let duel_wins = m
        .guilds
        .map(|guild| duel_winners.iter().filter(|w| **w == Some(guild)).count());
    let round_winner_side = (0..2).find(|side| duel_wins[*side] >= DUELS_TO_WIN_ROUND);
    if let Some(side) = round_winner_side {
        m.round_wins[side] += 1;
    }
    let round_winner = round_winner_side.map(|side| m.guilds[side]);

    let finished = m.round_wins.iter().any(|wins| *wins >= ROUNDS_TO_WIN) || round >= MAX_ROUNDS;
    if finished {
        m.status = MatchStatus::Completed;
        m.winner = Some(decide_winner(tables, &m));
    } else {
        m.status = MatchStatus::PendingLineup;
        m.current_round += 1;
    }
    let stored = tables
        .match_mut(match_id)
        .ok_or_else(|| WarError::not_found("matches", match_id))?;
    *stored = m.clone();

    info!(
        %match_id,
        round,
        round_winner = ?round_winner,
        forced = mode == AdvanceMode::Forced,
        "round resolved"
    );
    outbox.push(MatchEvent::RoundResolved {
        match_id,
        round,
        round_winner,
        forced: mode == AdvanceMode::Forced,
    });

    let mut rewarded_members = 0;
    let mut war_completed = false;
    if let Some(winner) = m.winner {
        info!(%match_id, %winner, round_wins = ?m.round_wins, "match completed");
        outbox.push(MatchEvent::Completed { match_id, winner });
        rewarded_members = settle_rewards(tables, outbox, match_id)?;
        war_completed = complete_if_finished(tables, outbox, m.war_id)?;
    }

    Ok(RoundReport {
        match_id,
        round,
        duel_winners,
        round_winner,
        status: m.status,
        winner: m.winner,
        rewarded_members,
        war_completed,
    })
}

fn set_status(tables: &mut WarTables, match_id: MatchId, status: MatchStatus) -> Result<()> {
    let m = tables
        .match_mut(match_id)
        .ok_or_else(|| WarError::not_found("matches", match_id))?;
    m.status = status;
    Ok(())
}

/// Winner of a completed match.
///
/// # Tie-break
///
/// ```text
/// 1. more round wins
/// 2. more duel wins across all rounds
/// 3. higher summed remaining-hp share across all duels
/// 4. the first guild of the pairing
/// ```
fn decide_winner(tables: &WarTables, m: &Match) -> GuildId {
    let fights = tables.fights_of(m.id);
    let duel_wins = m
        .guilds
        .map(|guild| fights.iter().filter(|f| f.winner_guild == Some(guild)).count());
    let hp_share = [0, 1].map(|side| {
        fights
            .iter()
            .map(|f| f64::from(f.remaining_hp[side]) / f64::from(f.max_hp[side].max(1)))
            .sum::<f64>()
    });

    let order = m.round_wins[0]
        .cmp(&m.round_wins[1])
        .then(duel_wins[0].cmp(&duel_wins[1]))
        .then_with(|| {
            hp_share[0]
                .partial_cmp(&hp_share[1])
                .unwrap_or(Ordering::Equal)
        });

    match order {
        Ordering::Less => m.guilds[1],
        Ordering::Equal | Ordering::Greater => m.guilds[0],
    }
}
