//! PvP challenge adapter with honor accounting.

use arena_core::{CombatMode, CombatOutcome, CombatRules, Winner, resolve};
use tracing::debug;

use crate::api::{Result, ValidationError, WarError};
use crate::context::{ArenaContext, Outbox, ready_at, remaining};
use crate::events::CombatEvent;
use crate::repository::{PvpRecord, WarTables};

use super::roster::combatant_for;

/// Honor gained by an attacker who wins.
pub const HONOR_FOR_WIN: u64 = 2;
/// Honor lost by an attacker who loses (never below zero).
pub const HONOR_FOR_LOSS: u64 = 1;
/// Honor gained by a defender who holds.
pub const HONOR_FOR_DEFENSE: u64 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct PvpReport {
    pub record_id: u64,
    pub winner: Option<String>,
    pub attacker_honor_change: i64,
    pub defender_honor_change: i64,
    pub attacker_karma_gain: u64,
    pub outcome: CombatOutcome,
}

/// Resolves a challenge of `attacker` (side A) against `defender` (side B).
///
/// The attacker acts first on equal speed; the defender wins an exact
/// hp-share tie at the turn cap, so a challenge never ends drawn.
///
/// # Honor
///
/// ```text
/// attacker wins   attacker +2
/// attacker loses  attacker -1 (floored at 0), defender +1
/// ```
///
/// An attacker who beats a lower-realm defender also gains karma equal to
/// the realm gap.
pub fn challenge(
    tables: &mut WarTables,
    ctx: &ArenaContext<'_>,
    outbox: &mut Outbox,
    attacker: &str,
    defender: &str,
    seed: u64,
) -> Result<PvpReport> {
    if attacker == defender {
        return Err(ValidationError::SelfChallenge(attacker.to_owned()).into());
    }

    let attacker_row = tables
        .player(attacker)
        .ok_or_else(|| WarError::not_found("players", attacker))?;
    let defender_row = tables
        .player(defender)
        .ok_or_else(|| WarError::not_found("players", defender))?;

    if let Some(last) = attacker_row.last_pvp_at
        && let Some(remaining_secs) = remaining(ctx.now, ready_at(last, ctx.config.pvp_cooldown))
    {
        return Err(ValidationError::Cooldown {
            name: attacker.to_owned(),
            remaining_secs,
        }
        .into());
    }

    let realm_gap = attacker_row
        .profile
        .realm_index
        .saturating_sub(defender_row.profile.realm_index);
    let a = combatant_for(tables, ctx.data, attacker_row, ctx.now)?;
    let b = combatant_for(tables, ctx.data, defender_row, ctx.now)?;

    let rules = CombatRules::for_mode(CombatMode::Pvp, &ctx.config.combat);
    let outcome = resolve(seed, &a, &b, &rules, &ctx.config.combat);

    let (attacker_honor_change, defender_honor_change) = match outcome.winner {
        Winner::A => (adjust_honor(tables, attacker, HONOR_FOR_WIN as i64)?, 0),
        Winner::B => (
            adjust_honor(tables, attacker, -(HONOR_FOR_LOSS as i64))?,
            adjust_honor(tables, defender, HONOR_FOR_DEFENSE as i64)?,
        ),
        Winner::Draw => (0, 0),
    };

    let winner = match outcome.winner {
        Winner::A => Some(attacker.to_owned()),
        Winner::B => Some(defender.to_owned()),
        Winner::Draw => None,
    };

    let attacker_karma_gain = if outcome.winner == Winner::A {
        realm_gap as u64
    } else {
        0
    };
    if let Some(row) = tables.player_mut(attacker) {
        row.last_pvp_at = Some(ctx.now);
        row.wallet.karma = row.wallet.karma.saturating_add(attacker_karma_gain);
    }

    let record_id = tables.record_pvp(PvpRecord {
        id: 0,
        attacker: attacker.to_owned(),
        defender: defender.to_owned(),
        winner: winner.clone(),
        attacker_honor_change,
        defender_honor_change,
        attacker_karma_gain,
        fought_at: ctx.now,
        log: outcome.log.clone(),
    });

    debug!(
        attacker,
        defender,
        winner = winner.as_deref().unwrap_or("draw"),
        turns = outcome.turns,
        "challenge resolved"
    );
    outbox.push(CombatEvent::PvpResolved {
        attacker: attacker.to_owned(),
        defender: defender.to_owned(),
        winner: winner.clone(),
    });

    Ok(PvpReport {
        record_id,
        winner,
        attacker_honor_change,
        defender_honor_change,
        attacker_karma_gain,
        outcome,
    })
}

/// Applies a signed honor change and returns the change actually applied.
fn adjust_honor(tables: &mut WarTables, name: &str, delta: i64) -> Result<i64> {
    let player = tables
        .player_mut(name)
        .ok_or_else(|| WarError::not_found("players", name))?;
    let before = player.wallet.honor;
    player.wallet.honor = before.saturating_add_signed(delta);
    Ok(player.wallet.honor as i64 - before as i64)
}
