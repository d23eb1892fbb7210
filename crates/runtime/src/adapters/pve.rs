//! PvE trial adapter: a player against a trial zone's monster.

use arena_core::{CombatMode, CombatOutcome, CombatRules, Combatant, Reward, Winner, resolve};
use tracing::debug;

use crate::api::{Result, ValidationError, WarError};
use crate::context::{ArenaContext, Outbox, ready_at, remaining, seconds};
use crate::events::CombatEvent;
use crate::repository::WarTables;

use super::roster::combatant_for;

/// Percent of held currency lost on a defeat, rounded down.
pub const DEFEAT_PENALTY_PERCENT: u64 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct TrialReport {
    pub zone_id: String,
    pub victory: bool,
    /// Rewards credited (empty on defeat).
    pub rewards: Vec<Reward>,
    /// Currency lost to a defeat (zero on victory).
    pub penalty: u64,
    pub outcome: CombatOutcome,
}

/// Runs one trial attempt.
///
/// The player is side A and acts first on equal speed; the monster wins an
/// exact hp-share tie at the turn cap. The attempt starts the zone cooldown
/// whether or not the player wins; a defeat also costs
/// [`DEFEAT_PENALTY_PERCENT`] of the player's currency.
pub fn run_trial(
    tables: &mut WarTables,
    ctx: &ArenaContext<'_>,
    outbox: &mut Outbox,
    player_name: &str,
    zone_id: &str,
    seed: u64,
) -> Result<TrialReport> {
    let player = tables
        .player(player_name)
        .ok_or_else(|| WarError::not_found("players", player_name))?;
    let zone = ctx
        .data
        .trial_zone(zone_id)
        .ok_or_else(|| WarError::not_found("trial_zones", zone_id))?;

    if player.profile.realm_index < zone.required_realm {
        return Err(ValidationError::RealmTooLow {
            name: player.name.clone(),
            required: zone.required_realm,
            actual: player.profile.realm_index,
        }
        .into());
    }

    if let Some(last) = player.trial_attempts.get(zone_id)
        && let Some(remaining_secs) =
            remaining(ctx.now, ready_at(*last, seconds(zone.cooldown_secs)))
    {
        return Err(ValidationError::Cooldown {
            name: player.name.clone(),
            remaining_secs,
        }
        .into());
    }

    let challenger = combatant_for(tables, ctx.data, player, ctx.now)?;
    let monster = Combatant::new(zone.monster.name.clone(), zone.monster.stats(), Vec::new())
        .map_err(|source| ValidationError::InvalidStats {
            name: zone.monster.name.clone(),
            source,
        })?;

    let rules = CombatRules::for_mode(CombatMode::Pve, &ctx.config.combat);
    let outcome = resolve(seed, &challenger, &monster, &rules, &ctx.config.combat);
    let victory = outcome.winner == Winner::A;
    let rewards = if victory {
        zone.rewards.clone()
    } else {
        Vec::new()
    };

    let player = tables
        .player_mut(player_name)
        .ok_or_else(|| WarError::not_found("players", player_name))?;
    player.trial_attempts.insert(zone_id.to_owned(), ctx.now);
    for reward in &rewards {
        player.wallet.apply(reward);
    }
    let penalty = if victory {
        0
    } else {
        defeat_penalty(player.wallet.currency)
    };
    player.wallet.currency -= penalty;

    debug!(
        player = player_name,
        zone = zone_id,
        victory,
        penalty,
        turns = outcome.turns,
        "trial resolved"
    );
    outbox.push(CombatEvent::TrialFinished {
        player: player_name.to_owned(),
        zone: zone_id.to_owned(),
        victory,
    });

    Ok(TrialReport {
        zone_id: zone_id.to_owned(),
        victory,
        rewards,
        penalty,
        outcome,
    })
}

/// `floor(currency × DEFEAT_PENALTY_PERCENT / 100)`, never more than `currency`.
fn defeat_penalty(currency: u64) -> u64 {
    let penalty = u128::from(currency) * u128::from(DEFEAT_PENALTY_PERCENT) / 100;
    u64::try_from(penalty).unwrap_or(currency)
}
