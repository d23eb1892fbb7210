//! Reward settlement for completed matches.

use tracing::{debug, info};

use crate::api::{Result, StateConflict, WarError};
use crate::context::Outbox;
use crate::events::MatchEvent;
use crate::repository::{MatchId, WarTables};

/// Credits the war's reward table to every member of the winning guild.
///
/// Runs at most once per match: the `rewards_settled` flag is flipped in the
/// same transaction, and a settled match yields `Ok(0)`. Participation in the
/// fights does not matter; losing guild members get nothing.
pub fn settle_rewards(
    tables: &mut WarTables,
    outbox: &mut Outbox,
    match_id: MatchId,
) -> Result<usize> {
    let m = tables
        .get_match(match_id)
        .ok_or_else(|| WarError::not_found("matches", match_id))?;

    if m.rewards_settled {
        debug!(%match_id, "rewards already settled");
        return Ok(0);
    }
    let Some(winner) = m.winner.filter(|_| m.is_completed()) else {
        return Err(StateConflict::MatchStatus {
            match_id,
            status: m.status,
        }
        .into());
    };

    let rewards = tables
        .war(m.war_id)
        .map(|war| war.rewards.clone())
        .ok_or_else(|| WarError::not_found("wars", m.war_id))?;

    let members = tables.member_names(winner);
    for name in &members {
        if let Some(player) = tables.player_mut(name) {
            for reward in &rewards {
                player.wallet.apply(reward);
            }
        }
    }

    if let Some(m) = tables.match_mut(match_id) {
        m.rewards_settled = true;
    }

    info!(%match_id, guild = %winner, members = members.len(), "rewards settled");
    outbox.push(MatchEvent::RewardsSettled {
        match_id,
        guild: winner,
        members: members.len(),
    });
    Ok(members.len())
}
