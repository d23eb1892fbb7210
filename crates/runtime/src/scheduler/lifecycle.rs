//! War lifecycle: scheduling, registration and status transitions.

use arena_core::Reward;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::api::{Result, StateConflict, ValidationError, WarError};
use crate::context::Outbox;
use crate::events::WarEvent;
use crate::repository::{GuildId, WarId, WarStatus, WarTables};

/// Creates a `PENDING` war starting at `start_time`.
pub fn schedule_war(
    tables: &mut WarTables,
    outbox: &mut Outbox,
    name: &str,
    start_time: DateTime<Utc>,
    rewards: Vec<Reward>,
) -> WarId {
    let war = tables.insert_war(name, start_time, rewards);
    info!(%war, name, %start_time, "war scheduled");
    outbox.push(WarEvent::Scheduled {
        war,
        name: name.to_owned(),
        start_time,
    });
    war
}

/// Opts a guild into a war during its registration window.
///
/// Only the guild's leader (`by`) may register. Registering twice is
/// harmless; returns whether this call added the row.
pub fn register_guild(
    tables: &mut WarTables,
    outbox: &mut Outbox,
    war: WarId,
    guild: GuildId,
    by: &str,
) -> Result<bool> {
    let status = tables
        .war(war)
        .map(|w| w.status)
        .ok_or_else(|| WarError::not_found("wars", war))?;
    let row = tables
        .guild(guild)
        .ok_or_else(|| WarError::not_found("guilds", guild))?;
    if !row.is_led_by(by) {
        return Err(ValidationError::NotGuildLeader {
            name: by.to_owned(),
            guild,
        }
        .into());
    }
    if status != WarStatus::Registration {
        return Err(StateConflict::WarStatus {
            war,
            actual: status,
            expected: WarStatus::Registration,
        }
        .into());
    }

    let added = tables.register(war, guild);
    if added {
        info!(%war, %guild, leader = by, "guild registered");
        outbox.push(WarEvent::GuildRegistered { war, guild });
    }
    Ok(added)
}

/// Moves a war from `from` to the next status `to`.
///
/// The status acts as a fencing token: if the war is no longer in `from`,
/// nothing changes and a [`StateConflict`] is returned.
pub fn transition(
    tables: &mut WarTables,
    outbox: &mut Outbox,
    war: WarId,
    from: WarStatus,
    to: WarStatus,
) -> Result<()> {
    debug_assert!(from < to, "war status must move forward");

    let row = tables
        .war_mut(war)
        .ok_or_else(|| WarError::not_found("wars", war))?;
    if row.status != from {
        return Err(StateConflict::WarStatus {
            war,
            actual: row.status,
            expected: from,
        }
        .into());
    }
    row.status = to;

    info!(%war, %from, %to, "war status changed");
    outbox.push(WarEvent::StatusChanged { war, from, to });
    Ok(())
}

/// Completes an in-progress war once none of its matches is still open.
///
/// Returns whether the war was completed by this call.
pub fn complete_if_finished(
    tables: &mut WarTables,
    outbox: &mut Outbox,
    war: WarId,
) -> Result<bool> {
    let in_progress = tables
        .war(war)
        .is_some_and(|w| w.status == WarStatus::InProgress);
    let open_matches = tables.matches_of_war(war).any(|m| !m.is_completed());
    if !in_progress || open_matches {
        return Ok(false);
    }

    transition(tables, outbox, war, WarStatus::InProgress, WarStatus::Completed)?;
    Ok(true)
}
