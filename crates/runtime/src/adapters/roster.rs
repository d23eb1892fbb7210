//! Building combatants from persisted player rows.

use arena_core::{CombatStats, Combatant, GameData, aggregate};
use chrono::{DateTime, Utc};

use crate::api::{Result, ValidationError};
use crate::repository::{Player, WarTables};

/// Folds a player's persisted state into combat stats.
///
/// Guild level and active global modifiers come from the tables; unknown
/// catalog references contribute nothing.
pub fn player_stats(
    tables: &WarTables,
    data: &GameData,
    player: &Player,
    now: DateTime<Utc>,
) -> CombatStats {
    let guild_level = player
        .guild_id
        .and_then(|id| tables.guild(id))
        .map(|guild| guild.level);
    let modifiers = tables.active_modifiers(now);

    aggregate(
        data,
        &player.profile,
        player.equipped.iter().map(String::as_str),
        player.passives.iter().map(String::as_str),
        guild_level,
        &modifiers,
    )
}

/// Stats plus learned abilities, validated for resolution.
pub fn combatant_for(
    tables: &WarTables,
    data: &GameData,
    player: &Player,
    now: DateTime<Utc>,
) -> Result<Combatant> {
    let stats = player_stats(tables, data, player, now);
    let abilities = data.abilities(player.skills.iter().map(String::as_str));

    Combatant::new(player.name.clone(), stats, abilities).map_err(|source| {
        ValidationError::InvalidStats {
            name: player.name.clone(),
            source,
        }
        .into()
    })
}
