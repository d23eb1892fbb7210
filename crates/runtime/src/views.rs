//! Read views for guild UIs and replays.
//!
//! Views are plain data copied out of the tables under a read lock; nothing
//! here mutates state.

use serde::Serialize;

use crate::api::{Result, WarError};
use crate::repository::{
    FightResult, GuildId, GuildWar, MatchId, MatchStatus, PvpRecord, WarStatus, WarTables,
};

/// What a guild sees on its war screen.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WarOverview {
    /// Earliest war that has not completed yet.
    pub war: Option<GuildWar>,
    pub is_registered: bool,
    pub current_match: Option<MatchView>,
}

/// A match from one guild's point of view.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchView {
    pub match_id: MatchId,
    pub opponent: GuildId,
    pub status: MatchStatus,
    pub current_round: u8,
    pub my_round_wins: u8,
    pub opponent_round_wins: u8,
    /// Lineup flags for the current round.
    pub my_lineup_submitted: bool,
    pub opponent_lineup_submitted: bool,
    pub fights: Vec<FightResult>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MemberEligibility {
    pub name: String,
    pub realm_index: usize,
    /// Already fought in this match and cannot be picked again.
    pub has_participated: bool,
}

pub fn war_overview(tables: &WarTables, guild: GuildId) -> WarOverview {
    let Some(war) = current_war(tables) else {
        return WarOverview {
            war: None,
            is_registered: false,
            current_match: None,
        };
    };

    let current_match = tables.match_for_guild(war.id, guild).and_then(|m| {
        let side = m.side_of(guild)?;
        let other = 1 - side;
        let round = m.current_round;
        Some(MatchView {
            match_id: m.id,
            opponent: m.guilds[other],
            status: m.status,
            current_round: round,
            my_round_wins: m.round_wins[side],
            opponent_round_wins: m.round_wins[other],
            my_lineup_submitted: tables.lineup(m.id, round, guild).is_some(),
            opponent_lineup_submitted: tables.lineup(m.id, round, m.guilds[other]).is_some(),
            fights: match_fights(tables, m.id),
        })
    });

    WarOverview {
        is_registered: tables.is_registered(war.id, guild),
        war: Some(war.clone()),
        current_match,
    }
}

fn current_war(tables: &WarTables) -> Option<&GuildWar> {
    tables
        .wars()
        .filter(|war| war.status != WarStatus::Completed)
        .min_by_key(|war| (war.start_time, war.id))
}

/// Members of `guild` with their eligibility for `match_id`, strongest realm
/// first and then by name.
pub fn eligible_members(
    tables: &WarTables,
    match_id: MatchId,
    guild: GuildId,
) -> Result<Vec<MemberEligibility>> {
    if tables.get_match(match_id).is_none() {
        return Err(WarError::not_found("matches", match_id));
    }

    let mut members: Vec<_> = tables
        .members(guild)
        .map(|player| MemberEligibility {
            name: player.name.clone(),
            realm_index: player.profile.realm_index,
            has_participated: tables.has_participated(match_id, &player.name),
        })
        .collect();
    members.sort_by(|a, b| {
        b.realm_index
            .cmp(&a.realm_index)
            .then_with(|| a.name.cmp(&b.name))
    });
    Ok(members)
}

/// Every duel of a match ordered by (round, position).
pub fn match_fights(tables: &WarTables, match_id: MatchId) -> Vec<FightResult> {
    tables.fights_of(match_id).into_iter().cloned().collect()
}

/// Challenges `player` fought on either side, newest first.
pub fn pvp_history(tables: &WarTables, player: &str) -> Vec<PvpRecord> {
    let mut records: Vec<PvpRecord> = tables
        .pvp_records()
        .filter(|r| r.attacker == player || r.defender == player)
        .cloned()
        .collect();
    records.sort_by(|a, b| b.fought_at.cmp(&a.fought_at).then(b.id.cmp(&a.id)));
    records
}
