//! The tables a war store persists.
//!
//! [`WarTables`] is the whole mutable world of the arena: wars and their
//! registrations, matches with lineups, participants and fight results, plus
//! the guild/player rows the combat core reads. Uniqueness constraints live
//! here so every store implementation enforces them the same way:
//!
//! - one registration per (war, guild)
//! - one lineup per (match, round, guild)
//! - one participant row per (match, player)

use std::collections::{BTreeMap, BTreeSet};

use arena_core::{GlobalModifier, Reward};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{RepositoryError, Result};
use super::history::History;
use super::types::{
    FightResult, Guild, GuildId, GuildWar, Lineup, Match, MatchId, MatchStatus, Player,
    PvpRecord, WarId, WarStatus,
};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarTables {
    wars: BTreeMap<WarId, GuildWar>,
    registrations: BTreeSet<(WarId, GuildId)>,
    matches: BTreeMap<MatchId, Match>,
    lineups: Vec<Lineup>,
    participants: BTreeSet<(MatchId, String)>,
    fights: History<FightResult>,
    guilds: BTreeMap<GuildId, Guild>,
    players: BTreeMap<String, Player>,
    pvp_history: History<PvpRecord>,
    modifiers: Vec<GlobalModifier>,
    next_war_id: u64,
    next_match_id: u64,
    next_pvp_id: u64,
}

impl WarTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds rows appended since the last commit into the shared history.
    pub fn seal_history(&mut self) {
        self.fights.seal();
        self.pvp_history.seal();
    }

    // ------------------------------------------------------------------
    // Wars
    // ------------------------------------------------------------------

    /// Creates a `PENDING` war.
    pub fn insert_war(
        &mut self,
        name: impl Into<String>,
        start_time: DateTime<Utc>,
        rewards: Vec<Reward>,
    ) -> WarId {
        self.next_war_id += 1;
        let id = WarId(self.next_war_id);
        self.wars.insert(
            id,
            GuildWar {
                id,
                name: name.into(),
                start_time,
                status: WarStatus::Pending,
                rewards,
            },
        );
        id
    }

    pub fn war(&self, id: WarId) -> Option<&GuildWar> {
        self.wars.get(&id)
    }

    pub fn war_mut(&mut self, id: WarId) -> Option<&mut GuildWar> {
        self.wars.get_mut(&id)
    }

    pub fn wars(&self) -> impl Iterator<Item = &GuildWar> {
        self.wars.values()
    }

    pub fn wars_with_status(&self, status: WarStatus) -> Vec<WarId> {
        self.wars
            .values()
            .filter(|war| war.status == status)
            .map(|war| war.id)
            .collect()
    }

    // ------------------------------------------------------------------
    // Registrations
    // ------------------------------------------------------------------

    /// Returns `false` if the guild was already registered.
    pub fn register(&mut self, war: WarId, guild: GuildId) -> bool {
        self.registrations.insert((war, guild))
    }

    pub fn is_registered(&self, war: WarId, guild: GuildId) -> bool {
        self.registrations.contains(&(war, guild))
    }

    /// Registered guilds in id order.
    pub fn registered_guilds(&self, war: WarId) -> Vec<GuildId> {
        self.registrations
            .range((war, GuildId(0))..=(war, GuildId(u64::MAX)))
            .map(|(_, guild)| *guild)
            .collect()
    }

    // ------------------------------------------------------------------
    // Matches
    // ------------------------------------------------------------------

    pub fn insert_match(&mut self, war: WarId, guilds: [GuildId; 2], seed: u64) -> MatchId {
        self.next_match_id += 1;
        let id = MatchId(self.next_match_id);
        self.matches.insert(id, Match::new(id, war, guilds, seed));
        id
    }

    pub fn get_match(&self, id: MatchId) -> Option<&Match> {
        self.matches.get(&id)
    }

    pub fn match_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.matches.get_mut(&id)
    }

    pub fn matches_of_war(&self, war: WarId) -> impl Iterator<Item = &Match> {
        self.matches.values().filter(move |m| m.war_id == war)
    }

    pub fn matches_with_status(&self, status: MatchStatus) -> Vec<MatchId> {
        self.matches
            .values()
            .filter(|m| m.status == status)
            .map(|m| m.id)
            .collect()
    }

    pub fn match_for_guild(&self, war: WarId, guild: GuildId) -> Option<&Match> {
        self.matches_of_war(war)
            .find(|m| m.side_of(guild).is_some())
    }

    // ------------------------------------------------------------------
    // Lineups and participants
    // ------------------------------------------------------------------

    /// Inserts a lineup; a second lineup for the same (match, round, guild)
    /// is a [`RepositoryError::UniqueViolation`] and leaves the first intact.
    pub fn insert_lineup(&mut self, lineup: Lineup) -> Result<()> {
        if self
            .lineup(lineup.match_id, lineup.round, lineup.guild_id)
            .is_some()
        {
            return Err(RepositoryError::UniqueViolation {
                table: "lineups",
                key: format!(
                    "({}, round {}, {})",
                    lineup.match_id, lineup.round, lineup.guild_id
                ),
            });
        }
        self.lineups.push(lineup);
        Ok(())
    }

    pub fn lineup(&self, match_id: MatchId, round: u8, guild: GuildId) -> Option<&Lineup> {
        self.lineups
            .iter()
            .find(|l| l.match_id == match_id && l.round == round && l.guild_id == guild)
    }

    /// Returns `false` if the player was already recorded.
    pub fn add_participant(&mut self, match_id: MatchId, player: &str) -> bool {
        self.participants.insert((match_id, player.to_owned()))
    }

    pub fn has_participated(&self, match_id: MatchId, player: &str) -> bool {
        self.participants.contains(&(match_id, player.to_owned()))
    }

    // ------------------------------------------------------------------
    // Fights
    // ------------------------------------------------------------------

    pub fn push_fight(&mut self, fight: FightResult) {
        self.fights.push(fight);
    }

    /// Fights of a match ordered by (round, position).
    pub fn fights_of(&self, match_id: MatchId) -> Vec<&FightResult> {
        let mut fights: Vec<_> = self
            .fights
            .iter()
            .filter(|f| f.match_id == match_id)
            .collect();
        fights.sort_by_key(|f| (f.round, f.position));
        fights
    }

    // ------------------------------------------------------------------
    // Guilds and players
    // ------------------------------------------------------------------

    pub fn upsert_guild(&mut self, guild: Guild) {
        self.guilds.insert(guild.id, guild);
    }

    pub fn guild(&self, id: GuildId) -> Option<&Guild> {
        self.guilds.get(&id)
    }

    pub fn upsert_player(&mut self, player: Player) {
        self.players.insert(player.name.clone(), player);
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.get(name)
    }

    pub fn player_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.players.get_mut(name)
    }

    /// Deletes a character; lineups and fights naming it are kept.
    pub fn remove_player(&mut self, name: &str) -> Option<Player> {
        self.players.remove(name)
    }

    /// Members of a guild in name order.
    pub fn members(&self, guild: GuildId) -> impl Iterator<Item = &Player> {
        self.players
            .values()
            .filter(move |p| p.guild_id == Some(guild))
    }

    pub fn member_names(&self, guild: GuildId) -> Vec<String> {
        self.members(guild).map(|p| p.name.clone()).collect()
    }

    // ------------------------------------------------------------------
    // PvP history and modifiers
    // ------------------------------------------------------------------

    /// Appends a record and returns its assigned id.
    pub fn record_pvp(&mut self, mut record: PvpRecord) -> u64 {
        self.next_pvp_id += 1;
        record.id = self.next_pvp_id;
        self.pvp_history.push(record);
        self.next_pvp_id
    }

    /// Records in insertion order.
    pub fn pvp_records(&self) -> impl Iterator<Item = &PvpRecord> {
        self.pvp_history.iter()
    }

    pub fn add_modifier(&mut self, modifier: GlobalModifier) {
        self.modifiers.push(modifier);
    }

    /// Modifiers active at `now`.
    pub fn active_modifiers(&self, now: DateTime<Utc>) -> Vec<GlobalModifier> {
        let now = now.timestamp();
        self.modifiers
            .iter()
            .filter(|m| m.is_active(now))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::CharacterProfile;

    fn lineup(match_id: MatchId, round: u8, guild: GuildId, names: [&str; 3]) -> Lineup {
        Lineup {
            match_id,
            round,
            guild_id: guild,
            fighters: names.map(String::from),
            submitted_at: DateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn lineups_are_unique_per_match_round_guild() {
        let mut tables = WarTables::new();
        let m = MatchId(1);
        tables
            .insert_lineup(lineup(m, 1, GuildId(1), ["a", "b", "c"]))
            .expect("first lineup");

        let err = tables
            .insert_lineup(lineup(m, 1, GuildId(1), ["d", "e", "f"]))
            .expect_err("duplicate lineup");
        assert!(matches!(err, RepositoryError::UniqueViolation { table: "lineups", .. }));
        assert_eq!(
            tables.lineup(m, 1, GuildId(1)).map(|l| l.fighters[0].as_str()),
            Some("a")
        );

        tables
            .insert_lineup(lineup(m, 2, GuildId(1), ["d", "e", "f"]))
            .expect("next round");
        tables
            .insert_lineup(lineup(m, 1, GuildId(2), ["x", "y", "z"]))
            .expect("other guild");
    }

    #[test]
    fn registrations_are_idempotent_and_scoped_to_the_war() {
        let mut tables = WarTables::new();
        let w1 = tables.insert_war("first", DateTime::UNIX_EPOCH, vec![]);
        let w2 = tables.insert_war("second", DateTime::UNIX_EPOCH, vec![]);

        assert!(tables.register(w1, GuildId(3)));
        assert!(!tables.register(w1, GuildId(3)));
        assert!(tables.register(w1, GuildId(1)));
        assert!(tables.register(w2, GuildId(2)));

        assert_eq!(tables.registered_guilds(w1), vec![GuildId(1), GuildId(3)]);
        assert_eq!(tables.registered_guilds(w2), vec![GuildId(2)]);
    }

    #[test]
    fn fights_come_back_in_replay_order() {
        let mut tables = WarTables::new();
        let m = tables.insert_match(WarId(1), [GuildId(1), GuildId(2)], 7);
        for (round, position) in [(2, 1), (1, 3), (1, 1), (1, 2)] {
            tables.push_fight(FightResult {
                match_id: m,
                round,
                position,
                fighters: [None, None],
                winner: None,
                winner_guild: None,
                remaining_hp: [0, 0],
                max_hp: [1, 1],
                walkover: true,
                log: Vec::new(),
            });
        }
        let order: Vec<_> = tables
            .fights_of(m)
            .iter()
            .map(|f| (f.round, f.position))
            .collect();
        assert_eq!(order, vec![(1, 1), (1, 2), (1, 3), (2, 1)]);
    }

    #[test]
    fn members_are_filtered_by_guild() {
        let mut tables = WarTables::new();
        tables.upsert_guild(Guild::new(GuildId(1), "Azure Cloud", 2));
        for (name, guild) in [("b", 1), ("a", 1), ("c", 2)] {
            tables.upsert_player(
                Player::new(name, CharacterProfile::default()).with_guild(GuildId(guild)),
            );
        }
        assert_eq!(tables.member_names(GuildId(1)), vec!["a", "b"]);
    }

    #[test]
    fn tables_survive_a_json_round_trip() {
        let mut tables = WarTables::new();
        let war = tables.insert_war("w", DateTime::UNIX_EPOCH, vec![Reward::Points { amount: 3 }]);
        tables.register(war, GuildId(1));
        tables.insert_match(war, [GuildId(1), GuildId(2)], 99);
        tables.add_participant(MatchId(1), "a");

        let json = serde_json::to_string(&tables).expect("serialize");
        let back: WarTables = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, tables);
    }
}
