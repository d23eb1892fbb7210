//! Guild-war match state machine.
//!
//! ```text
//!                 both lineups in
//! PENDING_LINEUP ────────────────▶ IN_PROGRESS ──┬──▶ PENDING_LINEUP (round + 1)
//!       ▲                                        │
//!       └────────────────────────────────────────┤
//!                                                └──▶ COMPLETED
//!                         a guild has 2 round wins, or round 3 resolved
//! ```
//!
//! `IN_PROGRESS` only exists inside the advancing transaction; observers see
//! a match either waiting for lineups or completed.

mod advance;
mod lineup;
mod rewards;

pub use advance::{AdvanceMode, DUELS_TO_WIN_ROUND, RoundReport, advance_round};
pub use lineup::submit_lineup;
pub use rewards::settle_rewards;

#[cfg(test)]
mod tests {
    use arena_core::{CharacterProfile, GameData, RealmDefinition, Reward};
    use chrono::DateTime;

    use super::*;
    use crate::api::{StateConflict, ValidationError, WarError};
    use crate::config::RuntimeConfig;
    use crate::context::{ArenaContext, Outbox};
    use crate::repository::{Guild, GuildId, MatchId, MatchStatus, Player, WarStatus, WarTables};

    const STRONG: GuildId = GuildId(1);
    const WEAK: GuildId = GuildId(2);

    fn data() -> GameData {
        let realm = |name: &str, hp: f64, atk: f64| RealmDefinition {
            name: name.into(),
            base_hp: hp,
            base_atk: atk,
            base_def: 10.0,
            base_speed: 10.0,
            ..RealmDefinition::default()
        };
        GameData {
            realms: vec![realm("Qi Refining", 300.0, 20.0), realm("Core", 3_000.0, 400.0)],
            ..GameData::default()
        }
    }

    /// Two guilds of six; every member of STRONG out-classes every member of WEAK.
    fn setup() -> (WarTables, MatchId) {
        let mut tables = WarTables::new();
        tables.upsert_guild(Guild::new(STRONG, "Azure Cloud", 1).with_leader("s0"));
        tables.upsert_guild(Guild::new(WEAK, "Red Dust", 1).with_leader("w0"));
        for i in 0..6 {
            tables.upsert_player(
                Player::new(
                    format!("s{i}"),
                    CharacterProfile {
                        realm_index: 1,
                        ..CharacterProfile::default()
                    },
                )
                .with_guild(STRONG),
            );
            tables.upsert_player(
                Player::new(format!("w{i}"), CharacterProfile::default()).with_guild(WEAK),
            );
        }
        let rewards = vec![Reward::Currency { amount: 100 }];
        let war = tables.insert_war("w", DateTime::UNIX_EPOCH, rewards);
        if let Some(row) = tables.war_mut(war) {
            row.status = WarStatus::InProgress;
        }
        let match_id = tables.insert_match(war, [STRONG, WEAK], 1234);
        (tables, match_id)
    }

    fn with_ctx<T>(f: impl FnOnce(&ArenaContext<'_>) -> T) -> T {
        let data = data();
        let config = RuntimeConfig::default();
        f(&ArenaContext {
            data: &data,
            config: &config,
            now: DateTime::UNIX_EPOCH,
        })
    }

    /// Submits on behalf of the guild's leader.
    fn submit(
        tables: &mut WarTables,
        match_id: MatchId,
        guild: GuildId,
        round: u8,
        names: &[&str],
    ) -> Result<(), WarError> {
        let leader = tables
            .guild(guild)
            .and_then(|g| g.leader.clone())
            .unwrap_or_default();
        submit_as(tables, match_id, guild, &leader, round, names)
    }

    fn submit_as(
        tables: &mut WarTables,
        match_id: MatchId,
        guild: GuildId,
        by: &str,
        round: u8,
        names: &[&str],
    ) -> Result<(), WarError> {
        with_ctx(|ctx| {
            submit_lineup(tables, ctx, &mut Outbox::default(), match_id, guild, by, round, names)
        })
    }

    fn advance(
        tables: &mut WarTables,
        match_id: MatchId,
        mode: AdvanceMode,
    ) -> Result<RoundReport, WarError> {
        with_ctx(|ctx| advance_round(tables, ctx, &mut Outbox::default(), match_id, mode))
    }

    #[test]
    fn only_the_leader_submits_lineups() {
        let (mut tables, m) = setup();

        let err = submit_as(&mut tables, m, STRONG, "s1", 1, &["s0", "s1", "s2"])
            .expect_err("member, not leader");
        assert!(matches!(
            err,
            WarError::Validation(ValidationError::NotGuildLeader { ref name, guild: STRONG })
                if name == "s1"
        ));
        let err = submit_as(&mut tables, m, STRONG, "w0", 1, &["s0", "s1", "s2"])
            .expect_err("the other guild's leader");
        assert!(matches!(
            err,
            WarError::Validation(ValidationError::NotGuildLeader { .. })
        ));
        assert!(tables.lineup(m, 1, STRONG).is_none());

        submit_as(&mut tables, m, STRONG, "s0", 1, &["s0", "s1", "s2"]).expect("leader");
        assert!(tables.lineup(m, 1, STRONG).is_some());
    }

    #[test]
    fn lineup_shape_is_validated() {
        let (mut tables, m) = setup();

        let err = submit(&mut tables, m, STRONG, 1, &["s0", "s1"]).expect_err("two names");
        assert!(matches!(
            err,
            WarError::Validation(ValidationError::LineupSize { expected: 3, actual: 2 })
        ));

        let err = submit(&mut tables, m, STRONG, 1, &["s0", "s1", "s0"]).expect_err("duplicate");
        assert!(matches!(
            err,
            WarError::Validation(ValidationError::DuplicateFighter(ref name)) if name == "s0"
        ));

        let err = submit(&mut tables, m, STRONG, 1, &["s0", "s1", "w0"]).expect_err("outsider");
        assert!(matches!(
            err,
            WarError::Validation(ValidationError::NotAMember { .. })
        ));

        let err = submit(&mut tables, m, GuildId(9), 1, &["s0", "s1", "s2"])
            .expect_err("foreign guild");
        assert!(matches!(
            err,
            WarError::Validation(ValidationError::GuildNotInMatch { .. })
        ));

        let err = submit(&mut tables, m, STRONG, 2, &["s0", "s1", "s2"]).expect_err("wrong round");
        assert!(matches!(
            err,
            WarError::Validation(ValidationError::WrongRound { submitted: 2, current: 1, .. })
        ));
    }

    #[test]
    fn second_submission_is_rejected_and_first_kept() {
        let (mut tables, m) = setup();
        submit(&mut tables, m, STRONG, 1, &["s0", "s1", "s2"]).expect("first");

        let err = submit(&mut tables, m, STRONG, 1, &["s0", "s1", "s2"]).expect_err("second");
        assert!(matches!(
            err,
            WarError::Validation(ValidationError::LineupAlreadySubmitted { round: 1, .. })
        ));

        let kept = tables.lineup(m, 1, STRONG).expect("lineup");
        assert_eq!(kept.fighters, ["s0", "s1", "s2"].map(String::from));
    }

    #[test]
    fn advancing_waits_for_both_lineups() {
        let (mut tables, m) = setup();
        submit(&mut tables, m, STRONG, 1, &["s0", "s1", "s2"]).expect("lineup");

        let err = advance(&mut tables, m, AdvanceMode::WhenReady).expect_err("incomplete");
        assert!(matches!(
            err,
            WarError::StateConflict(StateConflict::LineupsIncomplete { round: 1, .. })
        ));
        assert!(tables.fights_of(m).is_empty());
        assert_eq!(tables.get_match(m).map(|x| x.status), Some(MatchStatus::PendingLineup));
    }

    #[test]
    fn stronger_guild_sweeps_in_two_rounds() {
        let (mut tables, m) = setup();

        submit(&mut tables, m, STRONG, 1, &["s0", "s1", "s2"]).expect("lineup");
        submit(&mut tables, m, WEAK, 1, &["w0", "w1", "w2"]).expect("lineup");
        let first = advance(&mut tables, m, AdvanceMode::WhenReady).expect("round 1");
        assert_eq!(first.duel_winners, [Some(STRONG); 3]);
        assert_eq!(first.round_winner, Some(STRONG));
        assert_eq!(first.status, MatchStatus::PendingLineup);
        assert_eq!(tables.get_match(m).map(|x| x.current_round), Some(2));

        // Round 1 fighters are spent for the rest of the match.
        let err = submit(&mut tables, m, WEAK, 2, &["w0", "w3", "w4"]).expect_err("reused");
        assert!(matches!(
            err,
            WarError::Validation(ValidationError::AlreadyParticipated { ref name, .. }) if name == "w0"
        ));

        submit(&mut tables, m, STRONG, 2, &["s3", "s4", "s5"]).expect("lineup");
        submit(&mut tables, m, WEAK, 2, &["w3", "w4", "w5"]).expect("lineup");
        let second = advance(&mut tables, m, AdvanceMode::WhenReady).expect("round 2");
        assert_eq!(second.status, MatchStatus::Completed);
        assert_eq!(second.winner, Some(STRONG));
        assert_eq!(second.rewarded_members, 6);
        assert!(second.war_completed);

        let fights = tables.fights_of(m);
        assert_eq!(fights.len(), 6);
        assert!(fights.iter().all(|f| !f.walkover && !f.log.is_empty()));
        assert_eq!(fights[0].winner.as_deref(), Some("s0"));
    }

    #[test]
    fn completed_match_cannot_advance_again() {
        let (mut tables, m) = setup();
        let rounds = [
            (1, ["s0", "s1", "s2"], ["w0", "w1", "w2"]),
            (2, ["s3", "s4", "s5"], ["w3", "w4", "w5"]),
        ];
        for (round, strong, weak) in rounds {
            submit(&mut tables, m, STRONG, round, &strong).expect("lineup");
            submit(&mut tables, m, WEAK, round, &weak).expect("lineup");
            advance(&mut tables, m, AdvanceMode::WhenReady).expect("advance");
        }
        let wallet_after = tables.player("s0").map(|p| p.wallet.currency);

        for mode in [AdvanceMode::WhenReady, AdvanceMode::Forced] {
            let err = advance(&mut tables, m, mode).expect_err("completed");
            assert!(matches!(
                err,
                WarError::StateConflict(StateConflict::MatchStatus {
                    status: MatchStatus::Completed,
                    ..
                })
            ));
        }
        assert_eq!(tables.fights_of(m).len(), 6);
        assert_eq!(tables.player("s0").map(|p| p.wallet.currency), wallet_after);
        assert_eq!(wallet_after, Some(100));
        assert_eq!(tables.player("w0").map(|p| p.wallet.currency), Some(0));
    }

    #[test]
    fn forced_round_with_one_missing_lineup_is_a_walkover() {
        let (mut tables, m) = setup();
        submit(&mut tables, m, WEAK, 1, &["w0", "w1", "w2"]).expect("lineup");

        let report = advance(&mut tables, m, AdvanceMode::Forced).expect("forced");
        assert_eq!(report.duel_winners, [Some(WEAK); 3]);
        assert_eq!(report.round_winner, Some(WEAK));

        let fights = tables.fights_of(m);
        assert!(fights.iter().all(|f| f.walkover && f.log.len() == 1));
        assert_eq!(fights[0].fighters, [None, Some("w0".to_owned())]);
        assert!(tables.has_participated(m, "w0"));
    }

    #[test]
    fn vanished_fighter_forfeits_only_their_duel() {
        let (mut tables, m) = setup();
        submit(&mut tables, m, STRONG, 1, &["s0", "s1", "s2"]).expect("lineup");
        submit(&mut tables, m, WEAK, 1, &["w0", "w1", "w2"]).expect("lineup");

        tables.remove_player("s1").expect("deleted character");

        let report = advance(&mut tables, m, AdvanceMode::WhenReady).expect("advance");
        assert_eq!(report.duel_winners, [Some(STRONG), Some(WEAK), Some(STRONG)]);
        assert_eq!(report.round_winner, Some(STRONG));

        let fights = tables.fights_of(m);
        assert!(fights[1].walkover);
        assert_eq!(fights[1].fighters, [None, Some("w1".to_owned())]);
    }

    #[test]
    fn drawn_rounds_go_to_the_tie_break() {
        let (mut tables, m) = setup();
        for _ in 1..=3 {
            advance(&mut tables, m, AdvanceMode::Forced).expect("forced empty round");
        }
        let row = tables.get_match(m).cloned().expect("match");
        assert_eq!(row.round_wins, [0, 0]);
        assert_eq!(row.status, MatchStatus::Completed);
        // Nothing separates the guilds: the first guild of the pairing takes it.
        assert_eq!(row.winner, Some(STRONG));
        assert!(row.rewards_settled);
    }

    #[test]
    fn settlement_happens_once() {
        let (mut tables, m) = setup();
        for _ in 1..=3 {
            advance(&mut tables, m, AdvanceMode::Forced).expect("forced round");
        }
        let mut outbox = Outbox::default();
        assert_eq!(settle_rewards(&mut tables, &mut outbox, m).expect("settle"), 0);
        assert!(outbox.events().is_empty());
        assert_eq!(tables.player("s0").map(|p| p.wallet.currency), Some(100));
    }
}
