//! Random pairing of registered guilds.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::info;

use crate::context::Outbox;
use crate::events::MatchEvent;
use crate::repository::{MatchId, WarId, WarTables};

/// Shuffles the war's registered guilds and pairs them consecutively.
///
/// Each match gets its own seed from `rng`. With an odd number of guilds the
/// last one after the shuffle sits this war out.
pub fn pair_guilds(
    tables: &mut WarTables,
    outbox: &mut Outbox,
    war: WarId,
    rng: &mut StdRng,
) -> Vec<MatchId> {
    let mut guilds = tables.registered_guilds(war);
    guilds.shuffle(rng);

    let pairs = guilds.chunks_exact(2);
    if let [odd] = pairs.remainder() {
        info!(%war, guild = %odd, "odd guild out, no match this war");
    }

    let mut created = Vec::with_capacity(guilds.len() / 2);
    for pair in pairs {
        let pair = [pair[0], pair[1]];
        let match_id = tables.insert_match(war, pair, rng.r#gen());
        info!(%war, %match_id, first = %pair[0], second = %pair[1], "match paired");
        outbox.push(MatchEvent::Paired {
            war,
            match_id,
            guilds: pair,
        });
        created.push(match_id);
    }
    created
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    use crate::repository::GuildId;

    fn war_with(guilds: u64) -> (WarTables, WarId) {
        let mut tables = WarTables::new();
        let war = tables.insert_war("w", chrono::DateTime::UNIX_EPOCH, Vec::new());
        for id in 1..=guilds {
            tables.register(war, GuildId(id));
        }
        (tables, war)
    }

    #[test]
    fn every_guild_lands_in_exactly_one_match() {
        let (mut tables, war) = war_with(6);
        let mut rng = StdRng::seed_from_u64(11);
        let matches = pair_guilds(&mut tables, &mut Outbox::default(), war, &mut rng);
        assert_eq!(matches.len(), 3);

        let seen: BTreeSet<_> = matches
            .iter()
            .filter_map(|id| tables.get_match(*id))
            .flat_map(|m| m.guilds)
            .collect();
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn odd_guild_sits_out() {
        let (mut tables, war) = war_with(5);
        let mut outbox = Outbox::default();
        let matches = pair_guilds(&mut tables, &mut outbox, war, &mut StdRng::seed_from_u64(3));
        assert_eq!(matches.len(), 2);
        assert_eq!(outbox.events().len(), 2);

        let paired = tables
            .matches_of_war(war)
            .flat_map(|m| m.guilds)
            .collect::<BTreeSet<_>>();
        assert_eq!(paired.len(), 4);
    }

    #[test]
    fn same_seed_same_pairing() {
        let pairings: Vec<Vec<[GuildId; 2]>> = (0..2)
            .map(|_| {
                let (mut tables, war) = war_with(8);
                let mut rng = StdRng::seed_from_u64(99);
                pair_guilds(&mut tables, &mut Outbox::default(), war, &mut rng)
                    .iter()
                    .filter_map(|id| tables.get_match(*id).map(|m| m.guilds))
                    .collect()
            })
            .collect();
        assert_eq!(pairings[0], pairings[1]);
    }

    #[test]
    fn fewer_than_two_guilds_make_no_match() {
        let (mut tables, war) = war_with(1);
        let matches = pair_guilds(
            &mut tables,
            &mut Outbox::default(),
            war,
            &mut StdRng::seed_from_u64(0),
        );
        assert!(matches.is_empty());
    }
}
