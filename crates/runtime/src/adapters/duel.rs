//! Guild-war duel adapter.
//!
//! A duel is a plain resolution under [`CombatMode::GuildWar`] rules
//! (K = 1000, symmetric draw at the cap). When a side is absent (no lineup,
//! or the fighter's record vanished) the duel is a walkover with a single
//! info entry so replays still have something to show.

use arena_core::{
    CombatConfig, CombatLogEntry, CombatMode, CombatOutcome, CombatRules, Combatant,
    CombatantSnapshot, LogKind, Winner, compute_seed, resolve,
};

/// Domain tag mixed into duel seeds.
const DUEL_SEED_CONTEXT: u32 = 0x6475_656c;

/// Seed of one positional duel, derived from the match seed.
pub fn duel_seed(match_seed: u64, round: u8, position: u8) -> u64 {
    compute_seed(
        match_seed,
        u64::from(round),
        u32::from(position),
        DUEL_SEED_CONTEXT,
    )
}

/// Fights one lineup slot. `labels` name the sides for walkover logs.
pub fn fight_slot(
    seed: u64,
    a: Option<&Combatant>,
    b: Option<&Combatant>,
    labels: [&str; 2],
    config: &CombatConfig,
) -> CombatOutcome {
    match (a, b) {
        (Some(a), Some(b)) => {
            let rules = CombatRules::for_mode(CombatMode::GuildWar, config);
            resolve(seed, a, b, &rules, config)
        }
        (Some(a), None) => walkover(Winner::A, [Some(a), None], labels, config),
        (None, Some(b)) => walkover(Winner::B, [None, Some(b)], labels, config),
        (None, None) => walkover(Winner::Draw, [None, None], labels, config),
    }
}

fn walkover(
    winner: Winner,
    sides: [Option<&Combatant>; 2],
    labels: [&str; 2],
    config: &CombatConfig,
) -> CombatOutcome {
    let max_hp = sides.map(|side| side.map_or(1, |c| c.stats().hp));
    let remaining_hp = [0, 1].map(|i| if sides[i].is_some() { max_hp[i] } else { 0 });

    let snapshot = |i: usize| CombatantSnapshot {
        name: labels[i].to_owned(),
        hp: remaining_hp[i],
        max_hp: max_hp[i],
        energy: 0,
        max_energy: if sides[i].is_some() {
            config.max_energy
        } else {
            0
        },
    };

    let text = match winner.side() {
        Some(side) => format!("{} wins by walkover.", labels[side.index()]),
        None => "Both fighters are absent; the duel is drawn.".to_owned(),
    };

    CombatOutcome {
        winner,
        turns: 0,
        remaining_hp,
        max_hp,
        log: vec![CombatLogEntry {
            turn: 0,
            text,
            kind: LogKind::Info,
            damage: 0,
            shield: 0,
            state: [snapshot(0), snapshot(1)],
        }],
    }
}
