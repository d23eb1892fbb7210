//! The parameterized turn-based resolver shared by PvE, PvP and guild wars.

use crate::config::{CombatConfig, CombatRules, TieBreak};
use crate::rng::{CombatRng, RollContext};
use crate::stats::{CombatStats, StatsError};

use super::ability::{Ability, AbilityEffect, select_ability};
use super::damage::{calculate_damage, mitigation};
use super::hit::{effective_counter, effective_crit, effective_dodge, effective_lifesteal};
use super::log::{LogKind, LogWriter};
use super::result::{CombatOutcome, Side, Winner, compare_hp_share};
use super::state::CombatantState;

/// A validated participant: display name, stat snapshot and known abilities.
///
/// Construction is the only place stats are checked; once built, a
/// combatant can always be resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct Combatant {
    name: String,
    stats: CombatStats,
    abilities: Vec<Ability>,
}

impl Combatant {
    pub fn new(
        name: impl Into<String>,
        stats: CombatStats,
        abilities: Vec<Ability>,
    ) -> Result<Self, StatsError> {
        stats.validate()?;
        Ok(Self {
            name: name.into(),
            stats,
            abilities,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> &CombatStats {
        &self.stats
    }

    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }
}

/// Turn order, fixed once before the first turn.
fn turn_order(a: &Combatant, b: &Combatant, speed_tie: Side) -> [Side; 2] {
    let first = match a.stats.speed.cmp(&b.stats.speed) {
        core::cmp::Ordering::Greater => Side::A,
        core::cmp::Ordering::Less => Side::B,
        core::cmp::Ordering::Equal => speed_tie,
    };
    [first, first.opponent()]
}

struct Fight<'a> {
    config: &'a CombatConfig,
    rules: &'a CombatRules,
    rng: CombatRng,
    fighters: [&'a Combatant; 2],
    states: [CombatantState; 2],
    log: LogWriter,
    turn: u32,
}

impl<'a> Fight<'a> {
    fn fighter(&self, side: Side) -> &'a Combatant {
        self.fighters[side.index()]
    }

    fn state(&mut self, side: Side) -> &mut CombatantState {
        &mut self.states[side.index()]
    }

    fn record(&mut self, kind: LogKind, text: String, damage: u32, shield: u32) {
        self.log
            .push(self.turn, kind, text, damage, shield, &self.states);
    }

    fn both_alive(&self) -> bool {
        self.states.iter().all(CombatantState::is_alive)
    }

    /// One combatant's action: upkeep, then an ability or a basic attack.
    fn act(&mut self, actor: Side) {
        let fighter = self.fighter(actor);
        let regen = self.config.energy_regen;
        if self.state(actor).upkeep(regen) {
            self.record(
                LogKind::Info,
                format!("{}'s shield fades away.", fighter.name),
                0,
                0,
            );
        }

        let energy = self.states[actor.index()].energy;
        let Some(ability) = select_ability(&fighter.abilities, energy) else {
            self.strike(actor, 1.0, 0.0);
            return;
        };

        self.state(actor).spend(ability.energy_cost);
        match ability.effect {
            AbilityEffect::Strike {
                multiplier,
                armor_pierce,
            } => {
                self.record(
                    LogKind::Skill,
                    format!("{} unleashes [{}]!", fighter.name, ability.name),
                    0,
                    0,
                );
                self.strike(actor, multiplier, armor_pierce);
            }
            AbilityEffect::Shield { hp_ratio, duration } => {
                let state = self.state(actor);
                let amount = portion(state.max_hp, hp_ratio);
                state.raise_shield(amount, duration);
                self.record(
                    LogKind::Skill,
                    format!(
                        "{} uses [{}], raising a shield of {}.",
                        fighter.name, ability.name, amount
                    ),
                    0,
                    amount,
                );
            }
            AbilityEffect::Heal { hp_ratio } => {
                let state = self.state(actor);
                let amount = portion(state.max_hp, hp_ratio);
                let healed = state.heal(amount);
                self.record(
                    LogKind::Skill,
                    format!(
                        "{} uses [{}], recovering {} hp.",
                        fighter.name, ability.name, healed
                    ),
                    healed,
                    0,
                );
            }
        }
    }

    /// Damaging attack from `actor` against its opponent.
    fn strike(&mut self, actor: Side, multiplier: f64, armor_pierce: f64) {
        let target = actor.opponent();
        let attacker = self.fighter(actor);
        let defender = self.fighter(target);
        let (att, def) = (&attacker.stats, &defender.stats);
        let turn = self.turn;

        let dodge = effective_dodge(def.dodge_rate, att.hit_rate, self.config.dodge_floor);
        if self.rng.chance(turn, actor, RollContext::Dodge, dodge) {
            self.record(
                LogKind::Info,
                format!("{} dodges the attack of {}!", defender.name, attacker.name),
                0,
                0,
            );
            return;
        }

        let attack = f64::from(att.attack);
        let mut raw = attack * multiplier;
        if self.config.damage_variance > 0.0 {
            let roll = self.rng.roll(turn, actor, RollContext::Variance);
            raw += (roll * attack * self.config.damage_variance).floor();
        }
        let critical = self.rng.chance(
            turn,
            actor,
            RollContext::Critical,
            effective_crit(att.crit_rate, def.crit_resist),
        );
        if critical {
            raw *= att.crit_damage;
        }
        raw *= self.config.escalation(turn);

        let reduction = mitigation(def.defense, armor_pierce, self.rules.mitigation_k);
        let damage = calculate_damage(raw, reduction);

        let absorbed = self.state(target).absorb(damage);
        if absorbed > 0 {
            self.record(
                LogKind::Info,
                format!("{}'s shield absorbs {} damage.", defender.name, absorbed),
                0,
                absorbed,
            );
        }

        let dealt = damage - absorbed;
        self.state(target).take(dealt);
        let text = if critical {
            format!(
                "{} lands a CRITICAL blow on {} for {} damage!",
                attacker.name, defender.name, dealt
            )
        } else {
            format!(
                "{} hits {} for {} damage.",
                attacker.name, defender.name, dealt
            )
        };
        self.record(LogKind::Action, text, dealt, 0);

        if dealt == 0 {
            return;
        }

        let lifesteal = effective_lifesteal(att.lifesteal_rate, def.lifesteal_resist);
        if lifesteal > 0.0 {
            let healed = self.state(actor).heal(portion(dealt, lifesteal));
            if healed > 0 {
                self.record(
                    LogKind::Info,
                    format!("{} drains {} hp.", attacker.name, healed),
                    healed,
                    0,
                );
            }
        }

        // A defeated defender cannot retaliate.
        if !self.states[target.index()].is_alive() {
            return;
        }
        let counter = effective_counter(def.counter_rate, att.counter_resist);
        if self.rng.chance(turn, actor, RollContext::Counter, counter) {
            let damage = portion(def.attack, self.config.counter_ratio);
            self.state(actor).take(damage);
            self.record(
                LogKind::Action,
                format!(
                    "{} counters, dealing {} damage back to {}!",
                    defender.name, damage, attacker.name
                ),
                damage,
                0,
            );
        }
    }

    fn decide(&self) -> Winner {
        match (self.states[0].is_alive(), self.states[1].is_alive()) {
            (true, false) => Winner::A,
            (false, true) => Winner::B,
            (false, false) => Winner::Draw,
            (true, true) => {
                let hp = [self.states[0].hp, self.states[1].hp];
                let max_hp = [self.states[0].max_hp, self.states[1].max_hp];
                match compare_hp_share(hp, max_hp) {
                    core::cmp::Ordering::Greater => Winner::A,
                    core::cmp::Ordering::Less => Winner::B,
                    core::cmp::Ordering::Equal => match self.rules.cap_tie_break {
                        TieBreak::Draw => Winner::Draw,
                        TieBreak::Favor(side) => side.into(),
                    },
                }
            }
        }
    }
}

/// `floor(value × ratio)`, with non-finite or negative ratios counting as zero.
fn portion(value: u32, ratio: f64) -> u32 {
    let amount = (f64::from(value) * ratio).floor();
    if amount.is_finite() && amount > 0.0 {
        amount as u32
    } else {
        0
    }
}

/// Resolves a fight between two validated combatants.
///
/// The result is a pure function of the arguments: the same seed and inputs
/// always produce the same winner and an identical log. The loop is bounded by
/// `config.max_turns`; survivors at the cap are ranked by remaining hp share,
/// with `rules.cap_tie_break` deciding exact ties.
pub fn resolve(
    seed: u64,
    a: &Combatant,
    b: &Combatant,
    rules: &CombatRules,
    config: &CombatConfig,
) -> CombatOutcome {
    let mut fight = Fight {
        config,
        rules,
        rng: CombatRng::new(seed),
        fighters: [a, b],
        states: [
            CombatantState::new(a.name.clone(), a.stats.hp, config.max_energy),
            CombatantState::new(b.name.clone(), b.stats.hp, config.max_energy),
        ],
        log: LogWriter::default(),
        turn: 0,
    };

    let order = turn_order(a, b, rules.speed_tie);
    fight.record(
        LogKind::Info,
        format!("The duel between {} and {} begins!", a.name, b.name),
        0,
        0,
    );
    let opener = format!("{} is faster and strikes first!", fight.fighter(order[0]).name);
    fight.record(LogKind::Info, opener, 0, 0);

    while fight.turn < config.max_turns && fight.both_alive() {
        fight.turn += 1;
        if fight.turn == config.escalation_start + 1 {
            fight.record(
                LogKind::Info,
                "Killing intent thickens over the arena; every blow grows heavier!".to_string(),
                0,
                0,
            );
        }
        for actor in order {
            fight.act(actor);
            if !fight.both_alive() {
                break;
            }
        }
    }

    let winner = fight.decide();
    let closing = match winner.side() {
        Some(side) => format!("The duel is over! {} is victorious!", fight.fighter(side).name),
        None => format!("{} turns pass without a victor. The duel ends in a draw!", fight.turn),
    };
    fight.record(LogKind::Info, closing, 0, 0);

    CombatOutcome {
        winner,
        turns: fight.turn,
        remaining_hp: [fight.states[0].hp, fight.states[1].hp],
        max_hp: [fight.states[0].max_hp, fight.states[1].max_hp],
        log: fight.log.finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatMode;

    fn stats(hp: u32, attack: u32, defense: u32, speed: u32) -> CombatStats {
        CombatStats {
            hp,
            attack,
            defense,
            speed,
            ..CombatStats::default()
        }
    }

    fn fighter(name: &str, stats: CombatStats) -> Combatant {
        Combatant::new(name, stats, Vec::new()).expect("valid stats")
    }

    fn guild_rules(config: &CombatConfig) -> CombatRules {
        config.rules(CombatMode::GuildWar)
    }

    #[test]
    fn rejects_malformed_stats_before_resolution() {
        let bad = CombatStats {
            crit_rate: f64::NAN,
            ..stats(100, 10, 0, 0)
        };
        assert!(Combatant::new("bad", bad, Vec::new()).is_err());
        assert!(Combatant::new("dead", stats(0, 10, 0, 0), Vec::new()).is_err());
    }

    #[test]
    fn faster_fighter_wins_reference_duel() {
        let config = CombatConfig::default();
        let rules = guild_rules(&config);
        let a = fighter("Azure", stats(1000, 200, 100, 50));
        let b = fighter("Crimson", stats(1000, 150, 50, 40));

        for seed in [1u64, 7, 42, 1337] {
            let outcome = resolve(seed, &a, &b, &rules, &config);
            assert_eq!(outcome.winner, Winner::A, "seed {seed}");
            assert!(outcome.turns <= 10, "seed {seed}: {} turns", outcome.turns);
            // A always opens the first turn.
            let opening = outcome
                .log
                .iter()
                .find(|entry| entry.turn == 1)
                .expect("turn 1 entry");
            assert!(
                opening.text.starts_with("Azure hits") || opening.text.contains("attack of Azure"),
                "{}",
                opening.text
            );
        }
    }

    #[test]
    fn identical_inputs_produce_identical_logs() {
        let config = CombatConfig {
            damage_variance: 0.2,
            ..CombatConfig::default()
        };
        let rules = config.rules(CombatMode::Pvp);
        let a = fighter(
            "Azure",
            CombatStats {
                crit_rate: 0.3,
                crit_damage: 1.5,
                dodge_rate: 0.1,
                lifesteal_rate: 0.1,
                counter_rate: 0.2,
                ..stats(900, 120, 80, 30)
            },
        );
        let b = fighter(
            "Crimson",
            CombatStats {
                crit_rate: 0.2,
                crit_damage: 2.0,
                dodge_rate: 0.2,
                counter_rate: 0.1,
                ..stats(1100, 100, 120, 30)
            },
        );

        let first = resolve(99, &a, &b, &rules, &config);
        let second = resolve(99, &a, &b, &rules, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn basic_attack_always_deals_damage() {
        let config = CombatConfig::default();
        let rules = guild_rules(&config);
        let weak = fighter("Weak", stats(100, 0, 0, 10));
        let wall = fighter("Wall", stats(100, 0, 1_000_000, 5));

        let outcome = resolve(3, &weak, &wall, &rules, &config);
        for entry in outcome.log.iter().filter(|e| e.kind == LogKind::Action) {
            assert!(entry.damage >= 1);
        }
    }

    #[test]
    fn terminates_within_turn_cap() {
        let config = CombatConfig::default();
        let rules = guild_rules(&config);
        let a = fighter("Turtle", stats(u32::MAX, 0, 1_000_000, 1));
        let b = fighter("Shell", stats(u32::MAX, 0, 1_000_000, 1));

        let outcome = resolve(11, &a, &b, &rules, &config);
        assert_eq!(outcome.turns, config.max_turns);
    }

    #[test]
    fn equal_share_at_cap_follows_tie_break() {
        let config = CombatConfig {
            max_turns: 0,
            ..CombatConfig::default()
        };
        let a = fighter("Left", stats(100, 10, 0, 5));
        let b = fighter("Right", stats(100, 10, 0, 5));

        let draw = resolve(1, &a, &b, &config.rules(CombatMode::GuildWar), &config);
        assert_eq!(draw.winner, Winner::Draw);

        let favored = resolve(1, &a, &b, &config.rules(CombatMode::Pvp), &config);
        assert_eq!(favored.winner, Winner::B);
    }

    #[test]
    fn higher_hp_share_wins_at_cap() {
        let config = CombatConfig {
            max_turns: 1,
            dodge_floor: 0.0,
            ..CombatConfig::default()
        };
        let rules = guild_rules(&config);
        let a = fighter("Big", stats(10_000, 100, 0, 10));
        let b = fighter("Small", stats(10_000, 50, 0, 5));

        let outcome = resolve(5, &a, &b, &rules, &config);
        assert_eq!(outcome.winner, Winner::A);
        assert_eq!(outcome.remaining_hp, [9_950, 9_900]);
    }

    #[test]
    fn speed_tie_uses_configured_side() {
        let config = CombatConfig {
            dodge_floor: 0.0,
            ..CombatConfig::default()
        };
        let a = fighter("Left", stats(100, 1000, 0, 5));
        let b = fighter("Right", stats(100, 1000, 0, 5));

        let rules = guild_rules(&config);
        assert_eq!(resolve(1, &a, &b, &rules, &config).winner, Winner::A);

        let rules = rules.with_speed_tie(Side::B);
        assert_eq!(resolve(1, &a, &b, &rules, &config).winner, Winner::B);
    }

    #[test]
    fn highest_affordable_ability_fires_and_spends_energy() {
        let config = CombatConfig {
            dodge_floor: 0.0,
            ..CombatConfig::default()
        };
        let rules = guild_rules(&config);
        let shield = Ability {
            id: "golden-bell".into(),
            name: "Golden Bell".into(),
            energy_cost: 15,
            effect: AbilityEffect::Shield {
                hp_ratio: 0.5,
                duration: 3,
            },
        };
        let a = Combatant::new("Monk", stats(1000, 10, 0, 10), vec![shield]).expect("valid");
        let b = fighter("Brute", stats(1000, 100, 0, 5));

        let outcome = resolve(8, &a, &b, &rules, &config);
        let skill = outcome
            .log
            .iter()
            .find(|entry| entry.kind == LogKind::Skill)
            .expect("shield raised");
        assert_eq!(skill.turn, 1);
        assert_eq!(skill.shield, 500);
        assert_eq!(skill.state[0].energy, 0);

        let absorbed = outcome
            .log
            .iter()
            .find(|entry| entry.text.contains("absorbs"))
            .expect("shield absorbed damage");
        assert_eq!(absorbed.shield, 100);
        assert_eq!(absorbed.state[0].hp, 1000);
    }

    #[test]
    fn escalation_announced_once_after_configured_turn() {
        let config = CombatConfig::default();
        let rules = guild_rules(&config);
        let a = fighter("Turtle", stats(u32::MAX, 0, 1_000_000, 1));
        let b = fighter("Shell", stats(u32::MAX, 0, 1_000_000, 1));

        let outcome = resolve(2, &a, &b, &rules, &config);
        let announcements: Vec<_> = outcome
            .log
            .iter()
            .filter(|entry| entry.text.starts_with("Killing intent"))
            .collect();
        assert_eq!(announcements.len(), 1);
        assert_eq!(announcements[0].turn, 16);
    }

    #[test]
    fn lifesteal_is_capped_at_max_hp() {
        let config = CombatConfig {
            dodge_floor: 0.0,
            max_turns: 1,
            ..CombatConfig::default()
        };
        let rules = guild_rules(&config);
        let vampire = fighter(
            "Vampire",
            CombatStats {
                lifesteal_rate: 1.0,
                ..stats(100, 50, 0, 10)
            },
        );
        // Target is faster and chips 1 hp off before the vampire drains 50.
        let target = fighter("Target", stats(1000, 0, 0, 20));

        let outcome = resolve(4, &vampire, &target, &rules, &config);
        assert_eq!(outcome.remaining_hp, [100, 950]);
        let drain = outcome
            .log
            .iter()
            .find(|entry| entry.text.contains("drains"))
            .expect("lifesteal entry");
        assert_eq!(drain.damage, 1);
    }

    /// One exchange with every random rate either certain or impossible.
    fn one_turn() -> CombatConfig {
        CombatConfig {
            dodge_floor: 0.0,
            max_turns: 1,
            ..CombatConfig::default()
        }
    }

    #[test]
    fn dodged_attack_deals_no_damage() {
        let config = one_turn();
        let rules = guild_rules(&config);
        let attacker = fighter("A", stats(1000, 100, 0, 10));
        let dancer = fighter(
            "D",
            CombatStats {
                dodge_rate: 1.0,
                ..stats(1000, 10, 0, 5)
            },
        );

        let outcome = resolve(6, &attacker, &dancer, &rules, &config);
        let miss = outcome
            .log
            .iter()
            .find(|entry| entry.text == "D dodges the attack of A!")
            .expect("dodge entry");
        assert_eq!(miss.damage, 0);
        assert_eq!(miss.state[1].hp, 1000);
        assert_eq!(outcome.remaining_hp, [990, 1000]);

        // Hit rate cancels the dodge.
        let sharpshooter = fighter(
            "A",
            CombatStats {
                hit_rate: 1.0,
                ..stats(1000, 100, 0, 10)
            },
        );
        let outcome = resolve(6, &sharpshooter, &dancer, &rules, &config);
        assert!(!outcome.log.iter().any(|entry| entry.text.contains("dodges")));
        assert_eq!(outcome.remaining_hp, [990, 900]);
    }

    #[test]
    fn critical_hits_apply_the_crit_multiplier() {
        let config = one_turn();
        let rules = guild_rules(&config);
        let striker = fighter(
            "A",
            CombatStats {
                crit_rate: 1.0,
                crit_damage: 2.0,
                ..stats(1000, 100, 0, 10)
            },
        );
        let target = fighter("B", stats(1000, 0, 0, 5));

        let outcome = resolve(12, &striker, &target, &rules, &config);
        let crit = outcome
            .log
            .iter()
            .find(|entry| entry.text.contains("CRITICAL"))
            .expect("critical entry");
        assert_eq!(crit.damage, 200);
        assert_eq!(outcome.remaining_hp[1], 800);

        let stoic = fighter(
            "B",
            CombatStats {
                crit_resist: 1.0,
                ..stats(1000, 0, 0, 5)
            },
        );
        let outcome = resolve(12, &striker, &stoic, &rules, &config);
        assert!(!outcome.log.iter().any(|entry| entry.text.contains("CRITICAL")));
        assert_eq!(outcome.remaining_hp[1], 900);
    }

    #[test]
    fn counters_return_half_the_defender_attack() {
        let config = one_turn();
        let rules = guild_rules(&config);
        let attacker = fighter("A", stats(1000, 10, 0, 10));
        let riposte = fighter(
            "B",
            CombatStats {
                counter_rate: 1.0,
                ..stats(1000, 81, 0, 5)
            },
        );

        let outcome = resolve(21, &attacker, &riposte, &rules, &config);
        let counters: Vec<_> = outcome
            .log
            .iter()
            .filter(|entry| entry.text.contains("counters"))
            .collect();
        assert_eq!(counters.len(), 1);
        assert_eq!(counters[0].text, "B counters, dealing 40 damage back to A!");
        assert_eq!(counters[0].damage, 40);
        // 40 from the counter, 81 from B's own attack.
        assert_eq!(outcome.remaining_hp, [879, 990]);

        let resistant = fighter(
            "A",
            CombatStats {
                counter_resist: 1.0,
                ..stats(1000, 10, 0, 10)
            },
        );
        let outcome = resolve(21, &resistant, &riposte, &rules, &config);
        assert!(!outcome.log.iter().any(|entry| entry.text.contains("counters")));
        assert_eq!(outcome.remaining_hp, [919, 990]);
    }

    #[test]
    fn defeated_defender_does_not_counter() {
        let config = one_turn();
        let rules = guild_rules(&config);
        let executioner = fighter("A", stats(1000, 1000, 0, 10));
        let riposte = fighter(
            "B",
            CombatStats {
                counter_rate: 1.0,
                ..stats(100, 500, 0, 5)
            },
        );

        let outcome = resolve(33, &executioner, &riposte, &rules, &config);
        assert_eq!(outcome.winner, Winner::A);
        assert_eq!(outcome.remaining_hp, [1000, 0]);
        assert!(!outcome.log.iter().any(|entry| entry.text.contains("counters")));
    }

    #[test]
    fn heal_restores_hp_up_to_the_maximum() {
        let config = one_turn();
        let rules = guild_rules(&config);
        let mend = Ability {
            id: "spring-rain".into(),
            name: "Spring Rain".into(),
            energy_cost: 15,
            effect: AbilityEffect::Heal { hp_ratio: 0.5 },
        };
        let healer = Combatant::new("Monk", stats(1000, 10, 0, 5), vec![mend]).expect("valid");
        let brute = fighter("Brute", stats(1000, 300, 0, 20));

        let outcome = resolve(17, &healer, &brute, &rules, &config);
        let heal = outcome
            .log
            .iter()
            .find(|entry| entry.kind == LogKind::Skill)
            .expect("heal entry");
        assert_eq!(heal.text, "Monk uses [Spring Rain], recovering 300 hp.");
        assert_eq!(heal.damage, 300);
        assert_eq!(heal.state[0].hp, 1000);
        assert_eq!(heal.state[0].energy, 0);
        assert_eq!(outcome.remaining_hp, [1000, 1000]);
    }
}
