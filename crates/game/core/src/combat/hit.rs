//! Effective rates after the opponent's resist.
//!
//! Dodge is floored at a positive minimum; every other rate floors at zero.

/// Chance that the defender evades an attack.
///
/// ```text
/// effective = max(floor, defender_dodge − attacker_hit)
/// ```
pub fn effective_dodge(defender_dodge: f64, attacker_hit: f64, floor: f64) -> f64 {
    (defender_dodge - attacker_hit).max(floor)
}

/// Chance that an attack lands as a critical hit.
pub fn effective_crit(attacker_crit: f64, defender_crit_resist: f64) -> f64 {
    (attacker_crit - defender_crit_resist).max(0.0)
}

/// Fraction of hp damage the attacker heals back.
pub fn effective_lifesteal(attacker_lifesteal: f64, defender_lifesteal_resist: f64) -> f64 {
    (attacker_lifesteal - defender_lifesteal_resist).max(0.0)
}

/// Chance that the defender retaliates after taking hp damage.
pub fn effective_counter(defender_counter: f64, attacker_counter_resist: f64) -> f64 {
    (defender_counter - attacker_counter_resist).max(0.0)
}
