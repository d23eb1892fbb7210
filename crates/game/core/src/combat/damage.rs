//! Damage mitigation and application.

/// Fraction of incoming damage removed by defense.
///
/// # Formula
///
/// ```text
/// effective_defense = defense × (1 − armor_pierce)
/// reduction         = effective_defense / (effective_defense + K)
/// ```
///
/// `armor_pierce` is clamped to `[0, 1]`.
pub fn mitigation(defense: u32, armor_pierce: f64, k: f64) -> f64 {
    let pierce = if armor_pierce.is_finite() {
        armor_pierce.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let effective = f64::from(defense) * (1.0 - pierce);
    if effective + k <= 0.0 {
        return 0.0;
    }
    effective / (effective + k)
}

/// Damage after mitigation; never below 1.
///
/// ```text
/// actual = max(1, floor(raw × (1 − reduction)))
/// ```
pub fn calculate_damage(raw: f64, reduction: f64) -> u32 {
    let mitigated = (raw * (1.0 - reduction)).floor();
    if mitigated.is_finite() && mitigated >= 1.0 {
        // `as` saturates at u32::MAX
        mitigated as u32
    } else {
        1
    }
}

/// Apply damage to current HP.
///
/// # Returns
///
/// New HP value (clamped to 0)
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}
