//! Typed stat bonuses carried by equipment, passives, roots and modifiers.

/// Stat a bonus targets, and whether it adds or multiplies.
///
/// Data files may carry bonus kinds that only matter to other subsystems
/// (cultivation speed, alchemy); they deserialize to [`BonusKind::Unrecognized`]
/// and contribute nothing to combat stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum BonusKind {
    HpAdd,
    AtkAdd,
    DefAdd,
    HpMul,
    AtkMul,
    DefMul,
    SpeedAdd,
    CritRateAdd,
    CritDamageAdd,
    DodgeRateAdd,
    HitRateAdd,
    LifestealRateAdd,
    CounterRateAdd,
    CritResistAdd,
    LifestealResistAdd,
    CounterResistAdd,
    #[cfg_attr(feature = "serde", serde(other))]
    Unrecognized,
}

/// A single `(kind, value)` bonus entry.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBonus {
    pub kind: BonusKind,
    pub value: f64,
}

impl StatBonus {
    pub const fn new(kind: BonusKind, value: f64) -> Self {
        Self { kind, value }
    }

    /// Returns true if the bonus is a multiplier rather than an addend.
    pub const fn is_multiplier(&self) -> bool {
        matches!(
            self.kind,
            BonusKind::HpMul | BonusKind::AtkMul | BonusKind::DefMul
        )
    }
}
