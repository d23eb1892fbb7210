//! The immutable stat snapshot a combatant enters a fight with.

use crate::error::{ErrorSeverity, GameError};

/// Fully folded combat stats.
///
/// Primary stats are whole numbers; rate stats are finite reals, conventionally
/// in `[0, 1]` before the opponent's resist is subtracted. `hit_rate` is the
/// resist counterpart of the opponent's `dodge_rate`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub crit_rate: f64,
    /// Damage factor applied on a critical hit (1.5 = +50%).
    pub crit_damage: f64,
    pub dodge_rate: f64,
    pub hit_rate: f64,
    pub lifesteal_rate: f64,
    pub counter_rate: f64,
    pub crit_resist: f64,
    pub lifesteal_resist: f64,
    pub counter_resist: f64,
}

/// Precondition violation in a stat snapshot.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum StatsError {
    #[error("max hp must be positive")]
    ZeroHp,

    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
}

impl GameError for StatsError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroHp => "STATS_ZERO_HP",
            Self::NonFinite { .. } => "STATS_NON_FINITE",
            Self::Negative { .. } => "STATS_NEGATIVE",
        }
    }
}

impl CombatStats {
    fn rates(&self) -> [(&'static str, f64); 9] {
        [
            ("crit_rate", self.crit_rate),
            ("crit_damage", self.crit_damage),
            ("dodge_rate", self.dodge_rate),
            ("hit_rate", self.hit_rate),
            ("lifesteal_rate", self.lifesteal_rate),
            ("counter_rate", self.counter_rate),
            ("crit_resist", self.crit_resist),
            ("lifesteal_resist", self.lifesteal_resist),
            ("counter_resist", self.counter_resist),
        ]
    }

    /// Checks the resolver's preconditions: positive hp, finite non-negative rates.
    pub fn validate(&self) -> Result<(), StatsError> {
        if self.hp == 0 {
            return Err(StatsError::ZeroHp);
        }
        for (field, value) in self.rates() {
            if !value.is_finite() {
                return Err(StatsError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(StatsError::Negative { field, value });
            }
        }
        Ok(())
    }

    /// Coerces a snapshot into one that passes [`Self::validate`].
    ///
    /// Non-finite and negative rates become zero; hp is raised to 1.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        fn clean(value: f64) -> f64 {
            if value.is_finite() { value.max(0.0) } else { 0.0 }
        }
        self.hp = self.hp.max(1);
        self.crit_rate = clean(self.crit_rate);
        self.crit_damage = clean(self.crit_damage);
        self.dodge_rate = clean(self.dodge_rate);
        self.hit_rate = clean(self.hit_rate);
        self.lifesteal_rate = clean(self.lifesteal_rate);
        self.counter_rate = clean(self.counter_rate);
        self.crit_resist = clean(self.crit_resist);
        self.lifesteal_resist = clean(self.lifesteal_resist);
        self.counter_resist = clean(self.counter_resist);
        self
    }
}
