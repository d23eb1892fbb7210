//! Bonus application for the primary stats.
//!
//! Primary stats (hp, attack, defense) follow one calculation order:
//! `(base + Σ flat) × Π multipliers`
//!
//! Multipliers are applied as a product of individual factors, never summed:
//! two "+20%" sources yield ×1.44, not ×1.4.

/// A single bonus that can be applied to a stat value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bonus {
    /// Flat additive bonus (applied first)
    Flat(f64),

    /// Multiplicative factor (e.g., 1.2 = +20%), applied after all flats
    More(f64),
}

/// A collection of bonuses applied in the fixed order.
///
/// # Example
/// ```
/// # use arena_core::stats::bonus::{Bonus, BonusStack};
/// let mut stack = BonusStack::new();
/// stack.add(Bonus::Flat(50.0));
/// stack.add(Bonus::More(1.2));
/// stack.add(Bonus::More(1.5));
///
/// // (100 + 50) × 1.2 × 1.5
/// assert_eq!(stack.apply(100.0), 270.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    pub fn new() -> Self {
        Self {
            bonuses: Vec::new(),
        }
    }

    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    pub fn extend(&mut self, bonuses: impl IntoIterator<Item = Bonus>) {
        self.bonuses.extend(bonuses);
    }

    /// Sum of all flat bonuses.
    pub fn flat_sum(&self) -> f64 {
        self.bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Flat(v) => Some(*v),
                _ => None,
            })
            .sum()
    }

    /// Product of all multiplier factors (1.0 when there are none).
    pub fn multiplier(&self) -> f64 {
        self.bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::More(f) => Some(*f),
                _ => None,
            })
            .product()
    }

    /// Apply all bonuses to a base value.
    ///
    /// # Formula
    ///
    /// ```text
    /// result = (base + flat_sum) × Π more
    /// ```
    pub fn apply(&self, base: f64) -> f64 {
        // Multipliers applied sequentially, in insertion order
        self.bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::More(f) => Some(*f),
                _ => None,
            })
            .fold(base + self.flat_sum(), |acc, factor| acc * factor)
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bonuses.len()
    }
}

/// Builder-style helpers
impl BonusStack {
    /// Add a flat bonus (builder pattern)
    pub fn flat(mut self, value: f64) -> Self {
        self.add(Bonus::Flat(value));
        self
    }

    /// Add a multiplier (builder pattern)
    pub fn more(mut self, factor: f64) -> Self {
        self.add(Bonus::More(factor));
        self
    }
}
