//! Combat result types.

use core::cmp::Ordering;

use super::log::CombatLogEntry;

/// One of the two combatants of a resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }

    pub const fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Winner {
    A,
    B,
    Draw,
}

impl Winner {
    pub const fn side(self) -> Option<Side> {
        match self {
            Self::A => Some(Side::A),
            Self::B => Some(Side::B),
            Self::Draw => None,
        }
    }
}

impl From<Side> for Winner {
    fn from(side: Side) -> Self {
        match side {
            Side::A => Self::A,
            Side::B => Self::B,
        }
    }
}

/// Result of a complete resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatOutcome {
    pub winner: Winner,
    /// Number of simulation turns started.
    pub turns: u32,
    /// Remaining hp, side A then side B.
    pub remaining_hp: [u32; 2],
    pub max_hp: [u32; 2],
    pub log: Vec<CombatLogEntry>,
}

impl CombatOutcome {
    /// Remaining hp as a fraction of max hp.
    pub fn hp_share(&self, side: Side) -> f64 {
        let i = side.index();
        f64::from(self.remaining_hp[i]) / f64::from(self.max_hp[i].max(1))
    }
}

/// Compares remaining hp percentages exactly (cross-multiplied integers).
pub fn compare_hp_share(hp: [u32; 2], max_hp: [u32; 2]) -> Ordering {
    let a = u64::from(hp[0]) * u64::from(max_hp[1]);
    let b = u64::from(hp[1]) * u64::from(max_hp[0]);
    a.cmp(&b)
}
