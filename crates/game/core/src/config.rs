//! Combat tuning constants and per-mode resolution rules.

use crate::combat::Side;

/// Combat configuration constants and tunable parameters.
///
/// Loaded from `combat.toml` by the content crate; missing keys fall back to
/// the defaults below.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Hard cap on simulation turns. Each turn lets both combatants act once.
    pub max_turns: u32,
    /// Last turn without escalation; later turns amplify all damage.
    pub escalation_start: u32,
    /// Additional damage multiplier per turn past `escalation_start`.
    pub escalation_step: f64,
    /// Energy gained at the start of each action.
    pub energy_regen: u32,
    pub max_energy: u32,
    /// Minimum effective dodge chance; keeps every fight probabilistic.
    pub dodge_floor: f64,
    /// Fraction of the defender's attack dealt back on a counter.
    pub counter_ratio: f64,
    /// Upper bound of the random bonus added to raw damage, as a fraction of attack.
    pub damage_variance: f64,
    /// Mitigation constant for PvP and guild-war duels.
    pub mitigation_pvp: f64,
    /// Mitigation constant for PvE trials.
    pub mitigation_pve: f64,
}

impl CombatConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_TURNS: u32 = 50;
    pub const DEFAULT_ESCALATION_START: u32 = 15;
    pub const DEFAULT_ESCALATION_STEP: f64 = 0.20;
    pub const DEFAULT_ENERGY_REGEN: u32 = 15;
    pub const DEFAULT_MAX_ENERGY: u32 = 100;
    pub const DEFAULT_DODGE_FLOOR: f64 = 0.01;
    pub const DEFAULT_COUNTER_RATIO: f64 = 0.5;
    /// Off: damage rolls carry no variance unless tuned in.
    pub const DEFAULT_DAMAGE_VARIANCE: f64 = 0.0;
    pub const DEFAULT_MITIGATION_PVP: f64 = 1000.0;
    pub const DEFAULT_MITIGATION_PVE: f64 = 500.0;

    pub fn new() -> Self {
        Self {
            max_turns: Self::DEFAULT_MAX_TURNS,
            escalation_start: Self::DEFAULT_ESCALATION_START,
            escalation_step: Self::DEFAULT_ESCALATION_STEP,
            energy_regen: Self::DEFAULT_ENERGY_REGEN,
            max_energy: Self::DEFAULT_MAX_ENERGY,
            dodge_floor: Self::DEFAULT_DODGE_FLOOR,
            counter_ratio: Self::DEFAULT_COUNTER_RATIO,
            damage_variance: Self::DEFAULT_DAMAGE_VARIANCE,
            mitigation_pvp: Self::DEFAULT_MITIGATION_PVP,
            mitigation_pve: Self::DEFAULT_MITIGATION_PVE,
        }
    }

    /// Damage multiplier in effect for the given turn.
    ///
    /// ```text
    /// turn <= start : 1.0
    /// turn >  start : 1.0 + step × (turn − start)
    /// ```
    pub fn escalation(&self, turn: u32) -> f64 {
        if turn > self.escalation_start {
            1.0 + self.escalation_step * f64::from(turn - self.escalation_start)
        } else {
            1.0
        }
    }

    /// Resolution rules for a combat mode under this configuration.
    pub fn rules(&self, mode: CombatMode) -> CombatRules {
        CombatRules::for_mode(mode, self)
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Call site of a resolution; selects mitigation and tie-break policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CombatMode {
    /// Player (side A) against a trial monster (side B).
    Pve,
    /// Challenger (side A) against a defender (side B).
    Pvp,
    /// Positional duel between two guild lineups.
    GuildWar,
}

/// Outcome policy when both combatants survive the turn cap with equal hp share.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TieBreak {
    /// Symmetric draw.
    Draw,
    /// Award the fight to the given side.
    Favor(Side),
}

/// Parameters one resolution runs under.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatRules {
    pub mode: CombatMode,
    /// Mitigation constant `K` in `def / (def + K)`.
    pub mitigation_k: f64,
    /// Side that acts first when speeds are equal.
    pub speed_tie: Side,
    pub cap_tie_break: TieBreak,
}

impl CombatRules {
    /// Standard rules for a mode.
    ///
    /// | mode      | K    | speed tie | equal hp share at cap |
    /// |-----------|------|-----------|-----------------------|
    /// | PvE       | 500  | player    | monster               |
    /// | PvP       | 1000 | attacker  | defender              |
    /// | Guild war | 1000 | side A    | draw                  |
    pub fn for_mode(mode: CombatMode, config: &CombatConfig) -> Self {
        match mode {
            CombatMode::Pve => Self {
                mode,
                mitigation_k: config.mitigation_pve,
                speed_tie: Side::A,
                cap_tie_break: TieBreak::Favor(Side::B),
            },
            CombatMode::Pvp => Self {
                mode,
                mitigation_k: config.mitigation_pvp,
                speed_tie: Side::A,
                cap_tie_break: TieBreak::Favor(Side::B),
            },
            CombatMode::GuildWar => Self {
                mode,
                mitigation_k: config.mitigation_pvp,
                speed_tie: Side::A,
                cap_tie_break: TieBreak::Draw,
            },
        }
    }

    /// Overrides the side acting first on equal speed (builder pattern).
    #[must_use]
    pub fn with_speed_tie(mut self, side: Side) -> Self {
        self.speed_tie = side;
        self
    }

    /// Overrides the cap tie-break policy (builder pattern).
    #[must_use]
    pub fn with_cap_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.cap_tie_break = tie_break;
        self
    }
}
