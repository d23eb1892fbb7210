//! Replayable combat log.
//!
//! Each entry carries a snapshot of both combatants taken right after the
//! entry's sub-step, so a client can animate health and energy bars without
//! re-simulating.

use super::state::CombatantState;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum LogKind {
    /// Damage dealt by an attack or a counter.
    Action,
    /// Narration and secondary effects (dodge, shield absorb, lifesteal).
    Info,
    /// Ability activation.
    Skill,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSnapshot {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub energy: u32,
    pub max_energy: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatLogEntry {
    pub turn: u32,
    pub text: String,
    pub kind: LogKind,
    /// Hp damage or healing involved in this entry.
    pub damage: u32,
    /// Shield raised or absorbed in this entry.
    pub shield: u32,
    /// Side A then side B.
    pub state: [CombatantSnapshot; 2],
}

/// Append-only log under construction.
#[derive(Debug, Default)]
pub(crate) struct LogWriter {
    entries: Vec<CombatLogEntry>,
}

impl LogWriter {
    pub(crate) fn push(
        &mut self,
        turn: u32,
        kind: LogKind,
        text: String,
        damage: u32,
        shield: u32,
        states: &[CombatantState; 2],
    ) {
        self.entries.push(CombatLogEntry {
            turn,
            text,
            kind,
            damage,
            shield,
            state: [states[0].snapshot(), states[1].snapshot()],
        });
    }

    pub(crate) fn finish(self) -> Vec<CombatLogEntry> {
        self.entries
    }
}
