//! Thin call sites over the single combat resolver.
//!
//! PvE trials, PvP challenges and guild-war duels differ only in how they
//! build combatants, which [`CombatRules`](arena_core::CombatRules) they pass,
//! and what they write back afterwards. None of them owns combat logic.
//!
//! | adapter | side A     | side B   | K    | cap tie       |
//! |---------|------------|----------|------|---------------|
//! | trial   | player     | monster  | 500  | monster       |
//! | PvP     | attacker   | defender | 1000 | defender      |
//! | duel    | first guild| second   | 1000 | draw          |

pub mod duel;
pub mod pve;
pub mod pvp;
pub mod roster;

pub use duel::{duel_seed, fight_slot};
pub use pve::{TrialReport, run_trial};
pub use pvp::{PvpReport, challenge};
pub use roster::{combatant_for, player_stats};
