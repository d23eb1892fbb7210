//! Combat resolution system.
//!
//! One parameterized, deterministic resolver serves every call site; PvE,
//! PvP and guild-war duels differ only in the [`crate::CombatRules`] they pass.
//!
//! # Architecture
//!
//! - **Pure Functions**: no I/O, no clocks, randomness only through the seeded [`crate::CombatRng`]
//! - **Validated Inputs**: [`Combatant::new`] rejects malformed stats, so [`resolve`] cannot fail
//! - **Replayable Output**: every state change appends a [`CombatLogEntry`] with both snapshots
//!
//! # Action Order
//!
//! ```text
//! upkeep (+energy, shield tick)
//!   → ability (highest affordable cost) | basic attack
//!   → dodge → raw × crit × escalation → mitigation (≥ 1)
//!   → shield absorb → hp damage → lifesteal → counter
//! ```

pub mod ability;
pub mod damage;
pub mod hit;
pub mod log;
pub mod resolver;
pub mod result;
pub mod state;

pub use ability::{Ability, AbilityEffect, select_ability};
pub use damage::{apply_damage, calculate_damage, mitigation};
pub use hit::{effective_counter, effective_crit, effective_dodge, effective_lifesteal};
pub use log::{CombatLogEntry, CombatantSnapshot, LogKind};
pub use resolver::{Combatant, resolve};
pub use result::{CombatOutcome, Side, Winner, compare_hp_share};
pub use state::CombatantState;
