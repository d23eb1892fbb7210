//! Stat system: from persisted character state to a combat snapshot.
//!
//! # Architecture
//!
//! ```text
//! [ Realm base + body tempering ]
//!      ↓
//! [ Bonus sources: root, equipment, passives, guild tier, global modifiers ]
//!      ↓
//! [ BonusStack: (base + Σ flat) × Π multipliers ]
//!      ↓
//! [ CombatStats snapshot ]
//! ```
//!
//! ## Principles
//!
//! 1. **Pure**: aggregation reads an explicit [`crate::GameData`] snapshot, nothing else
//! 2. **Total**: malformed references contribute zero instead of failing
//! 3. **Snapshot Consistency**: the result is locked before combat starts

pub mod aggregate;
pub mod bonus;
pub mod combat;

pub use aggregate::{CharacterProfile, GlobalModifier, aggregate};
pub use bonus::{Bonus, BonusStack};
pub use combat::{CombatStats, StatsError};
