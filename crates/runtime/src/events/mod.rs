//! Topic-based event bus for arena events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need (a guild UI to [`Topic::Match`], an audit log to all).

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CombatEvent, MatchEvent, WarEvent};
