//! Per-transaction inputs and the event outbox.

use arena_core::GameData;
use chrono::{DateTime, TimeDelta, Utc};

use crate::config::RuntimeConfig;
use crate::events::{Event, EventBus};

/// Everything an operation reads besides the tables.
///
/// One context is built per transaction: one game data snapshot and one
/// `now`, so a tick never sees the clock move halfway through.
#[derive(Debug, Clone, Copy)]
pub struct ArenaContext<'a> {
    pub data: &'a GameData,
    pub config: &'a RuntimeConfig,
    pub now: DateTime<Utc>,
}

/// Events raised inside a transaction, published only after it commits.
#[derive(Debug, Default)]
pub struct Outbox {
    events: Vec<Event>,
}

impl Outbox {
    pub fn push(&mut self, event: impl Into<Event>) {
        self.events.push(event.into());
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn publish(self, bus: &EventBus) {
        for event in self.events {
            bus.publish(event);
        }
    }
}

/// Whole seconds as a [`TimeDelta`], saturating instead of overflowing.
pub(crate) fn seconds(secs: u64) -> TimeDelta {
    i64::try_from(secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX)
}

/// End of a cooldown started at `last`, saturating at the end of time.
pub(crate) fn ready_at(last: DateTime<Utc>, cooldown: TimeDelta) -> DateTime<Utc> {
    last.checked_add_signed(cooldown).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Seconds left until `ready_at`, or `None` if it has passed.
pub(crate) fn remaining(now: DateTime<Utc>, ready_at: DateTime<Utc>) -> Option<i64> {
    let left = ready_at - now;
    (left > TimeDelta::zero()).then(|| left.num_seconds().max(1))
}
