//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::{CombatEvent, MatchEvent, WarEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// War scheduling and status transitions
    War,
    /// Pairing, lineups, rounds and settlements
    Match,
    /// PvE trials and PvP challenges
    Combat,
    /// Game data reloads
    Catalog,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::War, Topic::Match, Topic::Combat, Topic::Catalog];

    const fn index(self) -> usize {
        match self {
            Topic::War => 0,
            Topic::Match => 1,
            Topic::Combat => 2,
            Topic::Catalog => 3,
        }
    }
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    War(WarEvent),
    Match(MatchEvent),
    Combat(CombatEvent),
    CatalogReloaded,
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::War(_) => Topic::War,
            Event::Match(_) => Topic::Match,
            Event::Combat(_) => Topic::Combat,
            Event::CatalogReloaded => Topic::Catalog,
        }
    }
}

impl From<WarEvent> for Event {
    fn from(event: WarEvent) -> Self {
        Event::War(event)
    }
}

impl From<MatchEvent> for Event {
    fn from(event: MatchEvent) -> Self {
        Event::Match(event)
    }
}

impl From<CombatEvent> for Event {
    fn from(event: CombatEvent) -> Self {
        Event::Combat(event)
    }
}

/// Topic-based event bus
///
/// Events are published only after the transaction that produced them has
/// committed. Delivery is best-effort: with no subscriber, or a lagging one,
/// events are dropped rather than blocking the publisher.
pub struct EventBus {
    channels: Arc<[broadcast::Sender<Event>; 4]>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Topic::ALL.map(|_| broadcast::channel(capacity).0)),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();
        if self.channels[topic.index()].send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels[topic.index()].subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> Vec<(Topic, broadcast::Receiver<Event>)> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
