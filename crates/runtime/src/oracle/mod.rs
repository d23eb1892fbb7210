//! Access to the static game data snapshot.
//!
//! Realms, equipment, passives, skills and trial zones are immutable during
//! play. Every operation grabs one `Arc<GameData>` at its start and uses it to
//! the end, so an admin reload swapping the snapshot never mixes two catalogs
//! within a single fight or tick.
use std::sync::{Arc, RwLock};

use arena_core::GameData;

/// Shared handle to the current [`GameData`] snapshot.
#[derive(Clone, Debug)]
pub struct GameDataOracle {
    current: Arc<RwLock<Arc<GameData>>>,
}

impl GameDataOracle {
    pub fn new(data: GameData) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(data))),
        }
    }

    /// The snapshot in effect right now.
    pub fn snapshot(&self) -> Arc<GameData> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Atomically replaces the snapshot; in-flight readers keep the old one.
    pub fn replace(&self, data: GameData) -> Arc<GameData> {
        let next = Arc::new(data);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::replace(&mut *guard, Arc::clone(&next))
    }
}

impl Default for GameDataOracle {
    fn default() -> Self {
        Self::new(GameData::default())
    }
}
