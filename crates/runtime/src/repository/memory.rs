//! In-memory WarStore implementation for tests and single-node runs.

use std::fs;
use std::path::Path;
use std::sync::RwLock;

use crate::repository::{RepositoryError, Result, WarStore, WarTables};

/// In-memory implementation of [`WarStore`].
///
/// A transaction holds the write lock for its whole duration and works on a
/// copy of the tables, which replaces the committed tables only on success.
/// Fight and PvP history are shared with the copy rather than cloned; see
/// [`History`](crate::repository::History). Reads share the read lock.
#[derive(Debug, Default)]
pub struct InMemoryWarStore {
    tables: RwLock<WarTables>,
}

impl InMemoryWarStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-populated tables (seeded guilds and players).
    pub fn with_tables(tables: WarTables) -> Self {
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Load tables from a JSON snapshot written by [`Self::save_snapshot`].
    pub fn load_snapshot(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let tables: WarTables = serde_json::from_str(&content)?;
        Ok(Self::with_tables(tables))
    }

    /// Write the committed tables as pretty JSON.
    ///
    /// The snapshot goes to a sibling temp file first and is renamed over
    /// `path`, so a crash never leaves a half-written snapshot behind.
    pub fn save_snapshot(&self, path: &Path) -> Result<()> {
        let json = self.read(serde_json::to_string_pretty)??;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl WarStore for InMemoryWarStore {
    fn transaction<T, E, F>(&self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut WarTables) -> std::result::Result<T, E>,
        E: From<RepositoryError>,
    {
        let mut committed = self
            .tables
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let mut working = committed.clone();
        let value = f(&mut working)?;
        *committed = working;
        committed.seal_history();
        Ok(value)
    }

    fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&WarTables) -> T,
    {
        let tables = self
            .tables
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(f(&tables))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{FightResult, Guild, GuildId, MatchId};
    use chrono::DateTime;

    fn fight(match_id: MatchId, round: u8) -> FightResult {
        FightResult {
            match_id,
            round,
            position: 1,
            fighters: [None, None],
            winner: None,
            winner_guild: None,
            remaining_hp: [0, 0],
            max_hp: [0, 0],
            walkover: true,
            log: vec![],
        }
    }

    #[test]
    fn failed_transactions_leave_no_trace() {
        let store = InMemoryWarStore::new();

        let result: std::result::Result<(), RepositoryError> = store.transaction(|tables| {
            tables.insert_war("doomed", DateTime::UNIX_EPOCH, vec![]);
            Err(RepositoryError::UniqueViolation {
                table: "wars",
                key: "war#1".into(),
            })
        });
        assert!(result.is_err());

        let wars = store.read(|t| t.wars().count()).expect("read");
        assert_eq!(wars, 0);
    }

    #[test]
    fn failed_transactions_drop_appended_fights() {
        let store = InMemoryWarStore::new();
        store
            .transaction(|tables| {
                tables.push_fight(fight(MatchId(1), 1));
                Ok::<_, RepositoryError>(())
            })
            .expect("commit");

        let result: std::result::Result<(), RepositoryError> = store.transaction(|tables| {
            tables.push_fight(fight(MatchId(1), 2));
            assert_eq!(tables.fights_of(MatchId(1)).len(), 2);
            Err(RepositoryError::LockPoisoned)
        });
        assert!(result.is_err());

        let rounds = store
            .read(|t| t.fights_of(MatchId(1)).iter().map(|f| f.round).collect::<Vec<_>>())
            .expect("read");
        assert_eq!(rounds, [1]);
    }

    #[test]
    fn committed_transactions_are_visible() {
        let store = InMemoryWarStore::new();
        let id = store
            .transaction(|tables| {
                Ok::<_, RepositoryError>(tables.insert_war("w", DateTime::UNIX_EPOCH, vec![]))
            })
            .expect("commit");

        let name = store
            .read(|t| t.war(id).map(|w| w.name.clone()))
            .expect("read");
        assert_eq!(name.as_deref(), Some("w"));
    }

    #[test]
    fn snapshot_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("arena.json");

        let mut tables = WarTables::new();
        tables.upsert_guild(Guild::new(GuildId(1), "Azure Cloud", 3));
        let store = InMemoryWarStore::with_tables(tables.clone());
        store.save_snapshot(&path).expect("save");

        let restored = InMemoryWarStore::load_snapshot(&path).expect("load");
        let level = restored
            .read(|t| t.guild(GuildId(1)).map(|g| g.level))
            .expect("read");
        assert_eq!(level, Some(3));
        assert!(!path.with_extension("json.tmp").exists());
    }
}
