//! Repository contract for the war tables.

use super::error::RepositoryError;
use super::tables::WarTables;

/// Transactional access to [`WarTables`].
///
/// Implementations must give `transaction` serializable semantics: closures
/// run one at a time against a consistent view, and a closure returning `Err`
/// leaves no trace. Lineup submission, round advancement and reward
/// settlement all run inside a single `transaction` call.
pub trait WarStore: Send + Sync {
    /// Runs `f` atomically, committing its writes only if it returns `Ok`.
    fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut WarTables) -> Result<T, E>,
        E: From<RepositoryError>;

    /// Runs a read-only closure against the committed tables.
    fn read<T, F>(&self, f: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&WarTables) -> T;
}
