//! Append-only history rows shared between committed and working tables.
//!
//! Fight results and PvP records carry full combat logs and are never
//! edited once written. [`History`] keeps the committed rows behind an `Arc`
//! so a transaction's working copy shares them instead of cloning them;
//! rows appended inside the transaction stay pending until
//! [`History::seal`] folds them in after commit.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub struct History<T> {
    sealed: Arc<Vec<T>>,
    pending: Vec<T>,
}

impl<T> History<T> {
    pub fn push(&mut self, row: T) {
        self.pending.push(row);
    }

    /// Rows in insertion order, committed first.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.sealed.iter().chain(&self.pending)
    }

    pub fn len(&self) -> usize {
        self.sealed.len() + self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> History<T> {
    /// Moves pending rows into the shared part.
    ///
    /// Copies the shared rows only if another table set still references
    /// them; a store seals after dropping the previous committed tables.
    pub fn seal(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        Arc::make_mut(&mut self.sealed).append(&mut self.pending);
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self {
            sealed: Arc::default(),
            pending: Vec::new(),
        }
    }
}

impl<T: Clone> Clone for History<T> {
    fn clone(&self) -> Self {
        Self {
            sealed: Arc::clone(&self.sealed),
            pending: self.pending.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for History<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: fmt::Debug> fmt::Debug for History<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Serialize> Serialize for History<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for History<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<T>::deserialize(deserializer)?;
        Ok(Self {
            sealed: Arc::new(rows),
            pending: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn working_copies_share_committed_rows() {
        let mut committed = History::default();
        committed.push("first".to_owned());
        committed.seal();

        let mut working = committed.clone();
        assert!(Arc::ptr_eq(&committed.sealed, &working.sealed));

        working.push("second".to_owned());
        assert_eq!(committed.len(), 1);
        assert_eq!(working.len(), 2);
        assert_eq!(
            working.iter().map(String::as_str).collect::<Vec<_>>(),
            ["first", "second"]
        );
    }

    #[test]
    fn sealing_a_sole_owner_appends_in_place() {
        let mut committed = History::default();
        committed.push(1u32);
        committed.seal();

        let mut working = committed.clone();
        working.push(2);
        drop(committed);

        let shared = Arc::as_ptr(&working.sealed);
        working.seal();
        assert_eq!(Arc::as_ptr(&working.sealed), shared);
        assert!(working.pending.is_empty());
        assert_eq!(working.iter().copied().collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn sealing_while_shared_leaves_the_other_copy_alone() {
        let mut committed = History::default();
        committed.push(1u32);
        committed.seal();

        let mut working = committed.clone();
        working.push(2);
        working.seal();

        assert_eq!(committed.iter().copied().collect::<Vec<_>>(), [1]);
        assert_eq!(working.iter().copied().collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn serializes_as_a_flat_list() {
        let mut history = History::default();
        history.push(1u32);
        history.seal();
        history.push(2);

        let json = serde_json::to_string(&history).expect("serialize");
        assert_eq!(json, "[1,2]");
        let back: History<u32> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, history);
    }
}
