//! Commit-keyed lookup table with consumption tracking

use std::collections::{HashMap, HashSet};

use crate::domain::CommitRef;

/// Values keyed by commit, remembering which keys have been claimed.
///
/// Claiming never removes an entry: the table keeps the full set of parsed keys
/// and the set of claimed keys, and [`CommitTable::unclaimed`] is their
/// difference in first-seen order. A key can be claimed once; later claims miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitTable<V> {
    entries: HashMap<CommitRef, V>,
    order: Vec<CommitRef>,
    claimed: HashSet<CommitRef>,
}

impl<V> Default for CommitTable<V> {
    fn default() -> Self {
        Self { entries: HashMap::new(), order: Vec::new(), claimed: HashSet::new() }
    }
}

impl<V> CommitTable<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. An overwritten key keeps its original position.
    pub fn insert(&mut self, commit: CommitRef, value: V) {
        if !self.entries.contains_key(&commit) {
            self.order.push(commit.clone());
        }
        self.entries.insert(commit, value);
    }

    pub fn get(&self, commit: &CommitRef) -> Option<&V> {
        self.entries.get(commit)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the value for `commit` unless it is absent or already claimed.
    pub fn claim(&mut self, commit: &CommitRef) -> Option<&V> {
        let value = self.entries.get(commit)?;
        if !self.claimed.insert(commit.clone()) {
            return None;
        }
        Some(value)
    }

    pub fn unclaimed(&self) -> impl Iterator<Item = &CommitRef> + '_ {
        self.order.iter().filter(move |commit| !self.claimed.contains(*commit))
    }
}
