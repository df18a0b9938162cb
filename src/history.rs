// src/history.rs
//! Bounded linear undo/redo over immutable profile snapshots

use std::sync::Arc;

use crate::types::CareerProfile;

/// Maximum number of snapshots retained before oldest-eviction.
pub const HISTORY_CAP: usize = 50;

/// Linear history of profile snapshots plus a cursor into them.
///
/// The sequence is never empty and `index` always points inside it, so
/// `current()` is total. Snapshots are shared via `Arc`: committing hands the
/// value over, and nothing can mutate an entry once it is in the sequence.
#[derive(Debug)]
pub struct HistoryManager {
    snapshots: Vec<Arc<CareerProfile>>,
    index: usize,
}

impl HistoryManager {
    pub fn new(initial: CareerProfile) -> Self {
        Self {
            snapshots: vec![Arc::new(initial)],
            index: 0,
        }
    }

    /// Appends a snapshot as the new tip.
    ///
    /// Any redo-able future beyond the cursor is discarded first. When the
    /// sequence would exceed [`HISTORY_CAP`] the oldest snapshot is evicted;
    /// the just-committed snapshot stays current either way. Identical
    /// snapshots are pushed like any other, so every discrete edit remains
    /// individually undoable.
    pub fn commit(&mut self, snapshot: CareerProfile) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(Arc::new(snapshot));
        if self.snapshots.len() > HISTORY_CAP {
            self.snapshots.remove(0);
        }
        self.index = self.snapshots.len() - 1;
    }

    /// Steps the cursor back one snapshot. No-op at the oldest entry.
    pub fn undo(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Steps the cursor forward one snapshot. No-op at the tip.
    pub fn redo(&mut self) -> bool {
        if self.index + 1 >= self.snapshots.len() {
            return false;
        }
        self.index += 1;
        true
    }

    /// The authoritative live document.
    pub fn current(&self) -> &Arc<CareerProfile> {
        &self.snapshots[self.index]
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_named(name: &str) -> CareerProfile {
        let mut profile = CareerProfile::starter();
        profile.basics.name = name.to_string();
        profile
    }

    #[test]
    fn test_commit_sequence_leaves_last_commit_current() {
        let mut history = HistoryManager::new(profile_named("v0"));
        for i in 1..=10 {
            history.commit(profile_named(&format!("v{}", i)));
        }
        assert_eq!(history.current().basics.name, "v10");
        assert!(!history.can_redo());
        assert_eq!(history.len(), 11);
    }

    #[test]
    fn test_undo_redo_round_trip_restores_current() {
        let mut history = HistoryManager::new(profile_named("v0"));
        for i in 1..=5 {
            history.commit(profile_named(&format!("v{}", i)));
        }
        let before = history.current().clone();
        for _ in 0..3 {
            assert!(history.undo());
        }
        assert_eq!(history.current().basics.name, "v2");
        for _ in 0..3 {
            assert!(history.redo());
        }
        assert_eq!(history.current(), &before);
    }

    #[test]
    fn test_undo_at_oldest_and_redo_at_tip_are_no_ops() {
        let mut history = HistoryManager::new(profile_named("v0"));
        assert!(!history.undo());
        assert!(!history.redo());
        assert_eq!(history.current().basics.name, "v0");

        history.commit(profile_named("v1"));
        assert!(!history.redo());
        assert!(history.undo());
        assert!(!history.undo());
        assert_eq!(history.current().basics.name, "v0");
    }

    #[test]
    fn test_commit_after_undo_discards_redo_future() {
        let mut history = HistoryManager::new(profile_named("v0"));
        history.commit(profile_named("v1"));
        history.commit(profile_named("v2"));
        history.undo();
        history.undo();
        assert!(history.can_redo());

        history.commit(profile_named("fork"));
        assert!(!history.can_redo());
        assert_eq!(history.current().basics.name, "fork");
        assert_eq!(history.len(), 2);
        assert!(!history.redo());
        // The discarded branch is unreachable: walking back only finds v0.
        assert!(history.undo());
        assert_eq!(history.current().basics.name, "v0");
        assert!(!history.can_undo());
    }

    #[test]
    fn test_cap_evicts_oldest_and_keeps_new_commit_current() {
        let mut history = HistoryManager::new(profile_named("v0"));
        for i in 1..HISTORY_CAP {
            history.commit(profile_named(&format!("v{}", i)));
        }
        assert_eq!(history.len(), HISTORY_CAP);

        history.commit(profile_named("v50"));
        assert_eq!(history.len(), HISTORY_CAP);
        assert_eq!(history.current().basics.name, "v50");
        assert!(!history.can_redo());

        // v0 was evicted: undoing all the way lands on v1.
        while history.undo() {}
        assert_eq!(history.current().basics.name, "v1");
    }

    #[test]
    fn test_identical_snapshots_are_not_deduplicated() {
        let mut history = HistoryManager::new(profile_named("same"));
        history.commit(profile_named("same"));
        history.commit(profile_named("same"));
        assert_eq!(history.len(), 3);
        assert!(history.undo());
        assert!(history.undo());
        assert!(!history.undo());
    }

    #[test]
    fn test_undo_does_not_mutate_sequence() {
        let mut history = HistoryManager::new(profile_named("v0"));
        history.commit(profile_named("v1"));
        history.commit(profile_named("v2"));
        let len_before = history.len();
        history.undo();
        history.undo();
        assert_eq!(history.len(), len_before);
        history.redo();
        history.redo();
        assert_eq!(history.current().basics.name, "v2");
    }
}
