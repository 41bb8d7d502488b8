//! Undo/Redo History
//!
//! A snapshot history generic over any state type. Snapshots are held as
//! `Arc<S>` so that "nothing changed" can be detected by pointer identity:
//! an updater that hands back the current `Arc` is a no-op, while any newly
//! built value is recorded even if it is structurally equal to the present.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::debug;

/// Snapshot history with a linear undo/redo timeline.
///
/// - `past` is ordered oldest to newest, ending just before `present`.
/// - `future` is ordered nearest to farthest redo candidate.
#[derive(Debug, Clone)]
pub struct History<S> {
    past: Vec<Arc<S>>,
    present: Arc<S>,
    future: VecDeque<Arc<S>>,
    /// Maximum number of past snapshots kept (None = unbounded).
    limit: Option<usize>,
    /// Number of snapshots dropped from the start of `past` by the limit.
    discarded: usize,
}

impl<S> History<S> {
    /// Create an unbounded history starting at `initial`.
    pub fn new(initial: S) -> Self {
        Self {
            past: Vec::new(),
            present: Arc::new(initial),
            future: VecDeque::new(),
            limit: None,
            discarded: 0,
        }
    }

    /// Create a history that keeps at most `limit` undo steps.
    pub fn with_limit(initial: S, limit: usize) -> Self {
        let mut history = Self::new(initial);
        history.limit = Some(limit);
        history
    }

    /// The authoritative current snapshot.
    pub fn present(&self) -> &Arc<S> {
        &self.present
    }

    /// Borrow the current state.
    pub fn state(&self) -> &S {
        &self.present
    }

    /// Replace the present with `next`.
    ///
    /// Returns `false` (and leaves all three fields untouched) when `next`
    /// is the very same allocation as the present. Otherwise the old present
    /// is pushed onto `past` and the redo branch is discarded.
    pub fn set(&mut self, next: Arc<S>) -> bool {
        if Arc::ptr_eq(&next, &self.present) {
            return false;
        }

        let previous = std::mem::replace(&mut self.present, next);
        self.past.push(previous);
        self.future.clear();
        self.trim();

        debug!(
            past = self.past.len(),
            "history: recorded snapshot, redo branch cleared"
        );
        true
    }

    /// Record a freshly built value. Always accepted.
    pub fn set_value(&mut self, value: S) -> bool {
        self.set(Arc::new(value))
    }

    /// Compute the next snapshot from the present.
    ///
    /// The updater returns `Arc::clone(current)` to signal that nothing
    /// changed, in which case no history entry is created.
    pub fn update<F>(&mut self, updater: F) -> bool
    where
        F: FnOnce(&Arc<S>) -> Arc<S>,
    {
        let next = updater(&self.present);
        self.set(next)
    }

    /// Step back one snapshot. Returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };

        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);

        debug!(
            past = self.past.len(),
            future = self.future.len(),
            "history: undo"
        );
        true
    }

    /// Step forward one snapshot. Returns `false` if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };

        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);

        debug!(
            past = self.past.len(),
            future = self.future.len(),
            "history: redo"
        );
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of snapshots that can be undone.
    pub fn undo_count(&self) -> usize {
        self.past.len()
    }

    /// Number of snapshots that can be redone.
    pub fn redo_count(&self) -> usize {
        self.future.len()
    }

    /// Past snapshots, oldest first.
    pub fn past(&self) -> &[Arc<S>] {
        &self.past
    }

    /// Redo candidates, nearest first.
    pub fn future(&self) -> impl Iterator<Item = &Arc<S>> {
        self.future.iter()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Change the undo depth, trimming the oldest snapshots if needed.
    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
        self.trim();
    }

    /// How many old snapshots have been dropped because of the limit.
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    fn trim(&mut self) {
        let Some(limit) = self.limit else {
            return;
        };
        if self.past.len() > limit {
            let excess = self.past.len() - limit;
            self.past.drain(..excess);
            self.discarded += excess;
        }
    }
}

impl<S: Default> Default for History<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn history_with(values: &[i32]) -> History<i32> {
        let mut history = History::new(0);
        for v in values {
            history.set_value(*v);
        }
        history
    }

    #[test]
    fn test_new_history() {
        let history = History::new(7);
        assert_eq!(*history.state(), 7);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_set_records_previous_present() {
        let history = history_with(&[1, 2, 3]);
        assert_eq!(*history.state(), 3);
        let past: Vec<i32> = history.past().iter().map(|s| **s).collect();
        assert_eq!(past, vec![0, 1, 2]);
    }

    #[test]
    fn test_identical_snapshot_is_noop() {
        let mut history = history_with(&[1]);
        let present = Arc::clone(history.present());

        assert!(!history.set(present));
        assert!(!history.update(|s| Arc::clone(s)));
        assert_eq!(history.undo_count(), 1);
        assert_eq!(history.redo_count(), 0);
    }

    #[test]
    fn test_noop_keeps_redo_branch() {
        let mut history = history_with(&[1, 2]);
        history.undo();
        assert!(!history.update(|s| Arc::clone(s)));
        assert!(history.can_redo());
    }

    #[test]
    fn test_equal_but_new_value_is_recorded() {
        let mut history = history_with(&[5]);
        assert!(history.set_value(5));
        assert_eq!(history.undo_count(), 2);
    }

    #[test]
    fn test_undo_redo_invert() {
        let mut history = history_with(&[1, 2]);

        assert!(history.undo());
        assert_eq!(*history.state(), 1);
        assert!(history.redo());
        assert_eq!(*history.state(), 2);
    }

    #[test]
    fn test_n_undos_then_n_redos_restore_present() {
        let mut history = history_with(&[1, 2, 3, 4, 5]);
        for n in 0..=history.undo_count() {
            for _ in 0..n {
                history.undo();
            }
            for _ in 0..n {
                history.redo();
            }
            assert_eq!(*history.state(), 5, "n = {}", n);
        }
    }

    #[test]
    fn test_future_is_nearest_first() {
        let mut history = history_with(&[1, 2, 3]);
        history.undo();
        history.undo();
        let future: Vec<i32> = history.future().map(|s| **s).collect();
        assert_eq!(future, vec![2, 3]);
    }

    #[test]
    fn test_set_clears_future() {
        let mut history = history_with(&[1, 2, 3]);
        history.undo();
        history.undo();
        assert_eq!(history.redo_count(), 2);

        history.set_value(9);
        assert_eq!(history.redo_count(), 0);
        assert!(!history.redo());
        assert_eq!(*history.state(), 9);
    }

    #[test]
    fn test_undo_redo_on_empty_are_noops() {
        let mut history = History::new("a");
        assert!(!history.undo());
        assert!(!history.redo());
        assert_eq!(*history.state(), "a");
    }

    #[test]
    fn test_limit_trims_oldest() {
        let mut history = History::with_limit(0, 3);
        for v in 1..=5 {
            history.set_value(v);
        }
        assert_eq!(history.undo_count(), 3);
        assert_eq!(history.discarded(), 2);
        let past: Vec<i32> = history.past().iter().map(|s| **s).collect();
        assert_eq!(past, vec![2, 3, 4]);
    }

    #[test]
    fn test_set_limit_trims_existing() {
        let mut history = history_with(&[1, 2, 3, 4]);
        history.set_limit(Some(1));
        assert_eq!(history.undo_count(), 1);
        history.undo();
        assert_eq!(*history.state(), 3);
    }
}
