//! Undo/redo log of filter state snapshots.

use crate::plane::FilterState;
use std::collections::VecDeque;

/// Two stacks of [`FilterState`] snapshots.
///
/// Both stacks are unbounded unless a depth is given, in which case the
/// oldest undo snapshot is discarded once the depth is exceeded.
#[derive(Clone, Debug, Default)]
pub struct HistoryStack {
    undo: VecDeque<FilterState>,
    redo: Vec<FilterState>,
    depth: Option<usize>,
}

impl HistoryStack {
    pub fn new() -> Self {
        HistoryStack::default()
    }

    /// Creates a history that keeps at most `depth` undo snapshots.
    pub fn with_depth(depth: usize) -> Self {
        HistoryStack {
            depth: Some(depth),
            ..Default::default()
        }
    }

    /// Records the state as it was before a mutation. Any redo branch is
    /// discarded.
    pub fn record(&mut self, previous: FilterState) {
        self.undo.push_back(previous);
        if let Some(depth) = self.depth {
            while self.undo.len() > depth {
                self.undo.pop_front();
            }
        }
        self.redo.clear();
    }

    /// Steps back once. `current` moves onto the redo stack and the restored
    /// state is returned; `None` if there is nothing to undo.
    pub fn undo(&mut self, current: &FilterState) -> Option<FilterState> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current.clone());
        Some(previous)
    }

    /// Mirror image of [`undo`](HistoryStack::undo).
    pub fn redo(&mut self, current: &FilterState) -> Option<FilterState> {
        let next = self.redo.pop()?;
        self.undo.push_back(current.clone());
        if let Some(depth) = self.depth {
            while self.undo.len() > depth {
                self.undo.pop_front();
            }
        }
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
}
