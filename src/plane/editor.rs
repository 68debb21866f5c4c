//! The only mutator of a [`FilterState`].
//!
//! Every edit snapshots the state it replaces into the
//! [`HistoryStack`], drops the redo branch, applies the change and then
//! publishes the new state to subscribers so they can recompute
//! coefficients.
//!
//! Positions handed to [`PoleZeroEditor::add_point`] and
//! [`PoleZeroEditor::remove_nearest`] are assumed to have passed
//! [`is_placeable`](crate::plane::is_placeable) already. The editor does not
//! re-check them.

use crate::plane::history::HistoryStack;
use crate::plane::{ComplexPoint, FilterState, RootKind};
use crossbeam::channel::{self, Receiver, Sender};
use log::debug;

pub struct PoleZeroEditor {
    state: FilterState,
    history: HistoryStack,
    observers: Vec<Sender<FilterState>>,
}

impl Default for PoleZeroEditor {
    fn default() -> Self {
        PoleZeroEditor::new()
    }
}

impl PoleZeroEditor {
    /// Creates an editor with an empty plane and unbounded history.
    pub fn new() -> Self {
        PoleZeroEditor::with_history(HistoryStack::new())
    }

    pub fn with_history(history: HistoryStack) -> Self {
        PoleZeroEditor {
            state: FilterState::default(),
            history,
            observers: vec![],
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    /// Returns a receiver that gets the current state right away and then a
    /// copy of the state after every change, including undo and redo.
    pub fn subscribe(&mut self) -> Receiver<FilterState> {
        let (send, recv) = channel::unbounded();
        if send.send(self.state.clone()).is_ok() {
            self.observers.push(send);
        }
        recv
    }

    /// Appends `position` to the chosen root list, and its conjugate too when
    /// `add_conjugate` is set and the point is off the real axis.
    pub fn add_point(
        &mut self,
        kind: RootKind,
        position: ComplexPoint,
        add_conjugate: bool,
    ) {
        let mut next = self.state.clone();
        let roots = next.roots_mut(kind);
        roots.push(position);
        if add_conjugate && position.im != 0.0 {
            roots.push(position.conj());
        }
        debug!("add {} at {}", kind, position);
        self.commit(next);
    }

    /// Removes the single zero or pole closest to `target`. Returns false,
    /// leaving history untouched, when the plane is empty.
    pub fn remove_nearest(&mut self, target: ComplexPoint) -> bool {
        let (kind, idx) = match self.state.nearest(target) {
            Some(found) => found,
            None => return false,
        };
        let mut next = self.state.clone();
        let removed = next.roots_mut(kind).remove(idx);
        debug!("remove {} at {}", kind, removed);
        self.commit(next);
        true
    }

    pub fn clear_zeros(&mut self) {
        let mut next = self.state.clone();
        next.zeros.clear();
        debug!("clear zeros");
        self.commit(next);
    }

    pub fn clear_poles(&mut self) {
        let mut next = self.state.clone();
        next.poles.clear();
        debug!("clear poles");
        self.commit(next);
    }

    pub fn clear_all(&mut self) {
        debug!("clear all");
        self.commit(FilterState::default());
    }

    /// Exchanges zeros and poles.
    pub fn swap(&mut self) {
        let next = FilterState::new(self.state.poles.clone(), self.state.zeros.clone());
        debug!("swap zeros and poles");
        self.commit(next);
    }

    /// Replaces the whole state, e.g. after loading a file. Undoable like any
    /// other edit.
    pub fn replace(&mut self, state: FilterState) {
        debug!(
            "replace state with {} zeros, {} poles",
            state.zeros.len(),
            state.poles.len()
        );
        self.commit(state);
    }

    /// Returns false when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.state) {
            Some(previous) => {
                debug!("undo");
                self.state = previous;
                self.notify();
                true
            }
            None => false,
        }
    }

    /// Returns false when there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(&self.state) {
            Some(next) => {
                debug!("redo");
                self.state = next;
                self.notify();
                true
            }
            None => false,
        }
    }

    fn commit(&mut self, next: FilterState) {
        let previous = std::mem::replace(&mut self.state, next);
        self.history.record(previous);
        self.notify();
    }

    fn notify(&mut self) {
        let state = &self.state;
        self.observers.retain(|s| s.send(state.clone()).is_ok());
    }
}
