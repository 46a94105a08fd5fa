//! The editing session: selection, snap settings, the active gesture,
//! and the undo/redo history.
//!
//! Transient, per-open-editor state — never persisted. Undo is
//! snapshot-per-gesture: the document state captured at pointer-down is
//! pushed when the gesture commits, so intermediate pointer-moves are
//! never individually undoable and history stays bounded.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::BTreeSet;

use tracing::debug;

use crate::consts::{DEFAULT_GRID_SIZE, HISTORY_DEPTH};
use crate::doc::OverrideDoc;
use crate::gesture::{Gesture, Modifiers};

/// Selection, gesture, and history state for one open editor.
#[derive(Debug, Default)]
pub struct EditingSession {
    selected: BTreeSet<String>,
    gesture: Gesture,
    pub snap_enabled: bool,
    pub grid_size: f64,
    undo_stack: Vec<OverrideDoc>,
    redo_stack: Vec<OverrideDoc>,
    /// Document state captured when the active gesture started.
    pending: Option<OverrideDoc>,
}

impl EditingSession {
    #[must_use]
    pub fn new() -> Self {
        Self { snap_enabled: true, grid_size: DEFAULT_GRID_SIZE, ..Self::default() }
    }

    // --- Selection ---

    /// The currently selected keys (spec keys and custom ids share one
    /// namespace).
    #[must_use]
    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    /// Replace the selection with a single key.
    pub fn select_only(&mut self, key: &str) {
        self.selected.clear();
        self.selected.insert(key.to_string());
    }

    /// Toggle membership of `key` in the selection (shift-click).
    pub fn toggle(&mut self, key: &str) {
        if !self.selected.remove(key) {
            self.selected.insert(key.to_string());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    #[must_use]
    pub fn is_selected(&self, key: &str) -> bool {
        self.selected.contains(key)
    }

    /// The selected key, if exactly one element is selected.
    #[must_use]
    pub fn sole_selection(&self) -> Option<&str> {
        if self.selected.len() == 1 {
            self.selected.iter().next().map(String::as_str)
        } else {
            None
        }
    }

    /// Drop selected keys that no longer resolve to an element. Returns
    /// `true` if anything was removed.
    pub fn prune_selection<F: Fn(&str) -> bool>(&mut self, exists: F) -> bool {
        let before = self.selected.len();
        self.selected.retain(|key| exists(key));
        self.selected.len() != before
    }

    // --- Snapping ---

    /// Grid size to apply for this event, or `None` when snapping is off
    /// or temporarily bypassed with alt.
    #[must_use]
    pub fn effective_grid(&self, mods: Modifiers) -> Option<f64> {
        if self.snap_enabled && !mods.alt { Some(self.grid_size) } else { None }
    }

    // --- Gesture bracketing ---

    #[must_use]
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Start a gesture, capturing the pre-gesture document snapshot.
    /// Refused (returns `false`) while another gesture is active.
    pub fn begin_gesture(&mut self, gesture: Gesture, snapshot: OverrideDoc) -> bool {
        if !self.gesture.is_idle() {
            return false;
        }
        debug!(?gesture, "gesture started");
        self.gesture = gesture;
        self.pending = Some(snapshot);
        true
    }

    /// Complete the active gesture. Pushes the pre-gesture snapshot onto
    /// the undo stack and clears the redo stack iff the document actually
    /// changed. Returns `true` if an undo step was recorded.
    pub fn commit_gesture(&mut self, current: &OverrideDoc) -> bool {
        self.gesture = Gesture::Idle;
        match self.pending.take() {
            Some(before) => self.record_edit(before, current),
            None => false,
        }
    }

    /// Abort the active gesture without recording history. Returns the
    /// pre-gesture snapshot for the caller to restore.
    pub fn cancel_gesture(&mut self) -> Option<OverrideDoc> {
        self.gesture = Gesture::Idle;
        self.pending.take()
    }

    /// Record one discrete edit (nudge, add, delete, reorder) as its own
    /// undo step, iff `before` and `after` differ.
    pub fn record_edit(&mut self, before: OverrideDoc, after: &OverrideDoc) -> bool {
        if before == *after {
            return false;
        }
        self.undo_stack.push(before);
        if self.undo_stack.len() > HISTORY_DEPTH {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
        debug!(depth = self.undo_stack.len(), "undo step recorded");
        true
    }

    // --- Undo / redo ---

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Pop the previous document state, saving `current` for redo.
    /// `None` when there is nothing to undo.
    pub fn undo(&mut self, current: &OverrideDoc) -> Option<OverrideDoc> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current.clone());
        Some(previous)
    }

    /// Mirror of [`Self::undo`].
    pub fn redo(&mut self, current: &OverrideDoc) -> Option<OverrideDoc> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current.clone());
        Some(next)
    }

    /// Drop all history (external reload or discard).
    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.pending = None;
    }
}
