//! The editor engine: orchestrates selection, gestures, override writes,
//! layer ordering, undo/redo, and the save/discard protocol for one open
//! editor instance.
//!
//! The engine owns the live [`OverrideDoc`] plus a baseline copy of the
//! last externally-loaded state. Every pointer event mutates the live doc
//! through the gesture handlers and reports an [`Action`] for the host to
//! react to (re-render, re-read the layer list, persist on save). The
//! resolver is the hot-path read: hosts call [`EditorEngine::resolve`]
//! after every change.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, warn};

use crate::consts::{NUDGE_STEP, NUDGE_STEP_COARSE, Z_STEP};
use crate::doc::{CustomElement, CustomKind, OverrideDoc, PositionOverride};
use crate::gesture::{
    Gesture, Modifiers, NudgeDirection, PointerTarget, drag_position, resize_bounds, rotate_angle,
};
use crate::geometry::{Bounds, Point, clamp_to_canvas};
use crate::layers;
use crate::layout::{LayoutError, LayoutRegistry, LayoutSpec};
use crate::resolve::{LayerEntry, ResolvedElement, layer_list, resolve_spec};
use crate::session::EditingSession;

/// What an engine operation did, for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Nothing changed; the event was ignored.
    None,
    /// Selection membership changed.
    SelectionChanged,
    /// Geometry or stacking of one element changed.
    ElementChanged { key: String },
    /// A custom element was created (and selected).
    ElementAdded { id: String },
    /// A custom element was deleted.
    ElementDeleted { id: String },
    /// The whole override state was replaced (undo, redo, reorder,
    /// discard, cancel); re-read everything.
    StateReplaced,
}

/// Interactive editing engine for one (target, layout type) pair.
#[derive(Debug)]
pub struct EditorEngine {
    spec: LayoutSpec,
    doc: OverrideDoc,
    /// Last externally-loaded state; `discard_changes` resets to this.
    baseline: OverrideDoc,
    session: EditingSession,
}

impl EditorEngine {
    /// Open an editor over the saved override state for `layout_type`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NotFound`] if the layout type is unknown.
    pub fn open(
        registry: &LayoutRegistry,
        layout_type: &str,
        saved: OverrideDoc,
    ) -> Result<Self, LayoutError> {
        let spec = registry.get(layout_type)?.clone();
        Ok(Self {
            spec,
            doc: saved.clone(),
            baseline: saved,
            session: EditingSession::new(),
        })
    }

    // --- Reads ---

    /// Fully-resolved element list in render order (bottom first).
    #[must_use]
    pub fn resolve(&self) -> Vec<ResolvedElement> {
        resolve_spec(&self.spec, &self.doc)
    }

    /// Layers-panel list, topmost element first.
    #[must_use]
    pub fn layer_list(&self) -> Vec<LayerEntry> {
        layer_list(&self.resolve())
    }

    /// The live override state.
    #[must_use]
    pub fn doc(&self) -> &OverrideDoc {
        &self.doc
    }

    /// The transient session (selection, snap settings, history flags).
    #[must_use]
    pub fn session(&self) -> &EditingSession {
        &self.session
    }

    /// The canonical spec this editor was opened over.
    #[must_use]
    pub fn spec(&self) -> &LayoutSpec {
        &self.spec
    }

    /// Whether unsaved changes exist relative to the last load/save.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.doc != self.baseline
    }

    // --- Session settings ---

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.session.snap_enabled = enabled;
    }

    pub fn set_grid_size(&mut self, grid_size: f64) {
        self.session.grid_size = grid_size;
    }

    // --- Pointer protocol ---

    /// Pointer-down: selection rules plus gesture starts.
    ///
    /// Plain click replaces the selection (or clears it on empty canvas);
    /// shift-click toggles membership. A press on an already-selected
    /// body starts a drag; presses on resize/rotate handles start their
    /// gestures for the sole selected element. A press while a gesture is
    /// already active is ignored and the in-progress gesture continues.
    pub fn pointer_down(&mut self, pt: Point, target: PointerTarget, mods: Modifiers) -> Action {
        if !self.session.gesture().is_idle() {
            warn!("pointer-down ignored: a gesture is already active");
            return Action::None;
        }
        match target {
            PointerTarget::Empty => {
                if mods.shift || self.session.selected().is_empty() {
                    Action::None
                } else {
                    self.session.clear_selection();
                    Action::SelectionChanged
                }
            }
            PointerTarget::Element(key) => self.pointer_down_on_element(pt, &key, mods),
            PointerTarget::ResizeHandle(handle) => {
                let Some(key) = self.sole_selected_existing() else {
                    return Action::None;
                };
                let Some(orig) = self.effective_bounds(&key) else {
                    return Action::None;
                };
                self.session
                    .begin_gesture(Gesture::Resizing { key, handle, start: pt, orig }, self.doc.clone());
                Action::None
            }
            PointerTarget::RotateHandle => {
                let Some(key) = self.sole_selected_existing() else {
                    return Action::None;
                };
                self.session
                    .begin_gesture(Gesture::Rotating { key }, self.doc.clone());
                Action::None
            }
        }
    }

    fn pointer_down_on_element(&mut self, pt: Point, key: &str, mods: Modifiers) -> Action {
        if !self.element_exists(key) {
            // Stale hit (element vanished under an external reset): drop
            // it from the selection and carry on.
            warn!(%key, "pointer-down on unknown element");
            if self.session.prune_selection(|k| k != key) {
                return Action::SelectionChanged;
            }
            return Action::None;
        }
        if mods.shift {
            self.session.toggle(key);
            return Action::SelectionChanged;
        }
        if self.session.is_selected(key) {
            // Press on a selected body starts the drag; the selection is
            // left intact.
            if let Some(b) = self.effective_bounds(key) {
                self.session.begin_gesture(
                    Gesture::Dragging {
                        key: key.to_string(),
                        start: pt,
                        orig_x: b.x,
                        orig_y: b.y,
                    },
                    self.doc.clone(),
                );
            }
            return Action::None;
        }
        self.session.select_only(key);
        Action::SelectionChanged
    }

    /// Pointer-move: advance the active gesture, writing live geometry
    /// into the override state. No-op while idle.
    pub fn pointer_move(&mut self, pt: Point, mods: Modifiers) -> Action {
        let gesture = self.session.gesture().clone();
        match gesture {
            Gesture::Idle => Action::None,
            Gesture::Dragging { key, start, orig_x, orig_y } => {
                let grid = self.session.effective_grid(mods);
                let (x, y) =
                    drag_position(orig_x, orig_y, start, pt, mods, grid, self.spec.canvas);
                let patch = PositionOverride { x: Some(x), y: Some(y), ..Default::default() };
                self.write_patch(&key, &patch);
                Action::ElementChanged { key }
            }
            Gesture::Resizing { key, handle, start, orig } => {
                let grid = self.session.effective_grid(mods);
                let b = resize_bounds(handle, orig, start, pt, grid, self.spec.canvas);
                let patch = PositionOverride {
                    x: Some(b.x),
                    y: Some(b.y),
                    width: Some(b.width),
                    height: Some(b.height),
                    ..Default::default()
                };
                self.write_patch(&key, &patch);
                Action::ElementChanged { key }
            }
            Gesture::Rotating { key } => {
                // Center from live geometry, not the gesture anchor, so a
                // preceding resize never leaves a stale pivot.
                let Some(bounds) = self.effective_bounds(&key) else {
                    return Action::None;
                };
                let angle = rotate_angle(bounds.center(), pt, mods);
                let patch = PositionOverride { rotation: Some(angle), ..Default::default() };
                self.write_patch(&key, &patch);
                Action::ElementChanged { key }
            }
        }
    }

    /// Pointer-up: complete the active gesture. This is the only point
    /// that records an undo snapshot (and only when the doc changed).
    pub fn pointer_up(&mut self) -> Action {
        if self.session.gesture().is_idle() {
            return Action::None;
        }
        let recorded = self.session.commit_gesture(&self.doc);
        debug!(recorded, "gesture committed");
        Action::None
    }

    /// Abort the active gesture (lost pointer capture, window blur,
    /// teardown mid-drag): restores the pre-gesture state without
    /// touching history.
    pub fn cancel_gesture(&mut self) -> Action {
        let Some(before) = self.session.cancel_gesture() else {
            return Action::None;
        };
        if before == self.doc {
            return Action::None;
        }
        self.doc = before;
        Action::StateReplaced
    }

    // --- Keyboard ---

    /// Arrow-key nudge of the sole selected element: 1 unit, 10 with
    /// shift, clamped to the canvas. Each press is its own undo step.
    /// Ignored unless the session is idle with exactly one selection.
    pub fn nudge(&mut self, direction: NudgeDirection, mods: Modifiers) -> Action {
        if !self.session.gesture().is_idle() {
            return Action::None;
        }
        let Some(key) = self.sole_selected_existing() else {
            return Action::None;
        };
        let Some(b) = self.effective_bounds(&key) else {
            return Action::None;
        };
        let step = if mods.shift { NUDGE_STEP_COARSE } else { NUDGE_STEP };
        let (dx, dy) = direction.delta(step);
        let (x, y) = clamp_to_canvas(b.x + dx, b.y + dy, self.spec.canvas);

        let before = self.doc.clone();
        let patch = PositionOverride { x: Some(x), y: Some(y), ..Default::default() };
        self.write_patch(&key, &patch);
        self.session.record_edit(before, &self.doc);
        Action::ElementChanged { key }
    }

    // --- Custom elements ---

    /// Add a custom element of `kind`, centered on the canvas and
    /// stacked one step above the current top layer. The new element
    /// becomes the selection.
    pub fn add_custom_element(&mut self, kind: CustomKind) -> Action {
        let top_z = self.resolve().last().map_or(0, |el| el.z_index);
        let element = CustomElement::new(kind, self.spec.canvas, top_z + Z_STEP);
        let id = element.id.clone();

        let before = self.doc.clone();
        self.doc.custom_elements.push(element);
        self.session.record_edit(before, &self.doc);
        self.session.select_only(&id);
        debug!(%id, ?kind, "custom element added");
        Action::ElementAdded { id }
    }

    /// Delete a custom element by id, clearing it from the selection.
    /// Spec elements are canonical and cannot be deleted.
    pub fn delete_custom_element(&mut self, id: &str) -> Action {
        if !self.session.gesture().is_idle() {
            return Action::None;
        }
        if self.doc.custom(id).is_none() {
            warn!(%id, "delete ignored: not a custom element");
            return Action::None;
        }
        let before = self.doc.clone();
        self.doc.remove_custom(id);
        self.session.prune_selection(|k| k != id);
        self.session.record_edit(before, &self.doc);
        Action::ElementDeleted { id: id.to_string() }
    }

    // --- Layer ordering ---

    /// Apply a user-dragged layer order (topmost first, as shown in the
    /// layers panel). Every surviving key gets an explicit stacking
    /// write — spec keys an override entry, custom ids their own field —
    /// so the override map stays the single source of truth for order.
    /// Keys matching no current element are skipped.
    pub fn reorder_layers<S: AsRef<str>>(&mut self, top_to_bottom: &[S]) -> Action {
        if !self.session.gesture().is_idle() {
            return Action::None;
        }
        let mut back_to_front: Vec<&str> = Vec::with_capacity(top_to_bottom.len());
        for key in top_to_bottom.iter().rev() {
            let key = key.as_ref();
            if self.element_exists(key) {
                back_to_front.push(key);
            } else {
                warn!(%key, "reorder skipped unknown layer key");
            }
        }
        let before = self.doc.clone();
        for (key, z) in layers::reorder(&back_to_front) {
            if let Some(custom) = self.doc.custom_mut(&key) {
                custom.z_index = z;
            } else {
                self.doc.position_overrides.entry(key).or_default().z_index = Some(z);
            }
        }
        if self.session.record_edit(before, &self.doc) {
            Action::StateReplaced
        } else {
            Action::None
        }
    }

    // --- Undo / redo ---

    /// Step back one completed edit. No-op when there is nothing to undo
    /// or a gesture is active.
    pub fn undo(&mut self) -> Action {
        if !self.session.gesture().is_idle() {
            return Action::None;
        }
        let Some(previous) = self.session.undo(&self.doc) else {
            return Action::None;
        };
        self.doc = previous;
        self.prune_vanished_selection();
        Action::StateReplaced
    }

    /// Step forward one undone edit. Mirror of [`Self::undo`].
    pub fn redo(&mut self) -> Action {
        if !self.session.gesture().is_idle() {
            return Action::None;
        }
        let Some(next) = self.session.redo(&self.doc) else {
            return Action::None;
        };
        self.doc = next;
        self.prune_vanished_selection();
        Action::StateReplaced
    }

    // --- Save / close protocol ---

    /// Emit the current override pair for the host to persist, and mark
    /// the editor clean.
    pub fn save(&mut self) -> OverrideDoc {
        self.baseline = self.doc.clone();
        self.doc.clone()
    }

    /// Throw away unsaved changes: reset to the last externally-loaded
    /// snapshot. Undo history goes with them.
    pub fn discard_changes(&mut self) -> Action {
        self.session.cancel_gesture();
        self.session.clear_history();
        if self.doc == self.baseline {
            return Action::None;
        }
        self.doc = self.baseline.clone();
        self.prune_vanished_selection();
        Action::StateReplaced
    }

    /// External reset: replace the override state wholesale (e.g. the
    /// host re-fetched the target). Establishes a new baseline and drops
    /// history.
    pub fn load(&mut self, doc: OverrideDoc) {
        self.session.cancel_gesture();
        self.session.clear_history();
        self.doc = doc.clone();
        self.baseline = doc;
        self.prune_vanished_selection();
    }

    // --- Internals ---

    fn element_exists(&self, key: &str) -> bool {
        self.spec.element(key).is_some() || self.doc.custom(key).is_some()
    }

    /// Sole selected key, if it still resolves to an element; a vanished
    /// key is silently dropped from the selection.
    fn sole_selected_existing(&mut self) -> Option<String> {
        let key = self.session.sole_selection()?.to_string();
        if self.element_exists(&key) {
            Some(key)
        } else {
            self.session.prune_selection(|k| k != key);
            None
        }
    }

    fn prune_vanished_selection(&mut self) {
        let spec = &self.spec;
        let doc = &self.doc;
        self.session
            .prune_selection(|k| spec.element(k).is_some() || doc.custom(k).is_some());
    }

    /// Current merged bounds for any element key.
    fn effective_bounds(&self, key: &str) -> Option<Bounds> {
        if let Some(custom) = self.doc.custom(key) {
            return Some(custom.bounds());
        }
        let def = self.spec.element(key)?;
        let ov = self.doc.position_overrides.get(key);
        Some(Bounds::new(
            ov.and_then(|o| o.x).unwrap_or(def.x),
            ov.and_then(|o| o.y).unwrap_or(def.y),
            ov.and_then(|o| o.width).unwrap_or(def.width),
            ov.and_then(|o| o.height).unwrap_or(def.height),
        ))
    }

    fn write_patch(&mut self, key: &str, patch: &PositionOverride) {
        let default = self.spec.element(key).cloned();
        if !self.doc.apply_patch(key, patch, default.as_ref()) {
            warn!(%key, "patch dropped: element no longer exists");
        }
    }
}
