//! Shared numeric constants for the editing engine.

// ── Canvas ──────────────────────────────────────────────────────

/// Side length of the square ad canvas, in canvas units.
pub const CANVAS_SIZE: f64 = 1080.0;

// ── Geometry floors ─────────────────────────────────────────────

/// Smallest width an element can be resized to.
pub const MIN_ELEMENT_WIDTH: f64 = 50.0;

/// Smallest height an element can be resized to.
pub const MIN_ELEMENT_HEIGHT: f64 = 20.0;

// ── Snapping ────────────────────────────────────────────────────

/// Default grid cell size for position/size snapping, in canvas units.
pub const DEFAULT_GRID_SIZE: f64 = 10.0;

/// Angular increment for modifier-held rotation snapping, in degrees.
pub const ROTATION_SNAP_DEG: f64 = 15.0;

// ── Stacking ────────────────────────────────────────────────────

/// Gap between consecutive z-indices assigned by a layer reorder.
/// Leaves room for single-element inserts without renumbering.
pub const Z_STEP: i64 = 10;

// ── Keyboard nudging ────────────────────────────────────────────

/// Arrow-key nudge distance, in canvas units.
pub const NUDGE_STEP: f64 = 1.0;

/// Shift+arrow nudge distance, in canvas units.
pub const NUDGE_STEP_COARSE: f64 = 10.0;

// ── History ─────────────────────────────────────────────────────

/// Maximum undo depth; the oldest snapshot is dropped beyond this.
pub const HISTORY_DEPTH: usize = 50;
