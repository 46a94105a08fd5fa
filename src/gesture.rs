//! Manipulation handlers: the gesture state machine's context types and
//! the pure functions that turn cumulative pointer deltas into geometry
//! updates.
//!
//! Each active [`Gesture`] variant carries the pre-gesture anchor context
//! captured at pointer-down; the update functions combine that anchor
//! with the current pointer through the [`crate::geometry`] primitives.
//! Pointer positions arrive already converted to canvas units (see
//! [`crate::viewport`]).

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use crate::geometry::{
    Bounds, Canvas, Point, ResizeHandle, anchored_resize, clamp_to_canvas, rotation_from_pointer,
    snap_rotation, snap_to_grid,
};

/// Modifier keys held during a pointer or keyboard event.
///
/// Shift locks the drag axis, snaps rotation to 15° increments, toggles
/// selection membership on pointer-down, and widens keyboard nudges.
/// Alt bypasses grid snapping for the duration of the gesture.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
}

/// What the host's hit test found under a pointer-down.
///
/// Hit testing itself happens in the hosting view (it knows the rendered
/// shapes); the engine consumes the semantic result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    /// The body of a spec or custom element.
    Element(String),
    /// One of the eight resize handles of the sole selected element.
    ResizeHandle(ResizeHandle),
    /// The rotation handle of the sole selected element.
    RotateHandle,
    /// Bare canvas.
    Empty,
}

/// The active manipulation, if any. At most one gesture runs at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// No gesture in progress; waiting for the next pointer-down.
    Idle,
    /// Moving an element. Carries the pointer-down position and the
    /// element position at that moment.
    Dragging { key: String, start: Point, orig_x: f64, orig_y: f64 },
    /// Resizing by one of the eight handles. Carries the full pre-gesture
    /// bounds so every frame recomputes from the anchor.
    Resizing { key: String, handle: ResizeHandle, start: Point, orig: Bounds },
    /// Rotating around the element center. The center is recomputed from
    /// live geometry each frame, so no anchor context is needed.
    Rotating { key: String },
}

impl Default for Gesture {
    fn default() -> Self {
        Self::Idle
    }
}

impl Gesture {
    /// The key of the element being manipulated, if a gesture is active.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Dragging { key, .. } | Self::Resizing { key, .. } | Self::Rotating { key } => {
                Some(key)
            }
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Direction of a keyboard nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl NudgeDirection {
    /// Unit delta for this direction scaled by `step`.
    #[must_use]
    pub fn delta(self, step: f64) -> (f64, f64) {
        match self {
            Self::Up => (0.0, -step),
            Self::Down => (0.0, step),
            Self::Left => (-step, 0.0),
            Self::Right => (step, 0.0),
        }
    }
}

/// New position for a drag gesture: anchor plus cumulative delta, with
/// the minor axis frozen under shift, snapped when `grid` is set, then
/// clamped to the canvas.
#[must_use]
pub fn drag_position(
    orig_x: f64,
    orig_y: f64,
    start: Point,
    current: Point,
    mods: Modifiers,
    grid: Option<f64>,
    canvas: Canvas,
) -> (f64, f64) {
    let mut dx = current.x - start.x;
    let mut dy = current.y - start.y;
    if mods.shift {
        // Axis lock: the element follows the dominant direction of travel.
        if dx.abs() >= dy.abs() {
            dy = 0.0;
        } else {
            dx = 0.0;
        }
    }
    let mut x = orig_x + dx;
    let mut y = orig_y + dy;
    if let Some(g) = grid {
        x = snap_to_grid(x, g);
        y = snap_to_grid(y, g);
    }
    clamp_to_canvas(x, y, canvas)
}

/// New bounds for a resize gesture: anchor-correct resize, then position
/// and size independently snapped, the size floors re-applied, and the
/// position clamped to the canvas.
#[must_use]
pub fn resize_bounds(
    handle: ResizeHandle,
    orig: Bounds,
    start: Point,
    current: Point,
    grid: Option<f64>,
    canvas: Canvas,
) -> Bounds {
    let mut out = anchored_resize(handle, orig, current.x - start.x, current.y - start.y);
    if let Some(g) = grid {
        out.x = snap_to_grid(out.x, g);
        out.y = snap_to_grid(out.y, g);
        out.width = snap_to_grid(out.width, g).max(crate::consts::MIN_ELEMENT_WIDTH);
        out.height = snap_to_grid(out.height, g).max(crate::consts::MIN_ELEMENT_HEIGHT);
    }
    let (x, y) = clamp_to_canvas(out.x, out.y, canvas);
    out.x = x;
    out.y = y;
    out
}

/// New rotation for a rotate gesture, snapped to 15° increments when
/// shift is held.
#[must_use]
pub fn rotate_angle(center: Point, pointer: Point, mods: Modifiers) -> f64 {
    let angle = rotation_from_pointer(center, pointer);
    if mods.shift { snap_rotation(angle) } else { angle }
}
