//! Geometry primitives: points, bounding boxes, and the pure functions
//! behind every manipulation — canvas clamping, grid snapping,
//! anchor-aware resizing, and pointer-driven rotation.
//!
//! Everything here is stateless. Coordinates are always in unscaled canvas
//! units; any on-screen scale factor is applied by [`crate::viewport`]
//! before values reach these functions.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MIN_ELEMENT_HEIGHT, MIN_ELEMENT_WIDTH, ROTATION_SNAP_DEG};

/// A point in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The fixed drawing surface every layout composes onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    /// Canvas width in canvas units.
    pub width: f64,
    /// Canvas height in canvas units.
    pub height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self { width: crate::consts::CANVAS_SIZE, height: crate::consts::CANVAS_SIZE }
    }
}

/// An axis-aligned bounding box in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Center point of the box.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Right edge (`x + width`).
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// One of the eight resize handles around a selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeHandle {
    /// Handles on the east side: dragging right grows the width.
    #[must_use]
    pub fn grows_east(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    /// Handles on the west side: dragging left grows the width and the
    /// left edge follows the pointer (right edge stays fixed).
    #[must_use]
    pub fn grows_west(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    /// Handles on the south side: dragging down grows the height.
    #[must_use]
    pub fn grows_south(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    /// Handles on the north side: dragging up grows the height.
    #[must_use]
    pub fn grows_north(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }
}

/// Clamp a position into `[0, width] × [0, height]`.
///
/// Applied after every position update, before the value is recorded.
#[must_use]
pub fn clamp_to_canvas(x: f64, y: f64, canvas: Canvas) -> (f64, f64) {
    (x.clamp(0.0, canvas.width), y.clamp(0.0, canvas.height))
}

/// Round `value` to the nearest multiple of `grid`.
///
/// A non-positive grid is an identity, so a misconfigured session can
/// never produce NaN positions.
#[must_use]
pub fn snap_to_grid(value: f64, grid: f64) -> f64 {
    if grid <= 0.0 {
        return value;
    }
    (value / grid).round() * grid
}

/// Compute the new bounds for a resize gesture.
///
/// `(dx, dy)` is the cumulative pointer delta since the gesture started
/// and `orig` the element bounds at that moment. East/south handles grow
/// the size in the drag direction without moving the opposite edge.
/// West handles additionally shift `x` so the right edge stays fixed.
/// Only the pure [`ResizeHandle::N`] handle shifts `y`; the `Ne`/`Nw`
/// corners resize the height in place, anchoring one axis at a time.
///
/// The minimum size floor is applied to the size before the position
/// shift is derived, so the anchored edge holds even when the floor
/// clamps the delta.
#[must_use]
pub fn anchored_resize(handle: ResizeHandle, orig: Bounds, dx: f64, dy: f64) -> Bounds {
    let mut width = orig.width;
    let mut height = orig.height;

    if handle.grows_east() {
        width = orig.width + dx;
    } else if handle.grows_west() {
        width = orig.width - dx;
    }
    if handle.grows_south() {
        height = orig.height + dy;
    } else if handle.grows_north() {
        height = orig.height - dy;
    }

    width = width.max(MIN_ELEMENT_WIDTH);
    height = height.max(MIN_ELEMENT_HEIGHT);

    let x = if handle.grows_west() { orig.x + (orig.width - width) } else { orig.x };
    let y = if handle == ResizeHandle::N { orig.y + (orig.height - height) } else { orig.y };

    Bounds::new(x, y, width, height)
}

/// Angle of the vector from `center` to `pointer`, in degrees.
///
/// Straight up is 0°, straight right is 90°; the result is normalized to
/// `[0, 360)`.
#[must_use]
pub fn rotation_from_pointer(center: Point, pointer: Point) -> f64 {
    let dx = pointer.x - center.x;
    let dy = pointer.y - center.y;
    dx.atan2(-dy).to_degrees().rem_euclid(360.0)
}

/// Snap an angle to the nearest 15° increment, normalized to `[0, 360)`.
#[must_use]
pub fn snap_rotation(degrees: f64) -> f64 {
    ((degrees / ROTATION_SNAP_DEG).round() * ROTATION_SNAP_DEG).rem_euclid(360.0)
}
