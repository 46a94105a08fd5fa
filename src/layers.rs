//! Layer ordering: spaced z-index assignment on reorder.
//!
//! Assigning `(position + 1) * Z_STEP` instead of contiguous integers
//! leaves numeric gaps, so a later single-element reorder can be written
//! as one override entry instead of renumbering the whole list.

#[cfg(test)]
#[path = "layers_test.rs"]
mod layers_test;

use crate::consts::Z_STEP;

/// Assign spaced z-indices to `back_to_front` (render order: first key is
/// the bottommost layer).
///
/// With `k` keys the assigned set is exactly `{10, 20, …, 10k}`. The
/// caller writes every assignment as an explicit override (or custom
/// element field), even for elements whose position never changed — the
/// override map is the single source of truth for stacking order.
#[must_use]
pub fn reorder<S: AsRef<str>>(back_to_front: &[S]) -> Vec<(String, i64)> {
    back_to_front
        .iter()
        .zip(1_i64..)
        .map(|(key, position)| (key.as_ref().to_string(), position * Z_STEP))
        .collect()
}
