//! One-shot horizontal/vertical gesture disambiguation.

use crate::gesture_constants::VERTICAL_DRIFT_SCALE;

/// Outcome of evaluating early gesture samples for direction intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectionDecision {
    /// Travel too small to call either way; keep evaluating.
    Pending,
    /// Horizontal intent; lock in and stop evaluating for this gesture.
    Horizontal,
    /// Vertical intent; the drag must be abandoned to the scroll container.
    Vertical,
}

/// Classifies the gesture from its cumulative deltas.
///
/// Vertical travel is scaled by [`VERTICAL_DRIFT_SCALE`] before the
/// comparison, so a gesture must be markedly more vertical than horizontal
/// to be given up.
pub fn resolve(total_x: f32, total_y: f32, cancel_threshold: f32) -> DirectionDecision {
    let abs_x = total_x.abs();
    let abs_y = total_y.abs();
    if abs_x.max(abs_y) <= cancel_threshold {
        return DirectionDecision::Pending;
    }
    if abs_y * VERTICAL_DRIFT_SCALE >= abs_x {
        DirectionDecision::Vertical
    } else {
        DirectionDecision::Horizontal
    }
}
