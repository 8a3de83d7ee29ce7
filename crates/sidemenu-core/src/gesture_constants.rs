//! Shared gesture constants for the side menu control.
//!
//! These values are in logical units and were tuned empirically on touch
//! hardware; change them only with product sign-off. `GestureConfig` exposes
//! all of them as per-control overrides.

/// Drag-start threshold in logical units.
///
/// Advisory to the platform pan recognizer: a pan should not be reported
/// until the pointer has travelled at least this far from the press point.
pub const GESTURE_THRESHOLD: f32 = 7.0;

/// Below this combined horizontal/vertical travel the gesture direction is
/// still considered undecided.
pub const CANCEL_VERTICAL_GESTURE_THRESHOLD: f32 = 1.0;

/// Vertical travel is scaled by this factor before being compared against
/// horizontal travel, biasing ambiguous gestures toward the horizontal
/// interpretation so the drawer does not fight a vertical scroll container.
pub const VERTICAL_DRIFT_SCALE: f32 = 2.5;

/// Fraction of the active menu's width the offset must cross for a release
/// to change the discrete state. The same fraction widens the band on the
/// way back, so leaving an open menu is harder than never opening it.
pub const ACCEPT_THRESHOLD_FRACTION: f32 = 0.3;

/// Minimum travel, per [`SWIPE_THRESHOLD_TIME_MS`], for a release to count
/// as a fling.
pub const SWIPE_THRESHOLD_DISTANCE: f32 = 17.0;

/// Time window the fling distance threshold is normalized against. Also the
/// age horizon for retained gesture samples.
pub const SWIPE_THRESHOLD_TIME_MS: i64 = 60;

/// Android pan recognizers report at a coarser cadence, so the fling window
/// is wider there. See [`crate::GestureConfig::android`].
pub const SWIPE_THRESHOLD_TIME_ANDROID_MS: i64 = 100;

/// Soft cap on retained gesture samples. Exceeding it triggers an age-based
/// prune before the next sample is recorded.
pub const MAX_SAMPLES: usize = 24;

/// Minimum number of retained samples for a fling classification.
pub const MIN_FLING_SAMPLES: usize = 2;
