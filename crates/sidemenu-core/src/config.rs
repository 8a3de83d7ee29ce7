use crate::gesture_constants::{
    ACCEPT_THRESHOLD_FRACTION, CANCEL_VERTICAL_GESTURE_THRESHOLD, GESTURE_THRESHOLD,
    MAX_SAMPLES, MIN_FLING_SAMPLES, SWIPE_THRESHOLD_DISTANCE, SWIPE_THRESHOLD_TIME_ANDROID_MS,
    SWIPE_THRESHOLD_TIME_MS,
};

/// Tunable thresholds for gesture interpretation.
///
/// Every field defaults to the matching constant in
/// [`gesture_constants`](crate::gesture_constants); embedders override the
/// ones their platform needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Drag-start threshold, consumed by the platform pan recognizer.
    pub gesture_threshold: f32,
    /// Travel below which gesture direction stays undecided.
    pub cancel_vertical_threshold: f32,
    /// Fraction of the menu width used for the settle decision band.
    pub accept_threshold_fraction: f32,
    /// Fling distance threshold, normalized per `swipe_threshold_time_ms`.
    pub swipe_threshold_distance: f32,
    /// Fling time window and sample age horizon, in milliseconds.
    pub swipe_threshold_time_ms: i64,
    /// Soft cap on retained gesture samples.
    pub max_samples: usize,
    /// Minimum retained samples for a fling classification.
    pub min_fling_samples: usize,
    /// Declared for interface compatibility; nothing reads it yet.
    pub throttle_gesture: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            gesture_threshold: GESTURE_THRESHOLD,
            cancel_vertical_threshold: CANCEL_VERTICAL_GESTURE_THRESHOLD,
            accept_threshold_fraction: ACCEPT_THRESHOLD_FRACTION,
            swipe_threshold_distance: SWIPE_THRESHOLD_DISTANCE,
            swipe_threshold_time_ms: SWIPE_THRESHOLD_TIME_MS,
            max_samples: MAX_SAMPLES,
            min_fling_samples: MIN_FLING_SAMPLES,
            throttle_gesture: false,
        }
    }
}

impl GestureConfig {
    /// Defaults with the wider Android fling window.
    pub fn android() -> Self {
        Self {
            swipe_threshold_time_ms: SWIPE_THRESHOLD_TIME_ANDROID_MS,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_constants() {
        let config = GestureConfig::default();
        assert_eq!(config.gesture_threshold, 7.0);
        assert_eq!(config.cancel_vertical_threshold, 1.0);
        assert_eq!(config.accept_threshold_fraction, 0.3);
        assert_eq!(config.swipe_threshold_distance, 17.0);
        assert_eq!(config.swipe_threshold_time_ms, 60);
        assert_eq!(config.max_samples, 24);
        assert_eq!(config.min_fling_samples, 2);
        assert!(!config.throttle_gesture);
    }

    #[test]
    fn android_widens_the_fling_window() {
        assert_eq!(GestureConfig::android().swipe_threshold_time_ms, 100);
    }
}
