//! Per-gesture runtime state: the in-progress flag, the one-shot direction
//! lock, and the sample window.

use crate::config::GestureConfig;
use crate::direction::{self, DirectionDecision};
use crate::fling::{self, ReleaseResolution};
use crate::sample_window::SampleWindow;
use crate::state::MenuState;

/// Owns the ephemeral state of the gesture currently being interpreted.
///
/// All flags reset at gesture boundaries: [`begin`](Self::begin) clears the
/// window and the direction lock, [`end`](Self::end) prunes the window for
/// the release classification, and [`reset`](Self::reset) re-seeds the raw
/// diff preview to zero and empties the window.
#[derive(Debug)]
pub struct GestureTracker {
    window: SampleWindow,
    in_progress: bool,
    direction_resolved: bool,
    last_raw_diff: f32,
}

impl GestureTracker {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            window: SampleWindow::new(config.max_samples, config.swipe_threshold_time_ms),
            in_progress: false,
            direction_resolved: false,
            last_raw_diff: 0.0,
        }
    }

    /// Starts a new gesture, recording the zero sample.
    pub fn begin(&mut self, time_ms: i64) {
        self.direction_resolved = false;
        self.in_progress = true;
        self.window.clear();
        self.record(time_ms, 0.0);
        log::trace!("gesture started at t={time_ms}ms");
    }

    /// Records a raw pan sample and publishes it as the live raw-diff value.
    pub fn record(&mut self, time_ms: i64, diff: f32) {
        self.last_raw_diff = diff;
        self.window.record(time_ms, diff);
    }

    /// Evaluates the direction lock, at most once per gesture.
    ///
    /// A `Vertical` outcome abandons the gesture on the spot: the drag is
    /// over with no state change, and further samples are ignored until the
    /// next [`begin`](Self::begin).
    pub fn resolve_direction(
        &mut self,
        total_x: f32,
        total_y: f32,
        cancel_threshold: f32,
    ) -> DirectionDecision {
        if self.direction_resolved {
            return DirectionDecision::Horizontal;
        }
        let decision = direction::resolve(total_x, total_y, cancel_threshold);
        match decision {
            DirectionDecision::Horizontal => self.direction_resolved = true,
            DirectionDecision::Vertical => {
                self.in_progress = false;
                log::trace!("gesture abandoned as vertical (x={total_x:.1}, y={total_y:.1})");
            }
            DirectionDecision::Pending => {}
        }
        decision
    }

    /// Ends the gesture and prunes the window so only samples inside the
    /// fling horizon remain for classification.
    pub fn end(&mut self) {
        self.in_progress = false;
        self.window.prune();
    }

    /// Classifies the release from the retained window. Call between
    /// [`end`](Self::end) and [`reset`](Self::reset).
    pub fn resolve_release(
        &self,
        preview: MenuState,
        persisted: MenuState,
        config: &GestureConfig,
    ) -> ReleaseResolution {
        fling::resolve_release(&self.window, preview, persisted, config)
    }

    /// Zeroes the raw-diff preview and empties the window.
    pub fn reset(&mut self, time_ms: i64) {
        self.record(time_ms, 0.0);
        self.window.clear();
    }

    /// Re-applies window sizing after a config change.
    pub fn configure(&mut self, config: &GestureConfig) {
        self.window
            .set_params(config.max_samples, config.swipe_threshold_time_ms);
    }

    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn direction_resolved(&self) -> bool {
        self.direction_resolved
    }

    /// Raw cumulative delta of the newest recorded sample.
    pub fn last_raw_diff(&self) -> f32 {
        self.last_raw_diff
    }
}
