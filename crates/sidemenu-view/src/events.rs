//! Input events consumed by the control.

use std::sync::OnceLock;

use web_time::Instant;

/// Phase of a pan gesture, mirroring the recognizer's lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// A pan sample from the platform gesture recognizer.
///
/// Deltas are cumulative from the gesture's start point. Timestamps are
/// monotonic milliseconds; recognizers that stamp their events should pass
/// those stamps through [`PanEvent::at`], others can fall back to
/// [`PanEvent::now`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanEvent {
    pub phase: PanPhase,
    pub total_x: f32,
    pub total_y: f32,
    pub time_ms: i64,
}

impl PanEvent {
    pub fn at(phase: PanPhase, total_x: f32, total_y: f32, time_ms: i64) -> Self {
        Self {
            phase,
            total_x,
            total_y,
            time_ms,
        }
    }

    /// Stamps the event with the current time, measured from the first call
    /// in the process.
    pub fn now(phase: PanPhase, total_x: f32, total_y: f32) -> Self {
        static EPOCH: OnceLock<Instant> = OnceLock::new();
        let epoch = *EPOCH.get_or_init(Instant::now);
        Self::at(phase, total_x, total_y, epoch.elapsed().as_millis() as i64)
    }
}

/// Direction of a discrete swipe signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}
