//! Time-ordered window of gesture samples used for fling detection.

use smallvec::SmallVec;

/// A single `(timestamp, offset)` sample recorded during a gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSample {
    /// Timestamp in milliseconds, monotonic within a gesture.
    pub time_ms: i64,
    /// Raw cumulative horizontal delta reported by the recognizer.
    pub diff: f32,
}

/// Bounded, time-ordered buffer of [`GestureSample`]s.
///
/// Samples older than the age horizon (relative to the newest retained
/// sample) are evicted; the size cap is soft and triggers an age-based prune
/// before the next append rather than dropping the oldest entry outright.
#[derive(Clone, Debug)]
pub struct SampleWindow {
    samples: SmallVec<[GestureSample; 8]>,
    max_samples: usize,
    horizon_ms: i64,
}

impl SampleWindow {
    pub fn new(max_samples: usize, horizon_ms: i64) -> Self {
        Self {
            samples: SmallVec::new(),
            max_samples,
            horizon_ms,
        }
    }

    /// Appends a sample, pruning aged entries first when over capacity.
    pub fn record(&mut self, time_ms: i64, diff: f32) {
        if self.samples.len() > self.max_samples {
            self.prune();
        }
        self.samples.push(GestureSample { time_ms, diff });
    }

    /// Drops samples whose age relative to the newest retained sample
    /// exceeds the horizon.
    pub fn prune(&mut self) {
        let Some(newest) = self.samples.last().copied() else {
            return;
        };
        let horizon_ms = self.horizon_ms;
        self.samples
            .retain(|sample| newest.time_ms - sample.time_ms <= horizon_ms);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Oldest retained sample.
    pub fn first(&self) -> Option<GestureSample> {
        self.samples.first().copied()
    }

    /// Newest retained sample.
    pub fn last(&self) -> Option<GestureSample> {
        self.samples.last().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn set_params(&mut self, max_samples: usize, horizon_ms: i64) {
        self.max_samples = max_samples;
        self.horizon_ms = horizon_ms;
    }
}
