//! Easing curves for settle animations.

use std::f32::consts::FRAC_PI_2;

/// Easing function applied to a linear animation fraction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// No easing.
    Linear,
    /// Sine ease-out: fast start, gentle stop. The settle animation default.
    #[default]
    SineOut,
}

impl Easing {
    /// Maps a linear fraction in `[0, 1]` through the curve.
    pub fn transform(self, fraction: f32) -> f32 {
        let f = fraction.clamp(0.0, 1.0);
        match self {
            Easing::Linear => f,
            Easing::SineOut => (f * FRAC_PI_2).sin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-5, "expected {b}, got {a}");
    }

    #[test]
    fn endpoints_are_fixed() {
        for easing in [Easing::Linear, Easing::SineOut] {
            assert_close(easing.transform(0.0), 0.0);
            assert_close(easing.transform(1.0), 1.0);
        }
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_close(Easing::SineOut.transform(-0.5), 0.0);
        assert_close(Easing::SineOut.transform(1.5), 1.0);
    }

    #[test]
    fn sine_out_front_loads_progress() {
        assert!(Easing::SineOut.transform(0.5) > 0.5);
    }
}
