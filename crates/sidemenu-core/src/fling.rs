//! Gesture-end classification: plain drag release vs. velocity fling.

use crate::config::GestureConfig;
use crate::sample_window::SampleWindow;
use crate::state::{diff_signum, MenuState};

/// How a gesture release should be handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseResolution {
    /// Settle to the given discrete state; no fling was involved.
    Settle(MenuState),
    /// A qualifying fling; the target is resolved from the motion direction
    /// relative to the persisted state.
    Fling {
        /// Whether the net recent motion was rightward (positive).
        rightward: bool,
    },
}

/// Classifies a gesture release from the retained sample window.
///
/// If the live preview already disagrees with the persisted state, the
/// positional threshold was crossed and the preview wins outright; sample
/// timing is never consulted. Otherwise a fling override is attempted:
/// enough samples, tail motion agreeing with the net direction (so a
/// decelerating pull-back is not misread as a flick), and a travelled
/// distance beating `threshold_distance * elapsed / threshold_time`.
pub fn resolve_release(
    window: &SampleWindow,
    preview: MenuState,
    persisted: MenuState,
    config: &GestureConfig,
) -> ReleaseResolution {
    if preview != persisted {
        return ReleaseResolution::Settle(preview);
    }

    if window.len() < config.min_fling_samples {
        return ReleaseResolution::Settle(persisted);
    }
    let (Some(first), Some(last)) = (window.first(), window.last()) else {
        return ReleaseResolution::Settle(persisted);
    };

    let dist_diff = last.diff - first.diff;
    if diff_signum(dist_diff) != diff_signum(last.diff) {
        return ReleaseResolution::Settle(persisted);
    }

    let elapsed_ms = (last.time_ms - first.time_ms) as f32;
    let accept_value =
        config.swipe_threshold_distance * elapsed_ms / config.swipe_threshold_time_ms as f32;
    if dist_diff.abs() < accept_value {
        return ReleaseResolution::Settle(persisted);
    }

    log::trace!(
        "fling accepted: dist={dist_diff:.1} over {elapsed_ms:.0}ms (accept={accept_value:.1})"
    );
    ReleaseResolution::Fling {
        rightward: dist_diff > 0.0,
    }
}

/// Resolves the state a swipe or fling in the given direction lands on,
/// relative to the currently persisted state.
///
/// With a menu open, the swipe toward its side closes it and the opposite
/// menu is unreachable from this gesture; from `Default` either menu opens.
pub fn resolve_swipe_target(current: MenuState, rightward: bool) -> MenuState {
    let mut left_target = MenuState::LeftShown;
    let mut right_target = MenuState::RightShown;
    match current {
        MenuState::LeftShown => right_target = MenuState::Default,
        MenuState::RightShown => left_target = MenuState::Default,
        MenuState::Default => {}
    }
    if rightward {
        left_target
    } else {
        right_target
    }
}
