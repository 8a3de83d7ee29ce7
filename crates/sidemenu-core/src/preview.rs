//! Live gesture-preview classification.

use crate::state::{diff_signum, MenuState};

/// Computes the would-be discrete state implied by the current offset.
///
/// Recomputed on every offset change, not just at gesture end, so a release
/// always has an up-to-date best-guess target. The decision band is
/// asymmetric on purpose: with `Default` as the reference the offset must
/// cross `width * fraction` to open a menu, while with a menu shown it must
/// fall below `width * (1 - fraction)` to close it. If the offset's sign
/// disagrees with the persisted state's sign, the reference falls back to
/// `Default`.
pub fn classify_preview(
    diff: f32,
    persisted: MenuState,
    menu_width: f32,
    accept_fraction: f32,
) -> MenuState {
    let move_threshold = menu_width * accept_fraction;
    let abs_diff = diff.abs();

    let mut reference = persisted;
    if diff_signum(diff) != persisted.signum() {
        reference = MenuState::Default;
    }

    let keeps_default = match reference {
        MenuState::Default => abs_diff <= move_threshold,
        MenuState::LeftShown | MenuState::RightShown => abs_diff < menu_width - move_threshold,
    };
    if keeps_default {
        return MenuState::Default;
    }
    if diff >= 0.0 {
        MenuState::LeftShown
    } else {
        MenuState::RightShown
    }
}
