//! Gesture-to-state interpretation for a horizontal side-menu (drawer) control.
//!
//! This crate is the pure logic half of the control: it turns raw,
//! irregularly-timed pan samples into a continuous visual offset, a
//! velocity-based fling classification at gesture end, and a discrete
//! three-state menu state machine. It holds no views, no clock, and no
//! animation state; those live in `sidemenu-view` and `sidemenu-animation`.

pub mod gesture_constants;

mod config;
mod direction;
mod fling;
mod offset;
mod preview;
mod sample_window;
mod state;
mod tracker;

pub use config::GestureConfig;
pub use direction::DirectionDecision;
pub use fling::{resolve_release, resolve_swipe_target, ReleaseResolution};
pub use offset::{approx_eq, clamp_to_menu_width};
pub use preview::classify_preview;
pub use sample_window::{GestureSample, SampleWindow};
pub use state::MenuState;
pub use tracker::GestureTracker;
