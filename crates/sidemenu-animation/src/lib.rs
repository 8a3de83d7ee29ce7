//! Frame-driven animation for the side menu control.
//!
//! The [`FrameClock`] is the only scheduling primitive: the host registers
//! one-shot frame callbacks and drains them once per frame (~60Hz) with the
//! current frame time. [`TweenAnimation`] drives an eased interpolation on
//! top of it, with the cancellation semantics the control depends on: a
//! cancelled animation never fires its completion callback.

mod easing;
mod frame_clock;
mod tween;

pub use easing::Easing;
pub use frame_clock::{FrameCallbackId, FrameCallbackRegistration, FrameClock};
pub use tween::TweenAnimation;
