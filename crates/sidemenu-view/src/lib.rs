//! Side menu (drawer) control.
//!
//! [`SideMenuView`] reveals a left or right panel by dragging the main
//! content horizontally, with eased settle animations on release. The
//! rendering container stays external: it registers children, forwards pan
//! and swipe events, drives the frame clock, and receives translation,
//! z-order, and input-transparency commands back through [`MenuSurface`].
//!
//! Single-threaded by design; everything runs on the UI callback chain.

mod children;
mod events;
mod surface;
mod view;

pub use children::{ChildConfig, ChildId, ChildStack, MenuLayoutSpec, MenuPosition};
pub use events::{PanEvent, PanPhase, SwipeDirection};
pub use surface::MenuSurface;
pub use view::SideMenuView;

pub use sidemenu_animation::{Easing, FrameClock};
pub use sidemenu_core::{GestureConfig, MenuState};
