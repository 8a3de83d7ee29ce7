//! The side menu control: event handling, state machine, settle animation.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;
use sidemenu_animation::{Easing, FrameCallbackRegistration, FrameClock, TweenAnimation};
use sidemenu_core::{
    approx_eq, clamp_to_menu_width, classify_preview, resolve_swipe_target, DirectionDecision,
    GestureConfig, GestureTracker, MenuState, ReleaseResolution,
};

use crate::children::{ChildConfig, ChildId, ChildStack, MenuLayoutSpec, MenuPosition};
use crate::events::{PanEvent, PanPhase, SwipeDirection};
use crate::surface::MenuSurface;

/// Nominal settle duration for a full-width transition; partial transitions
/// scale down proportionally to the remaining distance.
const SETTLE_DURATION_MS: u64 = 350;

const SETTLE_EASING: Easing = Easing::SineOut;

type StateListeners = Rc<RefCell<HashMap<u64, Box<dyn Fn(MenuState)>>>>;

struct MenuInner {
    surface: Rc<RefCell<dyn MenuSurface>>,
    clock: FrameClock,
    settle: TweenAnimation,
    config: GestureConfig,
    tracker: GestureTracker,

    children: ChildStack,
    configs: IndexMap<ChildId, ChildConfig>,
    main_view: Option<ChildId>,
    left_menu: Option<ChildId>,
    right_menu: Option<ChildId>,
    overlay: Option<ChildId>,
    active_menu: Option<ChildId>,
    inactive_menu: Option<ChildId>,

    state: MenuState,
    preview_state: MenuState,
    /// Current visual offset of the main content and overlay.
    diff: f32,
    /// Offset baseline carried across gestures and animation ticks so a new
    /// drag continues from wherever the content currently sits.
    previous_diff: f32,
    /// Correction subtracted from the raw delta when an update was rejected,
    /// re-anchoring the gesture's zero point.
    zero_diff: f32,
    /// Pending half-duration marker set by a fling or swipe resolution,
    /// consumed by the next settle animation.
    is_fling: bool,
    /// Fold the final deltas of an `End`/`Cancel` event into one last move
    /// update first. For recognizers that only report totals at completion.
    update_on_end: bool,
    pending_swipe: Option<FrameCallbackRegistration>,

    state_listeners: StateListeners,
    next_listener_id: u64,
}

/// Side menu (drawer) control.
///
/// Cheap to clone; clones share the same control state. The host feeds pan
/// and swipe events in, drains the [`FrameClock`] every frame, and applies
/// the translation/z-order/transparency commands it receives through its
/// [`MenuSurface`].
pub struct SideMenuView {
    inner: Rc<RefCell<MenuInner>>,
}

impl SideMenuView {
    pub fn new(surface: Rc<RefCell<dyn MenuSurface>>, clock: FrameClock) -> Self {
        Self::with_config(surface, clock, GestureConfig::default())
    }

    pub fn with_config(
        surface: Rc<RefCell<dyn MenuSurface>>,
        clock: FrameClock,
        config: GestureConfig,
    ) -> Self {
        let settle = TweenAnimation::new(clock.clone());
        let tracker = GestureTracker::new(&config);
        Self {
            inner: Rc::new(RefCell::new(MenuInner {
                surface,
                clock,
                settle,
                config,
                tracker,
                children: ChildStack::default(),
                configs: IndexMap::new(),
                main_view: None,
                left_menu: None,
                right_menu: None,
                overlay: None,
                active_menu: None,
                inactive_menu: None,
                state: MenuState::Default,
                preview_state: MenuState::Default,
                diff: 0.0,
                previous_diff: 0.0,
                zero_diff: 0.0,
                is_fling: false,
                update_on_end: false,
                pending_swipe: None,
                state_listeners: Rc::new(RefCell::new(HashMap::new())),
                next_listener_id: 0,
            })),
        }
    }

    // ------------------------------------------------------------------
    // Child registry
    // ------------------------------------------------------------------

    /// Registers a child with its attached configuration.
    pub fn add_child(&self, child: ChildId, config: ChildConfig) {
        let mut inner = self.inner.borrow_mut();
        match config.position {
            MenuPosition::Main => inner.main_view = Some(child),
            MenuPosition::LeftMenu => inner.left_menu = Some(child),
            MenuPosition::RightMenu => inner.right_menu = Some(child),
        }
        inner.children.push(child);
        inner.configs.insert(child, config);
    }

    /// Unregisters a child, clearing whichever slot it occupied.
    pub fn remove_child(&self, child: ChildId) {
        let mut inner = self.inner.borrow_mut();
        if inner.main_view == Some(child) {
            inner.main_view = None;
        }
        if inner.left_menu == Some(child) {
            inner.left_menu = None;
        }
        if inner.right_menu == Some(child) {
            inner.right_menu = None;
        }
        if inner.active_menu == Some(child) {
            inner.active_menu = None;
        } else if inner.inactive_menu == Some(child) {
            inner.inactive_menu = None;
        }
        inner.children.remove(child);
        inner.configs.shift_remove(&child);
    }

    /// Registers the dimming overlay. Starts input-transparent; it only
    /// blocks input while a menu is shown.
    pub fn attach_overlay(&self, child: ChildId) {
        let surface = {
            let mut inner = self.inner.borrow_mut();
            inner.overlay = Some(child);
            inner.children.push(child);
            inner.surface.clone()
        };
        surface.borrow_mut().set_input_transparent(child, true);
    }

    /// Placement the host should lay a registered child out with.
    pub fn layout_spec(&self, child: ChildId) -> Option<MenuLayoutSpec> {
        let inner = self.inner.borrow();
        if inner.overlay == Some(child) {
            return Some(MenuLayoutSpec::Fill);
        }
        let config = inner.configs.get(&child)?;
        let spec = match config.position {
            MenuPosition::Main => MenuLayoutSpec::Fill,
            MenuPosition::LeftMenu => MenuLayoutSpec::Menu {
                anchor_x: 0.0,
                width_fraction: (config.menu_width_percentage > 0.0)
                    .then_some(config.menu_width_percentage),
            },
            MenuPosition::RightMenu => MenuLayoutSpec::Menu {
                anchor_x: 1.0,
                width_fraction: (config.menu_width_percentage > 0.0)
                    .then_some(config.menu_width_percentage),
            },
        };
        Some(spec)
    }

    /// Called by the host after it lays children out: the main content and
    /// the overlay always sit above both menus.
    pub fn on_layout_pass(&self) {
        let (main, overlay) = {
            let inner = self.inner.borrow();
            (inner.main_view, inner.overlay)
        };
        let Some(main) = main else {
            return;
        };
        raise_child(&self.inner, main);
        if let Some(overlay) = overlay {
            raise_child(&self.inner, overlay);
        }
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Feeds a pan recognizer event into the control.
    pub fn on_pan_updated(&self, event: PanEvent) {
        match event.phase {
            PanPhase::Start => on_touch_started(&self.inner, event.time_ms),
            PanPhase::Move => {
                on_touch_changed(&self.inner, event.total_x, event.total_y, event.time_ms)
            }
            PanPhase::End | PanPhase::Cancel => {
                let update_on_end = self.inner.borrow().update_on_end;
                if update_on_end {
                    on_touch_changed(&self.inner, event.total_x, event.total_y, event.time_ms);
                }
                on_touch_ended(&self.inner, event.time_ms);
            }
        }
    }

    /// Feeds a discrete swipe signal into the control.
    ///
    /// Handling is deferred by one frame so a pan gesture starting from the
    /// same physical motion wins; the pan's `Start` cancels the deferred
    /// check.
    pub fn on_swiped(&self, direction: SwipeDirection) {
        let rightward = direction == SwipeDirection::Right;
        let clock = self.inner.borrow().clock.clone();
        let target = Rc::downgrade(&self.inner);
        let registration = clock.with_frame_nanos(move |_| {
            let Some(this) = target.upgrade() else {
                return;
            };
            {
                let mut inner = this.borrow_mut();
                inner.pending_swipe = None;
                if inner.tracker.in_progress() {
                    return;
                }
            }
            let state = resolve_swipe_state(&this, rightward);
            update_state(&this, state, true);
        });
        self.inner.borrow_mut().pending_swipe = Some(registration);
    }

    /// Tap on the dimming overlay closes whichever menu is open.
    pub fn on_overlay_tapped(&self) {
        self.set_state(MenuState::Default);
    }

    // ------------------------------------------------------------------
    // Observable state
    // ------------------------------------------------------------------

    /// Persisted discrete state.
    pub fn state(&self) -> MenuState {
        self.inner.borrow().state
    }

    /// Forces the discrete state, settling the offset to match. Setting the
    /// current state again still re-centers after a drag left the offset
    /// off-target.
    pub fn set_state(&self, state: MenuState) {
        update_state(&self.inner, state, false);
    }

    /// Live best-guess state implied by the current offset.
    pub fn preview_state(&self) -> MenuState {
        self.inner.borrow().preview_state
    }

    /// Current visual offset of the main content.
    pub fn offset(&self) -> f32 {
        self.inner.borrow().diff
    }

    /// Raw cumulative delta of the gesture in progress, zero at rest.
    pub fn gesture_offset(&self) -> f32 {
        self.inner.borrow().tracker.last_raw_diff()
    }

    pub fn gesture_in_progress(&self) -> bool {
        self.inner.borrow().tracker.in_progress()
    }

    /// Whether a settle animation is currently running.
    pub fn is_settling(&self) -> bool {
        self.inner.borrow().settle.is_running()
    }

    /// Registers a callback invoked whenever the persisted state changes.
    pub fn add_state_listener(&self, listener: impl Fn(MenuState) + 'static) -> u64 {
        let mut inner = self.inner.borrow_mut();
        inner.next_listener_id += 1;
        let id = inner.next_listener_id;
        inner
            .state_listeners
            .borrow_mut()
            .insert(id, Box::new(listener));
        id
    }

    pub fn remove_state_listener(&self, id: u64) {
        self.inner
            .borrow()
            .state_listeners
            .borrow_mut()
            .remove(&id);
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    pub fn config(&self) -> GestureConfig {
        self.inner.borrow().config
    }

    pub fn set_gesture_config(&self, config: GestureConfig) {
        let mut inner = self.inner.borrow_mut();
        inner.config = config;
        inner.tracker.configure(&config);
    }

    pub fn set_gesture_threshold(&self, threshold: f32) {
        self.inner.borrow_mut().config.gesture_threshold = threshold;
    }

    pub fn set_cancel_vertical_gesture_threshold(&self, threshold: f32) {
        self.inner.borrow_mut().config.cancel_vertical_threshold = threshold;
    }

    pub fn set_throttle_gesture(&self, throttle: bool) {
        self.inner.borrow_mut().config.throttle_gesture = throttle;
    }

    /// Folds the final totals of an `End`/`Cancel` event into one last move
    /// update before release handling. For recognizers that only report the
    /// full delta at completion.
    pub fn set_update_on_end(&self, update_on_end: bool) {
        self.inner.borrow_mut().update_on_end = update_on_end;
    }
}

impl Clone for SideMenuView {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

// ----------------------------------------------------------------------
// Gesture pipeline
// ----------------------------------------------------------------------

fn on_touch_started(this: &Rc<RefCell<MenuInner>>, time_ms: i64) {
    let settle = {
        let mut inner = this.borrow_mut();
        if inner.tracker.in_progress() {
            return;
        }
        // A drag supersedes any deferred swipe check.
        inner.pending_swipe = None;
        inner.zero_diff = 0.0;
        inner.tracker.begin(time_ms);
        inner.settle.clone()
    };
    settle.cancel();
}

fn on_touch_changed(this: &Rc<RefCell<MenuInner>>, total_x: f32, total_y: f32, time_ms: i64) {
    let settle = {
        let mut inner = this.borrow_mut();
        if !inner.tracker.in_progress() || approx_eq(inner.tracker.last_raw_diff(), total_x) {
            return;
        }
        inner.tracker.record(time_ms, total_x);
        let cancel_threshold = inner.config.cancel_vertical_threshold;
        if inner.tracker.resolve_direction(total_x, total_y, cancel_threshold)
            == DirectionDecision::Vertical
        {
            return;
        }
        inner.settle.clone()
    };
    settle.cancel();

    let candidate = {
        let inner = this.borrow();
        inner.previous_diff + total_x - inner.zero_diff
    };
    if !try_update_diff(this, candidate, false) {
        let mut inner = this.borrow_mut();
        inner.zero_diff = inner.previous_diff + total_x - inner.diff;
    }
}

fn on_touch_ended(this: &Rc<RefCell<MenuInner>>, time_ms: i64) {
    let resolution = {
        let mut inner = this.borrow_mut();
        if !inner.tracker.in_progress() {
            return;
        }
        inner.tracker.end();
        inner.previous_diff = inner.diff;
        let resolution =
            inner
                .tracker
                .resolve_release(inner.preview_state, inner.state, &inner.config);
        inner.tracker.reset(time_ms);
        resolution
    };

    let (target, is_fling) = match resolution {
        ReleaseResolution::Settle(state) => (state, false),
        ReleaseResolution::Fling { rightward } => (resolve_swipe_state(this, rightward), true),
    };
    update_state(this, target, is_fling);
}

/// Clamps and applies a candidate offset. Returns whether anything changed;
/// a `false` tells the caller to re-anchor its zero reference instead.
fn try_update_diff(this: &Rc<RefCell<MenuInner>>, candidate: f32, update_previous: bool) -> bool {
    set_active_view(this, candidate >= 0.0);

    let (surface, main, overlay, clamped) = {
        let mut inner = this.borrow_mut();
        let Some(main) = inner.main_view else {
            return false;
        };
        let Some(active) = inner.active_menu else {
            return false;
        };
        let gesture_enabled = inner
            .configs
            .get(&active)
            .map(|config| config.gesture_enabled)
            .unwrap_or(true);
        if !gesture_enabled {
            log::trace!("offset update rejected: menu {active} has gestures disabled");
            return false;
        }

        let surface = inner.surface.clone();
        let menu_width = surface.borrow().width(active);
        let clamped = clamp_to_menu_width(candidate, menu_width);
        if approx_eq(inner.diff, clamped) {
            return false;
        }

        inner.diff = clamped;
        inner.preview_state = classify_preview(
            clamped,
            inner.state,
            menu_width,
            inner.config.accept_threshold_fraction,
        );
        if update_previous {
            inner.previous_diff = clamped;
        }
        (surface, main, inner.overlay, clamped)
    };

    let mut surface = surface.borrow_mut();
    surface.set_translation_x(main, clamped);
    if let Some(overlay) = overlay {
        surface.set_translation_x(overlay, clamped);
    }
    true
}

/// Recomputes the active/inactive menu references from the offset sign and
/// fixes the z-order when overlapping menus are stacked wrong, so the next
/// reveal animates above the right sibling.
fn set_active_view(this: &Rc<RefCell<MenuInner>>, is_left: bool) {
    let (surface, inactive) = {
        let mut inner = this.borrow_mut();
        let (active, inactive) = if is_left {
            (inner.left_menu, inner.right_menu)
        } else {
            (inner.right_menu, inner.left_menu)
        };
        inner.active_menu = active;
        inner.inactive_menu = inactive;

        let (Some(active), Some(inactive)) = (active, inactive) else {
            return;
        };
        let (Some(left), Some(right)) = (inner.left_menu, inner.right_menu) else {
            return;
        };

        let surface = inner.surface.clone();
        let overlapping = {
            let s = surface.borrow();
            s.x(left) + s.width(left) > s.x(right)
        };
        if !overlapping {
            return;
        }
        let (Some(active_index), Some(inactive_index)) = (
            inner.children.index_of(active),
            inner.children.index_of(inactive),
        ) else {
            return;
        };
        if inactive_index < active_index {
            return;
        }
        inner.children.lower(inactive);
        (surface, inactive)
    };
    surface.borrow_mut().lower(inactive);
}

/// Maps a swipe/fling direction to its target state, updating the active
/// menu (and with it the z-order) when a menu is currently shown.
fn resolve_swipe_state(this: &Rc<RefCell<MenuInner>>, rightward: bool) -> MenuState {
    let current = this.borrow().state;
    match current {
        MenuState::LeftShown => set_active_view(this, true),
        MenuState::RightShown => set_active_view(this, false),
        MenuState::Default => {}
    }
    resolve_swipe_target(current, rightward)
}

// ----------------------------------------------------------------------
// State machine & settle animation
// ----------------------------------------------------------------------

fn update_state(this: &Rc<RefCell<MenuInner>>, new_state: MenuState, is_fling: bool) {
    let changed = {
        let mut inner = this.borrow_mut();
        inner.is_fling = is_fling;
        if inner.state == new_state {
            false
        } else {
            log::debug!("menu state {:?} -> {:?}", inner.state, new_state);
            inner.state = new_state;
            true
        }
    };
    perform_animation(this);
    if changed {
        notify_state_listeners(this);
    }
}

fn perform_animation(this: &Rc<RefCell<MenuInner>>) {
    let (settle, state, start, end, duration_ms) = {
        let mut inner = this.borrow_mut();
        let state = inner.state;
        let start = inner.diff;
        let surface = inner.surface.clone();

        let menu = match state {
            MenuState::LeftShown => inner.left_menu,
            MenuState::RightShown => inner.right_menu,
            MenuState::Default => None,
        };
        let menu_width = menu.map(|id| surface.borrow().width(id)).unwrap_or(0.0);
        let end = state.sign() * menu_width;

        let control_width = surface.borrow().container_width();
        let mut duration_ms = if control_width > 0.0 {
            (SETTLE_DURATION_MS as f32 * (start - end).abs() / control_width) as u64
        } else {
            0
        };
        if inner.is_fling {
            inner.is_fling = false;
            duration_ms /= 2;
        }
        (inner.settle.clone(), state, start, end, duration_ms)
    };

    if duration_ms == 0 {
        set_overlay_input_transparent(this, state);
        return;
    }

    let tick_target = Rc::downgrade(this);
    let on_tick = move |value: f32| {
        if let Some(this) = tick_target.upgrade() {
            let _ = try_update_diff(&this, value, true);
        }
    };
    let end_target = Rc::downgrade(this);
    let on_end = move || {
        if let Some(this) = end_target.upgrade() {
            set_overlay_input_transparent(&this, state);
        }
    };
    settle.start(start, end, duration_ms, SETTLE_EASING, on_tick, on_end);
}

fn set_overlay_input_transparent(this: &Rc<RefCell<MenuInner>>, state: MenuState) {
    let (surface, overlay) = {
        let inner = this.borrow();
        (inner.surface.clone(), inner.overlay)
    };
    if let Some(overlay) = overlay {
        surface
            .borrow_mut()
            .set_input_transparent(overlay, state == MenuState::Default);
    }
}

fn notify_state_listeners(this: &Rc<RefCell<MenuInner>>) {
    let (listeners, state) = {
        let inner = this.borrow();
        (inner.state_listeners.clone(), inner.state)
    };
    for listener in listeners.borrow().values() {
        listener(state);
    }
}

fn raise_child(this: &Rc<RefCell<MenuInner>>, child: ChildId) {
    let surface = {
        let mut inner = this.borrow_mut();
        inner.children.raise(child);
        inner.surface.clone()
    };
    surface.borrow_mut().raise(child);
}
