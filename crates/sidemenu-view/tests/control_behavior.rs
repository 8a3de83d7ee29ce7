//! End-to-end behavior of the control against a mock surface, with frames
//! driven manually through the clock.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use sidemenu_view::{
    ChildConfig, ChildId, FrameClock, MenuLayoutSpec, MenuState, MenuSurface, PanEvent, PanPhase,
    SideMenuView, SwipeDirection,
};

const MAIN: ChildId = 1;
const LEFT: ChildId = 2;
const RIGHT: ChildId = 3;
const OVERLAY: ChildId = 4;

const MS: u64 = 1_000_000;

#[derive(Default)]
struct MockSurface {
    container_width: f32,
    widths: HashMap<ChildId, f32>,
    xs: HashMap<ChildId, f32>,
    translations: HashMap<ChildId, f32>,
    transparency: HashMap<ChildId, bool>,
    transparency_sets: Vec<(ChildId, bool)>,
    raised: Vec<ChildId>,
    lowered: Vec<ChildId>,
}

impl MenuSurface for MockSurface {
    fn container_width(&self) -> f32 {
        self.container_width
    }

    fn width(&self, child: ChildId) -> f32 {
        self.widths.get(&child).copied().unwrap_or(0.0)
    }

    fn x(&self, child: ChildId) -> f32 {
        self.xs.get(&child).copied().unwrap_or(0.0)
    }

    fn set_translation_x(&mut self, child: ChildId, translation: f32) {
        self.translations.insert(child, translation);
    }

    fn set_input_transparent(&mut self, child: ChildId, transparent: bool) {
        self.transparency.insert(child, transparent);
        self.transparency_sets.push((child, transparent));
    }

    fn raise(&mut self, child: ChildId) {
        self.raised.push(child);
    }

    fn lower(&mut self, child: ChildId) {
        self.lowered.push(child);
    }
}

/// Menu widths left=250, right=300, control width=800, menus not
/// overlapping.
fn standard_surface() -> Rc<RefCell<MockSurface>> {
    Rc::new(RefCell::new(MockSurface {
        container_width: 800.0,
        widths: HashMap::from([(MAIN, 800.0), (LEFT, 250.0), (RIGHT, 300.0), (OVERLAY, 800.0)]),
        xs: HashMap::from([(MAIN, 0.0), (LEFT, 0.0), (RIGHT, 500.0), (OVERLAY, 0.0)]),
        ..MockSurface::default()
    }))
}

fn standard_control() -> (SideMenuView, Rc<RefCell<MockSurface>>, FrameClock) {
    let surface = standard_surface();
    let clock = FrameClock::new();
    let dyn_surface: Rc<RefCell<dyn MenuSurface>> = surface.clone();
    let view = SideMenuView::new(dyn_surface, clock.clone());
    view.add_child(MAIN, ChildConfig::main());
    view.add_child(LEFT, ChildConfig::left_menu());
    view.add_child(RIGHT, ChildConfig::right_menu());
    view.attach_overlay(OVERLAY);
    (view, surface, clock)
}

/// Drains frames every 16ms over the given span.
fn pump(clock: &FrameClock, from_ms: u64, to_ms: u64) {
    let mut t = from_ms;
    while t <= to_ms {
        clock.drain_frame_callbacks(t * MS);
        t += 16;
    }
}

fn pan(view: &SideMenuView, phase: PanPhase, total_x: f32, total_y: f32, time_ms: i64) {
    view.on_pan_updated(PanEvent::at(phase, total_x, total_y, time_ms));
}

#[test]
fn drag_within_threshold_settles_back_to_default() {
    let (view, surface, clock) = standard_control();

    pan(&view, PanPhase::Start, 0.0, 0.0, 0);
    pan(&view, PanPhase::Move, 10.0, 0.0, 100);
    pan(&view, PanPhase::Move, 25.0, 0.0, 300);
    pan(&view, PanPhase::Move, 40.0, 0.0, 500);

    assert_eq!(view.offset(), 40.0);
    assert_eq!(view.gesture_offset(), 40.0);
    assert_eq!(view.preview_state(), MenuState::Default);

    pan(&view, PanPhase::End, 40.0, 0.0, 520);

    assert_eq!(view.state(), MenuState::Default);
    assert_eq!(view.gesture_offset(), 0.0);

    pump(&clock, 520, 600);
    assert_eq!(view.offset(), 0.0);
    assert!(!view.is_settling());
    let surface = surface.borrow();
    assert_eq!(surface.translations[&MAIN], 0.0);
    assert_eq!(surface.translations[&OVERLAY], 0.0);
    assert_eq!(surface.transparency[&OVERLAY], true);
}

#[test]
fn offset_never_exceeds_active_menu_width() {
    let (view, surface, _clock) = standard_control();

    pan(&view, PanPhase::Start, 0.0, 0.0, 0);
    pan(&view, PanPhase::Move, 1000.0, 0.0, 20);
    assert_eq!(view.offset(), 250.0);

    pan(&view, PanPhase::Move, -1000.0, 0.0, 40);
    assert_eq!(view.offset(), -300.0);

    let surface = surface.borrow();
    assert_eq!(surface.translations[&MAIN], -300.0);
}

#[test]
fn quick_fling_opens_left_menu_at_half_duration() {
    let (view, surface, clock) = standard_control();

    pan(&view, PanPhase::Start, 0.0, 0.0, 0);
    pan(&view, PanPhase::Move, 40.0, 0.0, 30);
    pan(&view, PanPhase::Move, 70.0, 0.0, 50);
    assert_eq!(view.preview_state(), MenuState::Default);

    pan(&view, PanPhase::End, 70.0, 0.0, 50);

    // 70 units in 50ms clears 17 * 50 / 60 = 14.2; the rightward fling
    // resolves to LeftShown even though the positional band was not crossed.
    assert_eq!(view.state(), MenuState::LeftShown);
    assert!(view.is_settling());

    // Full duration would be 350 * 180 / 800 = 78ms; the fling halves it to
    // 39ms, so 44ms of frame time completes the settle.
    clock.drain_frame_callbacks(60 * MS);
    clock.drain_frame_callbacks(104 * MS);

    assert!(!view.is_settling());
    assert_eq!(view.offset(), 250.0);
    let surface = surface.borrow();
    assert_eq!(surface.translations[&MAIN], 250.0);
    assert_eq!(surface.transparency[&OVERLAY], false);
}

#[test]
fn vertical_drag_aborts_without_state_change() {
    let (view, surface, clock) = standard_control();

    pan(&view, PanPhase::Start, 0.0, 0.0, 0);
    pan(&view, PanPhase::Move, 2.0, 10.0, 20);

    assert!(!view.gesture_in_progress());

    // Later samples of the abandoned gesture are ignored.
    pan(&view, PanPhase::Move, 50.0, 10.0, 40);
    assert_eq!(view.offset(), 0.0);

    pan(&view, PanPhase::End, 50.0, 10.0, 60);
    pump(&clock, 60, 200);
    assert_eq!(view.state(), MenuState::Default);
    assert_eq!(view.offset(), 0.0);
    // Only the attach-time overlay setup touched input transparency.
    assert_eq!(surface.borrow().transparency_sets.len(), 1);
}

#[test]
fn sub_threshold_motion_never_resolves_direction() {
    let (view, _surface, _clock) = standard_control();

    pan(&view, PanPhase::Start, 0.0, 0.0, 0);
    pan(&view, PanPhase::Move, 0.5, 0.5, 10);
    pan(&view, PanPhase::Move, 0.8, 0.9, 20);
    pan(&view, PanPhase::Move, 1.0, 1.0, 30);

    // Nothing crossed the cancel threshold, so the gesture neither locked
    // horizontal nor aborted.
    assert!(view.gesture_in_progress());
}

#[test]
fn release_past_threshold_adopts_preview_state() {
    let (view, _surface, clock) = standard_control();

    // Slow drag: the sample window is stale, so only the positional
    // threshold can decide.
    pan(&view, PanPhase::Start, 0.0, 0.0, 0);
    pan(&view, PanPhase::Move, 50.0, 0.0, 1000);
    pan(&view, PanPhase::Move, 100.0, 0.0, 3000);
    assert_eq!(view.preview_state(), MenuState::LeftShown);

    pan(&view, PanPhase::End, 100.0, 0.0, 3100);
    assert_eq!(view.state(), MenuState::LeftShown);

    pump(&clock, 3100, 3400);
    assert_eq!(view.offset(), 250.0);
}

#[test]
fn external_set_state_animates_to_menu_width() {
    let (view, surface, clock) = standard_control();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    view.add_state_listener(move |state| sink.borrow_mut().push(state));

    view.set_state(MenuState::RightShown);
    assert_eq!(view.state(), MenuState::RightShown);
    assert!(view.is_settling());

    pump(&clock, 0, 200);
    assert_eq!(view.offset(), -300.0);
    assert_eq!(surface.borrow().translations[&MAIN], -300.0);
    assert_eq!(surface.borrow().transparency[&OVERLAY], false);
    assert_eq!(seen.borrow().as_slice(), &[MenuState::RightShown]);
}

#[test]
fn new_gesture_cancels_settle_without_completion_side_effect() {
    let (view, surface, clock) = standard_control();

    view.set_state(MenuState::LeftShown);
    clock.drain_frame_callbacks(0);
    clock.drain_frame_callbacks(16 * MS);
    let mid_flight = view.offset();
    assert!(mid_flight > 0.0 && mid_flight < 250.0);
    let transparency_sets_before = surface.borrow().transparency_sets.len();

    // A drag arrives mid-animation and takes over.
    pan(&view, PanPhase::Start, 0.0, 0.0, 100);
    pan(&view, PanPhase::Move, 5.0, 0.0, 110);
    assert_eq!(view.offset(), mid_flight + 5.0);

    pump(&clock, 120, 600);

    // The cancelled animation neither ticked again nor fired completion.
    assert_eq!(view.offset(), mid_flight + 5.0);
    assert!(!view.is_settling());
    assert_eq!(
        surface.borrow().transparency_sets.len(),
        transparency_sets_before
    );
    assert_eq!(view.state(), MenuState::LeftShown);
}

#[test]
fn gesture_disabled_menu_rejects_updates() {
    let (view, surface, _clock) = standard_control();
    view.remove_child(LEFT);
    view.add_child(LEFT, ChildConfig::left_menu().with_gesture_enabled(false));

    pan(&view, PanPhase::Start, 0.0, 0.0, 0);
    pan(&view, PanPhase::Move, 40.0, 0.0, 500);
    assert_eq!(view.offset(), 0.0);
    assert!(!surface.borrow().translations.contains_key(&MAIN));
    pan(&view, PanPhase::End, 40.0, 0.0, 520);
    assert_eq!(view.state(), MenuState::Default);

    // The right side is unaffected.
    pan(&view, PanPhase::Start, 0.0, 0.0, 600);
    pan(&view, PanPhase::Move, -50.0, 0.0, 620);
    assert_eq!(view.offset(), -50.0);
}

#[test]
fn set_state_to_current_value_still_recenters() {
    let (view, _surface, clock) = standard_control();

    pan(&view, PanPhase::Start, 0.0, 0.0, 0);
    pan(&view, PanPhase::Move, 40.0, 0.0, 20);
    assert_eq!(view.offset(), 40.0);

    // State is already Default; the set must still settle the offset home.
    view.set_state(MenuState::Default);
    assert!(view.is_settling());
    pump(&clock, 30, 120);
    assert_eq!(view.offset(), 0.0);
}

#[test]
fn overlay_tap_closes_open_menu() {
    let (view, surface, clock) = standard_control();

    view.set_state(MenuState::LeftShown);
    pump(&clock, 0, 200);
    assert_eq!(view.offset(), 250.0);
    assert_eq!(surface.borrow().transparency[&OVERLAY], false);

    view.on_overlay_tapped();
    assert_eq!(view.state(), MenuState::Default);
    pump(&clock, 300, 500);
    assert_eq!(view.offset(), 0.0);
    assert_eq!(surface.borrow().transparency[&OVERLAY], true);
}

#[test]
fn layout_pass_raises_main_and_overlay() {
    let (view, surface, _clock) = standard_control();

    view.on_layout_pass();
    assert_eq!(surface.borrow().raised, vec![MAIN, OVERLAY]);
}

#[test]
fn removing_a_menu_disables_that_side() {
    let (view, _surface, _clock) = standard_control();
    view.remove_child(LEFT);

    pan(&view, PanPhase::Start, 0.0, 0.0, 0);
    pan(&view, PanPhase::Move, 40.0, 0.0, 500);
    assert_eq!(view.offset(), 0.0);
    pan(&view, PanPhase::End, 40.0, 0.0, 520);

    // The other side still has its menu.
    pan(&view, PanPhase::Start, 0.0, 0.0, 600);
    pan(&view, PanPhase::Move, -40.0, 0.0, 620);
    assert_eq!(view.offset(), -40.0);
}

#[test]
fn overlapping_menus_get_reordered_below_the_active_one() {
    let surface = Rc::new(RefCell::new(MockSurface {
        container_width: 800.0,
        widths: HashMap::from([(MAIN, 800.0), (LEFT, 600.0), (RIGHT, 300.0), (OVERLAY, 800.0)]),
        xs: HashMap::from([(MAIN, 0.0), (LEFT, 0.0), (RIGHT, 500.0), (OVERLAY, 0.0)]),
        ..MockSurface::default()
    }));
    let clock = FrameClock::new();
    let dyn_surface: Rc<RefCell<dyn MenuSurface>> = surface.clone();
    let view = SideMenuView::new(dyn_surface, clock);
    view.add_child(MAIN, ChildConfig::main());
    view.add_child(LEFT, ChildConfig::left_menu());
    view.add_child(RIGHT, ChildConfig::right_menu());
    view.attach_overlay(OVERLAY);

    // left.x + left.width = 600 > right.x = 500: the menus overlap, and the
    // inactive one was registered above the active one.
    pan(&view, PanPhase::Start, 0.0, 0.0, 0);
    pan(&view, PanPhase::Move, 40.0, 0.0, 20);
    assert_eq!(surface.borrow().lowered, vec![RIGHT]);

    // Dragging the other way flips active/inactive and lowers the left menu.
    pan(&view, PanPhase::Move, -40.0, 0.0, 40);
    assert_eq!(surface.borrow().lowered, vec![RIGHT, LEFT]);
}

#[test]
fn swipe_signal_opens_menu_after_one_frame() {
    let (view, _surface, clock) = standard_control();

    view.on_swiped(SwipeDirection::Right);
    assert_eq!(view.state(), MenuState::Default);

    clock.drain_frame_callbacks(0);
    assert_eq!(view.state(), MenuState::LeftShown);

    pump(&clock, 16, 200);
    assert_eq!(view.offset(), 250.0);
}

#[test]
fn pan_start_preempts_a_pending_swipe() {
    let (view, _surface, clock) = standard_control();

    view.on_swiped(SwipeDirection::Right);
    pan(&view, PanPhase::Start, 0.0, 0.0, 0);

    pump(&clock, 0, 100);
    assert_eq!(view.state(), MenuState::Default);
    assert!(view.gesture_in_progress());
}

#[test]
fn end_totals_fold_into_release_when_enabled() {
    let (view, _surface, clock) = standard_control();

    // Off by default: the End totals are not replayed as a move.
    pan(&view, PanPhase::Start, 0.0, 0.0, 0);
    pan(&view, PanPhase::End, 200.0, 0.0, 30);
    assert_eq!(view.state(), MenuState::Default);
    assert_eq!(view.offset(), 0.0);

    view.set_update_on_end(true);
    pan(&view, PanPhase::Start, 0.0, 0.0, 100);
    pan(&view, PanPhase::End, 200.0, 0.0, 130);
    assert_eq!(view.state(), MenuState::LeftShown);
    pump(&clock, 140, 300);
    assert_eq!(view.offset(), 250.0);

    // Cancel takes the same path.
    pan(&view, PanPhase::Start, 0.0, 0.0, 600);
    pan(&view, PanPhase::Cancel, -600.0, 0.0, 630);
    assert_eq!(view.state(), MenuState::RightShown);
    assert_eq!(view.offset(), -300.0);
}

#[test]
fn layout_spec_derives_from_attached_config() {
    let (view, _surface, _clock) = standard_control();
    view.remove_child(LEFT);
    view.add_child(LEFT, ChildConfig::left_menu().with_menu_width_percentage(0.4));

    assert_eq!(view.layout_spec(MAIN), Some(MenuLayoutSpec::Fill));
    assert_eq!(view.layout_spec(OVERLAY), Some(MenuLayoutSpec::Fill));
    assert_eq!(
        view.layout_spec(LEFT),
        Some(MenuLayoutSpec::Menu {
            anchor_x: 0.0,
            width_fraction: Some(0.4),
        })
    );
    // The default negative percentage means size to content.
    assert_eq!(
        view.layout_spec(RIGHT),
        Some(MenuLayoutSpec::Menu {
            anchor_x: 1.0,
            width_fraction: None,
        })
    );
    assert_eq!(view.layout_spec(99), None);
}

#[test]
fn swipe_with_menu_open_only_closes_it() {
    let (view, _surface, clock) = standard_control();
    view.set_state(MenuState::LeftShown);
    pump(&clock, 0, 200);

    // Leftward swipe closes the open left menu.
    view.on_swiped(SwipeDirection::Left);
    pump(&clock, 300, 500);
    assert_eq!(view.state(), MenuState::Default);
    assert_eq!(view.offset(), 0.0);

    // Rightward swipe from LeftShown keeps it shown rather than opening the
    // right menu.
    view.set_state(MenuState::LeftShown);
    pump(&clock, 600, 800);
    view.on_swiped(SwipeDirection::Right);
    pump(&clock, 900, 1000);
    assert_eq!(view.state(), MenuState::LeftShown);
    assert_eq!(view.offset(), 250.0);
}
