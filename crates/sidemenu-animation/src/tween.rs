//! Cancellable tween driver for the settle animation.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::easing::Easing;
use crate::frame_clock::{FrameCallbackRegistration, FrameClock};

struct TweenState {
    start_value: f32,
    end_value: f32,
    duration_nanos: u64,
    easing: Easing,
    /// Frame time of the first tick, captured lazily so the animation
    /// starts from whenever the host actually produces a frame.
    start_frame_time_nanos: Cell<Option<u64>>,
    is_running: Cell<bool>,
    /// Current frame callback registration, kept alive to continue ticking.
    registration: Option<FrameCallbackRegistration>,
}

/// Drives an eased `f32` interpolation via [`FrameClock`] callbacks.
///
/// Each frame the current value is delivered to `on_tick`; `on_end` fires
/// exactly once on natural completion. [`cancel`](Self::cancel) stops the
/// animation in place and suppresses `on_end` entirely, so no completion
/// side effects leak out of an aborted settle.
pub struct TweenAnimation {
    state: Rc<RefCell<Option<TweenState>>>,
    clock: FrameClock,
}

impl TweenAnimation {
    pub fn new(clock: FrameClock) -> Self {
        Self {
            state: Rc::new(RefCell::new(None)),
            clock,
        }
    }

    /// Starts animating from `from` to `to`, cancelling any animation in
    /// flight. A zero duration completes synchronously: one tick at the end
    /// value, then `on_end`.
    pub fn start<F, G>(
        &self,
        from: f32,
        to: f32,
        duration_ms: u64,
        easing: Easing,
        on_tick: F,
        on_end: G,
    ) where
        F: Fn(f32) + 'static,
        G: FnOnce() + 'static,
    {
        self.cancel();

        if duration_ms == 0 {
            on_tick(to);
            on_end();
            return;
        }

        *self.state.borrow_mut() = Some(TweenState {
            start_value: from,
            end_value: to,
            duration_nanos: duration_ms * 1_000_000,
            easing,
            start_frame_time_nanos: Cell::new(None),
            is_running: Cell::new(true),
            registration: None,
        });

        schedule_next_frame(self.state.clone(), self.clock.clone(), on_tick, on_end);
    }

    /// Stops the animation where it is. The completion callback is dropped
    /// without being invoked.
    pub fn cancel(&self) {
        if let Some(state) = self.state.borrow_mut().take() {
            state.is_running.set(false);
            drop(state.registration);
        }
    }

    pub fn is_running(&self) -> bool {
        self.state
            .borrow()
            .as_ref()
            .is_some_and(|state| state.is_running.get())
    }
}

impl Clone for TweenAnimation {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            clock: self.clock.clone(),
        }
    }
}

fn lerp(start: f32, end: f32, fraction: f32) -> f32 {
    start + (end - start) * fraction
}

fn schedule_next_frame<F, G>(
    state: Rc<RefCell<Option<TweenState>>>,
    clock: FrameClock,
    on_tick: F,
    on_end: G,
) where
    F: Fn(f32) + 'static,
    G: FnOnce() + 'static,
{
    let state_for_closure = state.clone();
    let clock_for_closure = clock.clone();
    let on_end = RefCell::new(Some(on_end));

    let registration = clock.with_frame_nanos(move |frame_time_nanos| {
        let step = {
            let state_guard = state_for_closure.borrow();
            let Some(tween) = state_guard.as_ref() else {
                return;
            };
            if !tween.is_running.get() {
                return;
            }

            let start_time = match tween.start_frame_time_nanos.get() {
                Some(value) => value,
                None => {
                    tween.start_frame_time_nanos.set(Some(frame_time_nanos));
                    frame_time_nanos
                }
            };
            let elapsed = frame_time_nanos.saturating_sub(start_time);
            let linear = (elapsed as f32 / tween.duration_nanos as f32).min(1.0);
            let value = lerp(
                tween.start_value,
                tween.end_value,
                tween.easing.transform(linear),
            );

            let finished = linear >= 1.0;
            if finished {
                tween.is_running.set(false);
            }
            (value, finished)
        };

        let (value, finished) = step;
        on_tick(value);

        if finished {
            *state_for_closure.borrow_mut() = None;
            if let Some(end_fn) = on_end.borrow_mut().take() {
                end_fn();
            }
        } else if let Some(end_fn) = on_end.borrow_mut().take() {
            schedule_next_frame(
                state_for_closure.clone(),
                clock_for_closure.clone(),
                on_tick,
                end_fn,
            );
        }
    });

    if let Some(tween) = state.borrow_mut().as_mut() {
        tween.registration = Some(registration);
    }
}
