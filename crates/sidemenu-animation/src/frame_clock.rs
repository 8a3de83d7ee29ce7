//! One-shot frame callback scheduling.
//!
//! The embedding host owns the actual frame source (vsync, a timer, a test
//! loop) and calls [`FrameClock::drain_frame_callbacks`] once per frame.
//! Callbacks registered during a drain run on the next frame, not the
//! current one.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};

pub type FrameCallbackId = u64;

type FrameCallback = Box<dyn FnOnce(u64)>;

#[derive(Default)]
struct ClockInner {
    next_id: FrameCallbackId,
    callbacks: Vec<(FrameCallbackId, FrameCallback)>,
    /// Ids cancelled after their batch was already taken for draining.
    cancelled_in_flight: HashSet<FrameCallbackId>,
}

/// Single-threaded frame callback registry.
#[derive(Clone, Default)]
pub struct FrameClock {
    inner: Rc<RefCell<ClockInner>>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback for the next frame. Dropping the returned
    /// registration cancels it.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.callbacks.push((id, Box::new(callback)));
        FrameCallbackRegistration {
            clock: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    /// Runs all callbacks registered before this call with the given frame
    /// time. Callbacks may register new callbacks and may cancel other
    /// callbacks in the same batch.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        let batch = std::mem::take(&mut self.inner.borrow_mut().callbacks);
        for (id, callback) in batch {
            let cancelled = self.inner.borrow_mut().cancelled_in_flight.remove(&id);
            if !cancelled {
                callback(frame_time_nanos);
            }
        }
        self.inner.borrow_mut().cancelled_in_flight.clear();
    }

    pub fn has_pending_callbacks(&self) -> bool {
        !self.inner.borrow().callbacks.is_empty()
    }
}

/// Handle to a registered frame callback. Cancels on drop.
pub struct FrameCallbackRegistration {
    clock: Weak<RefCell<ClockInner>>,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let (Some(inner), Some(id)) = (self.clock.upgrade(), self.id.take()) else {
            return;
        };
        let mut inner = inner.borrow_mut();
        let len_before = inner.callbacks.len();
        inner.callbacks.retain(|(pending, _)| *pending != id);
        if inner.callbacks.len() == len_before {
            // Not in the pending list: either already run, or taken into a
            // batch that is draining right now. Record the id so the drain
            // skips it.
            inner.cancelled_in_flight.insert(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn drain_runs_registered_callbacks_with_frame_time() {
        let clock = FrameClock::new();
        let seen = Rc::new(Cell::new(0u64));
        let seen_in_cb = Rc::clone(&seen);
        let registration = clock.with_frame_nanos(move |t| seen_in_cb.set(t));

        clock.drain_frame_callbacks(16_000_000);
        assert_eq!(seen.get(), 16_000_000);
        drop(registration);
    }

    #[test]
    fn cancelled_registration_never_runs() {
        let clock = FrameClock::new();
        let ran = Rc::new(Cell::new(false));
        let ran_in_cb = Rc::clone(&ran);
        let registration = clock.with_frame_nanos(move |_| ran_in_cb.set(true));
        registration.cancel();

        clock.drain_frame_callbacks(0);
        assert!(!ran.get());
        assert!(!clock.has_pending_callbacks());
    }

    #[test]
    fn callbacks_registered_during_drain_wait_for_next_frame() {
        let clock = FrameClock::new();
        let count = Rc::new(Cell::new(0u32));

        let clock_in_cb = clock.clone();
        let count_outer = Rc::clone(&count);
        let registration = clock.with_frame_nanos(move |_| {
            count_outer.set(count_outer.get() + 1);
            let count_inner = Rc::clone(&count_outer);
            // Leak the inner registration so dropping it does not cancel.
            std::mem::forget(
                clock_in_cb.with_frame_nanos(move |_| count_inner.set(count_inner.get() + 1)),
            );
        });
        std::mem::forget(registration);

        clock.drain_frame_callbacks(0);
        assert_eq!(count.get(), 1);
        clock.drain_frame_callbacks(1);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn cancelling_within_the_draining_batch_skips_it() {
        let clock = FrameClock::new();
        let ran = Rc::new(Cell::new(false));
        let ran_in_cb = Rc::clone(&ran);
        let victim = Rc::new(RefCell::new(None::<FrameCallbackRegistration>));

        let victim_in_cb = Rc::clone(&victim);
        let canceller = clock.with_frame_nanos(move |_| {
            victim_in_cb.borrow_mut().take();
        });
        std::mem::forget(canceller);
        *victim.borrow_mut() = Some(clock.with_frame_nanos(move |_| ran_in_cb.set(true)));

        clock.drain_frame_callbacks(0);
        assert!(!ran.get());
    }
}
