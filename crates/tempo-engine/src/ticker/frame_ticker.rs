use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::schedule::{FrameScheduler, ScheduleHandle};
use crate::time::{Clock, Timestamp};

use super::TickerConfig;

type UpdateFn = Box<dyn FnMut(Duration)>;

#[derive(Debug, Copy, Clone)]
struct TickerState {
    /// Time of the previous tick, or of the last `start()`.
    last_timestamp: Timestamp,

    /// Pending tick. Present iff running and a tick is scheduled but unfired.
    active_handle: Option<ScheduleHandle>,

    /// Bumped on every `start()`; callbacks carry the run they belong to.
    run: u64,

    running: bool,
}

struct Shared<S: FrameScheduler, C: Clock> {
    scheduler: S,
    clock: C,
    config: TickerConfig,
    state: RefCell<TickerState>,
    on_update: RefCell<UpdateFn>,
}

/// Calls an update function once per display refresh.
///
/// Each tick receives the time elapsed since the previous tick (or since
/// `start()` for the first one), clamped to `TickerConfig::max_delta`.
///
/// `FrameTicker` is a cheap handle; clones drive the same loop. The loop
/// lives as long as at least one handle does: dropping the last one cancels
/// the pending tick.
///
/// Single-threaded: ticks run on the scheduler's thread and never overlap.
/// A panic in the update function propagates to whoever fired the frame and
/// leaves the ticker stopped.
pub struct FrameTicker<S: FrameScheduler + 'static, C: Clock + 'static> {
    shared: Rc<Shared<S, C>>,
}

impl<S: FrameScheduler + 'static, C: Clock + 'static> Clone for FrameTicker<S, C> {
    fn clone(&self) -> Self {
        Self { shared: self.shared.clone() }
    }
}

impl<S: FrameScheduler + 'static, C: Clock + 'static> FrameTicker<S, C> {
    /// Creates a stopped ticker with the default 100 ms delta clamp.
    pub fn new<F>(scheduler: S, clock: C, on_update: F) -> Self
    where
        F: FnMut(Duration) + 'static,
    {
        Self::with_config(scheduler, clock, TickerConfig::default(), on_update)
    }

    pub fn with_config<F>(scheduler: S, clock: C, config: TickerConfig, on_update: F) -> Self
    where
        F: FnMut(Duration) + 'static,
    {
        let last_timestamp = clock.now();
        Self {
            shared: Rc::new(Shared {
                scheduler,
                clock,
                config,
                state: RefCell::new(TickerState {
                    last_timestamp,
                    active_handle: None,
                    run: 0,
                    running: false,
                }),
                on_update: RefCell::new(Box::new(on_update)),
            }),
        }
    }

    /// Resets the time baseline and schedules the first tick.
    ///
    /// Restarting a running ticker cancels its pending tick first, so there
    /// is only ever one tick chain.
    pub fn start(&self) {
        let (stale, run) = {
            let mut st = self.shared.state.borrow_mut();
            st.run = st.run.wrapping_add(1);
            st.running = true;
            st.last_timestamp = self.shared.clock.now();
            (st.active_handle.take(), st.run)
        };

        if let Some(handle) = stale {
            self.shared.scheduler.cancel(handle);
            log::debug!("ticker restarted; cancelled pending tick {handle:?}");
        }

        let handle = Shared::schedule_tick(&self.shared, run);
        self.shared.state.borrow_mut().active_handle = Some(handle);

        log::debug!("ticker started (run {run})");
    }

    /// Cancels the pending tick. No-op when already stopped.
    ///
    /// Calling this from inside the update function ends the loop after the
    /// current tick.
    pub fn stop(&self) {
        let (was_running, pending) = {
            let mut st = self.shared.state.borrow_mut();
            let was_running = st.running;
            st.running = false;
            (was_running, st.active_handle.take())
        };

        if let Some(handle) = pending {
            self.shared.scheduler.cancel(handle);
        }

        if was_running {
            log::debug!("ticker stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.shared.state.borrow().running
    }

    /// True when a tick is scheduled and has not fired yet.
    pub fn has_pending_tick(&self) -> bool {
        self.shared.state.borrow().active_handle.is_some()
    }

    pub fn last_timestamp(&self) -> Timestamp {
        self.shared.state.borrow().last_timestamp
    }

    pub fn config(&self) -> TickerConfig {
        self.shared.config
    }
}

impl<S: FrameScheduler + 'static, C: Clock + 'static> Shared<S, C> {
    fn schedule_tick(this: &Rc<Self>, run: u64) -> ScheduleHandle {
        let weak: Weak<Self> = Rc::downgrade(this);
        this.scheduler.schedule_before_repaint(Box::new(move |now| {
            if let Some(shared) = weak.upgrade() {
                Self::tick(&shared, run, now);
            }
        }))
    }

    fn tick(this: &Rc<Self>, run: u64, now: Timestamp) {
        let dt = {
            let mut st = this.state.borrow_mut();

            // Stale chain, or the host fired a callback we already cancelled.
            if !st.running || st.run != run {
                return;
            }

            st.active_handle = None;

            let raw = now.saturating_since(st.last_timestamp);
            st.last_timestamp = now;

            if raw > this.config.max_delta {
                log::trace!("tick delta {raw:?} clamped to {:?}", this.config.max_delta);
                this.config.max_delta
            } else {
                raw
            }
        };

        log::trace!("tick at {:.3}ms dt={dt:?}", now.as_millis_f64());

        {
            let unwind = EndRunOnUnwind { state: &this.state, run, armed: true };
            let mut on_update = this.on_update.borrow_mut();
            (*on_update)(dt);
            unwind.disarm();
        }

        // The update function may have stopped or restarted the ticker.
        let still_current = {
            let st = this.state.borrow();
            st.running && st.run == run
        };
        if !still_current {
            return;
        }

        let handle = Self::schedule_tick(this, run);
        this.state.borrow_mut().active_handle = Some(handle);
    }
}

/// Marks the run as stopped if the update function unwinds, since no
/// further tick will be scheduled for it.
struct EndRunOnUnwind<'a> {
    state: &'a RefCell<TickerState>,
    run: u64,
    armed: bool,
}

impl EndRunOnUnwind<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for EndRunOnUnwind<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Ok(mut st) = self.state.try_borrow_mut() {
            if st.run == self.run {
                st.running = false;
                st.active_handle = None;
            }
        }
    }
}

impl<S: FrameScheduler, C: Clock> Drop for Shared<S, C> {
    fn drop(&mut self) {
        if let Some(handle) = self.state.get_mut().active_handle.take() {
            self.scheduler.cancel(handle);
        }
    }
}
