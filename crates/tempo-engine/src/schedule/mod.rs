//! Repaint scheduling.
//!
//! The "invoke before next repaint" primitive is modelled as an injected
//! capability rather than a process-wide queue:
//! - `FrameScheduler` is what consumers (the ticker) depend on
//! - `ManualScheduler` fires frames on demand (tests, headless stepping)
//! - `RepaintQueue` is drained by the window runtime on every redraw

mod manual;
mod queue;
mod repaint;

pub use manual::ManualScheduler;
pub use repaint::RepaintQueue;

use std::rc::Rc;

use crate::time::Timestamp;

/// Callback run once, before the next repaint, with that frame's timestamp.
pub type FrameCallback = Box<dyn FnOnce(Timestamp)>;

/// Opaque id of a pending frame callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ScheduleHandle(u64);

impl ScheduleHandle {
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub(crate) const fn raw(self) -> u64 {
        self.0
    }
}

/// Host primitive for running work in step with display refresh.
pub trait FrameScheduler {
    /// Queues `callback` to run before the next repaint.
    fn schedule_before_repaint(&self, callback: FrameCallback) -> ScheduleHandle;

    /// Drops a pending callback without running it.
    ///
    /// Unknown or already-fired handles are ignored.
    fn cancel(&self, handle: ScheduleHandle);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for Rc<S> {
    fn schedule_before_repaint(&self, callback: FrameCallback) -> ScheduleHandle {
        (**self).schedule_before_repaint(callback)
    }

    fn cancel(&self, handle: ScheduleHandle) {
        (**self).cancel(handle)
    }
}
