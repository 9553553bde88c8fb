use std::rc::Rc;

use super::queue::CallbackQueue;
use super::{FrameCallback, FrameScheduler, ScheduleHandle};
use crate::time::Timestamp;

/// Scheduler whose frames are fired explicitly.
///
/// Clones share the same queue, so one clone can be handed to a ticker while
/// another drives frames.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<CallbackQueue>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires one frame at `now`; returns how many callbacks ran.
    pub fn advance_frame(&self, now: Timestamp) -> usize {
        self.queue.run_frame(now)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule_before_repaint(&self, callback: FrameCallback) -> ScheduleHandle {
        self.queue.push(callback)
    }

    fn cancel(&self, handle: ScheduleHandle) {
        self.queue.remove(handle);
    }
}
