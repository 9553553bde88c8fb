use std::rc::Rc;

use super::queue::CallbackQueue;
use super::{FrameCallback, FrameScheduler, ScheduleHandle};
use crate::time::Timestamp;

/// Pending-callback queue owned by the window runtime.
///
/// Consumers schedule through `FrameScheduler`; the runtime asks
/// `has_pending()` to decide whether to request a redraw and calls
/// `run_frame()` when the redraw arrives.
#[derive(Clone, Default)]
pub struct RepaintQueue {
    queue: Rc<CallbackQueue>,
}

impl RepaintQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_pending(&self) -> bool {
        self.queue.len() > 0
    }

    pub(crate) fn run_frame(&self, now: Timestamp) -> usize {
        let ran = self.queue.run_frame(now);
        log::trace!("repaint frame at {:.3}ms ran {ran} callback(s)", now.as_millis_f64());
        ran
    }
}

impl FrameScheduler for RepaintQueue {
    fn schedule_before_repaint(&self, callback: FrameCallback) -> ScheduleHandle {
        self.queue.push(callback)
    }

    fn cancel(&self, handle: ScheduleHandle) {
        self.queue.remove(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn pending_tracks_schedule_and_cancel() {
        let q = RepaintQueue::new();
        assert!(!q.has_pending());

        let h = q.schedule_before_repaint(Box::new(|_| {}));
        assert!(q.has_pending());

        q.cancel(h);
        assert!(!q.has_pending());
    }

    #[test]
    fn run_frame_drains_queue() {
        let q = RepaintQueue::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        q.schedule_before_repaint(Box::new(move |_| h.set(h.get() + 1)));

        assert_eq!(q.run_frame(Timestamp::from_millis(8)), 1);
        assert_eq!(hits.get(), 1);
        assert!(!q.has_pending());
    }
}
