use std::cell::RefCell;
use std::collections::VecDeque;

use super::{FrameCallback, ScheduleHandle};
use crate::time::Timestamp;

struct Entry {
    handle: ScheduleHandle,
    callback: FrameCallback,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    entries: VecDeque<Entry>,
}

/// Ordered list of pending frame callbacks.
///
/// Handles are issued in increasing order, so `entries` stays sorted by
/// handle and a frame can be bounded by the first id it must not run.
#[derive(Default)]
pub(super) struct CallbackQueue {
    inner: RefCell<Inner>,
}

impl CallbackQueue {
    pub(super) fn push(&self, callback: FrameCallback) -> ScheduleHandle {
        let mut inner = self.inner.borrow_mut();
        let handle = ScheduleHandle::from_raw(inner.next_id);
        inner.next_id = inner.next_id.wrapping_add(1);
        inner.entries.push_back(Entry { handle, callback });
        handle
    }

    pub(super) fn remove(&self, handle: ScheduleHandle) -> bool {
        let mut inner = self.inner.borrow_mut();
        match inner.entries.iter().position(|e| e.handle == handle) {
            Some(idx) => {
                inner.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    pub(super) fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Runs every callback queued before this call, in order.
    ///
    /// Callbacks queued while the frame runs wait for the next frame.
    /// Callbacks cancelled while the frame runs are skipped. The queue is
    /// never borrowed while a callback executes, so callbacks may schedule
    /// and cancel freely.
    pub(super) fn run_frame(&self, now: Timestamp) -> usize {
        let cutoff = self.inner.borrow().next_id;
        let mut ran = 0;

        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                match inner.entries.front() {
                    Some(e) if e.handle.raw() < cutoff => inner.entries.pop_front(),
                    _ => None,
                }
            };

            let Some(entry) = next else {
                break;
            };

            (entry.callback)(now);
            ran += 1;
        }

        ran
    }
}
