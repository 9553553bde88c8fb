use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::schedule::RepaintQueue;
use crate::ticker::{FrameTicker, TickerConfig};
use crate::time::MonotonicClock;

/// Ticker type produced by the window runtime.
pub type HostTicker = FrameTicker<RepaintQueue, MonotonicClock>;

/// Host capabilities handed to the application.
///
/// Cheap to clone; clones refer to the same repaint queue and clock.
#[derive(Clone)]
pub struct HostCtx {
    queue: RepaintQueue,
    clock: MonotonicClock,
    exit_requested: Rc<Cell<bool>>,
}

impl HostCtx {
    pub(crate) fn new() -> Self {
        Self {
            queue: RepaintQueue::new(),
            clock: MonotonicClock::new(),
            exit_requested: Rc::new(Cell::new(false)),
        }
    }

    pub fn scheduler(&self) -> RepaintQueue {
        self.queue.clone()
    }

    pub fn clock(&self) -> MonotonicClock {
        self.clock
    }

    /// Builds a stopped ticker paced by this host's repaints.
    pub fn ticker<F>(&self, on_update: F) -> HostTicker
    where
        F: FnMut(Duration) + 'static,
    {
        FrameTicker::new(self.scheduler(), self.clock, on_update)
    }

    pub fn ticker_with_config<F>(&self, config: TickerConfig, on_update: F) -> HostTicker
    where
        F: FnMut(Duration) + 'static,
    {
        FrameTicker::with_config(self.scheduler(), self.clock, config, on_update)
    }

    /// Asks the runtime to exit after the current callback returns.
    pub fn exit(&self) {
        self.exit_requested.set(true);
    }

    pub(crate) fn exit_requested(&self) -> bool {
        self.exit_requested.get()
    }

    pub(crate) fn has_pending_frame_work(&self) -> bool {
        self.queue.has_pending()
    }

    /// Runs one repaint's worth of callbacks, stamped with `at`.
    pub(crate) fn run_frame(&self, at: Instant) -> usize {
        self.queue.run_frame(self.clock.timestamp_of(at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Clock;
    use std::cell::RefCell;

    #[test]
    fn host_ticker_runs_on_host_frames() {
        let host = HostCtx::new();
        let deltas = Rc::new(RefCell::new(Vec::new()));
        let sink = deltas.clone();
        let ticker = host.ticker(move |dt| sink.borrow_mut().push(dt));

        assert!(!host.has_pending_frame_work());
        ticker.start();
        assert!(host.has_pending_frame_work());

        let base = Instant::now();
        host.run_frame(base + Duration::from_millis(500));

        assert_eq!(deltas.borrow().len(), 1);
        assert!(deltas.borrow()[0] <= Duration::from_millis(100));
        assert!(host.has_pending_frame_work());

        ticker.stop();
        assert!(!host.has_pending_frame_work());
    }

    #[test]
    fn exit_is_shared_between_clones() {
        let host = HostCtx::new();
        let clone = host.clone();
        assert!(!host.exit_requested());

        clone.exit();
        assert!(host.exit_requested());
    }

    #[test]
    fn host_clock_is_monotonic() {
        let host = HostCtx::new();
        let a = host.clock().now();
        let b = host.clock().now();
        assert!(b >= a);
    }
}
