use std::time::Duration;

/// Largest delta handed to the update callback by default.
pub const DEFAULT_MAX_DELTA: Duration = Duration::from_millis(100);

/// Ticker configuration.
///
/// `max_delta` bounds the elapsed time reported for one tick, so a
/// backgrounded window or a long stall between frames does not turn into a
/// single huge simulation step.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TickerConfig {
    pub max_delta: Duration,
}

impl TickerConfig {
    pub fn with_max_delta(mut self, max_delta: Duration) -> Self {
        self.max_delta = max_delta;
        self
    }
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self { max_delta: DEFAULT_MAX_DELTA }
    }
}
