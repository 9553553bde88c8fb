//! Time subsystem.
//!
//! Monotonic timestamps and the clock capability the ticker reads from.
//! - `MonotonicClock` for real hosts
//! - `ManualClock` for tests and headless stepping

mod clock;
mod timestamp;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use timestamp::Timestamp;
