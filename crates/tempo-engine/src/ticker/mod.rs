//! Frame ticker.
//!
//! Drives a caller-supplied update function once per display refresh with a
//! clamped delta time. Intended usage:
//! - build one `FrameTicker` per simulation/animation loop
//! - `start()` when the loop should run, `stop()` to halt it

mod config;
mod frame_ticker;

pub use config::{DEFAULT_MAX_DELTA, TickerConfig};
pub use frame_ticker::FrameTicker;
