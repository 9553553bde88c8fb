//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and turns redraws into repaint
//! callbacks for the application's tickers.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
