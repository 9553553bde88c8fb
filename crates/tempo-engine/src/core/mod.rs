//! Core engine-facing contracts.
//!
//! The interface between the runtime (platform loop) and applications:
//! the `App` callbacks and the `HostCtx` through which an app reaches the
//! host's clock and repaint scheduler.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{HostCtx, HostTicker};
