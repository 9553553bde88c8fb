//! Tempo engine crate.
//!
//! Frame-paced update driving: a `FrameTicker` that calls back once per
//! display refresh, the host capabilities it runs on (clock + repaint
//! scheduler), and a `winit` runtime that provides those capabilities.

pub mod time;
pub mod schedule;
pub mod ticker;
pub mod core;
pub mod window;

pub mod logging;
