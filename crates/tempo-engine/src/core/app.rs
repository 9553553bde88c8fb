use winit::event::WindowEvent;

use super::ctx::HostCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called once, after the window exists. Start tickers here.
    fn on_start(&mut self, host: &HostCtx);

    /// Called for every window event, before the runtime handles it.
    fn on_window_event(&mut self, host: &HostCtx, event: &WindowEvent) -> AppControl {
        let _ = (host, event);
        AppControl::Continue
    }
}
