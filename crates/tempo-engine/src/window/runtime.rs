use anyhow::{Context, Result};
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, HostCtx};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,

    /// Frame pacing used when the monitor does not report a refresh rate.
    pub fallback_refresh_millihertz: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "tempo".to_string(),
            initial_size: LogicalSize::new(640.0, 360.0),
            fallback_refresh_millihertz: 60_000,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    app: A,
    host: HostCtx,

    window: Option<Window>,
    started: bool,

    frame_interval: Duration,
    next_frame: Instant,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, app: A) -> Self {
        let frame_interval = frame_interval_for(config.fallback_refresh_millihertz);
        Self {
            config,
            app,
            host: HostCtx::new(),
            window: None,
            started: false,
            frame_interval,
            next_frame: Instant::now(),
            exit_requested: false,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let refresh = window
            .current_monitor()
            .and_then(|m| m.refresh_rate_millihertz())
            .unwrap_or(self.config.fallback_refresh_millihertz);
        self.frame_interval = frame_interval_for(refresh);

        log::info!(
            "window ready; pacing frames at {:.2} Hz",
            refresh as f64 / 1000.0
        );

        self.window = Some(window);
        Ok(())
    }

    fn sync_exit(&mut self, event_loop: &ActiveEventLoop) {
        if self.host.exit_requested() {
            self.request_exit();
        }
        if self.exit_requested {
            event_loop.exit();
        }
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        self.next_frame = now + self.frame_interval;
        self.host.run_frame(now);
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.create_window(event_loop) {
                log::error!("failed to create initial window: {e:#}");
                self.request_exit();
                event_loop.exit();
                return;
            }
        }

        if !self.started {
            self.started = true;
            self.app.on_start(&self.host);
        }

        self.sync_exit(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.sync_exit(event_loop);
        if self.exit_requested {
            return;
        }

        // Idle until something schedules frame work.
        if !self.host.has_pending_frame_work() {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        }

        if Instant::now() >= self.next_frame {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
            event_loop.set_control_flow(ControlFlow::Wait);
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.window.as_ref().map(|w| w.id()) != Some(window_id) {
            return;
        }

        if self.app.on_window_event(&self.host, &event) == AppControl::Exit {
            self.request_exit();
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.window = None;
                self.request_exit();
            }

            WindowEvent::RedrawRequested => self.redraw(),

            _ => {}
        }

        self.sync_exit(event_loop);
    }
}

fn frame_interval_for(refresh_millihertz: u32) -> Duration {
    // Guard against monitors reporting zero.
    let mhz = refresh_millihertz.max(1_000);
    Duration::from_secs_f64(1000.0 / mhz as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_hz_interval() {
        let d = frame_interval_for(60_000);
        assert!((d.as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn zero_refresh_falls_back_to_one_hz() {
        assert_eq!(frame_interval_for(0), Duration::from_secs(1));
    }
}
