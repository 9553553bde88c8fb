use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use tempo_engine::core::{App, AppControl, HostCtx, HostTicker};
use tempo_engine::logging::{LoggingConfig, init_logging};
use tempo_engine::ticker::DEFAULT_MAX_DELTA;
use tempo_engine::window::{Runtime, RuntimeConfig};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};

/// Rolling frame statistics, reported once per simulated second.
#[derive(Debug, Default)]
struct FrameStats {
    frames: u32,
    /// Frames whose delta hit the ticker's cap (clamped or exactly at it).
    at_cap: u32,
    window: Duration,
    sim_time: Duration,
}

impl FrameStats {
    fn record(&mut self, dt: Duration) {
        self.frames += 1;
        self.window += dt;
        self.sim_time += dt;
        if dt == DEFAULT_MAX_DELTA {
            self.at_cap += 1;
        }

        if self.window >= Duration::from_secs(1) {
            let secs = self.window.as_secs_f64();
            log::info!(
                "{:>6.1} fps  avg dt {:>6.2}ms  at cap {}  sim {:.1}s",
                self.frames as f64 / secs,
                secs * 1000.0 / self.frames as f64,
                self.at_cap,
                self.sim_time.as_secs_f64(),
            );
            self.frames = 0;
            self.at_cap = 0;
            self.window = Duration::ZERO;
        }
    }
}

#[derive(Default)]
struct Studio {
    ticker: Option<HostTicker>,
    stats: Rc<RefCell<FrameStats>>,
}

impl Studio {
    fn toggle(&self) {
        let Some(ticker) = &self.ticker else {
            return;
        };

        if ticker.is_running() {
            ticker.stop();
            log::info!("paused");
        } else {
            ticker.start();
            log::info!("resumed");
        }
    }
}

impl App for Studio {
    fn on_start(&mut self, host: &HostCtx) {
        let stats = self.stats.clone();
        let ticker = host.ticker(move |dt| stats.borrow_mut().record(dt));
        ticker.start();
        self.ticker = Some(ticker);
    }

    fn on_window_event(&mut self, host: &HostCtx, event: &WindowEvent) -> AppControl {
        let WindowEvent::KeyboardInput { event, .. } = event else {
            return AppControl::Continue;
        };
        if event.state != ElementState::Pressed || event.repeat {
            return AppControl::Continue;
        }

        match &event.logical_key {
            Key::Named(NamedKey::Space) => self.toggle(),
            Key::Named(NamedKey::Escape) => {
                if let Some(ticker) = &self.ticker {
                    ticker.stop();
                }
                host.exit();
            }
            _ => {}
        }

        AppControl::Continue
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    log::info!("space: pause/resume  escape: quit");

    Runtime::run(
        RuntimeConfig {
            title: "tempo studio".to_string(),
            ..RuntimeConfig::default()
        },
        Studio::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_reset_after_one_second() {
        let mut stats = FrameStats::default();
        for _ in 0..10 {
            stats.record(DEFAULT_MAX_DELTA);
        }

        assert_eq!(stats.frames, 0);
        assert_eq!(stats.window, Duration::ZERO);
        assert_eq!(stats.sim_time, Duration::from_secs(1));
    }

    #[test]
    fn stats_count_frames_at_cap() {
        let mut stats = FrameStats::default();
        stats.record(Duration::from_millis(16));
        stats.record(Duration::from_millis(99));
        stats.record(DEFAULT_MAX_DELTA);

        assert_eq!(stats.frames, 3);
        assert_eq!(stats.at_cap, 1);
    }
}
