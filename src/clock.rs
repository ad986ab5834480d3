//! Countdown state machine.
//!
//! The clock owns the timer state and the single [`Ticker`]. It never talks to
//! a window directly: every visible effect goes through a [`TimerView`].

use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::{TickMode, TimerConfig};
use crate::controls::ToggleGlyph;
use crate::ticker::Ticker;

// ============================================================================
// STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimerState {
    /// Seconds left, never above `total`.
    pub remaining: f64,
    /// Seconds the current countdown started from.
    pub total: f64,
    pub running: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
}

impl TimerState {
    /// Elapsed fraction in [0,1]. A zero total counts as already complete.
    pub fn progress(&self) -> f64 {
        if self.total <= 0.0 {
            return 1.0;
        }
        let progress = (self.total - self.remaining) / self.total;
        if progress.is_nan() {
            1.0
        } else {
            progress.clamp(0.0, 1.0)
        }
    }

    pub fn phase(&self) -> Phase {
        if self.running {
            Phase::Running
        } else if self.remaining > 0.0 {
            Phase::Paused
        } else {
            Phase::Idle
        }
    }
}

/// Formats seconds as `MM:SS` using floor division and modulo by 60.
pub fn format_mmss(remaining: f64) -> String {
    let remaining = if remaining.is_finite() && remaining > 0.0 {
        remaining
    } else {
        0.0
    };
    let mins = (remaining / 60.0).floor() as u64;
    let secs = (remaining % 60.0).floor() as u64;
    format!("{:02}:{:02}", mins, secs)
}

// ============================================================================
// VIEW SEAM
// ============================================================================

/// Everything the clock shows to the user.
pub trait TimerView {
    /// Redraws the whole dial for the given progress.
    fn draw(&mut self, progress: f64);
    fn show_time(&mut self, text: &str);
    fn set_controls_visible(&mut self, visible: bool);
    fn set_toggle_glyph(&mut self, glyph: ToggleGlyph);
}

// ============================================================================
// CLOCK
// ============================================================================

/// Instant and remaining time captured when the countdown last (re)started.
#[derive(Debug, Clone, Copy)]
struct Anchor {
    at: Instant,
    remaining: f64,
}

#[derive(Debug, Clone)]
pub struct CountdownClock {
    state: TimerState,
    period: Duration,
    mode: TickMode,
    ticker: Option<Ticker>,
    anchor: Option<Anchor>,
}

impl CountdownClock {
    pub fn new(period: Duration, mode: TickMode) -> Self {
        Self {
            state: TimerState::default(),
            period,
            mode,
            ticker: None,
            anchor: None,
        }
    }

    pub fn from_config(config: &TimerConfig) -> Self {
        Self::new(config.tick_period, config.tick_mode)
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn progress(&self) -> f64 {
        self.state.progress()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// When the event loop should next wake up, if a countdown is running.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.ticker.as_ref().map(Ticker::deadline)
    }

    /// Shows the zeroed startup state.
    pub fn init<V: TimerView>(&self, view: &mut V) {
        view.show_time(&format_mmss(self.state.remaining));
        view.draw(0.0);
    }

    /// Starts a fresh countdown from the inputs, or resumes a paused one.
    ///
    /// Returns whether the clock is running afterwards. Calling this while
    /// already running changes nothing.
    pub fn start<V: TimerView>(
        &mut self,
        minutes: i64,
        seconds: i64,
        now: Instant,
        view: &mut V,
    ) -> bool {
        if self.state.running {
            debug!("start ignored, countdown already running");
            return true;
        }

        if self.state.remaining == 0.0 {
            let total = minutes.saturating_mul(60).saturating_add(seconds).max(0);
            self.state.total = total as f64;
            self.state.remaining = self.state.total;
        }

        if self.state.remaining <= 0.0 {
            debug!(minutes, seconds, "start ignored, duration is zero");
            return false;
        }

        self.state.running = true;
        self.ticker = Some(Ticker::start(self.period, now));
        self.anchor = Some(Anchor {
            at: now,
            remaining: self.state.remaining,
        });
        info!(
            remaining = self.state.remaining,
            total = self.state.total,
            "countdown running"
        );
        view.set_toggle_glyph(ToggleGlyph::Pause);
        view.set_controls_visible(false);
        true
    }

    /// Stops ticking and keeps the remaining time.
    pub fn pause<V: TimerView>(&mut self, now: Instant, view: &mut V) {
        if !self.state.running {
            return;
        }
        if self.mode == TickMode::Anchored {
            self.state.remaining = self.anchored_remaining(now);
            if self.state.remaining <= 0.0 {
                self.complete(view);
                return;
            }
        }
        self.stop_ticking();
        info!(remaining = self.state.remaining, "countdown paused");
        view.set_toggle_glyph(ToggleGlyph::Play);
        view.set_controls_visible(true);
    }

    /// The start/pause control.
    pub fn toggle<V: TimerView>(
        &mut self,
        minutes: i64,
        seconds: i64,
        now: Instant,
        view: &mut V,
    ) {
        if self.state.running {
            self.pause(now, view);
        } else {
            self.start(minutes, seconds, now, view);
        }
    }

    /// Returns to the zeroed idle state from any phase.
    pub fn reset<V: TimerView>(&mut self, view: &mut V) {
        self.stop_ticking();
        self.state = TimerState::default();
        info!("countdown reset");
        view.show_time(&format_mmss(0.0));
        view.draw(0.0);
        view.set_controls_visible(true);
        view.set_toggle_glyph(ToggleGlyph::Play);
    }

    /// Fires one tick if the ticker's deadline has passed.
    pub fn poll<V: TimerView>(&mut self, now: Instant, view: &mut V) -> bool {
        let due = match self.ticker.as_mut() {
            Some(ticker) => ticker.fire(now),
            None => false,
        };
        if due {
            self.tick(now, view);
        }
        due
    }

    /// One countdown update: decrement, then draw or complete.
    pub fn tick<V: TimerView>(&mut self, now: Instant, view: &mut V) {
        if !self.state.running {
            return;
        }

        let remaining = match self.mode {
            TickMode::FixedStep => self.state.remaining - self.period.as_secs_f64(),
            TickMode::Anchored => self.anchored_remaining(now),
        };
        self.state.remaining = remaining.max(0.0);

        if self.state.remaining > 0.0 {
            let progress = self.state.progress();
            debug!(remaining = self.state.remaining, progress, "tick");
            view.draw(progress);
            view.show_time(&format_mmss(self.state.remaining));
        } else {
            self.complete(view);
        }
    }

    fn complete<V: TimerView>(&mut self, view: &mut V) {
        self.stop_ticking();
        self.state = TimerState::default();
        info!("countdown complete");
        view.set_toggle_glyph(ToggleGlyph::Play);
        view.set_controls_visible(true);
        view.draw(1.0);
        view.show_time(&format_mmss(0.0));
    }

    fn anchored_remaining(&self, now: Instant) -> f64 {
        match self.anchor {
            Some(anchor) => {
                let elapsed = now.saturating_duration_since(anchor.at).as_secs_f64();
                (anchor.remaining - elapsed).max(0.0)
            }
            None => self.state.remaining,
        }
    }

    fn stop_ticking(&mut self) {
        self.state.running = false;
        self.anchor = None;
        if let Some(ticker) = self.ticker.take() {
            debug!(fired = ticker.fired(), "ticker released");
        }
    }
}
