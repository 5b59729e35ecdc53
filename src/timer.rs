//! Cook timer: Idle / Running / Paused with pause-safe elapsed accounting.
//!
//! Time is supplied by the caller as an offset from an epoch the frame driver
//! owns. The timer never reads a clock itself, which keeps every query
//! reproducible.

use crate::error::ConfigError;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Snapshot of the timer for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimerReading {
    pub state: TimerState,
    pub elapsed_secs: f64,
    pub remaining_secs: f64,
    pub doneness: f32,
    pub is_complete: bool,
}

#[derive(Clone, Debug)]
pub struct CookTimer {
    total_secs: f64,
    state: TimerState,
    accumulated_secs: f64,
    run_start: Option<Duration>,
    complete: bool,
    // doneness at the previous and the latest tick; drives `crossed`
    prev_doneness: f32,
    last_doneness: f32,
}

fn validate_total(secs: f64) -> Result<f64, ConfigError> {
    if secs.is_finite() && secs > 0.0 {
        Ok(secs)
    } else {
        Err(ConfigError::NonPositiveDuration(secs))
    }
}

impl CookTimer {
    pub fn new(total_secs: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            total_secs: validate_total(total_secs)?,
            state: TimerState::Idle,
            accumulated_secs: 0.0,
            run_start: None,
            complete: false,
            prev_doneness: 0.0,
            last_doneness: 0.0,
        })
    }

    pub fn from_minutes(minutes: f64) -> Result<Self, ConfigError> {
        Self::new(minutes * 60.0)
    }

    pub fn total_secs(&self) -> f64 {
        self.total_secs
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Seconds folded in from finished run segments.
    pub fn accumulated_secs(&self) -> f64 {
        self.accumulated_secs
    }

    /// Change the cook length. Only honored while Idle.
    pub fn set_total_secs(&mut self, secs: f64) -> Result<bool, ConfigError> {
        let secs = validate_total(secs)?;
        if self.state != TimerState::Idle {
            return Ok(false);
        }
        self.total_secs = secs;
        debug!(total_secs = secs, "cook duration configured");
        Ok(true)
    }

    /// Begin or continue a run. Valid from Idle or Paused.
    pub fn start(&mut self, now: Duration) -> bool {
        if self.complete || self.state == TimerState::Running {
            return false;
        }
        self.run_start = Some(now);
        self.state = TimerState::Running;
        debug!(now_secs = now.as_secs_f64(), accumulated = self.accumulated_secs, "timer running");
        true
    }

    /// Continue a paused run. A no-op from any other state.
    pub fn resume(&mut self, now: Duration) -> bool {
        if self.state != TimerState::Paused {
            return false;
        }
        self.start(now)
    }

    /// Stop the clock. A run that already reached its full length completes
    /// here instead of landing in an ordinary pause.
    pub fn pause(&mut self, now: Duration) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        if self.complete_if_due(now) {
            return true;
        }
        self.fold_segment(now);
        self.state = TimerState::Paused;
        debug!(accumulated = self.accumulated_secs, "timer paused");
        true
    }

    pub fn toggle(&mut self, now: Duration) -> bool {
        if self.is_running() {
            self.pause(now)
        } else {
            self.start(now)
        }
    }

    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.accumulated_secs = 0.0;
        self.run_start = None;
        self.complete = false;
        self.prev_doneness = 0.0;
        self.last_doneness = 0.0;
        debug!("timer reset");
    }

    fn live_segment(&self, now: Duration) -> f64 {
        match (self.state, self.run_start) {
            (TimerState::Running, Some(start)) => now.saturating_sub(start).as_secs_f64(),
            _ => 0.0,
        }
    }

    fn fold_segment(&mut self, now: Duration) {
        let live = self.live_segment(now);
        self.accumulated_secs = (self.accumulated_secs + live).min(self.total_secs);
        self.run_start = None;
    }

    pub fn elapsed_secs(&self, now: Duration) -> f64 {
        (self.accumulated_secs + self.live_segment(now)).clamp(0.0, self.total_secs)
    }

    pub fn doneness_at(&self, now: Duration) -> f32 {
        ((self.elapsed_secs(now) / self.total_secs) as f32).clamp(0.0, 1.0)
    }

    fn complete_if_due(&mut self, now: Duration) -> bool {
        if !self.is_running() || self.elapsed_secs(now) < self.total_secs {
            return false;
        }
        self.accumulated_secs = self.total_secs;
        self.run_start = None;
        self.state = TimerState::Paused;
        self.complete = true;
        info!(total_secs = self.total_secs, "cook complete");
        true
    }

    /// Per-frame query. Besides recording the doneness window used by
    /// [`CookTimer::crossed`], the only mutation is auto-completion: a run that
    /// reaches the full duration stops itself with doneness pinned at 1.
    pub fn tick(&mut self, now: Duration) -> TimerReading {
        self.complete_if_due(now);
        let reading = self.reading_at(now);
        self.prev_doneness = self.last_doneness;
        self.last_doneness = reading.doneness;
        reading
    }

    /// Snapshot at `now` that leaves the `crossed` window alone.
    pub fn reading_at(&self, now: Duration) -> TimerReading {
        let elapsed = self.elapsed_secs(now);
        let doneness = if self.complete {
            1.0
        } else {
            self.doneness_at(now)
        };
        TimerReading {
            state: self.state,
            elapsed_secs: elapsed,
            remaining_secs: (self.total_secs - elapsed).max(0.0),
            doneness,
            is_complete: self.complete,
        }
    }

    /// True only on the tick where doneness moved from below `fraction` to at
    /// or above it. Callers latch the result themselves.
    pub fn crossed(&self, fraction: f32) -> bool {
        self.prev_doneness < fraction && self.last_doneness >= fraction
    }
}
