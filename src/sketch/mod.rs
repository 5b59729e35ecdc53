pub mod noodles;
pub mod steak;

use crate::error::ConfigError;
use crate::math::Rgb;
use crate::surface::Surface;
use crate::timer::{CookTimer, TimerReading, TimerState};
use std::time::Duration;
use tracing::{info, warn};

pub use noodles::NoodleSketch;
pub use steak::SteakSketch;

/// Requests coming from the input layer, already decoupled from keys.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Toggle,
    AcknowledgeCue,
    Reset,
    AdjustMinutes(i32),
    NextSketch,
    Quit,
}

pub trait Sketch {
    fn name(&self) -> &'static str;
    fn background(&self) -> Rgb;
    fn handle(&mut self, action: &Action, now: Duration);
    /// Advance to `now`. Called once per frame for every sketch, visible or not.
    fn update(&mut self, now: Duration);
    fn draw(&self, surface: &mut dyn Surface, frame: u64);
    fn reading(&self) -> TimerReading;
}

const MAX_MINUTES: f64 = 120.0;

/// Timer plus the latest reading, shared by the cooking sketches.
#[derive(Clone, Debug)]
pub struct CookSession {
    timer: CookTimer,
    reading: TimerReading,
}

impl CookSession {
    pub fn new(minutes: f64) -> Result<Self, ConfigError> {
        let timer = CookTimer::from_minutes(minutes)?;
        let reading = timer.reading_at(Duration::ZERO);
        Ok(Self { timer, reading })
    }

    pub fn timer(&self) -> &CookTimer {
        &self.timer
    }

    pub fn reading(&self) -> TimerReading {
        self.reading
    }

    pub fn total_minutes(&self) -> f64 {
        self.timer.total_secs() / 60.0
    }

    pub fn tick(&mut self, now: Duration) -> TimerReading {
        self.reading = self.timer.tick(now);
        self.reading
    }

    /// Timer-level actions. Returns true when the action was for the timer.
    pub fn apply(&mut self, action: &Action, now: Duration) -> bool {
        match action {
            Action::Toggle => {
                self.timer.toggle(now);
            }
            Action::Reset => {
                self.timer.reset();
            }
            Action::AdjustMinutes(delta) => {
                let minutes = (self.total_minutes().round() + *delta as f64).clamp(1.0, MAX_MINUTES);
                match self.timer.set_total_secs(minutes * 60.0) {
                    Ok(true) => info!(minutes, "cook length changed"),
                    Ok(false) => {}
                    Err(err) => warn!("ignoring duration change: {err}"),
                }
            }
            _ => return false,
        }
        // `tick` belongs to the frame driver; a second tick here would eat a crossing
        self.reading = self.timer.reading_at(now);
        true
    }
}

pub fn format_time(secs: f64) -> String {
    let secs = secs.max(0.0);
    let mins = (secs / 60.0).floor() as u64;
    let rest = (secs % 60.0).floor() as u64;
    format!("{mins:02}:{rest:02}")
}

pub(crate) fn status_line(reading: &TimerReading, total_secs: f64, idle_prompt: &str) -> String {
    let elapsed = format_time(reading.elapsed_secs.ceil());
    let remaining = format_time(reading.remaining_secs.ceil());
    if reading.is_complete {
        return format!("Done! {} cooked. Press R to reset", format_time(total_secs));
    }
    match reading.state {
        TimerState::Running => format!("Cooking — {elapsed} elapsed • {remaining} remaining"),
        TimerState::Paused => format!("Paused — {elapsed} elapsed • {remaining} remaining"),
        TimerState::Idle => idle_prompt.to_string(),
    }
}

pub(crate) const INK: Rgb = Rgb::new(0x3b, 0x2f, 0x2a);

/// Progress bar with an `elapsed / total` caption along the bottom edge.
pub(crate) fn draw_progress(
    surface: &mut dyn Surface,
    reading: &TimerReading,
    total_secs: f64,
    track: Rgb,
    bar: Rgb,
) {
    let (w, h) = surface.size();
    let px = w * 0.12;
    let pw = w * 0.76;
    let bh = 4.0;
    let py = h - 12.0;

    surface.set_fill_color(track, 255);
    surface.fill_rect(px, py, pw, bh);
    surface.set_fill_color(bar, 255);
    surface.fill_rect(px, py, pw * reading.doneness, bh);

    surface.set_fill_color(INK, 255);
    let caption = format!(
        "{} / {} elapsed",
        format_time(reading.elapsed_secs.floor()),
        format_time(total_secs)
    );
    surface.draw_text_centered(&caption, w * 0.5, py + 4.0);
}

pub(crate) fn draw_header(surface: &mut dyn Surface, band: Rgb, lines: &[(&str, Rgb)]) {
    let (w, _) = surface.size();
    surface.set_fill_color(band, 255);
    surface.fill_rect(0.0, 0.0, w, 4.0 * (lines.len() as f32 + 1.0) + 4.0);
    let mut y = 4.0;
    for (text, color) in lines {
        surface.set_fill_color(*color, 255);
        surface.draw_text_centered(text, w * 0.5, y);
        y += 8.0;
    }
}
