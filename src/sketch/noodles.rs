//! Noodles in a pot: straight raw strands that curl as they cook.

use super::{draw_header, draw_progress, status_line, Action, CookSession, Sketch};
use crate::config::NoodleSettings;
use crate::error::ConfigError;
use crate::field::{FieldConfig, UnitField};
use crate::geometry::{StrandGenerator, StrandStyle};
use crate::math::{Bounds, Rgb};
use crate::noise::PerlinOracle;
use crate::surface::Surface;
use crate::timer::TimerReading;
use rand::Rng;
use std::time::Duration;

const COUNTER: Rgb = Rgb::new(0xf7, 0xf2, 0xe6);
const BAND: Rgb = Rgb::new(0xef, 0xe2, 0xc7);
const HEADER_INK: Rgb = Rgb::new(0x6b, 0x4b, 0x2b);
const TRACK: Rgb = Rgb::new(0xe6, 0xd9, 0xbd);
const BAR: Rgb = Rgb::new(0xd9, 0xa4, 0x41);

pub struct NoodleSketch {
    session: CookSession,
    field: UnitField,
    strands: StrandGenerator,
    noise: PerlinOracle,
}

impl NoodleSketch {
    pub fn new<R: Rng>(settings: &NoodleSettings, rng: &mut R) -> Result<Self, ConfigError> {
        let field = UnitField::generate(&FieldConfig::noodles(settings.strands), rng)?;
        let style = StrandStyle {
            color_exponent: settings.color_exponent,
            ..StrandStyle::default()
        };
        Ok(Self {
            session: CookSession::new(settings.minutes)?,
            field,
            strands: StrandGenerator::new(style),
            noise: PerlinOracle::new(settings.noise_seed),
        })
    }

    pub fn session(&self) -> &CookSession {
        &self.session
    }

    pub fn field(&self) -> &UnitField {
        &self.field
    }

    /// Where the strands live for a canvas of `w` by `h` pixels.
    pub fn strand_bounds(w: f32, h: f32) -> Bounds {
        Bounds::new(w * 0.08, h * 0.30, w * 0.92, h * 0.82)
    }
}

impl Sketch for NoodleSketch {
    fn name(&self) -> &'static str {
        "noodles"
    }

    fn background(&self) -> Rgb {
        COUNTER
    }

    fn handle(&mut self, action: &Action, now: Duration) {
        self.session.apply(action, now);
    }

    fn update(&mut self, now: Duration) {
        self.session.tick(now);
    }

    fn draw(&self, surface: &mut dyn Surface, frame: u64) {
        let (w, h) = surface.size();
        let reading = self.session.reading();
        let total = self.session.timer().total_secs();

        let prompt = format!(
            "Press SPACE or click to start the {}-minute cook",
            self.session.total_minutes().round()
        );
        let status = status_line(&reading, total, &prompt);
        draw_header(surface, BAND, &[("Noodle Timer", HEADER_INK), (status.as_str(), HEADER_INK)]);

        let bounds = Self::strand_bounds(w, h);
        // strand thickness is authored for a ~900px wide pot
        let scale = w / 900.0;
        let strands = self.strands.generate_all(
            reading.doneness,
            frame,
            self.field.units(),
            bounds,
            &self.noise,
        );
        for geo in &strands {
            surface.set_stroke_color(geo.color, 255);
            surface.set_stroke_width((geo.thickness * scale).max(1.0));
            surface.draw_polyline(&geo.points);
        }

        draw_progress(surface, &reading, total, TRACK, BAR);
    }

    fn reading(&self) -> TimerReading {
        self.session.reading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::{Call, RecordingSurface};
    use crate::timer::TimerState;
    use rand::{rngs::StdRng, SeedableRng};

    fn sketch() -> NoodleSketch {
        let mut rng = StdRng::seed_from_u64(7);
        NoodleSketch::new(&NoodleSettings::default(), &mut rng).unwrap()
    }

    fn at(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn defaults_to_a_one_minute_pot_of_36_strands() {
        let s = sketch();
        assert_eq!(s.field().len(), 36);
        assert_eq!(s.session().timer().total_secs(), 60.0);
        assert_eq!(s.reading().state, TimerState::Idle);
    }

    #[test]
    fn rejects_an_empty_pot() {
        let mut rng = StdRng::seed_from_u64(7);
        let settings = NoodleSettings {
            strands: 0,
            ..NoodleSettings::default()
        };
        assert!(matches!(
            NoodleSketch::new(&settings, &mut rng),
            Err(ConfigError::ZeroUnits)
        ));
    }

    #[test]
    fn draws_one_polyline_per_strand_inside_the_pot() {
        let mut s = sketch();
        s.handle(&Action::Toggle, at(0.0));
        s.update(at(45.0));

        let mut surface = RecordingSurface::new(240.0, 160.0);
        s.draw(&mut surface, 12);
        let bounds = NoodleSketch::strand_bounds(240.0, 160.0);
        let polylines: Vec<_> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Polyline(pts) => Some(pts),
                _ => None,
            })
            .collect();
        assert_eq!(polylines.len(), 36);
        assert!(polylines.iter().flat_map(|p| p.iter()).all(|p| bounds.contains(*p)));
    }

    #[test]
    fn header_switches_from_prompt_to_countdown() {
        let mut s = sketch();
        let mut idle = RecordingSurface::new(240.0, 160.0);
        s.draw(&mut idle, 0);
        assert!(idle.texts().iter().any(|t| t.contains("1-minute cook")));

        s.handle(&Action::Toggle, at(0.0));
        s.update(at(15.0));
        let mut running = RecordingSurface::new(240.0, 160.0);
        s.draw(&mut running, 1);
        let texts = running.texts();
        assert!(texts.contains(&"Cooking — 00:15 elapsed • 00:45 remaining"));
        assert!(texts.contains(&"00:15 / 01:00 elapsed"));
    }

    #[test]
    fn progress_bar_tracks_doneness() {
        let mut s = sketch();
        s.handle(&Action::Toggle, at(0.0));
        s.update(at(30.0));
        let mut surface = RecordingSurface::new(200.0, 100.0);
        s.draw(&mut surface, 0);
        let rects: Vec<_> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Rect(_, _, w, _) => Some(*w),
                _ => None,
            })
            .collect();
        // header band, track, bar
        assert_eq!(rects.len(), 3);
        assert!((rects[2] - rects[1] * 0.5).abs() < 1e-3);
    }

    #[test]
    fn minutes_only_change_before_the_cook_starts() {
        let mut s = sketch();
        s.handle(&Action::AdjustMinutes(2), at(0.0));
        assert_eq!(s.session().total_minutes(), 3.0);
        s.handle(&Action::Toggle, at(0.0));
        s.handle(&Action::AdjustMinutes(2), at(1.0));
        assert_eq!(s.session().total_minutes(), 3.0);
    }
}
