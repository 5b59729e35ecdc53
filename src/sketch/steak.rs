//! A steak on the grill, seared from the rim inwards, with a flip cue at halfway.

use super::{draw_header, draw_progress, status_line, Action, CookSession, Sketch, INK};
use crate::config::SteakSettings;
use crate::cue::ThresholdCue;
use crate::error::ConfigError;
use crate::field::{FieldConfig, UnitField};
use crate::geometry::{SteakGenerator, SteakStyle};
use crate::math::{Bounds, Rgb};
use crate::noise::PerlinOracle;
use crate::surface::Surface;
use crate::timer::TimerReading;
use rand::Rng;
use std::time::Duration;
use tracing::debug;

const COUNTER: Rgb = Rgb::new(0xef, 0xe7, 0xdf);
const BAND: Rgb = Rgb::new(0xe9, 0xd7, 0xc4);
const HINT: Rgb = Rgb::new(0x5b, 0x4a, 0x43);
const TRACK: Rgb = Rgb::new(0xdd, 0xd2, 0xbf);
const BAR: Rgb = Rgb::new(0xc7, 0x6b, 0x3a);
const CHAR: Rgb = Rgb::new(40, 40, 40);
const SPATTER: Rgb = Rgb::new(255, 220, 160);
const ALERT: Rgb = Rgb::new(255, 70, 70);
const FLIPPED: Rgb = Rgb::new(0x2b, 0x6b, 0x2b);

/// Flashes per second of the flip banner, in radians.
const FLASH_RATE: f32 = 7.0;

pub struct SteakSketch {
    session: CookSession,
    cue: ThresholdCue,
    field: UnitField,
    steak: SteakGenerator,
    noise: PerlinOracle,
    last_now: Duration,
}

impl SteakSketch {
    pub fn new<R: Rng>(settings: &SteakSettings, rng: &mut R) -> Result<Self, ConfigError> {
        let field = UnitField::generate(&FieldConfig::steak_layers(settings.layers), rng)?;
        let style = SteakStyle {
            color_exponent: settings.color_exponent,
            ..SteakStyle::default()
        };
        Ok(Self {
            session: CookSession::new(settings.minutes)?,
            cue: ThresholdCue::new(settings.flip_fraction)?,
            field,
            steak: SteakGenerator::new(style),
            noise: PerlinOracle::new(settings.noise_seed),
            last_now: Duration::ZERO,
        })
    }

    pub fn session(&self) -> &CookSession {
        &self.session
    }

    pub fn cue(&self) -> &ThresholdCue {
        &self.cue
    }

    pub fn steak_bounds(w: f32, h: f32) -> Bounds {
        let (cx, cy) = (w * 0.5, h * 0.58);
        let (rx, ry) = (w * 0.34, h * 0.27);
        Bounds::new(cx - rx, cy - ry, cx + rx, cy + ry)
    }

    fn flash(&self) -> f32 {
        (self.last_now.as_secs_f32() * FLASH_RATE).sin().abs()
    }

    fn draw_cue(&self, surface: &mut dyn Surface) {
        let (w, h) = surface.size();
        let y = h * 0.2;
        if self.cue.is_showing() {
            let flash = self.flash();
            // labels have no alpha, so fade the ink toward the counter instead
            surface.set_fill_color(COUNTER.lerp(ALERT, flash), (200.0 * flash) as u8);
            surface.draw_text_centered("FLIP THE STEAK!", w * 0.5, y);
            surface.set_fill_color(HINT, 255);
            surface.draw_text_centered("Press F to mark flipped", w * 0.5, y + 4.0);
        } else if self.cue.is_acknowledged() {
            surface.set_fill_color(FLIPPED, 255);
            surface.draw_text_centered("Flipped ✓", w * 0.5, y);
        }
    }
}

impl Sketch for SteakSketch {
    fn name(&self) -> &'static str {
        "steak"
    }

    fn background(&self) -> Rgb {
        COUNTER
    }

    fn handle(&mut self, action: &Action, now: Duration) {
        match action {
            Action::AcknowledgeCue => {
                if self.cue.acknowledge() {
                    debug!("flip marked");
                }
            }
            Action::Reset => {
                self.session.apply(action, now);
                self.cue.reset();
            }
            _ => {
                self.session.apply(action, now);
            }
        }
    }

    fn update(&mut self, now: Duration) {
        self.last_now = now;
        let reading = self.session.tick(now);
        if self.session.timer().crossed(self.cue.fraction()) {
            debug!(doneness = reading.doneness, "flip threshold crossed");
        }
        self.cue.observe(reading.doneness);
    }

    fn draw(&self, surface: &mut dyn Surface, frame: u64) {
        let (w, h) = surface.size();
        let reading = self.session.reading();
        let total = self.session.timer().total_secs();

        let prompt = format!(
            "Press SPACE or click to start / pause the {}-minute cook",
            self.session.total_minutes().round()
        );
        let status = status_line(&reading, total, &prompt);
        draw_header(
            surface,
            BAND,
            &[
                (status.as_str(), INK),
                ("Flip indicator shows at halfway. Press F when you flip.", HINT),
            ],
        );

        let bounds = Self::steak_bounds(w, h);
        let geo = self.steak.generate(
            reading.doneness,
            frame,
            self.field.units(),
            bounds,
            &self.noise,
        );
        for layer in geo.layers.iter().chain(std::iter::once(&geo.core)) {
            surface.set_fill_color(layer.color, 255);
            surface.fill_polygon(&layer.points);
        }

        surface.set_stroke_width((w / 900.0 * 6.0).max(1.0));
        for mark in &geo.grill_marks {
            surface.set_stroke_color(CHAR, mark.alpha);
            surface.draw_line(mark.from, mark.to);
        }
        for dot in &geo.sizzle {
            surface.set_fill_color(SPATTER, dot.alpha);
            surface.fill_ellipse(dot.at, dot.radius, dot.radius);
        }

        self.draw_cue(surface);
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
    use rand::{rngs::StdRng, SeedableRng};

    fn sketch() -> SteakSketch {
        let mut rng = StdRng::seed_from_u64(99);
        SteakSketch::new(&SteakSettings::default(), &mut rng).unwrap()
    }

    fn at(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    fn drawn(s: &SteakSketch, frame: u64) -> RecordingSurface {
        let mut surface = RecordingSurface::new(240.0, 160.0);
        s.draw(&mut surface, frame);
        surface
    }

    #[test]
    fn flip_banner_appears_at_halfway_and_clears_on_f() {
        let mut s = sketch();
        s.handle(&Action::Toggle, at(0.0));
        s.update(at(89.0));
        assert!(!drawn(&s, 1).texts().contains(&"FLIP THE STEAK!"));

        s.update(at(91.0));
        assert!(s.cue().is_showing());
        assert!(drawn(&s, 2).texts().contains(&"FLIP THE STEAK!"));

        s.handle(&Action::AcknowledgeCue, at(95.0));
        s.update(at(96.0));
        let texts = drawn(&s, 3).texts().join("|");
        assert!(texts.contains("Flipped ✓"));
        assert!(!texts.contains("FLIP THE STEAK!"));
    }

    #[test]
    fn marking_the_flip_early_does_nothing() {
        let mut s = sketch();
        s.handle(&Action::Toggle, at(0.0));
        s.update(at(10.0));
        s.handle(&Action::AcknowledgeCue, at(10.0));
        assert!(!s.cue().is_acknowledged());
        s.update(at(100.0));
        assert!(s.cue().is_showing());
    }

    #[test]
    fn reset_clears_the_cue_and_the_clock() {
        let mut s = sketch();
        s.handle(&Action::Toggle, at(0.0));
        s.update(at(120.0));
        assert!(s.cue().has_fired());
        s.handle(&Action::Reset, at(121.0));
        s.update(at(122.0));
        assert!(!s.cue().has_fired());
        assert_eq!(s.reading().doneness, 0.0);
    }

    #[test]
    fn draws_every_layer_then_the_core() {
        let s = sketch();
        let surface = drawn(&s, 0);
        let polygons = surface.count(|c| matches!(c, Call::Polygon(_)));
        assert_eq!(polygons, 61 + 1);
        // 13 grill marks, no sizzle while raw
        assert_eq!(surface.count(|c| matches!(c, Call::Line(_, _))), 13);
        assert_eq!(surface.count(|c| matches!(c, Call::Ellipse(..))), 0);
    }

    #[test]
    fn sizzles_once_it_gets_going() {
        let mut s = sketch();
        s.handle(&Action::Toggle, at(0.0));
        s.update(at(170.0));
        let surface = drawn(&s, 40);
        assert!(surface.count(|c| matches!(c, Call::Ellipse(..))) > 0);
    }

    #[test]
    fn cook_stops_itself_at_three_minutes() {
        let mut s = sketch();
        s.handle(&Action::Toggle, at(0.0));
        s.update(at(400.0));
        let r = s.reading();
        assert!(r.is_complete);
        assert_eq!(r.doneness, 1.0);
        assert!(drawn(&s, 0).texts().contains(&"03:00 / 03:00 elapsed"));
    }

    #[test]
    fn a_keypress_on_the_crossing_frame_keeps_the_crossing() {
        let mut s = sketch();
        s.handle(&Action::Toggle, at(0.0));
        s.update(at(89.0));
        s.handle(&Action::AdjustMinutes(1), at(90.5));
        s.update(at(90.53));
        assert!(s.session().timer().crossed(0.5));
        assert!(s.cue().is_showing());
    }
}
