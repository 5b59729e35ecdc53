use kitchen_timers::config::{Settings, SteakSettings};
use kitchen_timers::cue::ThresholdCue;
use kitchen_timers::field::{FieldConfig, UnitField};
use kitchen_timers::geometry::{StrandGenerator, SteakGenerator};
use kitchen_timers::math::{Bounds, Point, Rgb};
use kitchen_timers::noise::PerlinOracle;
use kitchen_timers::sketch::{Action, Sketch, SteakSketch};
use kitchen_timers::surface::Surface;
use kitchen_timers::timer::{CookTimer, TimerState};
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;

fn at(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

/// Keeps only what the assertions below look at.
#[derive(Default)]
struct Tally {
    polygons: usize,
    polylines: usize,
    texts: Vec<String>,
}

impl Surface for Tally {
    fn size(&self) -> (f32, f32) {
        (320.0, 200.0)
    }
    fn set_stroke_color(&mut self, _: Rgb, _: u8) {}
    fn set_fill_color(&mut self, _: Rgb, _: u8) {}
    fn set_stroke_width(&mut self, _: f32) {}
    fn draw_line(&mut self, _: Point, _: Point) {}
    fn draw_polyline(&mut self, _: &[Point]) {
        self.polylines += 1;
    }
    fn fill_polygon(&mut self, _: &[Point]) {
        self.polygons += 1;
    }
    fn fill_ellipse(&mut self, _: Point, _: f32, _: f32) {}
    fn fill_rect(&mut self, _: f32, _: f32, _: f32, _: f32) {}
    fn measure_text(&self, text: &str) -> f32 {
        text.chars().count() as f32 * 2.0
    }
    fn draw_text(&mut self, text: &str, _: f32, _: f32) {
        self.texts.push(text.to_string());
    }
}

#[test]
fn three_minute_steak_with_a_pause_and_a_flip() {
    let mut timer = CookTimer::from_minutes(3.0).unwrap();
    let mut cue = ThresholdCue::new(0.5).unwrap();
    let mut rng = StdRng::seed_from_u64(99);
    let layers = UnitField::generate(&FieldConfig::steak_layers(61), &mut rng).unwrap();
    let steak = SteakGenerator::default();
    let noise = PerlinOracle::new(99);
    let bounds = Bounds::new(40.0, 60.0, 280.0, 180.0);

    assert!(timer.start(at(0.0)));
    timer.tick(at(60.0));
    assert!(timer.pause(at(60.0)));
    // ten minutes away from the grill cost nothing
    assert_eq!(timer.tick(at(660.0)).elapsed_secs, 60.0);
    assert!(timer.resume(at(660.0)));

    let mut fired_at = None;
    let mut last_inner = f32::MAX;
    let mut t = 660.0;
    while t <= 800.0 {
        let r = timer.tick(at(t));
        if cue.observe(r.doneness) {
            assert!(timer.crossed(0.5));
            fired_at = Some(r.elapsed_secs);
        }
        let geo = steak.generate(r.doneness, t as u64, layers.units(), bounds, &noise);
        assert_eq!(geo.layers.len(), 61);
        assert!(geo.inner_radius <= last_inner);
        last_inner = geo.inner_radius;
        t += 5.0;
    }

    // 30s of cooking after the resume reaches the halfway mark
    assert_eq!(fired_at, Some(90.0));
    assert!(cue.acknowledge());
    assert!(cue.is_acknowledged());

    let done = timer.tick(at(900.0));
    assert!(done.is_complete);
    assert_eq!(done.state, TimerState::Paused);
    assert_eq!(done.doneness, 1.0);
    assert!(!timer.start(at(901.0)));

    timer.reset();
    cue.reset();
    assert_eq!(timer.tick(at(902.0)).doneness, 0.0);
    assert!(!cue.has_fired());
}

#[test]
fn strands_are_reproducible_across_generators() {
    let field = UnitField::generate(&FieldConfig::noodles(36), &mut StdRng::seed_from_u64(4)).unwrap();
    let bounds = Bounds::new(20.0, 60.0, 300.0, 170.0);
    let a = StrandGenerator::default().generate_all(0.7, 99, field.units(), bounds, &PerlinOracle::new(42));
    let b = StrandGenerator::default().generate_all(0.7, 99, field.units(), bounds, &PerlinOracle::new(42));
    assert_eq!(a, b);
    assert_eq!(a.len(), 36);
}

#[test]
fn steak_sketch_runs_end_to_end() {
    let settings = Settings::default();
    let mut rng = StdRng::seed_from_u64(settings.rng_seed.unwrap_or(3));
    let mut sketch = SteakSketch::new(&SteakSettings { minutes: 2.0, ..settings.steak }, &mut rng).unwrap();

    sketch.handle(&Action::Toggle, at(0.0));
    let mut saw_banner = false;
    for frame in 0..=130u64 {
        sketch.update(at(frame as f64));
        let mut tally = Tally::default();
        sketch.draw(&mut tally, frame);
        assert_eq!(tally.polygons, 62);
        assert_eq!(tally.polylines, 0);
        saw_banner |= tally.texts.iter().any(|t| t == "FLIP THE STEAK!");
    }
    assert!(saw_banner);
    assert!(sketch.reading().is_complete);
}
