use crate::config::{load_settings, project_paths, Args, Settings, SketchKind};
use crate::error::ConfigError;
use crate::input::{collect_input_nonblocking, map_event_to_action};
use crate::logging::init_tracing;
use crate::math::Rgb;
use crate::render::{canvas_to_cells, draw_text, rgb_color, BrailleFrame, Pixel, Terminal};
use crate::sketch::{Action, NoodleSketch, Sketch, SteakSketch};
use crossterm::style::Color;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Every sketch, and which one is on screen. All of them keep cooking while hidden.
pub struct Kitchen {
    sketches: Vec<Box<dyn Sketch>>,
    active: usize,
}

impl Kitchen {
    pub fn new<R: Rng>(settings: &Settings, rng: &mut R) -> Result<Self, ConfigError> {
        let sketches: Vec<Box<dyn Sketch>> = vec![
            Box::new(NoodleSketch::new(&settings.noodles, rng)?),
            Box::new(SteakSketch::new(&settings.steak, rng)?),
        ];
        let active = match settings.start_sketch {
            SketchKind::Noodles => 0,
            SketchKind::Steak => 1,
        };
        Ok(Self { sketches, active })
    }

    pub fn active(&self) -> &dyn Sketch {
        &*self.sketches[self.active]
    }

    pub fn sketches(&self) -> impl Iterator<Item = &dyn Sketch> + '_ {
        self.sketches.iter().map(|s| &**s)
    }

    /// Route an action. Returns false once the user asked to quit.
    pub fn handle(&mut self, action: Action, now: Duration) -> bool {
        match action {
            Action::Quit => return false,
            Action::NextSketch => {
                self.active = (self.active + 1) % self.sketches.len();
                info!(sketch = self.active().name(), "switched sketch");
            }
            other => self.sketches[self.active].handle(&other, now),
        }
        true
    }

    pub fn update(&mut self, now: Duration) {
        for sketch in &mut self.sketches {
            sketch.update(now);
        }
    }
}

const HELP: &str = "[SPACE] start/pause  [F] flipped  [R] reset  [+/-] minutes  [TAB] next  [Q] quit";
const HELP_INK: Rgb = Rgb::new(0x5b, 0x4a, 0x43);

pub struct App {
    settings: Settings,
    kitchen: Kitchen,
    term: Terminal,
    epoch: Instant,
    frame: u64,
    should_quit: bool,
}

impl App {
    fn init(settings: Settings) -> anyhow::Result<Self> {
        let mut rng = match settings.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let kitchen = Kitchen::new(&settings, &mut rng)?;
        info!(
            sketch = kitchen.active().name(),
            fps = settings.fps_cap,
            seed = ?settings.rng_seed,
            "kitchen timers starting"
        );

        let term = Terminal::begin()?;
        Ok(Self {
            settings,
            kitchen,
            term,
            epoch: Instant::now(),
            frame: 0,
            should_quit: false,
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let fps = self.settings.fps_cap.clamp(10, 240);
        let frame_dt = Duration::from_secs_f32(1.0 / fps as f32);

        while !self.should_quit {
            let frame_start = Instant::now();
            let _resized = self.term.resize_if_needed()?;

            let now = self.epoch.elapsed();
            for ev in collect_input_nonblocking(frame_dt)? {
                let Some(action) = map_event_to_action(&ev) else {
                    continue;
                };
                if !self.kitchen.handle(action, now) {
                    self.should_quit = true;
                    break;
                }
            }

            self.kitchen.update(self.epoch.elapsed());
            self.render_frame()?;
            self.frame = self.frame.wrapping_add(1);

            spin_sleep(frame_dt, frame_start);
        }
        Ok(())
    }

    fn render_frame(&mut self) -> anyhow::Result<()> {
        let color = self.settings.enable_color;
        let sketch = self.kitchen.active();
        let bg = if color {
            rgb_color(sketch.background())
        } else {
            Color::Black
        };

        self.term.cur.clear(bg);
        self.term.canvas.clear(Pixel::default());

        let mut surface = BrailleFrame::new(&mut self.term.canvas);
        sketch.draw(&mut surface, self.frame);
        let labels = surface.into_labels();

        canvas_to_cells(&self.term.canvas, &mut self.term.cur, color, bg);
        for label in &labels {
            label.draw(&mut self.term.cur, color, bg);
        }

        let fg = if color { rgb_color(HELP_INK) } else { Color::White };
        let row = self.term.rows.saturating_sub(1);
        draw_text(&mut self.term.cur, 1, row, HELP, fg, bg);

        self.term.present(true)
    }
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let paths = project_paths()?;
    if let Err(err) = init_tracing(&paths.log_path) {
        // still before the alternate screen, so this is visible
        eprintln!("kitchen-timers: logging disabled: {err:#}");
    }

    let settings_path = args.settings.clone().unwrap_or(paths.settings_path);
    let mut settings = load_settings(&settings_path);
    settings.apply_args(&args);
    if settings.fps_cap == 0 {
        warn!("fps_cap of 0 is not usable, falling back to 30");
        settings.fps_cap = 30;
    }

    let mut app = App::init(settings)?;
    let result = app.run();
    app.term.end()?;
    result
}

/* -----------------------------
   Frame pacing helper
------------------------------ */

fn spin_sleep(target: Duration, start: Instant) {
    let end = start + target;
    loop {
        let t = Instant::now();
        if t >= end {
            break;
        }
        let left = end - t;
        if left > Duration::from_millis(2) {
            std::thread::sleep(Duration::from_millis(1));
        } else {
            std::hint::spin_loop();
        }
    }
}
