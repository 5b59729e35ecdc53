use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SketchKind {
    #[default]
    Noodles,
    Steak,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoodleSettings {
    pub minutes: f64,
    pub strands: usize,
    pub noise_seed: u32,
    pub color_exponent: f32,
}

impl Default for NoodleSettings {
    fn default() -> Self {
        Self {
            minutes: 1.0,
            strands: 36,
            noise_seed: 42,
            color_exponent: 0.8,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteakSettings {
    pub minutes: f64,
    pub layers: usize,
    pub noise_seed: u32,
    pub color_exponent: f32,
    /// Doneness at which the flip cue is raised.
    pub flip_fraction: f32,
}

impl Default for SteakSettings {
    fn default() -> Self {
        Self {
            minutes: 3.0,
            layers: 61,
            noise_seed: 99,
            color_exponent: 1.0,
            flip_fraction: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fps_cap: u32,
    pub enable_color: bool,
    /// Seed for the per-unit parameters. Fresh entropy every launch when unset.
    pub rng_seed: Option<u64>,
    pub start_sketch: SketchKind,
    pub noodles: NoodleSettings,
    pub steak: SteakSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps_cap: 30,
            enable_color: true,
            rng_seed: None,
            start_sketch: SketchKind::Noodles,
            noodles: NoodleSettings::default(),
            steak: SteakSettings::default(),
        }
    }
}

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "kitchen-timers")]
#[command(about = "Generative cooking timers for the terminal")]
pub struct Args {
    /// Sketch to open first
    #[arg(long, value_enum)]
    pub sketch: Option<SketchKind>,

    /// Cook length in minutes for the first sketch
    #[arg(long)]
    pub minutes: Option<f64>,

    /// Frame rate cap
    #[arg(long)]
    pub fps: Option<u32>,

    /// Seed for strand and layer parameters
    #[arg(long)]
    pub seed: Option<u64>,

    /// Settings file (defaults to settings.json in the config dir)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Monochrome output
    #[arg(long)]
    pub no_color: bool,
}

impl Settings {
    /// Command-line flags win over the settings file.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(kind) = args.sketch {
            self.start_sketch = kind;
        }
        if let Some(minutes) = args.minutes {
            match self.start_sketch {
                SketchKind::Noodles => self.noodles.minutes = minutes,
                SketchKind::Steak => self.steak.minutes = minutes,
            }
        }
        if let Some(fps) = args.fps {
            self.fps_cap = fps;
        }
        if args.seed.is_some() {
            self.rng_seed = args.seed;
        }
        if args.no_color {
            self.enable_color = false;
        }
    }
}

pub struct Paths {
    pub settings_path: PathBuf,
    pub log_path: PathBuf,
}

pub fn project_paths() -> Result<Paths> {
    let proj = ProjectDirs::from("com", "kitchen-timers", "KitchenTimers")
        .context("could not resolve project directories")?;
    Ok(Paths {
        settings_path: proj.config_dir().join("settings.json"),
        log_path: proj.data_local_dir().join("kitchen-timers.log"),
    })
}

/// Read settings from `path`. A missing file means defaults; anything else
/// that goes wrong is logged and also falls back to defaults.
pub fn load_settings(path: &Path) -> Settings {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Settings::default(),
        Err(err) => {
            warn!(path = %path.display(), "could not read settings, using defaults: {err}");
            return Settings::default();
        }
    };
    match serde_json::from_str::<Settings>(&text) {
        Ok(settings) => {
            info!(path = %path.display(), "loaded settings");
            settings
        }
        Err(err) => {
            warn!(path = %path.display(), "malformed settings, using defaults: {err}");
            Settings::default()
        }
    }
}
