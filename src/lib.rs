//! Generative cooking timers: a cook timer drives doneness, and doneness
//! drives noodle strands and steak layers drawn to a braille terminal canvas.

pub mod app;
pub mod config;
pub mod cue;
pub mod error;
pub mod field;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod math;
pub mod noise;
pub mod render;
pub mod sketch;
pub mod surface;
pub mod timer;
