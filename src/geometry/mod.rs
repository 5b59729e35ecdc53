//! Doneness-driven geometry. Every generator here is a pure function of
//! `(doneness, frame, unit, layout)` plus the noise oracle.

pub mod steak;
pub mod strand;

pub use steak::{GrillMark, LayerShape, Sizzle, SteakGenerator, SteakGeometry, SteakStyle};
pub use strand::{StrandGenerator, StrandGeometry, StrandStyle};
