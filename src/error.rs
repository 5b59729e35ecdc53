use thiserror::Error;

/// Rejected configuration. Raised at construction time only; runtime
/// transitions never fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("cook duration must be a positive number of seconds, got {0}")]
    NonPositiveDuration(f64),
    #[error("a field needs at least one unit")]
    ZeroUnits,
    #[error("{name} range is empty or inverted ({min}..{max})")]
    InvalidRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("cue fraction must lie in (0, 1], got {0}")]
    CueFraction(f32),
}
