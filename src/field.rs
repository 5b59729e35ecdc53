//! Generative units: the fixed population of strands or layers a sketch
//! deforms every frame.

use crate::error::ConfigError;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min.is_finite() && self.max.is_finite() && self.min <= self.max {
            Ok(())
        } else {
            Err(ConfigError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            })
        }
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        rng.gen_range(self.min..=self.max)
    }
}

/// Normalized layout span the units are spread over (0 = first edge, 1 = last).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub start: f32,
    pub end: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub count: usize,
    pub span: Span,
    pub seed_range: ParamRange,
    pub size_range: ParamRange,
    pub hue_range: ParamRange,
}

impl FieldConfig {
    /// Horizontal noodle strands stacked top to bottom.
    pub fn noodles(count: usize) -> Self {
        Self {
            count,
            span: Span {
                start: 0.0,
                end: 1.0,
            },
            seed_range: ParamRange::new(0.0, 1000.0),
            size_range: ParamRange::new(2.8, 5.2),
            hue_range: ParamRange::new(-8.0, 8.0),
        }
    }

    /// Concentric steak layers, outermost first.
    pub fn steak_layers(count: usize) -> Self {
        Self {
            count,
            span: Span {
                start: 0.0,
                end: 1.0,
            },
            seed_range: ParamRange::new(0.0, 1000.0),
            // narrower than the gap between neighbouring layers, so jitter never reorders them
            size_range: ParamRange::new(0.996, 1.0),
            hue_range: ParamRange::new(-4.0, 4.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerativeUnit {
    pub seed: f32,
    pub base_size: f32,
    pub hue_offset: f32,
    pub position_index: usize,
    /// Position inside the span, already normalized.
    pub slot: f32,
}

/// Immutable after generation: only per-frame geometry derived from it changes.
#[derive(Clone, Debug)]
pub struct UnitField {
    units: Vec<GenerativeUnit>,
}

impl UnitField {
    pub fn generate<R: Rng>(cfg: &FieldConfig, rng: &mut R) -> Result<Self, ConfigError> {
        if cfg.count == 0 {
            return Err(ConfigError::ZeroUnits);
        }
        cfg.seed_range.validate("seed")?;
        cfg.size_range.validate("size")?;
        cfg.hue_range.validate("hue")?;

        let units = (0..cfg.count)
            .map(|i| GenerativeUnit {
                seed: cfg.seed_range.sample(rng),
                base_size: cfg.size_range.sample(rng),
                hue_offset: cfg.hue_range.sample(rng),
                position_index: i,
                slot: spread(i, cfg.count, cfg.span),
            })
            .collect();
        Ok(Self { units })
    }

    pub fn units(&self) -> &[GenerativeUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// `position_index / (N - 1)`, or 0 when the field holds a single unit.
    pub fn depth_fraction(&self, unit: &GenerativeUnit) -> f32 {
        depth_fraction(unit.position_index, self.units.len())
    }
}

pub fn depth_fraction(index: usize, count: usize) -> f32 {
    if count <= 1 {
        0.0
    } else {
        index as f32 / (count - 1) as f32
    }
}

fn spread(index: usize, count: usize, span: Span) -> f32 {
    let t = if count <= 1 {
        0.5
    } else {
        depth_fraction(index, count)
    };
    span.start + (span.end - span.start) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn spreads_units_evenly_across_span() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut cfg = FieldConfig::noodles(5);
        cfg.span = Span {
            start: 0.2,
            end: 0.6,
        };
        let field = UnitField::generate(&cfg, &mut rng).unwrap();
        let slots: Vec<f32> = field.units().iter().map(|u| u.slot).collect();
        let expected = [0.2, 0.3, 0.4, 0.5, 0.6];
        for (s, e) in slots.iter().zip(expected) {
            assert!((s - e).abs() < 1e-6, "{slots:?}");
        }
        for (i, u) in field.units().iter().enumerate() {
            assert_eq!(u.position_index, i);
        }
    }

    #[test]
    fn draws_parameters_from_configured_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        let cfg = FieldConfig::noodles(36);
        let field = UnitField::generate(&cfg, &mut rng).unwrap();
        assert_eq!(field.len(), 36);
        for u in field.units() {
            assert!((0.0..=1000.0).contains(&u.seed));
            assert!((2.8..=5.2).contains(&u.base_size));
            assert!((-8.0..=8.0).contains(&u.hue_offset));
        }
    }

    #[test]
    fn single_unit_sits_mid_span_without_nan() {
        let mut rng = StdRng::seed_from_u64(0);
        let field = UnitField::generate(&FieldConfig::steak_layers(1), &mut rng).unwrap();
        let u = field.units()[0];
        assert_eq!(u.slot, 0.5);
        assert_eq!(field.depth_fraction(&u), 0.0);
    }

    #[test]
    fn rejects_empty_fields_and_bad_ranges() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            UnitField::generate(&FieldConfig::noodles(0), &mut rng).unwrap_err(),
            ConfigError::ZeroUnits
        );
        let mut cfg = FieldConfig::noodles(3);
        cfg.size_range = ParamRange::new(5.0, 1.0);
        assert!(matches!(
            UnitField::generate(&cfg, &mut rng),
            Err(ConfigError::InvalidRange { name: "size", .. })
        ));
    }

    #[test]
    fn degenerate_range_yields_constant() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut cfg = FieldConfig::noodles(4);
        cfg.hue_range = ParamRange::new(2.0, 2.0);
        let field = UnitField::generate(&cfg, &mut rng).unwrap();
        assert!(field.units().iter().all(|u| u.hue_offset == 2.0));
    }
}
