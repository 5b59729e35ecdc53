//! Noodle strands: straight when raw, curling and gaining detail as they cook.

use crate::field::GenerativeUnit;
use crate::math::{clamp01, Bounds, Interp, Point, Rgb};
use crate::noise::NoiseOracle;
use std::f32::consts::{PI, TAU};

/// A strand never has fewer samples than this, even fully raw.
pub const MIN_SAMPLES: usize = 8;

#[derive(Clone, Debug)]
pub struct StrandStyle {
    /// Per-strand anchor inset, as a fraction of the layout width.
    pub anchor_inset: f32,
    /// Deformation amplitude as a fraction of the layout height.
    pub amplitude: Interp,
    pub samples: Interp,
    /// Full oscillations along the strand.
    pub frequency: Interp,
    /// Horizontal share of the swing; this is what turns waves into curls.
    pub curl: f32,
    pub thickness: Interp,
    pub raw_color: Rgb,
    pub cooked_color: Rgb,
    /// Doneness is raised to this power before blending toward `cooked_color`.
    pub color_exponent: f32,
    /// Micro-jitter in pixels, present even when raw.
    pub jitter_px: f32,
    pub noise_scale: f32,
    pub time_scale: f32,
    pub phase_speed: f32,
}

impl Default for StrandStyle {
    fn default() -> Self {
        Self {
            anchor_inset: 0.009,
            amplitude: Interp::new(0.003, 0.12),
            samples: Interp::new(12.0, 96.0),
            frequency: Interp::new(0.5, 3.0),
            curl: 0.35,
            thickness: Interp::new(1.0, 0.8),
            raw_color: Rgb::new(238, 205, 119),
            cooked_color: Rgb::new(248, 228, 172),
            color_exponent: 0.8,
            jitter_px: 0.4,
            noise_scale: 2.5,
            time_scale: 0.002,
            phase_speed: 0.015,
        }
    }
}

/// One frame's worth of a strand. Never cached.
#[derive(Clone, Debug, PartialEq)]
pub struct StrandGeometry {
    pub points: Vec<Point>,
    pub color: Rgb,
    pub thickness: f32,
}

#[derive(Clone, Debug, Default)]
pub struct StrandGenerator {
    style: StrandStyle,
}

impl StrandGenerator {
    pub fn new(style: StrandStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &StrandStyle {
        &self.style
    }

    pub fn amplitude_at(&self, doneness: f32) -> f32 {
        self.style.amplitude.at(doneness)
    }

    pub fn frequency_at(&self, doneness: f32) -> f32 {
        self.style.frequency.at(doneness)
    }

    pub fn sample_count_at(&self, doneness: f32) -> usize {
        (self.style.samples.at(doneness).round() as usize).max(MIN_SAMPLES)
    }

    pub fn thickness_at(&self, doneness: f32, unit: &GenerativeUnit) -> f32 {
        unit.base_size * self.style.thickness.at(doneness)
    }

    pub fn color_at(&self, doneness: f32, unit: &GenerativeUnit) -> Rgb {
        let h = unit.hue_offset;
        let base = self.style.raw_color.offset(h, h * 0.3, h * -0.2);
        let exponent = self.style.color_exponent.max(0.01);
        base.lerp(self.style.cooked_color, clamp01(doneness).powf(exponent))
    }

    /// Fixed endpoints of a strand. They depend on the unit and the layout only.
    pub fn anchors(
        &self,
        unit: &GenerativeUnit,
        bounds: Bounds,
        noise: &impl NoiseOracle,
    ) -> (Point, Point) {
        let inset = self.style.anchor_inset * bounds.width();
        let y = bounds.y0 + clamp01(unit.slot) * bounds.height();
        let left = bounds.x0 + noise.noise1(unit.seed) * inset;
        let right = bounds.x1 - noise.noise1(unit.seed + 100.0) * inset;
        (Point::new(left, y), Point::new(right, y))
    }

    pub fn generate(
        &self,
        doneness: f32,
        frame: u64,
        unit: &GenerativeUnit,
        bounds: Bounds,
        noise: &impl NoiseOracle,
    ) -> StrandGeometry {
        let d = clamp01(doneness);
        let s = &self.style;
        let (a, b) = self.anchors(unit, bounds, noise);

        let n = self.sample_count_at(d);
        let freq = self.frequency_at(d);
        let swing = d * self.amplitude_at(d) * bounds.height();
        let time = frame as f32 * s.time_scale;
        let drift = frame as f32 * s.phase_speed;

        let mut points = Vec::with_capacity(n);
        for i in 0..n {
            if i == 0 {
                points.push(a);
                continue;
            }
            if i == n - 1 {
                points.push(b);
                continue;
            }
            let t = i as f32 / (n - 1) as f32;
            let base = Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t);
            // pins both ends, full strength mid-strand
            let envelope = (PI * t).sin();

            let phase = TAU * freq * t + unit.seed + drift;
            let organic = noise.noise2(unit.seed + t * s.noise_scale, time) * 2.0 - 1.0;
            let jitter =
                (noise.noise2(unit.seed + 500.0 + t * s.noise_scale, time) * 2.0 - 1.0) * s.jitter_px;

            let wave = 0.6 * phase.sin() + 0.4 * organic;
            let dx = envelope * swing * s.curl * phase.cos();
            let dy = envelope * (jitter + swing * wave);
            points.push(bounds.clamp(Point::new(base.x + dx, base.y + dy)));
        }

        StrandGeometry {
            points,
            color: self.color_at(d, unit),
            thickness: self.thickness_at(d, unit),
        }
    }

    pub fn generate_all(
        &self,
        doneness: f32,
        frame: u64,
        units: &[GenerativeUnit],
        bounds: Bounds,
        noise: &impl NoiseOracle,
    ) -> Vec<StrandGeometry> {
        units
            .iter()
            .map(|u| self.generate(doneness, frame, u, bounds, noise))
            .collect()
    }
}
