//! Steak cross-section as concentric layers: a seared rim around a pink core
//! that shrinks and browns as doneness rises.

use crate::field::{depth_fraction, GenerativeUnit};
use crate::math::{clamp01, lerp, map_range, Bounds, Interp, Point, Rgb};
use crate::noise::NoiseOracle;
use std::f32::consts::TAU;

pub const MIN_BOUNDARY_SAMPLES: usize = 12;

#[derive(Clone, Debug)]
pub struct SteakStyle {
    /// Raw core radius as a fraction of the smaller outer radius.
    pub inner: Interp,
    pub samples: Interp,
    /// Boundary ripple as a fraction of the layer radius.
    pub ripple: Interp,
    /// Ripple lobes around the boundary.
    pub ripple_lobes: Interp,
    pub wobble_px: (f32, f32),
    pub sear_outer: Rgb,
    pub sear_mid: Rgb,
    pub raw_pink: Rgb,
    pub cooked_tan: Rgb,
    pub color_exponent: f32,
    pub grill_marks: i32,
    pub grill_angle: f32,
    pub grill_alpha: (f32, f32),
    pub grill_fade: f32,
    pub sizzle_start: f32,
    pub sizzle_max: f32,
    pub time_scale: f32,
    pub phase_speed: f32,
}

impl Default for SteakStyle {
    fn default() -> Self {
        Self {
            inner: Interp::new(0.55, 0.02),
            samples: Interp::new(24.0, 72.0),
            ripple: Interp::new(0.004, 0.03),
            ripple_lobes: Interp::new(3.0, 9.0),
            wobble_px: (3.0, 2.0),
            sear_outer: Rgb::new(0x6b, 0x3d, 0x2a),
            sear_mid: Rgb::new(0x8b, 0x4b, 0x34),
            raw_pink: Rgb::new(0xe9, 0x92, 0x8e),
            cooked_tan: Rgb::new(0xc1, 0x7d, 0x57),
            color_exponent: 1.0,
            grill_marks: 6,
            grill_angle: -0.25,
            grill_alpha: (200.0, 40.0),
            grill_fade: 0.9,
            sizzle_start: 0.3,
            sizzle_max: 30.0,
            time_scale: 0.002,
            phase_speed: 0.01,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayerShape {
    pub depth: usize,
    pub points: Vec<Point>,
    pub color: Rgb,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrillMark {
    pub from: Point,
    pub to: Point,
    pub alpha: u8,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sizzle {
    pub at: Point,
    pub radius: f32,
    pub alpha: u8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SteakGeometry {
    /// Outermost first.
    pub layers: Vec<LayerShape>,
    pub core: LayerShape,
    pub grill_marks: Vec<GrillMark>,
    pub sizzle: Vec<Sizzle>,
    pub inner_radius: f32,
}

#[derive(Clone, Debug, Default)]
pub struct SteakGenerator {
    style: SteakStyle,
}

// uniform-ish value from a smooth noise sample
fn spread(v: f32) -> f32 {
    (v * 9.0).fract()
}

impl SteakGenerator {
    pub fn new(style: SteakStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &SteakStyle {
        &self.style
    }

    /// Outer radii, leaving room for the wobble so the rim never leaves the bounds.
    pub fn outer_radii(&self, bounds: Bounds) -> (f32, f32) {
        let (wx, wy) = self.style.wobble_px;
        let rx = (bounds.width() * 0.5 - wx).max(1.0);
        let ry = (bounds.height() * 0.5 - wy).max(1.0);
        (rx, ry)
    }

    pub fn inner_radius_at(&self, doneness: f32, bounds: Bounds) -> f32 {
        let (rx, ry) = self.outer_radii(bounds);
        self.style.inner.at(doneness) * rx.min(ry)
    }

    pub fn sample_count_at(&self, doneness: f32) -> usize {
        (self.style.samples.at(doneness).round() as usize).max(MIN_BOUNDARY_SAMPLES)
    }

    pub fn ripple_at(&self, doneness: f32) -> f32 {
        clamp01(doneness) * self.style.ripple.at(doneness)
    }

    pub fn center_color_at(&self, doneness: f32) -> Rgb {
        let f = clamp01(doneness).powf(self.style.color_exponent.max(0.01));
        self.style.raw_pink.lerp(self.style.cooked_tan, f)
    }

    pub fn layer_color(&self, depth: f32, doneness: f32, unit: &GenerativeUnit) -> Rgb {
        let s = &self.style;
        let c = if depth < 0.5 {
            s.sear_outer.lerp(s.sear_mid, depth * 2.0)
        } else {
            s.sear_mid
                .lerp(self.center_color_at(doneness), (depth - 0.5) * 2.0)
        };
        let h = unit.hue_offset;
        c.offset(h, h * 0.5, h * 0.3)
    }

    /// Nominal half extents of a layer before ripple and wobble.
    pub fn layer_radii(
        &self,
        doneness: f32,
        unit: &GenerativeUnit,
        depth: f32,
        bounds: Bounds,
    ) -> (f32, f32) {
        let (rx, ry) = self.outer_radii(bounds);
        let inner = self.inner_radius_at(clamp01(doneness), bounds);
        let lrx = lerp(rx, inner, depth) * unit.base_size;
        let lry = lerp(ry, inner * (ry / rx), depth) * unit.base_size;
        (lrx, lry)
    }

    pub fn layer(
        &self,
        doneness: f32,
        frame: u64,
        unit: &GenerativeUnit,
        depth: f32,
        bounds: Bounds,
        noise: &impl NoiseOracle,
    ) -> LayerShape {
        let d = clamp01(doneness);
        let s = &self.style;
        let time = frame as f32 * s.time_scale;
        let drift = frame as f32 * s.phase_speed;

        let (lrx, lry) = self.layer_radii(d, unit, depth, bounds);

        let wobble = Point::new(
            (noise.noise2(unit.seed, time) * 2.0 - 1.0) * s.wobble_px.0,
            (noise.noise2(unit.seed + 50.0, time) * 2.0 - 1.0) * s.wobble_px.1,
        );
        let center = bounds.center().add(wobble);

        let m = self.sample_count_at(d);
        let ripple = self.ripple_at(d);
        // whole lobes keep the boundary closed
        let lobes = s.ripple_lobes.at(d).round();

        let points = (0..m)
            .map(|k| {
                let theta = TAU * k as f32 / m as f32;
                let (sin, cos) = theta.sin_cos();
                let periodic = (lobes * theta + unit.seed + drift).sin();
                let organic = noise.noise2(
                    unit.seed + 10.0 + cos * 1.5,
                    unit.seed + sin * 1.5 + time,
                ) * 2.0
                    - 1.0;
                let scale = 1.0 + ripple * (0.5 * periodic + 0.5 * organic);
                bounds.clamp(Point::new(
                    center.x + cos * lrx * scale,
                    center.y + sin * lry * scale,
                ))
            })
            .collect();

        LayerShape {
            depth: unit.position_index,
            points,
            color: self.layer_color(depth, d, unit),
        }
    }

    fn core(&self, doneness: f32, depth: usize, bounds: Bounds) -> LayerShape {
        let (rx, ry) = self.outer_radii(bounds);
        let inner = self.inner_radius_at(doneness, bounds);
        let c = bounds.center();
        let m = self.sample_count_at(doneness);
        let points = (0..m)
            .map(|k| {
                let (sin, cos) = (TAU * k as f32 / m as f32).sin_cos();
                bounds.clamp(Point::new(c.x + cos * inner, c.y + sin * inner * (ry / rx)))
            })
            .collect();
        LayerShape {
            depth,
            points,
            color: self.center_color_at(doneness),
        }
    }

    pub fn grill_marks(&self, doneness: f32, bounds: Bounds) -> Vec<GrillMark> {
        let s = &self.style;
        let marks = s.grill_marks.max(0);
        let (rx, ry) = self.outer_radii(bounds);
        let c = bounds.center();
        let fade = 1.0 - clamp01(doneness) * s.grill_fade;
        let pitch = if marks == 0 { 0.0 } else { rx / marks as f32 };

        (-marks..=marks)
            .filter_map(|i| {
                let tx = i as f32 * pitch;
                let from = Point::new(tx, -ry * 0.9).rotate(s.grill_angle).add(c);
                let to = Point::new(tx, ry * 0.9).rotate(s.grill_angle).add(c);
                let alpha = map_range(
                    i.unsigned_abs() as f32,
                    0.0,
                    marks as f32,
                    s.grill_alpha.0,
                    s.grill_alpha.1,
                ) * fade;
                let (from, to) = bounds.clip_segment(from, to)?;
                Some(GrillMark {
                    from,
                    to,
                    alpha: alpha.round().clamp(0.0, 255.0) as u8,
                })
            })
            .collect()
    }

    /// Sizzle dots flicker every frame but are keyed on the frame counter, so a
    /// given frame always renders the same dots.
    pub fn sizzle(
        &self,
        doneness: f32,
        frame: u64,
        bounds: Bounds,
        noise: &impl NoiseOracle,
    ) -> Vec<Sizzle> {
        let s = &self.style;
        let d = clamp01(doneness);
        if d <= s.sizzle_start {
            return Vec::new();
        }
        let (rx, _) = self.outer_radii(bounds);
        let inner = self.inner_radius_at(d, bounds);
        let c = bounds.center();
        let f = frame as f32 * 0.37;
        let count = (d * s.sizzle_max).floor() as usize;

        (0..count)
            .map(|i| {
                let key = i as f32 * 7.31;
                let a = TAU * spread(noise.noise2(key, f));
                let r = lerp(inner * 0.9, rx * 0.9, spread(noise.noise2(key + 31.0, f)));
                let at = Point::new(c.x + a.cos() * r * 0.6, c.y + a.sin() * r * 0.6);
                Sizzle {
                    at: bounds.clamp(at),
                    radius: lerp(0.5, 2.0, spread(noise.noise2(key + 67.0, f))),
                    alpha: (lerp(30.0, 90.0, spread(noise.noise2(key + 97.0, f))) * d).round()
                        as u8,
                }
            })
            .collect()
    }

    pub fn generate(
        &self,
        doneness: f32,
        frame: u64,
        units: &[GenerativeUnit],
        bounds: Bounds,
        noise: &impl NoiseOracle,
    ) -> SteakGeometry {
        let d = clamp01(doneness);
        let layers = units
            .iter()
            .map(|u| {
                let depth = depth_fraction(u.position_index, units.len());
                self.layer(d, frame, u, depth, bounds, noise)
            })
            .collect();

        SteakGeometry {
            layers,
            core: self.core(d, units.len(), bounds),
            grill_marks: self.grill_marks(d, bounds),
            sizzle: self.sizzle(d, frame, bounds, noise),
            inner_radius: self.inner_radius_at(d, bounds),
        }
    }
}
