/// Clamp to [0,1]. NaN collapses to 0 so it never reaches an interpolation.
pub fn clamp01(x: f32) -> f32 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * clamp01(t)
}

/// Linear remap of `v` from `[in0, in1]` to `[out0, out1]`, unclamped.
/// A zero-width input range maps everything to `out0`.
pub fn map_range(v: f32, in0: f32, in1: f32, out0: f32, out1: f32) -> f32 {
    let span = in1 - in0;
    if span.abs() <= f32::EPSILON {
        return out0;
    }
    out0 + (v - in0) / span * (out1 - out0)
}

/// A parameter that moves from its raw value to its cooked value as doneness
/// goes 0 -> 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interp {
    pub raw: f32,
    pub cooked: f32,
}

impl Interp {
    pub const fn new(raw: f32, cooked: f32) -> Self {
        Self { raw, cooked }
    }

    pub fn at(&self, doneness: f32) -> f32 {
        lerp(self.raw, self.cooked, doneness)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn add(self, o: Point) -> Self {
        Self::new(self.x + o.x, self.y + o.y)
    }

    pub fn rotate(self, ang: f32) -> Self {
        let (s, c) = ang.sin_cos();
        Self::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }
}

/// Axis-aligned layout rectangle in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Bounds {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    pub fn center(&self) -> Point {
        Point::new((self.x0 + self.x1) * 0.5, (self.y0 + self.y1) * 0.5)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x0 && p.x <= self.x1 && p.y >= self.y0 && p.y <= self.y1
    }

    pub fn clamp(&self, p: Point) -> Point {
        Point::new(p.x.clamp(self.x0, self.x1), p.y.clamp(self.y0, self.y1))
    }

    /// Cut `a`-`b` down to the part inside the rectangle, keeping its direction.
    /// `None` when the segment misses the rectangle entirely.
    pub fn clip_segment(&self, a: Point, b: Point) -> Option<(Point, Point)> {
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let (mut t0, mut t1) = (0.0_f32, 1.0_f32);
        let edges = [
            (-dx, a.x - self.x0),
            (dx, self.x1 - a.x),
            (-dy, a.y - self.y0),
            (dy, self.y1 - a.y),
        ];
        for (p, q) in edges {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }
        // clamp only absorbs rounding at the edges
        let at = |t: f32| self.clamp(Point::new(a.x + dx * t, a.y + dy * t));
        Some((at(t0), at(t1)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = clamp01(t);
        let f = |a: u8, b: u8| -> u8 {
            ((a as f32) + (b as f32 - a as f32) * t)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: f(self.r, other.r),
            g: f(self.g, other.g),
            b: f(self.b, other.b),
        }
    }

    /// Per-channel additive shift, saturating at the channel limits.
    pub fn offset(self, dr: f32, dg: f32, db: f32) -> Rgb {
        let f = |a: u8, d: f32| -> u8 { ((a as f32) + d).round().clamp(0.0, 255.0) as u8 };
        Rgb {
            r: f(self.r, dr),
            g: f(self.g, dg),
            b: f(self.b, db),
        }
    }
}
