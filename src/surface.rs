//! The drawing surface the sketches paint on. Sketches only ever issue these
//! calls; rasterization lives behind the trait.

use crate::math::{Point, Rgb};

pub trait Surface {
    /// Drawable area in pixels.
    fn size(&self) -> (f32, f32);

    fn set_stroke_color(&mut self, color: Rgb, alpha: u8);
    fn set_fill_color(&mut self, color: Rgb, alpha: u8);
    fn set_stroke_width(&mut self, width: f32);

    fn draw_line(&mut self, from: Point, to: Point);
    fn draw_polyline(&mut self, points: &[Point]);
    fn fill_polygon(&mut self, points: &[Point]);
    fn fill_ellipse(&mut self, center: Point, rx: f32, ry: f32);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    /// Width in pixels `text` would take up.
    fn measure_text(&self, text: &str) -> f32;
    /// Draw `text` with its top-left corner at `(x, y)` in the fill color.
    fn draw_text(&mut self, text: &str, x: f32, y: f32);

    fn draw_text_centered(&mut self, text: &str, cx: f32, y: f32) {
        let w = self.measure_text(text);
        self.draw_text(text, cx - w * 0.5, y);
    }
}
