use crate::math::{Point, Rgb};
use crate::surface::Surface;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
            bg: Color::Black,
        }
    }
}

pub struct CellBuffer {
    pub w: u16,
    pub h: u16,
    pub cells: Vec<Cell>,
}

impl CellBuffer {
    pub fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::default(); (w as usize) * (h as usize)],
        }
    }
    pub fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }
    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        (x < self.w && y < self.h).then(|| self.cells[self.idx(x, y)])
    }
    pub fn set(&mut self, x: u16, y: u16, c: Cell) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = c;
        }
    }
    pub fn clear(&mut self, bg: Color) {
        for c in &mut self.cells {
            c.ch = ' ';
            c.fg = Color::White;
            c.bg = bg;
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub fn from_rgb(c: Rgb, a: u8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a,
        }
    }
}

pub struct PixelCanvas {
    pub w: u32,
    pub h: u32,
    pub px: Vec<Pixel>,
}

impl PixelCanvas {
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            w,
            h,
            px: vec![Pixel::default(); (w as usize) * (h as usize)],
        }
    }
    pub fn idx(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }
    pub fn get(&self, x: u32, y: u32) -> Pixel {
        if x >= self.w || y >= self.h {
            return Pixel::default();
        }
        self.px[self.idx(x, y)]
    }
    pub fn clear(&mut self, p: Pixel) {
        self.px.fill(p);
    }

    fn blend_over(&mut self, x: i32, y: i32, src: Pixel) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.w || y >= self.h {
            return;
        }
        let i = self.idx(x, y);
        let dst = self.px[i];

        let sa = src.a as f32 / 255.0;
        let da = dst.a as f32 / 255.0;

        let out_a = sa + da * (1.0 - sa);
        if out_a <= 1e-6 {
            self.px[i] = Pixel::default();
            return;
        }

        let blend = |sc: u8, dc: u8| -> u8 {
            let sc = sc as f32 / 255.0;
            let dc = dc as f32 / 255.0;
            let out = (sc * sa + dc * da * (1.0 - sa)) / out_a;
            (out.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
        };

        self.px[i] = Pixel {
            r: blend(src.r, dst.r),
            g: blend(src.g, dst.g),
            b: blend(src.b, dst.b),
            a: (out_a.clamp(0.0, 1.0) * 255.0 + 0.5) as u8,
        };
    }

    fn stamp(&mut self, c: Point, radius: f32, p: Pixel) {
        if radius <= 0.75 {
            self.blend_over(c.x.floor() as i32, c.y.floor() as i32, p);
            return;
        }
        let r2 = radius * radius;
        let x0 = (c.x - radius).floor() as i32;
        let x1 = (c.x + radius).ceil() as i32;
        let y0 = (c.y - radius).floor() as i32;
        let y1 = (c.y + radius).ceil() as i32;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - c.x;
                let dy = y as f32 + 0.5 - c.y;
                if dx * dx + dy * dy <= r2 {
                    self.blend_over(x, y, p);
                }
            }
        }
    }

    pub fn line(&mut self, a: Point, b: Point, width: f32, p: Pixel) {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let len = (dx * dx + dy * dy).sqrt();
        let steps = (len / 0.5).ceil().max(1.0) as usize;
        let radius = width * 0.5;
        let mut last = (i32::MIN, i32::MIN);
        for s in 0..=steps {
            let t = s as f32 / steps as f32;
            let q = Point::new(a.x + dx * t, a.y + dy * t);
            // thin lines: avoid re-blending the same pixel twice in a row
            let cell = (q.x.floor() as i32, q.y.floor() as i32);
            if radius <= 0.75 && cell == last {
                continue;
            }
            last = cell;
            self.stamp(q, radius, p);
        }
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, p: Pixel) {
        let x0 = x.round() as i32;
        let y0 = y.round() as i32;
        let x1 = (x + w).round() as i32;
        let y1 = (y + h).round() as i32;
        for yy in y0..y1 {
            for xx in x0..x1 {
                self.blend_over(xx, yy, p);
            }
        }
    }

    pub fn fill_ellipse(&mut self, c: Point, rx: f32, ry: f32, p: Pixel) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let x0 = (c.x - rx).floor() as i32;
        let x1 = (c.x + rx).ceil() as i32;
        let y0 = (c.y - ry).floor() as i32;
        let y1 = (c.y + ry).ceil() as i32;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let nx = (x as f32 + 0.5 - c.x) / rx;
                let ny = (y as f32 + 0.5 - c.y) / ry;
                if nx * nx + ny * ny <= 1.0 {
                    self.blend_over(x, y, p);
                }
            }
        }
    }

    /// Even-odd scanline fill sampled at pixel centers.
    pub fn fill_polygon(&mut self, pts: &[Point], p: Pixel) {
        if pts.len() < 3 {
            return;
        }
        let min_y = pts.iter().map(|q| q.y).fold(f32::INFINITY, f32::min);
        let max_y = pts.iter().map(|q| q.y).fold(f32::NEG_INFINITY, f32::max);
        let mut xs: Vec<f32> = Vec::with_capacity(8);
        for y in (min_y.floor() as i32)..=(max_y.ceil() as i32) {
            let yc = y as f32 + 0.5;
            xs.clear();
            for (i, a) in pts.iter().enumerate() {
                let b = pts[(i + 1) % pts.len()];
                if (a.y <= yc && b.y > yc) || (b.y <= yc && a.y > yc) {
                    xs.push(a.x + (yc - a.y) / (b.y - a.y) * (b.x - a.x));
                }
            }
            xs.sort_by(|l, r| l.total_cmp(r));
            for pair in xs.chunks_exact(2) {
                let xa = (pair[0] - 0.5).ceil() as i32;
                let xb = (pair[1] - 0.5).floor() as i32;
                for x in xa..=xb {
                    self.blend_over(x, y, p);
                }
            }
        }
    }
}

pub struct Terminal {
    pub out: io::Stdout,
    pub cols: u16,
    pub rows: u16,
    pub prev: CellBuffer,
    pub cur: CellBuffer,
    pub canvas: PixelCanvas,
}

impl Terminal {
    pub fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            DisableLineWrap,
            terminal::Clear(ClearType::All)
        )?;
        terminal::enable_raw_mode()?;

        let (cols, rows) = terminal::size()?;
        let prev = CellBuffer::new(cols, rows);
        let cur = CellBuffer::new(cols, rows);

        // Braille: 2×4 pixels per cell
        let canvas = PixelCanvas::new(cols as u32 * 2, rows as u32 * 4);

        Ok(Self {
            out,
            cols,
            rows,
            prev,
            cur,
            canvas,
        })
    }

    pub fn end(&mut self) -> anyhow::Result<()> {
        queue!(
            self.out,
            BeginSynchronizedUpdate,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            DisableMouseCapture,
            EndSynchronizedUpdate,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn resize_if_needed(&mut self) -> anyhow::Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.cols && r == self.rows {
            return Ok(false);
        }
        self.cols = c;
        self.rows = r;
        self.prev = CellBuffer::new(c, r);
        self.cur = CellBuffer::new(c, r);
        self.canvas = PixelCanvas::new(c as u32 * 2, r as u32 * 4);
        Ok(true)
    }

    pub fn present(&mut self, diff_only: bool) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut last_fg = None;
        let mut last_bg = None;

        for y in 0..self.rows {
            for x in 0..self.cols {
                let i = self.cur.idx(x, y);
                let c = self.cur.cells[i];
                if diff_only && c == self.prev.cells[i] {
                    continue;
                }

                queue!(self.out, cursor::MoveTo(x, y))?;

                if last_fg != Some(c.fg) {
                    queue!(self.out, SetForegroundColor(c.fg))?;
                    last_fg = Some(c.fg);
                }
                if last_bg != Some(c.bg) {
                    queue!(self.out, SetBackgroundColor(c.bg))?;
                    last_bg = Some(c.bg);
                }

                queue!(self.out, Print(c.ch))?;
            }
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        Ok(())
    }
}

/* -----------------------------
   Braille encoding: 2×4 pixels -> U+2800..U+28FF
------------------------------ */

fn braille_bit(dx: u32, dy: u32) -> u8 {
    // Dot mapping:
    // (0,0)=1 (0,1)=2 (0,2)=4 (0,3)=64
    // (1,0)=8 (1,1)=16 (1,2)=32 (1,3)=128
    match (dx, dy) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (0, 3) => 0x40,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        (1, 3) => 0x80,
        _ => 0x00,
    }
}

pub fn rgb_color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

pub fn canvas_to_cells(canvas: &PixelCanvas, out: &mut CellBuffer, enable_color: bool, bg: Color) {
    let cols = out.w as u32;
    let rows = out.h as u32;

    for cy in 0..rows {
        for cx in 0..cols {
            let px0 = cx * 2;
            let py0 = cy * 4;

            let mut mask: u8 = 0;
            let mut sum_r: u32 = 0;
            let mut sum_g: u32 = 0;
            let mut sum_b: u32 = 0;
            let mut ink_count: u32 = 0;

            for dy in 0..4 {
                for dx in 0..2 {
                    let x = px0 + dx;
                    let y = py0 + dy;
                    if x >= canvas.w || y >= canvas.h {
                        continue;
                    }
                    let p = canvas.px[canvas.idx(x, y)];

                    // threshold: treat alpha as ink
                    if p.a >= 32 {
                        mask |= braille_bit(dx, dy);
                        sum_r += p.r as u32;
                        sum_g += p.g as u32;
                        sum_b += p.b as u32;
                        ink_count += 1;
                    }
                }
            }

            let ch = char::from_u32(0x2800 + (mask as u32)).unwrap_or(' ');

            let fg = if enable_color && ink_count > 0 {
                Color::Rgb {
                    r: (sum_r / ink_count) as u8,
                    g: (sum_g / ink_count) as u8,
                    b: (sum_b / ink_count) as u8,
                }
            } else {
                Color::White
            };

            out.set(cx as u16, cy as u16, Cell { ch, fg, bg });
        }
    }
}

pub fn draw_text(buf: &mut CellBuffer, x: u16, y: u16, s: &str, fg: Color, bg: Color) {
    for (i, ch) in s.chars().enumerate() {
        let xx = x.saturating_add(i as u16);
        if xx >= buf.w || y >= buf.h {
            break;
        }
        buf.set(xx, y, Cell { ch, fg, bg });
    }
}

/* -----------------------------
   Surface over the braille canvas
------------------------------ */

/// Text queued during a frame. Braille conversion would overwrite it, so it is
/// stamped onto the cell grid afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub col: u16,
    pub row: u16,
    pub color: Rgb,
}

impl Label {
    pub fn draw(&self, buf: &mut CellBuffer, enable_color: bool, bg: Color) {
        let fg = if enable_color {
            rgb_color(self.color)
        } else {
            Color::White
        };
        draw_text(buf, self.col, self.row, &self.text, fg, bg);
    }
}

pub struct BrailleFrame<'a> {
    canvas: &'a mut PixelCanvas,
    stroke: Pixel,
    fill: Pixel,
    stroke_width: f32,
    labels: Vec<Label>,
}

impl<'a> BrailleFrame<'a> {
    pub fn new(canvas: &'a mut PixelCanvas) -> Self {
        Self {
            canvas,
            stroke: Pixel::from_rgb(Rgb::new(255, 255, 255), 255),
            fill: Pixel::from_rgb(Rgb::new(255, 255, 255), 255),
            stroke_width: 1.0,
            labels: Vec::new(),
        }
    }

    pub fn into_labels(self) -> Vec<Label> {
        self.labels
    }
}

impl Surface for BrailleFrame<'_> {
    fn size(&self) -> (f32, f32) {
        (self.canvas.w as f32, self.canvas.h as f32)
    }

    fn set_stroke_color(&mut self, color: Rgb, alpha: u8) {
        self.stroke = Pixel::from_rgb(color, alpha);
    }

    fn set_fill_color(&mut self, color: Rgb, alpha: u8) {
        self.fill = Pixel::from_rgb(color, alpha);
    }

    fn set_stroke_width(&mut self, width: f32) {
        self.stroke_width = width.max(0.0);
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        self.canvas.line(from, to, self.stroke_width, self.stroke);
    }

    fn draw_polyline(&mut self, points: &[Point]) {
        for w in points.windows(2) {
            self.canvas.line(w[0], w[1], self.stroke_width, self.stroke);
        }
    }

    fn fill_polygon(&mut self, points: &[Point]) {
        self.canvas.fill_polygon(points, self.fill);
    }

    fn fill_ellipse(&mut self, center: Point, rx: f32, ry: f32) {
        self.canvas.fill_ellipse(center, rx, ry, self.fill);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.canvas.fill_rect(x, y, w, h, self.fill);
    }

    fn measure_text(&self, text: &str) -> f32 {
        // one cell is two subpixels wide
        text.chars().count() as f32 * 2.0
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32) {
        if x < 0.0 && x + self.measure_text(text) <= 0.0 {
            return;
        }
        let skip = if x < 0.0 { (-x / 2.0).ceil() as usize } else { 0 };
        let col = (x.max(0.0) / 2.0).round() as u16;
        let row = (y.max(0.0) / 4.0).floor() as u16;
        self.labels.push(Label {
            text: text.chars().skip(skip).collect(),
            col,
            row,
            color: Rgb::new(self.fill.r, self.fill.g, self.fill.b),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque(r: u8) -> Pixel {
        Pixel { r, g: 0, b: 0, a: 255 }
    }

    #[test]
    fn polygon_fill_covers_interior_only() {
        let mut c = PixelCanvas::new(10, 10);
        let square = [
            Point::new(2.0, 2.0),
            Point::new(6.0, 2.0),
            Point::new(6.0, 6.0),
            Point::new(2.0, 6.0),
        ];
        c.fill_polygon(&square, opaque(200));
        assert_eq!(c.get(3, 3).a, 255);
        assert_eq!(c.get(5, 5).a, 255);
        assert_eq!(c.get(6, 6).a, 0);
        assert_eq!(c.get(1, 3).a, 0);
        let filled = c.px.iter().filter(|p| p.a > 0).count();
        assert_eq!(filled, 16);
    }

    #[test]
    fn thick_lines_are_wider_than_thin_ones() {
        let mut thin = PixelCanvas::new(40, 20);
        let mut thick = PixelCanvas::new(40, 20);
        let (a, b) = (Point::new(2.0, 10.0), Point::new(38.0, 10.0));
        thin.line(a, b, 1.0, opaque(10));
        thick.line(a, b, 5.0, opaque(10));
        let ink = |c: &PixelCanvas| c.px.iter().filter(|p| p.a > 0).count();
        assert!(ink(&thick) > ink(&thin) * 3);
    }

    #[test]
    fn drawing_outside_the_canvas_is_ignored() {
        let mut c = PixelCanvas::new(4, 4);
        c.fill_ellipse(Point::new(-20.0, -20.0), 3.0, 3.0, opaque(1));
        c.line(Point::new(-5.0, 2.0), Point::new(10.0, 2.0), 1.0, opaque(1));
        assert!(c.px.iter().filter(|p| p.a > 0).count() <= 4);
    }

    #[test]
    fn braille_cells_average_ink_color() {
        let mut canvas = PixelCanvas::new(2, 4);
        let (first, last) = (canvas.idx(0, 0), canvas.idx(1, 3));
        canvas.px[first] = Pixel { r: 100, g: 0, b: 0, a: 255 };
        canvas.px[last] = Pixel { r: 200, g: 0, b: 0, a: 255 };
        let mut cells = CellBuffer::new(1, 1);
        canvas_to_cells(&canvas, &mut cells, true, Color::Black);
        let c = cells.get(0, 0).unwrap();
        assert_eq!(c.ch, char::from_u32(0x2800 + 0x81).unwrap());
        assert_eq!(c.fg, Color::Rgb { r: 150, g: 0, b: 0 });
    }

    #[test]
    fn frame_text_becomes_cell_labels() {
        let mut canvas = PixelCanvas::new(80, 40);
        let mut frame = BrailleFrame::new(&mut canvas);
        frame.set_fill_color(Rgb::new(1, 2, 3), 255);
        frame.draw_text_centered("hi", 40.0, 9.0);
        let labels = frame.into_labels();
        assert_eq!(
            labels,
            vec![Label {
                text: "hi".into(),
                col: 19,
                row: 2,
                color: Rgb::new(1, 2, 3),
            }]
        );
        let mut buf = CellBuffer::new(40, 10);
        labels[0].draw(&mut buf, true, Color::Black);
        assert_eq!(buf.get(19, 2).map(|c| c.ch), Some('h'));
        assert_eq!(buf.get(20, 2).map(|c| c.ch), Some('i'));
    }
}
