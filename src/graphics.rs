use crate::pose::Point;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
};
use std::io::Write;

/// Braille dots per terminal cell, horizontally and vertically
pub const DOTS_X: usize = 2;
pub const DOTS_Y: usize = 4;

/// Maps pixel coordinates onto canvas dots
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Where the viewport's origin lands, in surface pixels
    pub offset: Point,
    /// Dots per pixel, horizontally
    pub scale_x: f64,
    /// Dots per pixel, vertically
    pub scale_y: f64,
}

impl Projection {
    pub fn to_dots(&self, p: Point) -> (f64, f64) {
        (
            (p.x + self.offset.x) * self.scale_x,
            (p.y + self.offset.y) * self.scale_y,
        )
    }

    /// Converts a pixel length to dots, using the smaller axis scale
    pub fn length(&self, pixels: f64) -> f64 {
        pixels * self.scale_x.min(self.scale_y)
    }
}

#[derive(Clone, Copy, Debug)]
struct Cell {
    bits: u8,
    color: Color,
}

/// Grid of terminal cells drawn with braille dots, one colour per cell
pub struct Canvas {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
    background: Color,
}

impl Canvas {
    pub fn new(cols: usize, rows: usize, background: Color) -> Self {
        Canvas {
            cols,
            rows,
            cells: vec![
                Cell {
                    bits: 0,
                    color: Color::White,
                };
                cols * rows
            ],
            background,
        }
    }

    pub fn dot_width(&self) -> usize {
        self.cols * DOTS_X
    }

    pub fn dot_height(&self) -> usize {
        self.rows * DOTS_Y
    }

    /// Sets a single dot. Dots outside the canvas are ignored.
    pub fn plot(&mut self, x: isize, y: isize, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.dot_width() || y >= self.dot_height() {
            return;
        }
        let cell = &mut self.cells[(y / DOTS_Y) * self.cols + x / DOTS_X];
        cell.bits |= dot_bit(x % DOTS_X, y % DOTS_Y);
        cell.color = color;
    }

    /// Character shown for the cell at (col, row)
    pub fn glyph(&self, col: usize, row: usize) -> char {
        let bits = self.cells[row * self.cols + col].bits;
        if bits == 0 {
            ' '
        } else {
            char::from_u32(0x2800 + bits as u32).unwrap_or(' ')
        }
    }

    /// Queues the canvas to `out`, with its top-left corner at `top` row
    pub fn flush(&self, out: &mut impl Write, top: u16) -> std::io::Result<()> {
        queue!(out, SetBackgroundColor(self.background))?;
        let mut current = None;
        for row in 0..self.rows {
            queue!(out, MoveTo(0, top + row as u16))?;
            let mut line = String::with_capacity(self.cols * 3);
            for col in 0..self.cols {
                let cell = &self.cells[row * self.cols + col];
                if cell.bits != 0 && current != Some(cell.color) {
                    if !line.is_empty() {
                        queue!(out, Print(&line))?;
                        line.clear();
                    }
                    queue!(out, SetForegroundColor(cell.color))?;
                    current = Some(cell.color);
                }
                line.push(self.glyph(col, row));
            }
            queue!(out, Print(&line))?;
        }
        Ok(())
    }
}

/// Bit for the dot at (x, y) inside a 2x4 braille cell
fn dot_bit(x: usize, y: usize) -> u8 {
    const BITS: [[u8; DOTS_X]; DOTS_Y] = [
        [0x01, 0x08],
        [0x02, 0x10],
        [0x04, 0x20],
        [0x40, 0x80],
    ];
    BITS[y][x]
}

/// Draws a line between two dot positions using Bresenham's algorithm
pub fn draw_line(canvas: &mut Canvas, x0: f64, y0: f64, x1: f64, y1: f64, color: Color) {
    let (mut x0, mut y0, x1, y1) = (
        x0.round() as isize,
        y0.round() as isize,
        x1.round() as isize,
        y1.round() as isize,
    );
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy; // error value e_xy

    loop {
        canvas.plot(x0, y0, color);

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Draws a segment between two pixel positions
pub fn draw_segment(canvas: &mut Canvas, projection: &Projection, a: Point, b: Point, color: Color) {
    let (x0, y0) = projection.to_dots(a);
    let (x1, y1) = projection.to_dots(b);
    draw_line(canvas, x0, y0, x1, y1, color);
}

/// Draws a band `thickness` pixels wide as parallel lines along its normal
pub fn draw_thick_segment(
    canvas: &mut Canvas,
    projection: &Projection,
    a: Point,
    b: Point,
    thickness: f64,
    color: Color,
) {
    let (x0, y0) = projection.to_dots(a);
    let (x1, y1) = projection.to_dots(b);
    let length = (x1 - x0).hypot(y1 - y0);
    let width = projection.length(thickness);
    if length == 0.0 || width <= 1.0 {
        draw_line(canvas, x0, y0, x1, y1, color);
        return;
    }

    // Unit normal, stepped half a dot at a time so no gaps appear
    let (nx, ny) = (-(y1 - y0) / length, (x1 - x0) / length);
    let steps = (width * 2.0).ceil() as usize;
    for i in 0..=steps {
        let t = i as f64 / steps as f64 * width - width / 2.0;
        draw_line(canvas, x0 + nx * t, y0 + ny * t, x1 + nx * t, y1 + ny * t, color);
    }
}

/// Draws a connected polyline through `points`
pub fn draw_polyline<'a>(
    canvas: &mut Canvas,
    projection: &Projection,
    points: impl IntoIterator<Item = &'a Point>,
    color: Color,
) {
    let mut points = points.into_iter();
    let Some(mut previous) = points.next() else {
        return;
    };
    for point in points {
        draw_segment(canvas, projection, *previous, *point, color);
        previous = point;
    }
}

/// Fills a disc of `radius` pixels; always covers at least the center dot
pub fn draw_disc(canvas: &mut Canvas, projection: &Projection, center: Point, radius: f64, color: Color) {
    let (cx, cy) = projection.to_dots(center);
    let r = projection.length(radius);
    let (min_x, max_x) = ((cx - r).floor() as isize, (cx + r).ceil() as isize);
    let (min_y, max_y) = ((cy - r).floor() as isize, (cy + r).ceil() as isize);
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let (px, py) = (x as f64 - cx, y as f64 - cy);
            if px * px + py * py <= r * r {
                canvas.plot(x, y, color);
            }
        }
    }
    canvas.plot(cx.round() as isize, cy.round() as isize, color);
}
