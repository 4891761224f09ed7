//! Rasterizes a [`Scene`] into terminal cells.
//!
//! Each canvas is painted at square resolution first and then stretched
//! horizontally by two, because a terminal cell is about twice as tall as
//! it is wide. Text never becomes pixels: glyphs are kept in their own
//! layer and printed on top of the cell colors.

use bresenham::Bresenham;
use colored::Colorize;
use colors_transform::{Color, Rgb};
use image::{imageops::replace, ImageBuffer, Rgb as RgbPixel};
use line_drawing::BresenhamCircle;
use std::io::{self, Write};
use unicode_width::UnicodeWidthChar;

use crate::geometry::Point;
use crate::surface::{Canvas, CanvasId, Scene, Shape};

type Pixels = ImageBuffer<RgbPixel<u8>, Vec<u8>>;

const BLACK: RgbPixel<u8> = RgbPixel([0, 0, 0]);

/// Rows and columns of the clock grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub rows: usize,
    pub cols: usize,
}

impl Layout {
    /// Grid position of the `index`-th face, filled row by row.
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    pub fn len(&self) -> usize {
        self.rows * self.cols
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub color: [u8; 3],
}

/// One rendered screen.
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Pixels,
    glyphs: Vec<Option<Glyph>>,
    glyph_columns: usize,
}

impl Frame {
    fn new(width: usize, height: usize, glyph_columns: usize) -> Self {
        Self {
            width,
            height,
            pixels: ImageBuffer::from_pixel(width as u32, height as u32, BLACK),
            glyphs: vec![None; width * height],
            glyph_columns,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_at(&self, x: usize, y: usize) -> [u8; 3] {
        self.pixels.get_pixel(x as u32, y as u32).0
    }

    pub fn glyph_at(&self, x: usize, y: usize) -> Option<Glyph> {
        self.glyphs[y * self.width + x]
    }

    /// Places `ch` so that it starts at column `x`. Glyphs that would run
    /// past the right edge are dropped.
    fn put_glyph(&mut self, x: isize, y: isize, ch: char, color: [u8; 3]) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if y >= self.height || x + self.glyph_columns > self.width {
            return;
        }
        self.glyphs[y * self.width + x] = Some(Glyph { ch, color });
    }

    /// Cells of one row: a glyph, or the cell color when there is none.
    /// A wide glyph swallows the cells it covers.
    fn row_cells(&self, y: usize) -> impl Iterator<Item = (Option<Glyph>, [u8; 3])> + '_ {
        let mut skip = 0;
        (0..self.width).filter_map(move |x| {
            if skip > 0 {
                skip -= 1;
                return None;
            }
            let glyph = self.glyph_at(x, y);
            if glyph.is_some() {
                skip = self.glyph_columns - 1;
            }
            Some((glyph, self.pixel_at(x, y)))
        })
    }

    /// Blank columns printed after `ch` so that it fills its cells, for
    /// glyphs the terminal advances by fewer columns than they were given.
    fn padding(&self, ch: char) -> usize {
        self.glyph_columns
            .saturating_sub(ch.width().unwrap_or(1))
    }

    /// The frame without colors, one line per row.
    pub fn text(&self) -> String {
        (0..self.height)
            .map(|y| {
                let mut line = String::with_capacity(self.width);
                for (glyph, _) in self.row_cells(y) {
                    match glyph {
                        Some(Glyph { ch, .. }) => {
                            line.push(ch);
                            line.extend(std::iter::repeat(' ').take(self.padding(ch)));
                        }
                        None => line.push(' '),
                    }
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for y in 0..self.height {
            for (glyph, [r, g, b]) in self.row_cells(y) {
                match glyph {
                    Some(Glyph { ch, color }) => {
                        write!(
                            out,
                            "{}",
                            ch.to_string()
                                .truecolor(color[0], color[1], color[2])
                                .on_truecolor(r, g, b)
                        )?;
                        for _ in 0..self.padding(ch) {
                            write!(out, "{}", " ".on_truecolor(r, g, b))?;
                        }
                    }
                    None => write!(out, "{}", " ".on_truecolor(r, g, b))?,
                }
            }
            if y + 1 < self.height {
                write!(out, "\r\n")?;
            }
        }
        Ok(())
    }
}

fn to_pixel(color: Rgb) -> RgbPixel<u8> {
    RgbPixel([
        color.get_red() as u8,
        color.get_green() as u8,
        color.get_blue() as u8,
    ])
}

fn put(img: &mut Pixels, x: isize, y: isize, color: RgbPixel<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

pub struct Renderer {
    /// Terminal columns taken by one marker glyph.
    glyph_columns: usize,
}

impl Renderer {
    pub fn new(glyph_columns: usize) -> Self {
        Self {
            glyph_columns: glyph_columns.max(1),
        }
    }

    /// Draws every placed canvas into a `width × height` cell frame.
    /// Placements are `(canvas, row, col)` in `layout`.
    pub fn rasterize<I>(
        &self,
        scene: &Scene,
        placements: I,
        layout: Layout,
        width: usize,
        height: usize,
    ) -> Frame
    where
        I: IntoIterator<Item = (CanvasId, usize, usize)>,
    {
        let mut frame = Frame::new(width, height, self.glyph_columns);
        if layout.rows == 0 || layout.cols == 0 {
            return frame;
        }

        let side = (height / layout.rows).min(width / (layout.cols * 2));
        if side == 0 {
            return frame;
        }
        let cell_width = side * 2;
        let offset_x = (width - cell_width * layout.cols) / 2;
        let offset_y = (height - side * layout.rows) / 2;

        for (id, row, col) in placements {
            let canvas = match scene.canvas(id) {
                Some(canvas) => canvas,
                None => continue,
            };
            let origin_x = offset_x + col * cell_width;
            let origin_y = offset_y + row * side;
            let scale = side as f32 / canvas.size as f32;

            let square = paint(scene, id, canvas, side as u32, scale);
            let stretched = ImageBuffer::from_fn(cell_width as u32, side as u32, |x, y| {
                *square.get_pixel(x / 2, y)
            });
            replace(
                &mut frame.pixels,
                &stretched,
                origin_x as u32,
                origin_y as u32,
            );

            let to_cell = |at: Point, len: usize| -> (isize, isize) {
                let x = origin_x as f32 + at.x * scale * 2.0;
                let y = origin_y as f32 + at.y * scale;
                let span = (len * self.glyph_columns) as isize;
                (x as isize - span / 2, y as isize)
            };

            let texts = canvas.shapes.iter().filter_map(|shape| match shape {
                Shape::Text {
                    at, text, color, ..
                } => Some((*at, text.as_str(), *color)),
                Shape::Circle { .. } => None,
            });
            let labels = scene
                .labels_on(id)
                .map(|label| (label.at, label.text.as_str(), label.color));

            for (at, text, color) in texts.chain(labels) {
                let color = to_pixel(color).0;
                let (x, y) = to_cell(at, text.chars().count());
                for (i, ch) in text.chars().enumerate() {
                    frame.put_glyph(x + (i * self.glyph_columns) as isize, y, ch, color);
                }
            }
        }

        frame
    }
}

/// Offsets a stroke is repeated at, nearest first. A stroke of width `n`
/// uses the first `n` of them.
const NEIGHBOURS: [(isize, isize); 9] = [
    (0, 0),
    (0, 1),
    (1, 0),
    (1, 1),
    (-1, 0),
    (0, -1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

fn stroke_origins(width: u32) -> &'static [(isize, isize)] {
    &NEIGHBOURS[..(width as usize).max(1).min(NEIGHBOURS.len())]
}

/// Concentric rings drawn for a circle outline of `width`.
fn ring_count(width: u32) -> i32 {
    ((width as i32 + 1) / 2).max(1)
}

/// Paints the background, circles and lines of one canvas on a square
/// image of `side` pixels.
fn paint(scene: &Scene, id: CanvasId, canvas: &Canvas, side: u32, scale: f32) -> Pixels {
    let mut img = ImageBuffer::from_pixel(side, side, to_pixel(canvas.background));

    for shape in canvas.shapes.iter() {
        if let Shape::Circle {
            center,
            radius,
            outline,
            width,
        } = shape
        {
            let radius = (radius * scale) as i32;
            // Rings grow inward from the outline
            for inset in 0..ring_count(*width).min(radius + 1) {
                let points = BresenhamCircle::new(
                    (center.x * scale) as i32,
                    (center.y * scale) as i32,
                    radius - inset,
                );
                for (x, y) in points {
                    put(&mut img, x as isize, y as isize, to_pixel(*outline));
                }
            }
        }
    }

    for line in scene.lines_on(id) {
        let color = to_pixel(line.color);
        for (dx, dy) in stroke_origins(line.width) {
            let from = (
                (line.from.x * scale) as isize + dx,
                (line.from.y * scale) as isize + dy,
            );
            let to = (
                (line.to.x * scale) as isize + dx,
                (line.to.y * scale) as isize + dy,
            );
            for (x, y) in Bresenham::new(from, to) {
                put(&mut img, x, y, color);
            }
        }
    }

    img
}
