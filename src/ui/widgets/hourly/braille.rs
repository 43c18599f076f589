//! Software raster of sparkline draw commands onto Braille cells.

use crate::ui::sparkline::{DrawCommand, Point, disc_dots, scanline_spans};

/// Dot bits of U+2800.. indexed by `[row][column]` inside a cell.
const DOT_BITS: [[u8; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

/// Later layers win the cell colour when dots of several layers share a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Layer {
    Fill,
    Stroke,
    Marker,
}

#[derive(Debug, Clone, Copy)]
struct Dot {
    layer: Layer,
    color: (u8, u8, u8),
}

/// A grid of `cols x rows` cells, `2 cols x 4 rows` dots.
#[derive(Debug, Clone)]
pub struct BrailleGrid {
    cols: usize,
    rows: usize,
    dots: Vec<Option<Dot>>,
    background: (u8, u8, u8),
}

/// One rendered cell: the Braille glyph and its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrailleCell {
    pub glyph: char,
    pub color: Option<(u8, u8, u8)>,
}

impl BrailleGrid {
    #[must_use]
    pub fn new(cols: u16, rows: u16, background: (u8, u8, u8)) -> Self {
        let (cols, rows) = (usize::from(cols), usize::from(rows));
        Self {
            cols,
            rows,
            dots: vec![None; cols * 2 * rows * 4],
            background,
        }
    }

    fn width(&self) -> usize {
        self.cols * 2
    }

    fn height(&self) -> usize {
        self.rows * 4
    }

    pub fn paint(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            match command {
                DrawCommand::Clear { .. } => self.dots.fill(None),
                DrawCommand::Fill { polygon, gradient } => {
                    for y in 0..self.height() {
                        #[allow(clippy::cast_precision_loss)]
                        let center = y as f64 + 0.5;
                        let color = gradient.color_at(center).over(self.background);
                        for (start, end) in scanline_spans(polygon, center) {
                            self.fill_span(y, start, end, color);
                        }
                    }
                }
                DrawCommand::Stroke {
                    points,
                    width,
                    color,
                } => {
                    let color = color.over(self.background);
                    for pair in points.windows(2) {
                        self.line(pair[0], pair[1], *width, color);
                    }
                    if let [only] = points.as_slice() {
                        self.plot_point(*only, Layer::Stroke, color);
                    }
                }
                DrawCommand::Disc {
                    center,
                    radius,
                    color,
                } => {
                    let color = color.over(self.background);
                    for (x, y) in disc_dots(*center, *radius) {
                        self.set(x, y, Layer::Marker, color);
                    }
                }
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn fill_span(&mut self, y: usize, start: f64, end: f64, color: (u8, u8, u8)) {
        let first = (start - 0.5).ceil() as i64;
        let last = (end - 0.5).floor() as i64;
        for x in first..=last {
            self.set(x, y as i64, Layer::Fill, color);
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn line(&mut self, from: Point, to: Point, width: f64, color: (u8, u8, u8)) {
        let steps = (to.x - from.x).abs().max((to.y - from.y).abs()).ceil().max(1.0) as usize;
        let thickness = width.round().max(1.0) as i64;
        for step in 0..=steps {
            #[allow(clippy::cast_precision_loss)]
            let t = step as f64 / steps as f64;
            let x = (from.x + (to.x - from.x) * t).round() as i64;
            let y = (from.y + (to.y - from.y) * t).round() as i64;
            for offset in 0..thickness {
                self.set(x, y - thickness / 2 + offset, Layer::Stroke, color);
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn plot_point(&mut self, point: Point, layer: Layer, color: (u8, u8, u8)) {
        self.set(point.x.round() as i64, point.y.round() as i64, layer, color);
    }

    fn set(&mut self, x: i64, y: i64, layer: Layer, color: (u8, u8, u8)) {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        if x >= self.width() || y >= self.height() {
            return;
        }
        let idx = y * self.width() + x;
        let keep = self.dots[idx].is_some_and(|dot| dot.layer > layer);
        if !keep {
            self.dots[idx] = Some(Dot { layer, color });
        }
    }

    /// Cells row by row; the colour is taken from the highest layer present.
    #[must_use]
    pub fn cells(&self) -> Vec<Vec<BrailleCell>> {
        (0..self.rows)
            .map(|row| (0..self.cols).map(|col| self.cell(col, row)).collect())
            .collect()
    }

    fn cell(&self, col: usize, row: usize) -> BrailleCell {
        let mut bits = 0_u32;
        let mut top: Option<Dot> = None;
        for (dy, row_bits) in DOT_BITS.iter().enumerate() {
            for (dx, bit) in row_bits.iter().enumerate() {
                let idx = (row * 4 + dy) * self.width() + col * 2 + dx;
                if let Some(dot) = self.dots[idx] {
                    bits |= u32::from(*bit);
                    if top.is_none_or(|current| dot.layer >= current.layer) {
                        top = Some(dot);
                    }
                }
            }
        }
        if bits == 0 {
            return BrailleCell {
                glyph: ' ',
                color: None,
            };
        }
        BrailleCell {
            glyph: char::from_u32(0x2800 + bits).unwrap_or(' '),
            color: top.map(|dot| dot.color),
        }
    }

    /// Glyphs only, one string per cell row.
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.cells()
            .iter()
            .map(|row| row.iter().map(|cell| cell.glyph).collect())
            .collect()
    }
}
