//! Geometry for the hourly temperature sparkline.
//!
//! [`render`] turns a window of samples into a list of [`DrawCommand`]s in
//! physical units (logical size times the surface pixel ratio). Painters
//! replay the commands onto a concrete target; the terminal painter in
//! `widgets::hourly` rasterises them onto a Braille canvas with the helpers
//! at the bottom of this module.

/// Physical dots per logical unit on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRatio {
    pub x: f64,
    pub y: f64,
}

impl PixelRatio {
    /// Braille glyphs expose a 2 x 4 dot grid per terminal cell.
    pub const BRAILLE: Self = Self { x: 2.0, y: 4.0 };

    #[must_use]
    pub const fn uniform(ratio: f64) -> Self {
        Self { x: ratio, y: ratio }
    }
}

/// A drawing surface with a logical size (terminal cells) and the physical
/// size derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    ratio: PixelRatio,
    logical: (u16, u16),
    physical: (u32, u32),
}

impl Surface {
    #[must_use]
    pub const fn new(ratio: PixelRatio) -> Self {
        Self {
            ratio,
            logical: (0, 0),
            physical: (0, 0),
        }
    }

    /// Updates the logical size. The physical size is only recomputed, and
    /// `true` only returned, when the logical size actually changed.
    pub fn resize(&mut self, width: u16, height: u16) -> bool {
        if self.logical == (width, height) {
            return false;
        }
        self.logical = (width, height);
        self.physical = (
            scale_floor(width, self.ratio.x),
            scale_floor(height, self.ratio.y),
        );
        true
    }

    #[must_use]
    pub fn ratio(&self) -> PixelRatio {
        self.ratio
    }

    #[must_use]
    pub fn logical(&self) -> (u16, u16) {
        self.logical
    }

    #[must_use]
    pub fn physical(&self) -> (u32, u32) {
        self.physical
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.physical.0 == 0 || self.physical.1 == 0
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale_floor(logical: u16, ratio: f64) -> u32 {
    (f64::from(logical) * ratio).floor().max(0.0) as u32
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: mix_channel(self.r, other.r, t),
            g: mix_channel(self.g, other.g, t),
            b: mix_channel(self.b, other.b, t),
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Composites this colour over an opaque background.
    #[must_use]
    pub fn over(self, base: (u8, u8, u8)) -> (u8, u8, u8) {
        let a = self.a.clamp(0.0, 1.0);
        (
            mix_channel(base.0, self.r, a),
            mix_channel(base.1, self.g, a),
            mix_channel(base.2, self.b, a),
        )
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn mix_channel(from: u8, to: u8, t: f32) -> u8 {
    let value = f32::from(from) + (f32::from(to) - f32::from(from)) * t;
    value.round().clamp(0.0, 255.0) as u8
}

/// Linear gradient from `top` at `y_top` to `bottom` at `y_bottom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalGradient {
    pub top: Rgba,
    pub bottom: Rgba,
    pub y_top: f64,
    pub y_bottom: f64,
}

impl VerticalGradient {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn color_at(&self, y: f64) -> Rgba {
        let span = self.y_bottom - self.y_top;
        if span.abs() < f64::EPSILON {
            return self.top;
        }
        self.top.lerp(self.bottom, ((y - self.y_top) / span) as f32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Sizes are logical; colours are applied as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkStyle {
    pub padding: f64,
    pub line_width: f64,
    pub ring_radius: f64,
    pub dot_radius: f64,
    pub stroke: Rgba,
    pub fill_top: Rgba,
    pub fill_bottom: Rgba,
    pub ring: Rgba,
    pub dot: Rgba,
}

impl Default for SparkStyle {
    fn default() -> Self {
        let indigo = Rgba::rgb(79, 70, 229);
        Self {
            padding: 1.0,
            line_width: 0.5,
            ring_radius: 1.5,
            dot_radius: 1.0,
            stroke: Rgba::rgb(255, 255, 255).with_alpha(0.95),
            fill_top: indigo.with_alpha(0.55),
            fill_bottom: indigo.with_alpha(0.08),
            ring: Rgba::rgb(255, 255, 255),
            dot: indigo,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    Stroke {
        points: Vec<Point>,
        width: f64,
        color: Rgba,
    },
    Fill {
        polygon: Vec<Point>,
        gradient: VerticalGradient,
    },
    Disc {
        center: Point,
        radius: f64,
        color: Rgba,
    },
}

/// Maps sample index and value into physical coordinates.
struct Scale {
    pad_x: f64,
    pad_y: f64,
    width: f64,
    height: f64,
    count: usize,
    min: f64,
    range: f64,
}

impl Scale {
    fn new(samples: &[f32], surface: &Surface, style: &SparkStyle) -> Self {
        let ratio = surface.ratio();
        let (width, height) = surface.physical();
        let (min, max) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                let v = f64::from(*v);
                (lo.min(v), hi.max(v))
            });
        Self {
            pad_x: style.padding * ratio.x,
            pad_y: style.padding * ratio.y,
            width: f64::from(width),
            height: f64::from(height),
            count: samples.len(),
            min,
            range: max - min,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn x(&self, index: usize) -> f64 {
        if self.count < 2 {
            return self.pad_x;
        }
        let span = (self.width - 2.0 * self.pad_x).max(0.0);
        self.pad_x + (index as f64 / (self.count - 1) as f64) * span
    }

    fn y(&self, value: f32) -> f64 {
        // A flat series sits at mid-height.
        let norm = if self.range > 0.0 {
            (f64::from(value) - self.min) / self.range
        } else {
            0.5
        };
        let span = (self.height - 2.0 * self.pad_y).max(0.0);
        self.height - self.pad_y - norm * span
    }

    fn baseline(&self) -> f64 {
        self.height - self.pad_y
    }
}

/// Physical coordinates of every sample.
#[must_use]
pub fn plot_points(samples: &[f32], surface: &Surface, style: &SparkStyle) -> Vec<Point> {
    let scale = Scale::new(samples, surface, style);
    samples
        .iter()
        .enumerate()
        .map(|(idx, value)| Point::new(scale.x(idx), scale.y(*value)))
        .collect()
}

/// Draw list for `samples` with the marker at `selected` (clamped).
#[must_use]
pub fn render(
    samples: &[f32],
    selected: usize,
    surface: &Surface,
    style: &SparkStyle,
) -> Vec<DrawCommand> {
    let (width, height) = surface.physical();
    let mut commands = vec![DrawCommand::Clear {
        width: f64::from(width),
        height: f64::from(height),
    }];
    if samples.is_empty() {
        return commands;
    }

    let scale = Scale::new(samples, surface, style);
    let lengths = surface.ratio().x;
    let points = plot_points(samples, surface, style);

    commands.push(DrawCommand::Stroke {
        points: points.clone(),
        width: style.line_width * lengths,
        color: style.stroke,
    });

    let first_x = points.first().map_or(scale.pad_x, |p| p.x);
    let last_x = points.last().map_or(scale.pad_x, |p| p.x);
    let mut polygon = points.clone();
    polygon.push(Point::new(last_x, scale.baseline()));
    polygon.push(Point::new(first_x, scale.baseline()));
    commands.push(DrawCommand::Fill {
        polygon,
        gradient: VerticalGradient {
            top: style.fill_top,
            bottom: style.fill_bottom,
            y_top: 0.0,
            y_bottom: scale.height,
        },
    });

    let marker = points[selected.min(points.len() - 1)];
    commands.push(DrawCommand::Disc {
        center: marker,
        radius: style.ring_radius * lengths,
        color: style.ring,
    });
    commands.push(DrawCommand::Disc {
        center: marker,
        radius: style.dot_radius * lengths,
        color: style.dot,
    });
    commands
}

/// Horizontal spans covered by `polygon` on scanline `y` (even-odd rule),
/// as `(x_start, x_end)` pairs sorted left to right.
#[must_use]
pub fn scanline_spans(polygon: &[Point], y: f64) -> Vec<(f64, f64)> {
    if polygon.len() < 3 {
        return Vec::new();
    }
    let mut crossings: Vec<f64> = polygon
        .iter()
        .zip(polygon.iter().cycle().skip(1))
        .filter(|(a, b)| (a.y <= y) != (b.y <= y))
        .map(|(a, b)| a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y))
        .collect();
    crossings.sort_by(f64::total_cmp);
    crossings
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

/// Integer dot coordinates inside a disc.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn disc_dots(center: Point, radius: f64) -> Vec<(i64, i64)> {
    if radius <= 0.0 {
        return vec![(center.x.round() as i64, center.y.round() as i64)];
    }
    let cx = center.x.round() as i64;
    let cy = center.y.round() as i64;
    let reach = radius.ceil() as i64;
    let limit = radius * radius;
    let mut dots = Vec::new();
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            #[allow(clippy::cast_precision_loss)]
            let dist = (dx * dx + dy * dy) as f64;
            if dist <= limit {
                dots.push((cx + dx, cy + dy));
            }
        }
    }
    dots
}
