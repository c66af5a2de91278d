//! CPU rasterisation into an RGBA8 frame: anti-aliased lines, discs, rings
//! and text.

use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::stroke_font;
use crate::style::Color;

/// RGBA8 framebuffer view, row-major with no row padding.
pub struct Canvas<'a> {
    pub(crate) frame: &'a mut [u8],
    pub(crate) width: usize,
    pub(crate) height: usize,
}

impl<'a> Canvas<'a> {
    /// Rows that do not fit in `frame` are dropped from the canvas.
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        let rows = match width {
            0 => 0,
            w => frame.len() / (w * 4),
        };
        Self {
            frame,
            width,
            height: height.min(rows),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.frame[idx..idx + 4]);
        Some(out)
    }

    /// Blends `color` over the pixel with the given coverage.
    fn blend(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let a = (coverage * color.opacity()).clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let dst = &mut self.frame[idx..idx + 4];
        let src = [color.r as f32, color.g as f32, color.b as f32];
        for channel in 0..3 {
            dst[channel] = (src[channel] * a + dst[channel] as f32 * (1.0 - a)).round() as u8;
        }
        dst[3] = 0xff;
    }

    /// Thick anti-aliased segment with round caps.
    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), thickness: f32, color: Color) {
        let half = (thickness.max(1.0) / 2.0) as f64;
        let (x0, y0) = from;
        let (x1, y1) = to;
        let min_x = (x0.min(x1) - half - 1.0).floor() as i32;
        let max_x = (x0.max(x1) + half + 1.0).ceil() as i32;
        let min_y = (y0.min(y1) - half - 1.0).floor() as i32;
        let max_y = (y0.max(y1) + half + 1.0).ceil() as i32;
        let dx = x1 - x0;
        let dy = y1 - y0;
        let len_sq = dx * dx + dy * dy;

        for y in min_y.max(0)..=max_y.min(self.height as i32 - 1) {
            for x in min_x.max(0)..=max_x.min(self.width as i32 - 1) {
                let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
                let t = if len_sq > 0.0 {
                    (((px - x0) * dx + (py - y0) * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let lx = x0 + t * dx;
                let ly = y0 + t * dy;
                let dist = ((lx - px).powi(2) + (ly - py).powi(2)).sqrt();
                let aa = (1.0 - (dist - half + 0.5).clamp(0.0, 1.0)) as f32;
                if aa > 0.01 {
                    self.blend(x, y, color, aa);
                }
            }
        }
    }

    /// Filled anti-aliased disc.
    pub fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: Color) {
        if radius <= 0.0 {
            return;
        }
        self.coverage_in_annulus(center, 0.0, radius, color);
    }

    /// Ring centered on `radius` with the given stroke width.
    pub fn stroke_circle(&mut self, center: (f64, f64), radius: f64, width: f32, color: Color) {
        let half = (width.max(1.0) / 2.0) as f64;
        self.coverage_in_annulus(center, (radius - half).max(0.0), radius + half, color);
    }

    fn coverage_in_annulus(&mut self, center: (f64, f64), inner: f64, outer: f64, color: Color) {
        let (cx, cy) = center;
        let min_x = (cx - outer - 1.0).floor().max(0.0) as i32;
        let max_x = ((cx + outer + 1.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (cy - outer - 1.0).floor().max(0.0) as i32;
        let max_y = ((cy + outer + 1.0).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                let outer_aa = (outer - dist + 0.5).clamp(0.0, 1.0);
                let inner_aa = if inner > 0.0 {
                    (dist - inner + 0.5).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                let aa = (outer_aa * inner_aa) as f32;
                if aa > 0.0 {
                    self.blend(x, y, color, aa);
                }
            }
        }
    }

    /// Draws `text` horizontally centered on `x` with its baseline at `y`.
    pub fn text(
        &mut self,
        typeface: &Typeface,
        x: f64,
        baseline: f64,
        text: &str,
        size: f64,
        color: Color,
    ) {
        if size <= 0.0 {
            return;
        }
        match typeface {
            Typeface::TrueType(font) => self.truetype_text(font, x, baseline, text, size, color),
            Typeface::Stroke => {
                let left = x - stroke_font::text_width(text, size) / 2.0;
                let thickness = (size / 10.0).max(1.0) as f32;
                for (from, to) in stroke_font::layout(text, size, left, baseline) {
                    self.line(from, to, thickness, color);
                }
            }
        }
    }

    fn truetype_text(
        &mut self,
        font: &Font<'static>,
        x: f64,
        baseline: f64,
        text: &str,
        size: f64,
        color: Color,
    ) {
        let scale = Scale::uniform(size as f32);
        let glyphs: Vec<PositionedGlyph> = font.layout(text, scale, point(0.0, 0.0)).collect();
        let advance = text_advance(&glyphs);
        let offset_x = (x - advance as f64 / 2.0).round() as i32;
        let offset_y = baseline.round() as i32;

        for glyph in &glyphs {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    let px = offset_x + bb.min.x + gx as i32;
                    let py = offset_y + bb.min.y + gy as i32;
                    self.blend(px, py, color, v);
                });
            }
        }
    }
}

fn text_advance(glyphs: &[PositionedGlyph]) -> f32 {
    match (glyphs.first(), glyphs.last()) {
        (Some(first), Some(last)) => {
            last.position().x - first.position().x + last.unpositioned().h_metrics().advance_width
        }
        _ => 0.0,
    }
}

/// How numerals are drawn.
#[derive(Default)]
pub enum Typeface {
    TrueType(Font<'static>),
    /// Built-in vector digits, always available.
    #[default]
    Stroke,
}

impl Typeface {
    pub fn from_bytes(data: Vec<u8>) -> Option<Self> {
        Font::try_from_vec(data).map(Self::TrueType)
    }

    pub fn is_stroke(&self) -> bool {
        matches!(self, Self::Stroke)
    }
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TrueType(_) => f.write_str("Typeface::TrueType"),
            Self::Stroke => f.write_str("Typeface::Stroke"),
        }
    }
}
