//! Built-in vector numerals.
//!
//! Used for the dial numerals when no TrueType font could be loaded. Glyphs
//! are polylines on a 6×10 grid with the origin at the top-left of the cell
//! and the baseline at `y = 10`.

/// Grid height of a glyph cell.
const CELL_HEIGHT: f64 = 10.0;
/// Gap between adjacent glyphs, in grid units.
const TRACKING: f64 = 1.5;
/// Cap height relative to the requested text size.
const CAP_HEIGHT: f64 = 0.7;

/// A polyline vertex. `pen` is false when moving to the point without drawing.
#[derive(Debug, Copy, Clone)]
pub struct PackedPoint {
    pub x: i8,
    pub y: i8,
    pub pen: bool,
}

const fn mv(x: i8, y: i8) -> PackedPoint {
    PackedPoint { x, y, pen: false }
}

const fn ln(x: i8, y: i8) -> PackedPoint {
    PackedPoint { x, y, pen: true }
}

#[derive(Debug, Copy, Clone)]
pub struct StrokeGlyph {
    pub right: i8,
    pub strokes: &'static [PackedPoint],
}

static DIGITS: [StrokeGlyph; 10] = [
    StrokeGlyph {
        right: 6,
        strokes: &[mv(0, 0), ln(6, 0), ln(6, 10), ln(0, 10), ln(0, 0)],
    },
    StrokeGlyph {
        right: 6,
        strokes: &[mv(1, 2), ln(3, 0), ln(3, 10), mv(1, 10), ln(5, 10)],
    },
    StrokeGlyph {
        right: 6,
        strokes: &[mv(0, 0), ln(6, 0), ln(6, 5), ln(0, 5), ln(0, 10), ln(6, 10)],
    },
    StrokeGlyph {
        right: 6,
        strokes: &[mv(0, 0), ln(6, 0), ln(6, 10), ln(0, 10), mv(1, 5), ln(6, 5)],
    },
    StrokeGlyph {
        right: 6,
        strokes: &[mv(0, 0), ln(0, 5), ln(6, 5), mv(5, 0), ln(5, 10)],
    },
    StrokeGlyph {
        right: 6,
        strokes: &[mv(6, 0), ln(0, 0), ln(0, 5), ln(6, 5), ln(6, 10), ln(0, 10)],
    },
    StrokeGlyph {
        right: 6,
        strokes: &[mv(6, 0), ln(0, 0), ln(0, 10), ln(6, 10), ln(6, 5), ln(0, 5)],
    },
    StrokeGlyph {
        right: 6,
        strokes: &[mv(0, 0), ln(6, 0), ln(2, 10)],
    },
    StrokeGlyph {
        right: 6,
        strokes: &[
            mv(0, 0),
            ln(6, 0),
            ln(6, 10),
            ln(0, 10),
            ln(0, 0),
            mv(0, 5),
            ln(6, 5),
        ],
    },
    StrokeGlyph {
        right: 6,
        strokes: &[mv(6, 5), ln(0, 5), ln(0, 0), ln(6, 0), ln(6, 10), ln(0, 10)],
    },
];

pub fn glyph(c: char) -> Option<&'static StrokeGlyph> {
    c.to_digit(10).map(|d| &DIGITS[d as usize])
}

fn unit(size: f64) -> f64 {
    size * CAP_HEIGHT / CELL_HEIGHT
}

/// Width in pixels of `text` at the given text size. Unsupported characters
/// are skipped.
pub fn text_width(text: &str, size: f64) -> f64 {
    let glyphs: Vec<_> = text.chars().filter_map(glyph).collect();
    if glyphs.is_empty() {
        return 0.0;
    }
    let grid: f64 = glyphs.iter().map(|g| g.right as f64).sum::<f64>()
        + TRACKING * (glyphs.len() - 1) as f64;
    grid * unit(size)
}

/// Line segments for `text` with the left edge at `x` and the baseline at `y`.
pub fn layout(text: &str, size: f64, x: f64, y: f64) -> Vec<((f64, f64), (f64, f64))> {
    let unit = unit(size);
    let top = y - CELL_HEIGHT * unit;
    let mut segments = Vec::new();
    let mut pen_x = x;

    for g in text.chars().filter_map(glyph) {
        let mut last: Option<(f64, f64)> = None;
        for p in g.strokes {
            let point = (pen_x + p.x as f64 * unit, top + p.y as f64 * unit);
            if p.pen {
                if let Some(from) = last {
                    segments.push((from, point));
                }
            }
            last = Some(point);
        }
        pen_x += (g.right as f64 + TRACKING) * unit;
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_digit_has_strokes() {
        for c in '0'..='9' {
            let g = glyph(c).unwrap();
            assert!(g.strokes.iter().filter(|p| p.pen).count() >= 2, "{c}");
            assert!(!g.strokes[0].pen, "{c} must start with a move");
        }
        assert!(glyph('x').is_none());
    }

    #[test]
    fn layout_stays_in_cell() {
        let size = 20.0;
        let segments = layout("12", size, 100.0, 50.0);
        let width = text_width("12", size);
        let cap = size * CAP_HEIGHT;
        assert!(!segments.is_empty());
        for ((x0, y0), (x1, y1)) in segments {
            for (x, y) in [(x0, y0), (x1, y1)] {
                assert!((100.0..=100.0 + width + 1e-9).contains(&x));
                assert!((50.0 - cap - 1e-9..=50.0 + 1e-9).contains(&y));
            }
        }
    }

    #[test]
    fn two_digit_numbers_are_wider() {
        assert!(text_width("12", 10.0) > text_width("1", 10.0));
        assert_eq!(text_width("", 10.0), 0.0);
    }
}
