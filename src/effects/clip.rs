//! Pixel-space clip geometry for transitions.
//!
//! Regions are evaluated one row at a time into half-open column spans `[x0, x1)`. A pixel
//! `(x, y)` belongs to a region when its center `(x + 0.5, y + 0.5)` does. Rectangles are
//! integer-aligned so their boundaries are exact.

use smallvec::SmallVec;

/// Half-open column range `[x0, x1)` within one row.
pub(crate) type Span = (u32, u32);

/// Spans for one row, sorted and non-overlapping.
pub(crate) type RowSpans = SmallVec<[Span; 4]>;

/// Integer-aligned half-open rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PixelRect {
    pub(crate) x0: u32,
    pub(crate) y0: u32,
    pub(crate) x1: u32,
    pub(crate) y1: u32,
}

impl PixelRect {
    pub(crate) fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    fn is_empty(self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }
}

/// Clip region in pixel space.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ClipRegion {
    Empty,
    Full,
    /// Union of rectangles.
    Rects(SmallVec<[PixelRect; 2]>),
    /// Disc centered at `(cx, cy)`.
    Circle { cx: f64, cy: f64, r: f64 },
    /// Frame area minus the inner region.
    Outside(Box<ClipRegion>),
}

impl ClipRegion {
    pub(crate) fn rect(r: PixelRect) -> Self {
        Self::union([r])
    }

    /// Area subtraction: everything in the frame not covered by `inner`.
    pub(crate) fn outside(inner: ClipRegion) -> Self {
        match inner {
            Self::Empty => Self::Full,
            Self::Full => Self::Empty,
            other => Self::Outside(Box::new(other)),
        }
    }

    pub(crate) fn union(rects: impl IntoIterator<Item = PixelRect>) -> Self {
        let rects: SmallVec<[PixelRect; 2]> =
            rects.into_iter().filter(|r| !r.is_empty()).collect();
        if rects.is_empty() {
            Self::Empty
        } else {
            Self::Rects(rects)
        }
    }

    /// Covered spans of row `y` for a frame `width` pixels wide.
    pub(crate) fn row_spans(&self, y: u32, width: u32) -> RowSpans {
        let mut out = RowSpans::new();
        if width == 0 {
            return out;
        }
        match self {
            Self::Empty => {}
            Self::Full => out.push((0, width)),
            Self::Rects(rects) => {
                for r in rects {
                    if y >= r.y0 && y < r.y1 {
                        let x0 = r.x0.min(width);
                        let x1 = r.x1.min(width);
                        if x0 < x1 {
                            out.push((x0, x1));
                        }
                    }
                }
                normalize(&mut out);
            }
            Self::Circle { cx, cy, r } => {
                if let Some(s) = circle_span(*cx, *cy, *r, y, width) {
                    out.push(s);
                }
            }
            Self::Outside(inner) => {
                out = complement(&inner.row_spans(y, width), width);
            }
        }
        out
    }
}

fn circle_span(cx: f64, cy: f64, r: f64, y: u32, width: u32) -> Option<Span> {
    if r.is_nan() || r <= 0.0 {
        return None;
    }
    let dy = f64::from(y) + 0.5 - cy;
    let rem = r * r - dy * dy;
    if rem < 0.0 {
        return None;
    }
    let half = rem.sqrt();
    // Centers x + 0.5 in [cx - half, cx + half].
    let x0 = (cx - half - 0.5).ceil().max(0.0);
    let x1 = ((cx + half - 0.5).floor() + 1.0).min(f64::from(width));
    if x0 >= x1 {
        return None;
    }
    Some((x0 as u32, x1 as u32))
}

fn normalize(spans: &mut RowSpans) {
    if spans.len() < 2 {
        return;
    }
    spans.sort_unstable_by_key(|s| s.0);
    let mut merged = RowSpans::new();
    for &(a, b) in spans.iter() {
        match merged.last_mut() {
            Some(last) if a <= last.1 => last.1 = last.1.max(b),
            _ => merged.push((a, b)),
        }
    }
    *spans = merged;
}

/// Spans of `[0, width)` not covered by `spans` (which must be sorted and disjoint).
pub(crate) fn complement(spans: &[Span], width: u32) -> RowSpans {
    let mut out = RowSpans::new();
    let mut cursor = 0u32;
    for &(a, b) in spans {
        if a > cursor {
            out.push((cursor, a));
        }
        cursor = cursor.max(b);
    }
    if cursor < width {
        out.push((cursor, width));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/clip.rs"]
mod tests;
