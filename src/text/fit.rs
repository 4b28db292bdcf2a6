use crate::foundation::config::TextConfig;
use crate::foundation::error::{RenderError, RenderResult};
use crate::slide::resources::FontHandle;

/// Measurement slack in pixels before a text block counts as overflowing.
const FIT_SLACK: f64 = 0.5;

/// Measured extent of a text block at one font size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextBounds {
    /// Widest line.
    pub width: f64,
    /// Total block height.
    pub height: f64,
    /// Height of a single rendered line.
    pub line_height: f64,
}

impl TextBounds {
    fn fits(&self, width: f64, height: f64) -> bool {
        self.width <= width + FIT_SLACK && self.height <= height + FIT_SLACK
    }
}

/// Something that can lay out text and report its bounds.
///
/// The compositor uses the parley-backed [`crate::TextEngine`]. Tests plug in simpler
/// implementations.
pub trait TextMeasure {
    /// Measure `text` (already line-break normalized) at `size_px`, wrapping at `wrap_width`
    /// when given.
    fn measure(
        &mut self,
        text: &str,
        font: &FontHandle,
        size_px: f32,
        wrap_width: Option<f32>,
    ) -> RenderResult<TextBounds>;
}

/// How the font size is chosen for a text box.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FitPolicy {
    /// Use the requested size; text may overflow.
    #[default]
    None,
    /// Shrink below the requested size until the text fits.
    ReduceSizeOnly,
    /// Shrink or grow to fill the box as closely as possible.
    BestFit,
}

/// Inputs to [`fit_font_size`].
#[derive(Clone, Copy, Debug)]
pub struct FitRequest<'a> {
    /// Normalized text.
    pub text: &'a str,
    /// Font to measure with.
    pub font: &'a FontHandle,
    /// Size the author asked for.
    pub requested_size: f32,
    /// Available width after padding.
    pub box_width: f64,
    /// Available height after padding.
    pub box_height: f64,
    /// Break lines at `box_width`.
    pub wrap: bool,
}

/// Result of a fit: chosen size and the bounds measured at that size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FittedText {
    /// Chosen font size in pixels.
    pub font_size: f32,
    /// Bounds at `font_size`.
    pub bounds: TextBounds,
}

/// Choose a font size for `req` under `policy`.
///
/// `ReduceSizeOnly` returns the largest size not above the requested one whose bounds fit the
/// box, bottoming out at `cfg.min_font_size`. `BestFit` first grows geometrically from the
/// requested size (capped at `cfg.max_font_size`) and then bisects. The search stops once the
/// bracket is narrower than `cfg.fit_precision` or after `cfg.max_fit_iterations` passes.
pub fn fit_font_size<M: TextMeasure + ?Sized>(
    measurer: &mut M,
    req: &FitRequest<'_>,
    policy: FitPolicy,
    cfg: &TextConfig,
) -> RenderResult<FittedText> {
    if !req.requested_size.is_finite() || req.requested_size <= 0.0 {
        return Err(RenderError::validation(format!(
            "font size must be finite and > 0, got {}",
            req.requested_size
        )));
    }
    if req.box_width <= 0.0 || req.box_height <= 0.0 {
        return Err(RenderError::validation("text box has no area after padding"));
    }

    let wrap_width = req.wrap.then_some(req.box_width as f32);
    let mut search = Search {
        measurer,
        req,
        wrap_width,
        remaining: cfg.max_fit_iterations,
    };

    if req.text.is_empty() || policy == FitPolicy::None {
        let bounds = search.measure(req.requested_size)?;
        return Ok(FittedText {
            font_size: req.requested_size,
            bounds,
        });
    }

    let max = cfg.max_font_size;
    // Reducing never returns more than was asked for, even below the configured floor.
    let (min, start) = match policy {
        FitPolicy::ReduceSizeOnly => (
            cfg.min_font_size.min(req.requested_size),
            req.requested_size.min(max),
        ),
        _ => (
            cfg.min_font_size,
            req.requested_size.clamp(cfg.min_font_size, max),
        ),
    };
    let start_bounds = search.measure(start)?;

    // `lo` always fits (or is the floor), `hi` never does.
    let (mut lo, mut lo_bounds, mut hi) = if search.fits(&start_bounds) {
        if policy == FitPolicy::ReduceSizeOnly {
            return Ok(FittedText {
                font_size: start,
                bounds: start_bounds,
            });
        }
        let mut lo = start;
        let mut lo_bounds = start_bounds;
        let mut hi = None;
        while lo < max && search.has_budget() {
            let next = (lo * 2.0).min(max);
            let b = search.measure(next)?;
            if search.fits(&b) {
                lo = next;
                lo_bounds = b;
            } else {
                hi = Some(next);
                break;
            }
        }
        match hi {
            Some(hi) => (lo, lo_bounds, hi),
            None => {
                return Ok(FittedText {
                    font_size: lo,
                    bounds: lo_bounds,
                });
            }
        }
    } else {
        if start <= min {
            return Ok(FittedText {
                font_size: start,
                bounds: start_bounds,
            });
        }
        let floor_bounds = search.measure(min)?;
        if !search.fits(&floor_bounds) {
            tracing::debug!(
                min_font_size = min,
                "text does not fit even at the minimum font size"
            );
            return Ok(FittedText {
                font_size: min,
                bounds: floor_bounds,
            });
        }
        (min, floor_bounds, start)
    };

    while hi - lo > cfg.fit_precision && search.has_budget() {
        let mid = lo + (hi - lo) / 2.0;
        let b = search.measure(mid)?;
        if search.fits(&b) {
            lo = mid;
            lo_bounds = b;
        } else {
            hi = mid;
        }
    }

    Ok(FittedText {
        font_size: lo,
        bounds: lo_bounds,
    })
}

struct Search<'m, 'r, M: ?Sized> {
    measurer: &'m mut M,
    req: &'r FitRequest<'r>,
    wrap_width: Option<f32>,
    remaining: u32,
}

impl<M: TextMeasure + ?Sized> Search<'_, '_, M> {
    fn measure(&mut self, size: f32) -> RenderResult<TextBounds> {
        self.remaining = self.remaining.saturating_sub(1);
        self.measurer
            .measure(self.req.text, self.req.font, size, self.wrap_width)
    }

    fn has_budget(&self) -> bool {
        self.remaining > 0
    }

    fn fits(&self, b: &TextBounds) -> bool {
        b.fits(self.req.box_width, self.req.box_height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fit.rs"]
mod tests;
