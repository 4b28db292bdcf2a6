use crate::animation::ease::Easing;
use crate::effects::clip::{ClipRegion, PixelRect};
use crate::effects::composite::{draw_clipped, draw_transformed};
use crate::effects::transitions::{
    SplitAxis, Sweep, Transition, TransitionDirection, TransitionKind, TransitionSettings,
};
use crate::foundation::config::RenderConfig;
use crate::foundation::core::{Canvas, FrameRGBA};
use crate::foundation::error::RenderResult;

/// Where a transition is in its lifetime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionState {
    /// No time has elapsed yet.
    NotStarted,
    /// Eased progress in `(0, 1)`.
    Running(f64),
    /// The full duration has elapsed.
    Complete,
}

impl TransitionState {
    /// Progress value to feed the renderer.
    pub fn progress(self) -> f64 {
        match self {
            Self::NotStarted => 0.0,
            Self::Running(p) => p,
            Self::Complete => 1.0,
        }
    }
}

/// Stateless transition renderer.
///
/// Output is a pure function of `(transition, outgoing, incoming, progress)`. Either source frame
/// may be absent; absent frames draw nothing. Frames of a different size than the canvas are
/// sampled at identity placement, with missing pixels read as transparent.
#[derive(Clone, Debug)]
pub struct TransitionEngine {
    canvas: Canvas,
    config: RenderConfig,
}

impl TransitionEngine {
    /// Build an engine producing frames of `canvas` size.
    pub fn new(canvas: Canvas, config: RenderConfig) -> RenderResult<Self> {
        canvas.validate()?;
        config.validate()?;
        Ok(Self { canvas, config })
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Compose one frame.
    ///
    /// `progress <= 0` shows only the outgoing frame; `progress >= 1` shows only the incoming frame
    /// (IN) or only the background (OUT).
    #[tracing::instrument(level = "trace", skip(self, outgoing, incoming))]
    pub fn render(
        &self,
        transition: Transition,
        outgoing: Option<&FrameRGBA>,
        incoming: Option<&FrameRGBA>,
        progress: f64,
    ) -> FrameRGBA {
        let mut dst = FrameRGBA::filled(self.canvas, self.config.clear_rgba.premultiplied());
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };

        let incoming = match transition.direction {
            TransitionDirection::In => incoming,
            TransitionDirection::Out => None,
        };

        if progress <= 0.0 {
            if let Some(a) = outgoing {
                draw_clipped(&mut dst, a, &ClipRegion::Full, 1.0);
            }
            return dst;
        }
        if progress >= 1.0 {
            if let Some(b) = incoming {
                draw_clipped(&mut dst, b, &ClipRegion::Full, 1.0);
            }
            return dst;
        }

        match transition.kind {
            TransitionKind::Swap => {
                if let Some(a) = outgoing {
                    draw_clipped(&mut dst, a, &ClipRegion::Full, 1.0);
                }
            }
            TransitionKind::Fade => {
                let p = progress as f32;
                match transition.direction {
                    TransitionDirection::In => {
                        if let Some(a) = outgoing {
                            draw_clipped(&mut dst, a, &ClipRegion::Full, 1.0);
                        }
                        if let Some(b) = incoming {
                            draw_clipped(&mut dst, b, &ClipRegion::Full, p);
                        }
                    }
                    TransitionDirection::Out => {
                        if let Some(a) = outgoing {
                            draw_clipped(&mut dst, a, &ClipRegion::Full, (1.0 - p).max(0.0));
                        }
                    }
                }
            }
            TransitionKind::Swipe(_)
            | TransitionKind::SplitExpand(_)
            | TransitionKind::SplitCollapse(_) => {
                let revealed = revealed_region(transition.kind, self.canvas, progress);
                self.draw_revealed(&mut dst, outgoing, incoming, &revealed);
            }
            TransitionKind::CircularExpand => {
                let (cx, cy, r) = circle_geometry(self.canvas, progress);
                match transition.direction {
                    // Outgoing stays unclipped underneath; the incoming disc masks it.
                    TransitionDirection::In => {
                        if let Some(a) = outgoing {
                            draw_clipped(&mut dst, a, &ClipRegion::Full, 1.0);
                        }
                        if let Some(b) = incoming {
                            draw_clipped(&mut dst, b, &ClipRegion::Circle { cx, cy, r }, 1.0);
                        }
                    }
                    TransitionDirection::Out => {
                        // Area subtraction with hard pixel-center edges; no anti-aliasing.
                        if let Some(a) = outgoing {
                            let outside = ClipRegion::outside(ClipRegion::Circle { cx, cy, r });
                            draw_clipped(&mut dst, a, &outside, 1.0);
                        }
                    }
                }
            }
            TransitionKind::CircularCollapse => {
                let (cx, cy, r) = circle_geometry(self.canvas, 1.0 - progress);
                let disc = ClipRegion::Circle { cx, cy, r };
                match transition.direction {
                    // Mirror of the expand case: incoming unclipped, outgoing disc on top.
                    TransitionDirection::In => {
                        if let Some(b) = incoming {
                            draw_clipped(&mut dst, b, &ClipRegion::Full, 1.0);
                        }
                        if let Some(a) = outgoing {
                            draw_clipped(&mut dst, a, &disc, 1.0);
                        }
                    }
                    TransitionDirection::Out => {
                        if let Some(a) = outgoing {
                            draw_clipped(&mut dst, a, &disc, 1.0);
                        }
                    }
                }
            }
            TransitionKind::ZoomIn => match transition.direction {
                TransitionDirection::In => {
                    if let Some(a) = outgoing {
                        draw_clipped(&mut dst, a, &ClipRegion::Full, 1.0);
                    }
                    if let Some(b) = incoming {
                        draw_transformed(&mut dst, b, progress, 0.0, 0.0, 1.0);
                    }
                }
                TransitionDirection::Out => {
                    if let Some(a) = outgoing {
                        let p = progress as f32;
                        draw_transformed(&mut dst, a, 1.0 + progress, 0.0, 0.0, 1.0 - p);
                    }
                }
            },
            TransitionKind::ZoomOut => match transition.direction {
                TransitionDirection::In => {
                    if let Some(a) = outgoing {
                        draw_clipped(&mut dst, a, &ClipRegion::Full, 1.0);
                    }
                    if let Some(b) = incoming {
                        let p = progress as f32;
                        draw_transformed(&mut dst, b, 2.0 - progress, 0.0, 0.0, p);
                    }
                }
                TransitionDirection::Out => {
                    if let Some(a) = outgoing {
                        draw_transformed(&mut dst, a, 1.0 - progress, 0.0, 0.0, 1.0);
                    }
                }
            },
            TransitionKind::Push(sweep) => {
                let (ux, uy) = sweep_unit(sweep);
                let w = f64::from(self.canvas.width);
                let h = f64::from(self.canvas.height);
                if let Some(a) = outgoing {
                    let (dx, dy) = (ux * w * progress, uy * h * progress);
                    draw_transformed(&mut dst, a, 1.0, dx.round(), dy.round(), 1.0);
                }
                if let Some(b) = incoming {
                    let rem = 1.0 - progress;
                    let (dx, dy) = (-ux * w * rem, -uy * h * rem);
                    draw_transformed(&mut dst, b, 1.0, dx.round(), dy.round(), 1.0);
                }
            }
        }
        dst
    }

    fn draw_revealed(
        &self,
        dst: &mut FrameRGBA,
        outgoing: Option<&FrameRGBA>,
        incoming: Option<&FrameRGBA>,
        revealed: &ClipRegion,
    ) {
        if let Some(a) = outgoing {
            let remainder = ClipRegion::outside(revealed.clone());
            draw_clipped(dst, a, &remainder, 1.0);
        }
        if let Some(b) = incoming {
            draw_clipped(dst, b, revealed, 1.0);
        }
    }
}

/// Region the incoming frame occupies (equivalently, the region the outgoing frame has vacated)
/// for the rectangular families at `progress` in `(0, 1)`.
pub(crate) fn revealed_region(kind: TransitionKind, canvas: Canvas, progress: f64) -> ClipRegion {
    let (w, h) = (canvas.width, canvas.height);
    match kind {
        TransitionKind::Swipe(sweep) => {
            let along = match sweep {
                Sweep::Right | Sweep::Left => w,
                Sweep::Up | Sweep::Down => h,
            };
            let edge = leading_edge(along, progress);
            let r = match sweep {
                Sweep::Right => PixelRect::new(0, 0, edge, h),
                Sweep::Left => PixelRect::new(w - edge, 0, w, h),
                Sweep::Down => PixelRect::new(0, 0, w, edge),
                Sweep::Up => PixelRect::new(0, h - edge, w, h),
            };
            ClipRegion::rect(r)
        }
        TransitionKind::SplitExpand(axis) => {
            if progress >= 1.0 {
                return ClipRegion::Full;
            }
            let len = axis_len(axis, w, h);
            let (a, mid, b) = center_strip(len, progress);
            ClipRegion::union([
                axis_rect(axis, a, mid, w, h),
                axis_rect(axis, mid, b, w, h),
            ])
        }
        TransitionKind::SplitCollapse(axis) => {
            // Remaining outgoing strip is exactly zero-height at completion.
            if progress >= 1.0 {
                return ClipRegion::Full;
            }
            let len = axis_len(axis, w, h);
            let (a, _, b) = center_strip(len, 1.0 - progress);
            ClipRegion::union([axis_rect(axis, 0, a, w, h), axis_rect(axis, b, len, w, h)])
        }
        _ => ClipRegion::Full,
    }
}

/// Leading edge position in pixels, `ceil(len * progress)` clamped to `[0, len]`.
fn leading_edge(len: u32, progress: f64) -> u32 {
    let e = (f64::from(len) * progress).ceil();
    e.clamp(0.0, f64::from(len)) as u32
}

/// `(start, center, end)` of a strip centered on `len / 2` with half-extent `len / 2 * fraction`.
fn center_strip(len: u32, fraction: f64) -> (u32, u32, u32) {
    let half = f64::from(len) / 2.0;
    let ext = half * fraction.clamp(0.0, 1.0);
    let a = (half - ext).floor().max(0.0) as u32;
    let b = ((half + ext).ceil() as u32).min(len);
    let mid = (half.floor() as u32).clamp(a, b);
    if ext <= 0.0 {
        return (mid, mid, mid);
    }
    (a, mid, b)
}

fn axis_len(axis: SplitAxis, w: u32, h: u32) -> u32 {
    match axis {
        SplitAxis::Horizontal => h,
        SplitAxis::Vertical => w,
    }
}

fn axis_rect(axis: SplitAxis, a: u32, b: u32, w: u32, h: u32) -> PixelRect {
    match axis {
        SplitAxis::Horizontal => PixelRect::new(0, a, w, b),
        SplitAxis::Vertical => PixelRect::new(a, 0, b, h),
    }
}

/// Center and radius of the reveal circle: `radius = fraction * distance(center, corner)`.
fn circle_geometry(canvas: Canvas, fraction: f64) -> (f64, f64, f64) {
    let cx = f64::from(canvas.width) / 2.0;
    let cy = f64::from(canvas.height) / 2.0;
    let max_r = (cx * cx + cy * cy).sqrt();
    (cx, cy, fraction.clamp(0.0, 1.0) * max_r)
}

fn sweep_unit(sweep: Sweep) -> (f64, f64) {
    match sweep {
        Sweep::Right => (1.0, 0.0),
        Sweep::Left => (-1.0, 0.0),
        Sweep::Up => (0.0, -1.0),
        Sweep::Down => (0.0, 1.0),
    }
}

/// A resolved transition plus its timing.
///
/// Built once at setup, so bad ids are reported before anything is on screen. Progress comes from
/// the caller's clock; abandoning a transition is just a matter of no longer calling it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionAnimation {
    /// Transition family and direction.
    pub transition: Transition,
    /// Progress curve.
    pub easing: Easing,
    /// Total duration in milliseconds.
    pub duration_ms: u64,
}

impl TransitionAnimation {
    /// Resolve persisted settings; unknown ids are configuration errors.
    pub fn from_settings(settings: &TransitionSettings) -> RenderResult<Self> {
        let (transition, easing) = settings.resolve()?;
        Ok(Self {
            transition,
            easing,
            duration_ms: settings.duration_ms,
        })
    }

    /// State after `elapsed_ms`.
    pub fn state(&self, elapsed_ms: u64) -> TransitionState {
        if elapsed_ms >= self.duration_ms {
            return TransitionState::Complete;
        }
        if elapsed_ms == 0 {
            return TransitionState::NotStarted;
        }
        TransitionState::Running(self.easing.progress(elapsed_ms, self.duration_ms))
    }

    /// Render the frame for `elapsed_ms`.
    pub fn render_at(
        &self,
        engine: &TransitionEngine,
        outgoing: Option<&FrameRGBA>,
        incoming: Option<&FrameRGBA>,
        elapsed_ms: u64,
    ) -> FrameRGBA {
        let state = self.state(elapsed_ms);
        tracing::trace!(
            transition = %self.transition.kind.name(),
            elapsed_ms,
            ?state,
            "transition frame"
        );
        engine.render(self.transition, outgoing, incoming, state.progress())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/engine.rs"]
mod tests;
