use std::sync::Arc;

use kurbo::Shape;

use crate::foundation::config::TextConfig;
use crate::foundation::core::{Canvas, FrameRGBA, Rect, Rgba8};
use crate::foundation::error::{RenderError, RenderResult};
use crate::render::groups::Member;
use crate::slide::component::{ComponentKind, MediaContent, MediaSource, SlideComponent};
use crate::slide::style::BoxStyle;
use crate::text::engine::{PreparedText, TextEngine};

/// CPU rasterizer for groups of components.
///
/// Every component is prepared first (text fitted, media converted to a paint). A component
/// whose preparation fails is logged and skipped; drawing prepared components cannot fail.
pub(crate) struct Rasterizer {
    ctx: Option<vello_cpu::RenderContext>,
    text: TextEngine,
    text_cfg: TextConfig,
}

/// Pixels of one rasterized group plus how many members were dropped.
pub(crate) struct RasterOutput {
    pub(crate) frame: FrameRGBA,
    pub(crate) skipped: u32,
}

enum Content {
    None,
    Text(PreparedText),
    Media {
        paint: vello_cpu::Image,
        dest: Rect,
        width: f64,
        height: f64,
    },
}

struct Prepared<'a> {
    component: &'a SlideComponent,
    content: Content,
}

impl Rasterizer {
    pub(crate) fn new(text_cfg: TextConfig) -> Self {
        Self {
            ctx: None,
            text: TextEngine::new(),
            text_cfg,
        }
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> R,
    ) -> R {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(&mut ctx);
        self.ctx = Some(ctx);
        out
    }

    /// Rasterize `members` bottom to top into a transparent canvas-sized frame.
    pub(crate) fn rasterize(&mut self, canvas: Canvas, members: &[Member<'_>]) -> RasterOutput {
        let mut skipped = 0u32;
        let mut prepared = Vec::with_capacity(members.len());
        for m in members.iter().filter(|m| m.component.visible) {
            match self.prepare(m) {
                Ok(content) => prepared.push(Prepared {
                    component: m.component,
                    content,
                }),
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(
                        component = %m.component.id(),
                        kind = m.component.kind.name(),
                        error = %e,
                        "skipping component that failed to rasterize"
                    );
                }
            }
        }

        // Compositor::new and set_canvas reject canvases that do not fit in u16.
        let w = u16::try_from(canvas.width).unwrap_or(u16::MAX);
        let h = u16::try_from(canvas.height).unwrap_or(u16::MAX);
        let data = self.with_ctx_mut(w, h, |ctx| {
            for p in &prepared {
                draw_prepared(ctx, p);
            }
            ctx.flush();
            let mut pixmap = vello_cpu::Pixmap::new(w, h);
            ctx.render_to_pixmap(&mut pixmap);
            pixmap.data_as_u8_slice().to_vec()
        });

        RasterOutput {
            frame: FrameRGBA {
                width: canvas.width,
                height: canvas.height,
                data,
            },
            skipped,
        }
    }

    fn prepare(&mut self, m: &Member<'_>) -> RenderResult<Content> {
        let c = m.component;
        let text = match &m.text {
            Ok(t) => t.as_deref(),
            Err(e) => return Err(RenderError::raster(e.to_string())),
        };
        match &c.kind {
            ComponentKind::Text { format, .. }
            | ComponentKind::Placeholder { format, .. }
            | ComponentKind::DateTime { format, .. } => {
                let prepared =
                    self.text
                        .prepare(text.unwrap_or(""), format, c.bounds, &self.text_cfg)?;
                Ok(prepared.map_or(Content::None, Content::Text))
            }
            ComponentKind::Media(MediaContent { source, scale }) => {
                let latest;
                let frame = match source {
                    MediaSource::Image(img) => img.frame(),
                    MediaSource::Video(live) => {
                        latest = live.latest();
                        match latest.as_deref() {
                            Some(f) => f,
                            // No decoded frame yet: only the box style is drawn.
                            None => return Ok(Content::None),
                        }
                    }
                };
                let pixmap = pixmap_from_premul_bytes(&frame.data, frame.width, frame.height)?;
                let (width, height) = (f64::from(frame.width), f64::from(frame.height));
                Ok(Content::Media {
                    paint: vello_cpu::Image {
                        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                        sampler: vello_cpu::peniko::ImageSampler::default(),
                    },
                    dest: scale.place(c.bounds, width, height),
                    width,
                    height,
                })
            }
        }
    }
}

fn draw_prepared(ctx: &mut vello_cpu::RenderContext, p: &Prepared<'_>) {
    let bounds = p.component.bounds;
    draw_box_under(ctx, bounds, &p.component.style);
    match &p.content {
        Content::None => {}
        Content::Text(text) => text.draw(ctx),
        Content::Media {
            paint,
            dest,
            width,
            height,
        } => {
            if dest.width() <= 0.0 || dest.height() <= 0.0 {
                return;
            }
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.push_clip_layer(&bounds.to_path(0.1));
            ctx.set_transform(
                vello_cpu::kurbo::Affine::translate((dest.x0, dest.y0))
                    * vello_cpu::kurbo::Affine::scale_non_uniform(
                        dest.width() / width,
                        dest.height() / height,
                    ),
            );
            ctx.set_paint(paint.clone());
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, *width, *height));
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.pop_layer();
        }
    }
}

/// Box shadow, background and border, in that order.
fn draw_box_under(ctx: &mut vello_cpu::RenderContext, bounds: Rect, style: &BoxStyle) {
    let radius = style.border.map_or(0.0, |b| b.corner_radius.max(0.0));
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

    if let Some(shadow) = &style.shadow {
        let r = bounds + kurbo::Vec2::new(shadow.offset_x, shadow.offset_y);
        fill_rounded(ctx, r, radius, shadow.color);
    }
    if let Some(bg) = style.background {
        fill_rounded(ctx, bounds, radius, bg);
    }
    let Some(border) = &style.border else {
        return;
    };
    // Stroke centered on an inset path so the border stays inside the bounds.
    let half = border.width / 2.0;
    let r = bounds.inset(-half);
    if border.width <= 0.0 || r.width() <= 0.0 || r.height() <= 0.0 {
        return;
    }
    let rr = kurbo::RoundedRect::from_rect(r, (radius - half).max(0.0));
    let mut p = vello_cpu::kurbo::BezPath::new();
    for el in rr.path_elements(0.1) {
        p.push(el);
    }
    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(border.width));
    ctx.set_paint(border.color.to_cpu());
    ctx.stroke_path(&p);
}

fn fill_rounded(ctx: &mut vello_cpu::RenderContext, r: Rect, radius: f64, color: Rgba8) {
    ctx.set_paint(color.to_cpu());
    if radius <= 0.0 {
        ctx.fill_rect(&r);
        return;
    }
    let rr = kurbo::RoundedRect::from_rect(r, radius);
    let mut p = vello_cpu::kurbo::BezPath::new();
    for el in rr.path_elements(0.1) {
        p.push(el);
    }
    ctx.fill_path(&p);
}

pub(crate) fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> RenderResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| RenderError::raster("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| RenderError::raster("pixmap height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(RenderError::raster("media has no pixels"));
    }
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(RenderError::raster("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
