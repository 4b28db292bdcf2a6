use std::collections::HashMap;

use crate::foundation::config::TextConfig;
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{RenderError, RenderResult};
use crate::slide::component::TextFormat;
use crate::slide::resources::FontHandle;
use crate::slide::style::TextStyle;
use crate::text::fit::{FitRequest, TextBounds, TextMeasure, fit_font_size};
use crate::text::layout::{horizontal_offset, normalize_line_breaks, vertical_offset};

/// Parley-backed text shaping, measurement and glyph emission.
///
/// Fonts are registered with Parley once per [`FontHandle::id`]; later layouts reuse the
/// registered family name.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    families: HashMap<u64, String>,
    cpu_fonts: HashMap<u64, vello_cpu::peniko::FontData>,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEngine")
            .field("registered_fonts", &self.families.len())
            .finish()
    }
}

impl TextEngine {
    /// Fresh engine with empty Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
            cpu_fonts: HashMap::new(),
        }
    }

    fn family_for(&mut self, font: &FontHandle) -> RenderResult<String> {
        if let Some(name) = self.families.get(&font.id()) {
            return Ok(name.clone());
        }
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            RenderError::raster(format!("font {} registered no families", font.id()))
        })?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| RenderError::raster(format!("font {} family has no name", font.id())))?
            .to_string();
        tracing::debug!(font_id = font.id(), family = %name, "registered font");
        self.families.insert(font.id(), name.clone());
        Ok(name)
    }

    fn cpu_font(&mut self, font: &FontHandle) -> vello_cpu::peniko::FontData {
        self.cpu_fonts
            .entry(font.id())
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(font.bytes().to_vec()),
                    0,
                )
            })
            .clone()
    }

    fn layout(
        &mut self,
        text: &str,
        font: &FontHandle,
        size_px: f32,
        wrap_width: Option<f32>,
    ) -> RenderResult<parley::Layout<()>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(RenderError::validation("text size must be finite and > 0"));
        }
        let family = self.family_for(font)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(wrap_width);
        layout.align(
            wrap_width,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }

    /// Fit, lay out and position `text` inside `bounds`.
    ///
    /// Returns `Ok(None)` when there is nothing to draw: empty text or a box with no area left
    /// after padding.
    pub(crate) fn prepare(
        &mut self,
        text: &str,
        format: &TextFormat,
        bounds: Rect,
        cfg: &TextConfig,
    ) -> RenderResult<Option<PreparedText>> {
        let text = normalize_line_breaks(text);
        if text.is_empty() {
            return Ok(None);
        }
        let Some(inner) = format.padding.inset(bounds) else {
            return Ok(None);
        };
        let font = format
            .font
            .as_ref()
            .ok_or_else(|| RenderError::raster("text component has no font"))?;

        let req = FitRequest {
            text: &text,
            font,
            requested_size: format.font_size,
            box_width: inner.width(),
            box_height: inner.height(),
            wrap: format.wrap,
        };
        let fitted = fit_font_size(self, &req, format.fit, cfg)?;
        let wrap_width = format.wrap.then_some(inner.width() as f32);
        let layout = self.layout(&text, font, fitted.font_size, wrap_width)?;

        let dy = vertical_offset(format.v_align, inner.height(), f64::from(layout.height()));
        let line_dx = layout
            .lines()
            .map(|line| {
                let m = line.metrics();
                let visible = f64::from(m.advance - m.trailing_whitespace);
                horizontal_offset(format.h_align, inner.width(), visible)
            })
            .collect();

        Ok(Some(PreparedText {
            font: self.cpu_font(font),
            layout,
            origin: Point::new(inner.x0, inner.y0 + dy),
            line_dx,
            clip: inner,
            style: format.style.clone(),
        }))
    }
}

impl TextMeasure for TextEngine {
    fn measure(
        &mut self,
        text: &str,
        font: &FontHandle,
        size_px: f32,
        wrap_width: Option<f32>,
    ) -> RenderResult<TextBounds> {
        let layout = self.layout(text, font, size_px, wrap_width)?;
        let line_height = layout
            .lines()
            .next()
            .map(|l| f64::from(l.metrics().line_height))
            .unwrap_or(0.0);
        Ok(TextBounds {
            width: f64::from(layout.width()),
            height: f64::from(layout.height()),
            line_height,
        })
    }
}

/// Text that has been fitted and positioned; drawing it cannot fail.
pub(crate) struct PreparedText {
    layout: parley::Layout<()>,
    font: vello_cpu::peniko::FontData,
    origin: Point,
    line_dx: Vec<f64>,
    clip: Rect,
    style: TextStyle,
}

#[derive(Clone, Copy)]
enum Pass {
    Shadow,
    Outline,
    Fill,
}

impl PreparedText {
    /// Emit glyphs into `ctx`, line by line, as shadow, then outline, then fill.
    pub(crate) fn draw(&self, ctx: &mut vello_cpu::RenderContext) {
        use vello_cpu::kurbo::Shape;

        let clip =
            vello_cpu::kurbo::Rect::new(self.clip.x0, self.clip.y0, self.clip.x1, self.clip.y1)
                .to_path(0.1);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.push_clip_layer(&clip);

        for (line, &dx) in self.layout.lines().zip(self.line_dx.iter()) {
            let runs: Vec<(f32, Vec<vello_cpu::Glyph>)> = line
                .items()
                .filter_map(|item| match item {
                    parley::layout::PositionedLayoutItem::GlyphRun(run) => Some((
                        run.run().font_size(),
                        run.positioned_glyphs()
                            .map(|g| vello_cpu::Glyph {
                                id: g.id,
                                x: g.x,
                                y: g.y,
                            })
                            .collect(),
                    )),
                    _ => None,
                })
                .collect();

            for pass in [Pass::Shadow, Pass::Outline, Pass::Fill] {
                let (color, offset) = match pass {
                    Pass::Shadow => match &self.style.shadow {
                        Some(s) => (s.color, (s.offset_x, s.offset_y)),
                        None => continue,
                    },
                    Pass::Outline => match &self.style.outline {
                        Some(o) => {
                            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(o.width));
                            (o.color, (0.0, 0.0))
                        }
                        None => continue,
                    },
                    Pass::Fill => (self.style.fill, (0.0, 0.0)),
                };
                ctx.set_transform(vello_cpu::kurbo::Affine::translate((
                    self.origin.x + dx + offset.0,
                    self.origin.y + offset.1,
                )));
                ctx.set_paint(color.to_cpu());
                for (size, glyphs) in &runs {
                    let builder = ctx.glyph_run(&self.font).font_size(*size);
                    match pass {
                        Pass::Outline => builder.stroke_glyphs(glyphs.iter().copied()),
                        Pass::Shadow | Pass::Fill => builder.fill_glyphs(glyphs.iter().copied()),
                    }
                }
            }
        }

        ctx.pop_layer();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
