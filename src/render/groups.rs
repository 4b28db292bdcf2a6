use std::borrow::Cow;
use std::ops::Range;

use crate::foundation::core::{Canvas, Rect, Rgba8};
use crate::foundation::error::RenderResult;
use crate::foundation::math::Fnv1a64;
use crate::slide::component::{
    ComponentKind, MediaContent, MediaSource, PlaceholderRole, ScaleMode, SlideComponent,
    TextFormat,
};
use crate::slide::style::{BoxStyle, Shadow, TextStyle};
use crate::text::fit::FitPolicy;
use crate::text::layout::{HorizontalAlign, VerticalAlign};

/// A run of components rasterized together, in slide z-order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderGroup {
    /// Component indices covered by this group.
    pub range: Range<usize>,
    /// Live groups hold exactly one component and are redrawn every frame.
    pub live: bool,
}

/// Split components into render groups.
///
/// Consecutive cacheable components share a group; each visible live component gets a group
/// of its own. Hidden live components never split a run.
pub fn plan_groups(components: &[SlideComponent]) -> Vec<RenderGroup> {
    let live: Vec<bool> = components
        .iter()
        .map(|c| c.visible && c.is_live())
        .collect();
    plan_live_runs(&live)
}

pub(crate) fn plan_live_runs(live: &[bool]) -> Vec<RenderGroup> {
    let mut groups = Vec::new();
    let mut pending_start = 0usize;
    for (i, &is_live) in live.iter().enumerate() {
        if !is_live {
            continue;
        }
        if pending_start < i {
            groups.push(RenderGroup {
                range: pending_start..i,
                live: false,
            });
        }
        groups.push(RenderGroup {
            range: i..i + 1,
            live: true,
        });
        pending_start = i + 1;
    }
    if pending_start < live.len() {
        groups.push(RenderGroup {
            range: pending_start..live.len(),
            live: false,
        });
    }
    groups
}

/// A component plus the text it will show this frame.
pub(crate) struct Member<'a> {
    pub(crate) component: &'a SlideComponent,
    /// `Ok(None)` for media; date/time patterns that fail to format carry their error here.
    pub(crate) text: RenderResult<Option<Cow<'a, str>>>,
}

/// Content key of a cached group: everything that can change its pixels.
pub(crate) fn group_key(canvas: Canvas, range: &Range<usize>, members: &[Member<'_>]) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_u32(canvas.width);
    h.write_u32(canvas.height);
    h.write_u64(range.start as u64);
    h.write_u64(range.end as u64);
    for m in members {
        write_member(&mut h, m);
    }
    h.finish()
}

fn write_member(h: &mut Fnv1a64, m: &Member<'_>) {
    let c = m.component;
    h.write_u64(c.id().0);
    h.write_bool(c.visible);
    write_rect(h, c.bounds);
    write_box_style(h, &c.style);

    match &m.text {
        Ok(Some(text)) => {
            h.write_u8(1);
            h.write_str(text);
        }
        Ok(None) => h.write_u8(0),
        Err(_) => h.write_u8(2),
    }

    match &c.kind {
        ComponentKind::Text { format, .. } => {
            h.write_u8(0);
            write_text_format(h, format);
        }
        ComponentKind::Placeholder { role, format, .. } => {
            h.write_u8(1);
            h.write_u8(match role {
                PlaceholderRole::Title => 0,
                PlaceholderRole::Subtitle => 1,
                PlaceholderRole::Body => 2,
                PlaceholderRole::Footer => 3,
            });
            write_text_format(h, format);
        }
        ComponentKind::DateTime { pattern, format } => {
            h.write_u8(2);
            h.write_str(pattern);
            write_text_format(h, format);
        }
        ComponentKind::Media(MediaContent { source, scale }) => {
            h.write_u8(3);
            h.write_u8(match scale {
                ScaleMode::None => 0,
                ScaleMode::Stretch => 1,
                ScaleMode::Uniform => 2,
                ScaleMode::UniformFill => 3,
            });
            match source {
                MediaSource::Image(img) => {
                    h.write_u8(0);
                    h.write_u64(img.id());
                }
                // Live media never reaches a cached group unless hidden.
                MediaSource::Video(_) => h.write_u8(1),
            }
        }
    }
}

fn write_rect(h: &mut Fnv1a64, r: Rect) {
    h.write_f64(r.x0);
    h.write_f64(r.y0);
    h.write_f64(r.x1);
    h.write_f64(r.y1);
}

fn write_color(h: &mut Fnv1a64, c: Rgba8) {
    h.write_bytes(&[c.r, c.g, c.b, c.a]);
}

fn write_shadow(h: &mut Fnv1a64, s: Option<&Shadow>) {
    match s {
        None => h.write_u8(0),
        Some(s) => {
            h.write_u8(1);
            write_color(h, s.color);
            h.write_f64(s.offset_x);
            h.write_f64(s.offset_y);
        }
    }
}

fn write_box_style(h: &mut Fnv1a64, s: &BoxStyle) {
    match s.background {
        None => h.write_u8(0),
        Some(c) => {
            h.write_u8(1);
            write_color(h, c);
        }
    }
    match &s.border {
        None => h.write_u8(0),
        Some(b) => {
            h.write_u8(1);
            write_color(h, b.color);
            h.write_f64(b.width);
            h.write_f64(b.corner_radius);
        }
    }
    write_shadow(h, s.shadow.as_ref());
}

fn write_text_style(h: &mut Fnv1a64, s: &TextStyle) {
    write_color(h, s.fill);
    match &s.outline {
        None => h.write_u8(0),
        Some(o) => {
            h.write_u8(1);
            write_color(h, o.color);
            h.write_f64(o.width);
        }
    }
    write_shadow(h, s.shadow.as_ref());
}

fn write_text_format(h: &mut Fnv1a64, f: &TextFormat) {
    match &f.font {
        None => h.write_u8(0),
        Some(font) => {
            h.write_u8(1);
            h.write_u64(font.id());
        }
    }
    h.write_f32(f.font_size);
    h.write_u8(match f.fit {
        FitPolicy::None => 0,
        FitPolicy::ReduceSizeOnly => 1,
        FitPolicy::BestFit => 2,
    });
    h.write_bool(f.wrap);
    h.write_u8(match f.h_align {
        HorizontalAlign::Left => 0,
        HorizontalAlign::Center => 1,
        HorizontalAlign::Right => 2,
    });
    h.write_u8(match f.v_align {
        VerticalAlign::Top => 0,
        VerticalAlign::Center => 1,
        VerticalAlign::Bottom => 2,
    });
    h.write_f64(f.padding.left);
    h.write_f64(f.padding.top);
    h.write_f64(f.padding.right);
    h.write_f64(f.padding.bottom);
    write_text_style(h, &f.style);
}

#[cfg(test)]
#[path = "../../tests/unit/render/groups.rs"]
mod tests;
