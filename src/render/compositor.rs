use std::borrow::Cow;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::ops::Range;

use chrono::NaiveDateTime;

use crate::effects::composite::over_in_place;
use crate::foundation::config::RenderConfig;
use crate::foundation::core::{Canvas, FrameRGBA};
use crate::foundation::error::RenderResult;
use crate::render::groups::{Member, RenderGroup, group_key, plan_groups};
use crate::render::raster::Rasterizer;
use crate::slide::component::{ComponentKind, format_date_time};
use crate::slide::model::Slide;

/// Counters accumulated across [`Compositor::render`] calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompositorStats {
    /// Cached groups rasterized (first draw or after a content change).
    pub rasterized_groups: u64,
    /// Cached groups drawn from cache.
    pub cache_hits: u64,
    /// Live groups drawn.
    pub live_draws: u64,
    /// Components skipped because they failed to rasterize.
    pub skipped_components: u64,
    /// Cache entries dropped because their group no longer exists.
    pub evictions: u64,
}

struct CachedGroup {
    key: u64,
    frame: FrameRGBA,
}

/// Turns a slide into one composed frame, caching static component runs between draws.
///
/// Components are split into [`RenderGroup`]s around live (video) components. Static groups
/// are rasterized once into a canvas-sized buffer and reused until a member's visual state or
/// the canvas size changes; live groups are redrawn on every call.
///
/// Rendering never fails: components that cannot be drawn are logged and skipped.
pub struct Compositor {
    canvas: Canvas,
    config: RenderConfig,
    raster: Rasterizer,
    cache: HashMap<(usize, usize), CachedGroup>,
    stats: CompositorStats,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("canvas", &self.canvas)
            .field("cached_groups", &self.cache.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl Compositor {
    /// Create a compositor for `canvas`, validating `config`.
    pub fn new(canvas: Canvas, config: RenderConfig) -> RenderResult<Self> {
        canvas.validate()?;
        config.validate()?;
        Ok(Self {
            canvas,
            raster: Rasterizer::new(config.text),
            config,
            cache: HashMap::new(),
            stats: CompositorStats::default(),
        })
    }

    /// Output size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Active configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Counters since construction.
    pub fn stats(&self) -> CompositorStats {
        self.stats
    }

    /// Change the output size. Drops every cached group when the size actually changes.
    pub fn set_canvas(&mut self, canvas: Canvas) -> RenderResult<()> {
        canvas.validate()?;
        if canvas != self.canvas {
            tracing::debug!(
                from = ?self.canvas,
                to = ?canvas,
                "canvas resized; dropping group cache"
            );
            self.canvas = canvas;
            self.invalidate_all();
        }
        Ok(())
    }

    /// Drop every cached group; the next render re-rasterizes everything.
    pub fn invalidate_all(&mut self) {
        self.stats.evictions += self.cache.len() as u64;
        self.cache.clear();
    }

    /// Groups `slide` would be drawn with.
    pub fn groups(&self, slide: &Slide) -> Vec<RenderGroup> {
        plan_groups(slide.components())
    }

    /// Compose `slide` using the local wall clock for date/time components.
    pub fn render(&mut self, slide: &Slide) -> FrameRGBA {
        self.render_at(slide, chrono::Local::now().naive_local())
    }

    /// Compose `slide` with date/time components showing `now`.
    #[tracing::instrument(level = "debug", skip_all, fields(slide = %slide.name))]
    pub fn render_at(&mut self, slide: &Slide, now: NaiveDateTime) -> FrameRGBA {
        let members: Vec<Member<'_>> = slide
            .components()
            .iter()
            .map(|c| Member {
                component: c,
                text: match &c.kind {
                    ComponentKind::Text { text, .. } | ComponentKind::Placeholder { text, .. } => {
                        Ok(Some(Cow::Borrowed(text.as_str())))
                    }
                    ComponentKind::DateTime { pattern, .. } => {
                        format_date_time(pattern, &now).map(|s| Some(Cow::Owned(s)))
                    }
                    ComponentKind::Media(_) => Ok(None),
                },
            })
            .collect();

        let groups = plan_groups(slide.components());
        tracing::debug!(components = members.len(), groups = groups.len(), "planned groups");

        let mut out = FrameRGBA::filled(self.canvas, self.config.clear_rgba.premultiplied());
        let mut used = Vec::with_capacity(groups.len());
        for group in &groups {
            let range = &group.range;
            let group_members = &members[range.clone()];
            if group.live {
                self.stats.live_draws += 1;
                let raster = self.raster.rasterize(self.canvas, group_members);
                self.stats.skipped_components += u64::from(raster.skipped);
                composite_onto(&mut out, &raster.frame);
                continue;
            }

            used.push((range.start, range.end));
            let frame = self.cached_group(range, group_members);
            composite_onto(&mut out, frame);
        }

        let before = self.cache.len();
        self.cache.retain(|k, _| used.contains(k));
        let evicted = before - self.cache.len();
        if evicted > 0 {
            tracing::debug!(evicted, "evicted stale render groups");
            self.stats.evictions += evicted as u64;
        }
        out
    }

    fn cached_group(&mut self, range: &Range<usize>, members: &[Member<'_>]) -> &FrameRGBA {
        let key = group_key(self.canvas, range, members);
        let enabled = self.config.cache.enabled;
        match self.cache.entry((range.start, range.end)) {
            Entry::Occupied(e) if enabled && e.get().key == key => {
                self.stats.cache_hits += 1;
                &e.into_mut().frame
            }
            entry => {
                tracing::debug!(start = range.start, end = range.end, "rasterizing render group");
                let raster = self.raster.rasterize(self.canvas, members);
                self.stats.rasterized_groups += 1;
                self.stats.skipped_components += u64::from(raster.skipped);
                let cached = CachedGroup {
                    key,
                    frame: raster.frame,
                };
                match entry {
                    Entry::Occupied(mut e) => {
                        e.insert(cached);
                        &e.into_mut().frame
                    }
                    Entry::Vacant(e) => &e.insert(cached).frame,
                }
            }
        }
    }
}

fn composite_onto(dst: &mut FrameRGBA, src: &FrameRGBA) {
    if let Err(e) = over_in_place(&mut dst.data, &src.data, 1.0) {
        tracing::warn!(error = %e, "dropping group with mismatched buffer size");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
