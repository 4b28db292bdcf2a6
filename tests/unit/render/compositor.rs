use super::*;
use crate::foundation::config::CacheConfig;
use crate::foundation::core::{Rect, Rgba8};
use crate::slide::component::{MediaContent, MediaSource, ScaleMode, SlideComponent, TextFormat};
use crate::slide::resources::LiveFrame;
use crate::slide::style::BoxStyle;
use chrono::NaiveDate;

fn noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 9)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn canvas() -> Canvas {
    Canvas::new(32, 16).unwrap()
}

fn panel(x: f64, color: Rgba8) -> SlideComponent {
    SlideComponent::new(
        Rect::new(x, 0.0, x + 4.0, 16.0),
        ComponentKind::Text {
            text: String::new(),
            format: TextFormat::default(),
        },
    )
    .with_style(BoxStyle {
        background: Some(color),
        ..BoxStyle::default()
    })
}

fn video(x: f64, live: &LiveFrame) -> SlideComponent {
    SlideComponent::new(
        Rect::new(x, 0.0, x + 4.0, 16.0),
        ComponentKind::Media(MediaContent {
            source: MediaSource::Video(live.clone()),
            scale: ScaleMode::Stretch,
        }),
    )
}

/// Seven components with live video at z-order 2 and 5.
fn seven(live: &LiveFrame) -> Slide {
    let mut s = Slide::new("seven");
    s.add(panel(0.0, Rgba8::opaque(255, 0, 0)));
    s.add(panel(4.0, Rgba8::opaque(0, 255, 0)));
    s.add(video(8.0, live));
    s.add(panel(12.0, Rgba8::opaque(0, 0, 255)));
    s.add(panel(16.0, Rgba8::opaque(255, 255, 0)));
    s.add(video(20.0, live));
    s.add(panel(24.0, Rgba8::opaque(0, 255, 255)));
    s
}

#[test]
fn groups_follow_live_components() {
    let live = LiveFrame::new();
    let c = Compositor::new(canvas(), RenderConfig::default()).unwrap();
    let groups = c.groups(&seven(&live));
    let shape: Vec<_> = groups
        .iter()
        .map(|g| (g.range.clone(), g.live))
        .collect();
    assert_eq!(
        shape,
        vec![
            (0..2, false),
            (2..3, true),
            (3..5, false),
            (5..6, true),
            (6..7, false),
        ]
    );
}

#[test]
fn unchanged_slide_rasterizes_each_group_once() {
    let live = LiveFrame::new();
    let slide = seven(&live);
    let mut c = Compositor::new(canvas(), RenderConfig::default()).unwrap();

    let first = c.render_at(&slide, noon());
    for _ in 0..4 {
        assert_eq!(c.render_at(&slide, noon()), first);
    }
    let stats = c.stats();
    assert_eq!(stats.rasterized_groups, 3);
    assert_eq!(stats.cache_hits, 12);
    assert_eq!(stats.live_draws, 10);
    assert_eq!(stats.skipped_components, 0);
}

#[test]
fn composed_frame_shows_every_group_in_order() {
    let live = LiveFrame::new();
    let slide = seven(&live);
    let mut c = Compositor::new(canvas(), RenderConfig::default()).unwrap();
    let out = c.render_at(&slide, noon());
    assert_eq!(out.pixel(1, 8), [255, 0, 0, 255]);
    assert_eq!(out.pixel(13, 8), [0, 0, 255, 255]);
    assert_eq!(out.pixel(25, 8), [0, 255, 255, 255]);
    // No video frame yet and nothing beyond the last panel.
    assert_eq!(out.pixel(9, 8), [0, 0, 0, 0]);
    assert_eq!(out.pixel(30, 8), [0, 0, 0, 0]);
}

#[test]
fn live_frame_updates_redraw_without_touching_cache() {
    let live = LiveFrame::new();
    let slide = seven(&live);
    let mut c = Compositor::new(canvas(), RenderConfig::default()).unwrap();
    c.render_at(&slide, noon());

    live.publish(FrameRGBA::filled(
        Canvas::new(2, 2).unwrap(),
        Rgba8::opaque(200, 100, 0).premultiplied(),
    ));
    let out = c.render_at(&slide, noon());
    assert_eq!(out.pixel(9, 8), [200, 100, 0, 255]);
    assert_eq!(out.pixel(21, 8), [200, 100, 0, 255]);
    assert_eq!(c.stats().rasterized_groups, 3);
}

#[test]
fn editing_a_member_invalidates_only_its_group() {
    let live = LiveFrame::new();
    let mut slide = seven(&live);
    let mut c = Compositor::new(canvas(), RenderConfig::default()).unwrap();
    c.render_at(&slide, noon());

    let id = slide.components()[3].id();
    slide.get_mut(id).unwrap().style.background = Some(Rgba8::opaque(1, 2, 3));
    let out = c.render_at(&slide, noon());
    assert_eq!(out.pixel(13, 8), [1, 2, 3, 255]);
    assert_eq!(c.stats().rasterized_groups, 4);
    assert_eq!(c.stats().cache_hits, 2);
}

#[test]
fn canvas_change_drops_cache() {
    let live = LiveFrame::new();
    let slide = seven(&live);
    let mut c = Compositor::new(canvas(), RenderConfig::default()).unwrap();
    c.render_at(&slide, noon());

    c.set_canvas(canvas()).unwrap();
    c.render_at(&slide, noon());
    assert_eq!(c.stats().rasterized_groups, 3);

    c.set_canvas(Canvas::new(40, 16).unwrap()).unwrap();
    let out = c.render_at(&slide, noon());
    assert_eq!(out.width, 40);
    assert_eq!(c.stats().rasterized_groups, 6);
    assert_eq!(c.stats().evictions, 3);
}

#[test]
fn removed_groups_are_evicted() {
    let live = LiveFrame::new();
    let mut slide = seven(&live);
    let mut c = Compositor::new(canvas(), RenderConfig::default()).unwrap();
    c.render_at(&slide, noon());

    let id = slide.components()[5].id();
    slide.remove(id).unwrap();
    c.render_at(&slide, noon());
    // [3,5] and [6,7] merge into [3,6); both old entries go.
    assert_eq!(c.groups(&slide).len(), 3);
    assert_eq!(c.stats().evictions, 2);
}

#[test]
fn disabled_cache_rasterizes_every_draw() {
    let live = LiveFrame::new();
    let slide = seven(&live);
    let cfg = RenderConfig {
        cache: CacheConfig { enabled: false },
        ..RenderConfig::default()
    };
    let mut c = Compositor::new(canvas(), cfg).unwrap();
    c.render_at(&slide, noon());
    c.render_at(&slide, noon());
    assert_eq!(c.stats().rasterized_groups, 6);
    assert_eq!(c.stats().cache_hits, 0);
}

#[test]
fn date_time_group_rerasterizes_only_when_text_changes() {
    let mut slide = Slide::new("clock");
    slide.add(SlideComponent::new(
        Rect::new(0.0, 0.0, 32.0, 16.0),
        ComponentKind::DateTime {
            pattern: "%H:%M".to_string(),
            format: TextFormat::default(),
        },
    ));
    let mut c = Compositor::new(canvas(), RenderConfig::default()).unwrap();
    let t0 = noon();
    c.render_at(&slide, t0);
    c.render_at(&slide, t0 + chrono::Duration::seconds(20));
    assert_eq!(c.stats().rasterized_groups, 1);
    c.render_at(&slide, t0 + chrono::Duration::seconds(61));
    assert_eq!(c.stats().rasterized_groups, 2);
    // No font: every rasterization skips the component.
    assert_eq!(c.stats().skipped_components, 2);
}

#[test]
fn clear_color_backs_the_frame() {
    let cfg = RenderConfig {
        clear_rgba: Rgba8::opaque(10, 20, 30),
        ..RenderConfig::default()
    };
    let mut c = Compositor::new(canvas(), cfg).unwrap();
    let out = c.render_at(&Slide::new("empty"), noon());
    assert_eq!(out.pixel(0, 0), [10, 20, 30, 255]);
}

#[test]
fn invalid_config_is_rejected_at_setup() {
    let mut cfg = RenderConfig::default();
    cfg.text.min_font_size = 0.0;
    assert!(Compositor::new(canvas(), cfg).is_err());
}

#[test]
fn unrenderable_canvas_sizes_are_rejected() {
    let empty = Canvas::default();
    let too_wide = Canvas {
        width: 70_000,
        height: 16,
    };
    assert!(Compositor::new(empty, RenderConfig::default()).is_err());
    assert!(Compositor::new(too_wide, RenderConfig::default()).is_err());

    let live = LiveFrame::new();
    let slide = seven(&live);
    let mut c = Compositor::new(canvas(), RenderConfig::default()).unwrap();
    c.render_at(&slide, noon());
    assert!(c.set_canvas(too_wide).is_err());
    assert!(c.set_canvas(empty).is_err());
    assert_eq!(c.canvas(), canvas());
    assert_eq!(c.stats().evictions, 0);
}
