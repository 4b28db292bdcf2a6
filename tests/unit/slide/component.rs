use super::*;
use crate::foundation::core::{Canvas, FrameRGBA, Rgba8};
use chrono::NaiveDate;

fn at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 12, 24)
        .unwrap()
        .and_hms_opt(19, 5, 0)
        .unwrap()
}

#[test]
fn date_time_patterns_format() {
    assert_eq!(format_date_time("%Y-%m-%d", &at()).unwrap(), "2024-12-24");
    assert_eq!(format_date_time("%H:%M", &at()).unwrap(), "19:05");
    assert_eq!(format_date_time("%A", &at()).unwrap(), "Tuesday");
}

#[test]
fn bad_date_time_pattern_is_an_error() {
    let err = format_date_time("%Q oops", &at()).unwrap_err();
    assert!(err.to_string().contains("%Q oops"));
}

#[test]
fn only_video_is_live() {
    let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
    let video = SlideComponent::new(
        bounds,
        ComponentKind::Media(MediaContent {
            source: MediaSource::Video(LiveFrame::new()),
            scale: ScaleMode::Stretch,
        }),
    );
    assert!(video.is_live());
    assert_eq!(video.kind.name(), "video");

    let frame = FrameRGBA::filled(Canvas::new(1, 1).unwrap(), Rgba8::opaque(1, 1, 1).premultiplied());
    let image = SlideComponent::new(
        bounds,
        ComponentKind::Media(MediaContent {
            source: MediaSource::Image(ImageHandle::new(1, frame).unwrap()),
            scale: ScaleMode::Stretch,
        }),
    );
    assert!(!image.is_live());

    let text = SlideComponent::new(
        bounds,
        ComponentKind::Text {
            text: "x".to_string(),
            format: TextFormat::default(),
        },
    );
    assert!(!text.is_live());
    assert!(text.visible);
}

#[test]
fn scale_mode_placement() {
    let bounds = Rect::new(0.0, 0.0, 200.0, 100.0);
    assert_eq!(ScaleMode::Stretch.place(bounds, 10.0, 10.0), bounds);
    assert_eq!(
        ScaleMode::Uniform.place(bounds, 50.0, 50.0),
        Rect::new(50.0, 0.0, 150.0, 100.0)
    );
    assert_eq!(
        ScaleMode::UniformFill.place(bounds, 50.0, 50.0),
        Rect::new(0.0, -50.0, 200.0, 150.0)
    );
    assert_eq!(
        ScaleMode::None.place(bounds, 20.0, 10.0),
        Rect::new(90.0, 45.0, 110.0, 55.0)
    );
}

#[test]
fn component_id_display() {
    assert_eq!(ComponentId(12).to_string(), "#12");
}
