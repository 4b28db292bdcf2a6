use super::*;

/// Monospace stand-in: every char advances `0.6 * size`, lines are `1.2 * size` tall, words
/// wrap greedily on spaces.
#[derive(Default)]
struct FixedAdvance {
    calls: u32,
}

impl TextMeasure for FixedAdvance {
    fn measure(
        &mut self,
        text: &str,
        _font: &FontHandle,
        size_px: f32,
        wrap_width: Option<f32>,
    ) -> RenderResult<TextBounds> {
        self.calls += 1;
        let advance = 0.6 * f64::from(size_px);
        let line_height = 1.2 * f64::from(size_px);
        let mut lines = 0usize;
        let mut widest = 0.0f64;
        for paragraph in text.split('\n') {
            let mut current = 0usize;
            lines += 1;
            for word in paragraph.split(' ') {
                let len = word.chars().count();
                let candidate = if current == 0 { len } else { current + 1 + len };
                match wrap_width {
                    Some(w) if current > 0 && candidate as f64 * advance > f64::from(w) => {
                        widest = widest.max(current as f64 * advance);
                        lines += 1;
                        current = len;
                    }
                    _ => current = candidate,
                }
            }
            widest = widest.max(current as f64 * advance);
        }
        Ok(TextBounds {
            width: widest,
            height: lines as f64 * line_height,
            line_height,
        })
    }
}

fn font() -> FontHandle {
    FontHandle::new(1, Vec::new())
}

fn request<'a>(text: &'a str, font: &'a FontHandle, size: f32, w: f64, h: f64) -> FitRequest<'a> {
    FitRequest {
        text,
        font,
        requested_size: size,
        box_width: w,
        box_height: h,
        wrap: false,
    }
}

#[test]
fn none_policy_keeps_requested_size_and_may_overflow() {
    let f = font();
    let mut m = FixedAdvance::default();
    let fitted = fit_font_size(
        &mut m,
        &request("hello", &f, 40.0, 100.0, 100.0),
        FitPolicy::None,
        &TextConfig::default(),
    )
    .unwrap();
    assert_eq!(fitted.font_size, 40.0);
    assert_eq!(fitted.bounds.width, 120.0);
    assert_eq!(m.calls, 1);
}

#[test]
fn reduce_size_only_shrinks_until_it_fits() {
    let f = font();
    let mut m = FixedAdvance::default();
    let fitted = fit_font_size(
        &mut m,
        &request("hello", &f, 40.0, 100.0, 100.0),
        FitPolicy::ReduceSizeOnly,
        &TextConfig::default(),
    )
    .unwrap();
    // 5 chars * 0.6 * s <= 100  =>  s <= 33.33
    assert!(fitted.font_size <= 40.0);
    assert!(fitted.font_size > 33.0, "{}", fitted.font_size);
    assert!(fitted.bounds.width <= 101.0);
    assert!(fitted.bounds.height <= 101.0);
}

#[test]
fn reduce_size_only_never_grows() {
    let f = font();
    let mut m = FixedAdvance::default();
    let fitted = fit_font_size(
        &mut m,
        &request("hi", &f, 10.0, 500.0, 500.0),
        FitPolicy::ReduceSizeOnly,
        &TextConfig::default(),
    )
    .unwrap();
    assert_eq!(fitted.font_size, 10.0);
    assert_eq!(m.calls, 1);
}

#[test]
fn reduce_size_only_keeps_requests_below_min_size() {
    let f = font();
    let fitted = fit_font_size(
        &mut FixedAdvance::default(),
        &request("hi", &f, 0.5, 500.0, 500.0),
        FitPolicy::ReduceSizeOnly,
        &TextConfig::default(),
    )
    .unwrap();
    assert_eq!(fitted.font_size, 0.5);

    let cfg = TextConfig {
        min_font_size: 8.0,
        ..TextConfig::default()
    };
    let fitted = fit_font_size(
        &mut FixedAdvance::default(),
        &request("a very long line that cannot fit", &f, 4.0, 10.0, 10.0),
        FitPolicy::ReduceSizeOnly,
        &cfg,
    )
    .unwrap();
    assert_eq!(fitted.font_size, 4.0);
}

#[test]
fn best_fit_grows_to_fill_the_box() {
    let f = font();
    let mut m = FixedAdvance::default();
    let fitted = fit_font_size(
        &mut m,
        &request("hi", &f, 10.0, 100.0, 100.0),
        FitPolicy::BestFit,
        &TextConfig::default(),
    )
    .unwrap();
    // width = height = 1.2 * s  =>  s <= 83.33
    assert!(fitted.font_size > 82.5, "{}", fitted.font_size);
    assert!(fitted.bounds.width <= 101.0);
    assert!(fitted.bounds.height <= 101.0);
}

#[test]
fn best_fit_is_capped_by_max_font_size() {
    let f = font();
    let mut m = FixedAdvance::default();
    let cfg = TextConfig {
        max_font_size: 50.0,
        ..TextConfig::default()
    };
    let fitted = fit_font_size(
        &mut m,
        &request("x", &f, 10.0, 1000.0, 1000.0),
        FitPolicy::BestFit,
        &cfg,
    )
    .unwrap();
    assert_eq!(fitted.font_size, 50.0);
}

#[test]
fn wrapped_fit_accounts_for_line_count() {
    let f = font();
    let mut m = FixedAdvance::default();
    let mut req = request("aaaa aaaa aaaa aaaa", &f, 20.0, 60.0, 1000.0);
    req.wrap = true;
    let wrapped =
        fit_font_size(&mut m, &req, FitPolicy::None, &TextConfig::default()).unwrap();
    // Each word is 48px wide at 20px, so every word lands on its own line.
    assert_eq!(wrapped.bounds.height, 4.0 * 24.0);
    assert!(wrapped.bounds.width <= 60.0);

    req.box_height = 50.0;
    let shrunk =
        fit_font_size(&mut m, &req, FitPolicy::ReduceSizeOnly, &TextConfig::default())
            .unwrap();
    assert!(shrunk.font_size < 20.0);
    assert!(shrunk.bounds.height <= 51.0);
    assert!(shrunk.bounds.width <= 61.0);
}

#[test]
fn hopeless_text_bottoms_out_at_min_size() {
    let f = font();
    let mut m = FixedAdvance::default();
    let cfg = TextConfig {
        min_font_size: 8.0,
        ..TextConfig::default()
    };
    let fitted = fit_font_size(
        &mut m,
        &request("a very long line that cannot fit", &f, 30.0, 10.0, 10.0),
        FitPolicy::ReduceSizeOnly,
        &cfg,
    )
    .unwrap();
    assert_eq!(fitted.font_size, 8.0);
}

#[test]
fn iteration_cap_bounds_measurement_passes() {
    let f = font();
    let mut m = FixedAdvance::default();
    let cfg = TextConfig {
        max_fit_iterations: 4,
        ..TextConfig::default()
    };
    let fitted = fit_font_size(
        &mut m,
        &request("hello", &f, 40.0, 100.0, 100.0),
        FitPolicy::ReduceSizeOnly,
        &cfg,
    )
    .unwrap();
    assert!(m.calls <= 4, "{}", m.calls);
    assert!(fitted.bounds.width <= 101.0);
}

#[test]
fn rejects_bad_requests() {
    let f = font();
    let mut m = FixedAdvance::default();
    let cfg = TextConfig::default();
    assert!(fit_font_size(&mut m, &request("x", &f, 0.0, 10.0, 10.0), FitPolicy::None, &cfg)
        .is_err());
    assert!(
        fit_font_size(&mut m, &request("x", &f, f32::NAN, 10.0, 10.0), FitPolicy::None, &cfg)
            .is_err()
    );
    assert!(fit_font_size(&mut m, &request("x", &f, 12.0, 0.0, 10.0), FitPolicy::None, &cfg)
        .is_err());
}
