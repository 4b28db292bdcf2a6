use super::*;

fn all_easings() -> Vec<Easing> {
    let mut out = Vec::new();
    for curve in EasingCurve::ALL {
        for mode in [EasingMode::In, EasingMode::Out, EasingMode::InOut] {
            out.push(Easing::new(curve, mode));
        }
    }
    out
}

#[test]
fn endpoints_are_stable() {
    for ease in all_easings() {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
        assert_eq!(ease.progress(0, 400), 0.0, "{ease:?}");
        assert_eq!(ease.progress(400, 400), 1.0, "{ease:?}");
        assert_eq!(ease.progress(900, 400), 1.0, "{ease:?}");
    }
}

#[test]
fn monotonic_over_dense_samples() {
    for ease in all_easings() {
        let mut prev = 0.0;
        for ms in 0..=1000u64 {
            let v = ease.progress(ms, 1000);
            assert!(v >= prev, "{ease:?} decreased at {ms}ms: {prev} -> {v}");
            assert!((0.0..=1.0).contains(&v));
            prev = v;
        }
    }
}

#[test]
fn in_out_is_symmetric_about_midpoint() {
    for curve in EasingCurve::ALL {
        let e = Easing::new(curve, EasingMode::InOut);
        assert!((e.apply(0.5) - 0.5).abs() < 1e-9, "{curve:?}");
        for t in [0.1, 0.2, 0.3, 0.45] {
            let lhs = e.apply(t);
            let rhs = 1.0 - e.apply(1.0 - t);
            assert!((lhs - rhs).abs() < 1e-9, "{curve:?} at {t}");
        }
    }
}

#[test]
fn out_mirrors_in() {
    for curve in EasingCurve::ALL {
        let i = Easing::new(curve, EasingMode::In);
        let o = Easing::new(curve, EasingMode::Out);
        for t in [0.2, 0.5, 0.8] {
            assert!((o.apply(t) - (1.0 - i.apply(1.0 - t))).abs() < 1e-9);
        }
    }
}

#[test]
fn zero_duration_completes_immediately() {
    assert_eq!(Easing::LINEAR.progress(0, 0), 1.0);
}

#[test]
fn ids_are_unique_and_round_trip() {
    let mut seen = std::collections::HashSet::new();
    for curve in EasingCurve::ALL {
        assert!(seen.insert(curve.id()), "duplicate id {}", curve.id());
        assert_eq!(EasingCurve::from_id(curve.id()).unwrap(), curve);
    }
}

#[test]
fn unknown_id_is_config_error() {
    let err = Easing::from_id(11, EasingMode::In).unwrap_err();
    assert!(matches!(err, RenderError::Config(_)));
}

#[test]
fn quadratic_spot_values() {
    let e = Easing::new(EasingCurve::Quadratic, EasingMode::In);
    assert!((e.apply(0.5) - 0.25).abs() < 1e-12);
    let e = Easing::new(EasingCurve::Quadratic, EasingMode::Out);
    assert!((e.apply(0.5) - 0.75).abs() < 1e-12);
}
