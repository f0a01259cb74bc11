use super::*;

#[test]
fn endpoints_are_fixed() {
    for e in [Ease::Linear, Ease::CSS_EASE] {
        assert!((e.apply(0.0)).abs() < 1e-6, "{e:?}");
        assert!((e.apply(1.0) - 1.0).abs() < 1e-6, "{e:?}");
    }
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::Linear.apply(-1.0), 0.0);
    assert_eq!(Ease::Linear.apply(2.0), 1.0);
}

#[test]
fn linear_bezier_is_identity() {
    let e = Ease::CubicBezier {
        x1: 0.0,
        y1: 0.0,
        x2: 1.0,
        y2: 1.0,
    };
    for t in [0.1, 0.25, 0.5, 0.9] {
        assert!((e.apply(t) - t).abs() < 1e-5);
    }
}

#[test]
fn css_ease_front_loads_progress() {
    let mid = Ease::CSS_EASE.apply(0.5);
    assert!(mid > 0.75 && mid < 0.85, "{mid}");
}
