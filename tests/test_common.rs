use phillips_classifier::{
    absolute_magnitude, apparent_magnitude, interpolate, DomainError, LightCurve, Reading,
};

// ---------------------------------------------------------------------------
// Distance-magnitude conversions
// ---------------------------------------------------------------------------

#[test]
fn apparent_magnitude_at_ten_mpc() {
    // 10 Mpc: distance modulus = 5 * (log10(1e7) - 1) = 30 exactly.
    let m = apparent_magnitude(10.0, -19.0).unwrap();
    assert!((m - 11.0).abs() < 1e-12, "expected 11.0, got {m}");
}

#[test]
fn conversions_round_trip() {
    for &d in &[0.05, 1.0, 42.7, 500.0] {
        for &mag in &[-19.3, 0.0, 14.2] {
            let back = absolute_magnitude(d, apparent_magnitude(d, mag).unwrap()).unwrap();
            assert!(
                (back - mag).abs() < 1e-10,
                "round trip at d={d} drifted: {mag} -> {back}"
            );
        }
    }
}

#[test]
fn conversions_reject_nonpositive_distance() {
    assert!(matches!(
        absolute_magnitude(0.0, 12.0),
        Err(DomainError::NonPositiveLumdist(_))
    ));
    assert!(matches!(
        apparent_magnitude(-3.0, -19.0),
        Err(DomainError::NonPositiveLumdist(_))
    ));
    assert!(matches!(
        apparent_magnitude(f64::NAN, -19.0),
        Err(DomainError::NonPositiveLumdist(_))
    ));
}

// ---------------------------------------------------------------------------
// Interpolation
// ---------------------------------------------------------------------------

#[test]
fn interpolate_midpoint() {
    let m = interpolate(10.0, 15.0, 20.0, 17.0, 15.0).unwrap();
    assert!((m - 16.0).abs() < 1e-12, "midpoint should be 16.0, got {m}");
}

#[test]
fn interpolate_at_left_sample_is_identity() {
    let m = interpolate(14.0, 15.4, 16.0, 15.8, 14.0).unwrap();
    assert!((m - 15.4).abs() < 1e-12);
}

#[test]
fn interpolate_identical_times_is_domain_error() {
    assert_eq!(
        interpolate(15.0, 14.0, 15.0, 14.5, 15.0),
        Err(DomainError::DegenerateBracket(15.0))
    );
}

// ---------------------------------------------------------------------------
// LightCurve construction
// ---------------------------------------------------------------------------

#[test]
fn light_curve_sorts_by_time() {
    let curve = LightCurve::new(vec![
        Reading { time: 5.0, magnitude: 15.5 },
        Reading { time: 1.0, magnitude: 15.0 },
        Reading { time: 3.0, magnitude: 15.2 },
    ]);
    let times: Vec<f64> = curve.readings().iter().map(|r| r.time).collect();
    assert_eq!(times, vec![1.0, 3.0, 5.0]);
}

#[test]
fn light_curve_drops_non_finite_rows() {
    let curve = LightCurve::new(vec![
        Reading { time: 1.0, magnitude: f64::NAN },
        Reading { time: f64::INFINITY, magnitude: 15.0 },
        Reading { time: 2.0, magnitude: 15.1 },
    ]);
    assert_eq!(curve.len(), 1);
    assert_eq!(curve.readings()[0].time, 2.0);
}

#[test]
fn light_curve_keeps_encounter_order_among_equal_times() {
    let curve = LightCurve::new(vec![
        Reading { time: 2.0, magnitude: 14.0 },
        Reading { time: 2.0, magnitude: 14.5 },
    ]);
    assert_eq!(curve.readings()[0].magnitude, 14.0);
    assert_eq!(curve.readings()[1].magnitude, 14.5);
}

#[test]
fn empty_light_curve_is_valid() {
    let curve = LightCurve::new(Vec::new());
    assert!(curve.is_empty());
}
