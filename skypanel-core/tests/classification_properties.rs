//! Property tests for the classification tables

use proptest::prelude::*;

use skypanel_core::classify::{
    Classifier, DewPointClassifier, HumidityClassifier, UvClassifier, VisibilityClassifier,
    WindDirectionClassifier,
};
use skypanel_core::{AlertLevel, CompassPoint};

fn humidity_label(value: f64) -> &'static str {
    HumidityClassifier.classify(value).unwrap().category.label
}

fn dew_point_label(value: f64) -> &'static str {
    DewPointClassifier.classify(value).unwrap().category.label
}

#[test]
fn humidity_boundaries() {
    assert_eq!(humidity_label(70.0), "Poor high humidity");
    assert_eq!(humidity_label(69.999), "Fair");
    assert_eq!(humidity_label(60.0), "Fair");
    assert_eq!(humidity_label(59.9), "Maintain your healthy");
    assert_eq!(humidity_label(30.0), "Maintain your healthy");
    assert_eq!(humidity_label(25.0), "Fair");
    assert_eq!(humidity_label(24.999), "Poor low humidity");
}

#[test]
fn dew_point_boundaries() {
    assert_eq!(dew_point_label(9.9), "Very Dry");
    assert_eq!(dew_point_label(10.0), "Comfortable");
    assert_eq!(dew_point_label(23.96), "Oppressive");
    assert_eq!(dew_point_label(24.0), "Oppressive");
}

#[test]
fn uv_extremes() {
    let zero = UvClassifier.classify(0.0).unwrap();
    assert_eq!((zero.rounded, zero.icon_index, zero.category.label), (0, 0, "Low"));

    let extreme = UvClassifier.classify(10.6).unwrap();
    assert_eq!((extreme.rounded, extreme.icon_index, extreme.category.label), (11, 11, "Extreme"));
}

#[test]
fn wind_boundaries() {
    let point = |degrees: f64| WindDirectionClassifier.classify(degrees).unwrap();
    assert_eq!(point(0.0), CompassPoint::N);
    assert_eq!(point(360.0), CompassPoint::N);
    assert_eq!(point(11.25), CompassPoint::NNE);
    assert_eq!(point(348.75), CompassPoint::N);
}

#[test]
fn non_finite_readings_are_unavailable() {
    for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(HumidityClassifier.classify(value).is_none());
        assert!(DewPointClassifier.classify(value).is_none());
        assert!(VisibilityClassifier.classify(value).is_none());
        assert!(UvClassifier.classify(value).is_none());
        assert!(WindDirectionClassifier.classify(value).is_none());
    }
    assert!(HumidityClassifier.classify_reading(None).is_none());
}

proptest! {
    #[test]
    fn humidity_is_total(value in -50.0f64..150.0) {
        prop_assert!(HumidityClassifier.classify(value).is_some());
    }

    #[test]
    fn dew_point_severity_rises_with_value(a in -40.0f64..40.0, b in -40.0f64..40.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let low = DewPointClassifier.classify(low).unwrap().category.level;
        let high = DewPointClassifier.classify(high).unwrap().category.level;
        prop_assert!(low <= high);
    }

    #[test]
    fn visibility_severity_falls_with_distance(a in 0.0f64..20_000.0, b in 0.0f64..20_000.0) {
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        let near = VisibilityClassifier.classify(near).unwrap().category.level;
        let far = VisibilityClassifier.classify(far).unwrap().category.level;
        prop_assert!(far <= near);
    }

    #[test]
    fn visibility_is_reported_in_tenths_of_km(meters in 0.0f64..50_000.0) {
        let km = VisibilityClassifier.classify(meters).unwrap().value;
        prop_assert!((km * 10.0 - (km * 10.0).round()).abs() < 1e-6);
        prop_assert!((km - meters / 1000.0).abs() <= 0.05 + 1e-9);
    }

    #[test]
    fn uv_icon_tracks_rounded_index(uvi in 0.0f64..20.0) {
        let reading = UvClassifier.classify(uvi).unwrap();
        prop_assert_eq!(reading.icon_index as i32, reading.rounded.min(11));
        prop_assert_eq!(reading.category.level == AlertLevel::High, reading.rounded >= 8);
    }

    #[test]
    fn wind_wraps_every_turn(degrees in -720.0f64..720.0, turns in -3i32..3) {
        // Float error can move a value sitting exactly on a sector edge
        let sector = degrees / 22.5 + 0.5;
        prop_assume!((sector - sector.round()).abs() > 1e-6);

        let shifted = degrees + 360.0 * turns as f64;
        let a = WindDirectionClassifier.classify(degrees).unwrap();
        let b = WindDirectionClassifier.classify(shifted).unwrap();
        prop_assert_eq!(a, b);
    }
}
