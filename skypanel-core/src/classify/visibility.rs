//! Visibility Classification
//!
//! Visibility arrives in metres and is shown in kilometres with one decimal.
//! The category is picked from the displayed value, so a reading of 49 m
//! (0.049 km) rounds to 0.0 km and reads "Dense fog" - exactly what the
//! panel shows next to it.
//!
//! A reading halfway between two tenths rounds up as written in decimal:
//! 950 m is 1.0 km ("Thin Fog"), not 0.9 km. See [`round_to_tenth`].
//!
//! ```text
//!   < 0.05      Dense fog       High
//!  [0.05, 0.2)  Thick fog       High
//!  [0.2, 0.5)   Moderate Fog    Elevated
//!  [0.5, 1)     Light Fog       Elevated
//!  [1, 2)       Thin Fog        Moderate
//!  [2, 4)       Haze            Moderate
//!  [4, 10)      Light Haze      Low
//!   ≥ 10        Clear           Low
//! ```

use crate::constants::thresholds::{
    METERS_PER_KM, VISIBILITY_CLEAR_MIN, VISIBILITY_HAZE_MIN, VISIBILITY_LIGHT_FOG_MIN,
    VISIBILITY_LIGHT_HAZE_MIN, VISIBILITY_MODERATE_FOG_MIN, VISIBILITY_THICK_FOG_MIN,
    VISIBILITY_THIN_FOG_MIN,
};

use super::table::{classify_with, round_to_tenth, Band, Bound, ThresholdTable};
use super::{AlertLevel, Classified, Classifier};

/// Visibility bands in kilometres, densest fog first
pub const VISIBILITY_TABLE: [Band; 8] = [
    Band::new(Bound::Below(VISIBILITY_THICK_FOG_MIN), "Dense fog", AlertLevel::High),
    Band::new(Bound::Between(VISIBILITY_THICK_FOG_MIN, VISIBILITY_MODERATE_FOG_MIN), "Thick fog", AlertLevel::High),
    Band::new(Bound::Between(VISIBILITY_MODERATE_FOG_MIN, VISIBILITY_LIGHT_FOG_MIN), "Moderate Fog", AlertLevel::Elevated),
    Band::new(Bound::Between(VISIBILITY_LIGHT_FOG_MIN, VISIBILITY_THIN_FOG_MIN), "Light Fog", AlertLevel::Elevated),
    Band::new(Bound::Between(VISIBILITY_THIN_FOG_MIN, VISIBILITY_HAZE_MIN), "Thin Fog", AlertLevel::Moderate),
    Band::new(Bound::Between(VISIBILITY_HAZE_MIN, VISIBILITY_LIGHT_HAZE_MIN), "Haze", AlertLevel::Moderate),
    Band::new(Bound::Between(VISIBILITY_LIGHT_HAZE_MIN, VISIBILITY_CLEAR_MIN), "Light Haze", AlertLevel::Low),
    Band::new(Bound::AtLeast(VISIBILITY_CLEAR_MIN), "Clear", AlertLevel::Low),
];

/// Classifies visibility given in metres
///
/// The returned [`Classified::value`] is in kilometres, rounded to one decimal.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityClassifier;

impl Classifier for VisibilityClassifier {
    type Output = Classified;

    fn classify(&self, raw_meters: f64) -> Option<Classified> {
        let km = round_to_tenth(raw_meters / METERS_PER_KM);
        let category = classify_with(&VISIBILITY_TABLE, km)?;
        Some(Classified { value: km, category })
    }

    fn table(&self) -> Option<&'static ThresholdTable> {
        Some(&VISIBILITY_TABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(meters: f64) -> &'static str {
        VisibilityClassifier.classify(meters).unwrap().category.label
    }

    #[test]
    fn converts_to_kilometres() {
        let result = VisibilityClassifier.classify(10_000.0).unwrap();
        assert_eq!(result.value, 10.0);
        assert_eq!(result.category.label, "Clear");

        let result = VisibilityClassifier.classify(6_437.0).unwrap();
        assert_eq!(result.value, 6.4);
        assert_eq!(result.category.label, "Light Haze");
    }

    #[test]
    fn fog_bands() {
        assert_eq!(label(0.0), "Dense fog");
        assert_eq!(label(49.0), "Dense fog");
        assert_eq!(label(100.0), "Thick fog");
        assert_eq!(label(200.0), "Moderate Fog");
        assert_eq!(label(500.0), "Light Fog");
        assert_eq!(label(1_000.0), "Thin Fog");
        assert_eq!(label(2_000.0), "Haze");
        assert_eq!(label(3_940.0), "Haze");
        assert_eq!(label(3_990.0), "Light Haze");
        assert_eq!(label(4_000.0), "Light Haze");
        assert_eq!(label(9_940.0), "Light Haze");
        assert_eq!(label(9_960.0), "Clear");
    }

    #[test]
    fn half_tenth_rounds_up_into_next_band() {
        let result = VisibilityClassifier.classify(950.0).unwrap();
        assert_eq!(result.value, 1.0);
        assert_eq!(result.category.label, "Thin Fog");
        assert_eq!(result.category.level, AlertLevel::Moderate);

        assert_eq!(label(1_950.0), "Haze");
        assert_eq!(label(949.0), "Light Fog");
    }

    #[test]
    fn alert_levels_follow_severity() {
        let dense = VisibilityClassifier.classify(10.0).unwrap().category.level;
        let haze = VisibilityClassifier.classify(3_000.0).unwrap().category.level;
        let clear = VisibilityClassifier.classify(25_000.0).unwrap().category.level;
        assert!(dense > haze);
        assert!(haze > clear);
    }
}
