//! UV Index Classification
//!
//! The UV index is reported as a fractional number but published as an
//! integer scale (WHO Global Solar UV Index). The reading is rounded half-up
//! first and the rounded value is both displayed and classified.
//!
//! ```text
//!  rounded   label       alert      icon index
//!  0 - 2     Low         Low        0 - 2
//!  3 - 5     Moderate    Moderate   3 - 5
//!  6 - 7     High        Elevated   6 - 7
//!  8 - 10    Very High   High       8 - 10
//!  ≥ 11      Extreme     High       11 (clamped)
//! ```
//!
//! The icon set has artwork for indices 0 through 11; everything above 11
//! reuses the last icon.

use serde::Serialize;

use crate::constants::thresholds::{
    UV_EXTREME_MIN, UV_HIGH_MIN, UV_ICON_MAX_INDEX, UV_MODERATE_MIN, UV_VERY_HIGH_MIN,
};

use super::table::{classify_with, round_half_up, Band, Bound, ThresholdTable};
use super::{AlertLevel, CategoryResult, Classifier};

/// UV bands over the rounded index
pub const UV_TABLE: [Band; 5] = [
    Band::new(Bound::Below(UV_MODERATE_MIN), "Low", AlertLevel::Low),
    Band::new(Bound::Between(UV_MODERATE_MIN, UV_HIGH_MIN), "Moderate", AlertLevel::Moderate),
    Band::new(Bound::Between(UV_HIGH_MIN, UV_VERY_HIGH_MIN), "High", AlertLevel::Elevated),
    Band::new(Bound::Between(UV_VERY_HIGH_MIN, UV_EXTREME_MIN), "Very High", AlertLevel::High),
    Band::new(Bound::AtLeast(UV_EXTREME_MIN), "Extreme", AlertLevel::High),
];

/// Classified UV reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UvReading {
    /// Index rounded half-up, as displayed
    pub rounded: i32,
    /// Icon artwork index in `0..=11`
    pub icon_index: u8,
    /// Label and alert level
    pub category: CategoryResult,
}

/// Classifies UV index readings
#[derive(Debug, Clone, Copy, Default)]
pub struct UvClassifier;

impl UvClassifier {
    /// Icon index for an already-rounded UV value
    pub fn icon_index(rounded: i32) -> u8 {
        rounded.clamp(0, UV_ICON_MAX_INDEX as i32) as u8
    }
}

impl Classifier for UvClassifier {
    type Output = UvReading;

    fn classify(&self, raw: f64) -> Option<UvReading> {
        let rounded = round_half_up(raw);
        let category = classify_with(&UV_TABLE, rounded)?;
        let rounded = rounded as i32;

        Some(UvReading {
            rounded,
            icon_index: Self::icon_index(rounded),
            category,
        })
    }

    fn table(&self) -> Option<&'static ThresholdTable> {
        Some(&UV_TABLE)
    }
}
