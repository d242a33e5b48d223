//! Moisture Classification: Relative Humidity and Dew Point
//!
//! ## Background
//!
//! Relative humidity (RH) says how close the air is to saturation at the
//! current temperature; the dew point says how much moisture is actually in
//! the air, independent of temperature. People feel the dew point: at the
//! same 60% RH, a 15°C day is pleasant and a 32°C day is oppressive.
//!
//! The dashboard shows both, each with its own band table.
//!
//! ### Relative Humidity (%)
//!
//! ```text
//!   ≥ 70      Poor high humidity      High
//!  [60, 70)   Fair                    Elevated
//!  [30, 60)   Maintain your healthy   Low
//!  [25, 30)   Fair                    Elevated
//!   < 25      Poor low humidity       High
//! ```
//!
//! The table is symmetric around the healthy 30-60% range: both dry and damp
//! extremes are flagged. Values are compared as reported, without rounding.
//!
//! ### Dew Point (°, rounded to one decimal first)
//!
//! ```text
//!   < 10      Very Dry          Low
//!  [10, 13)   Comfortable       Low
//!  [13, 16)   Pleasant          Moderate
//!  [16, 18)   Slightly Humid    Moderate
//!  [18, 21)   Humid             Elevated
//!  [21, 24)   Very Humid        High
//!   ≥ 24      Oppressive        High
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use skypanel_core::classify::{Classifier, DewPointClassifier, HumidityClassifier};
//!
//! let dew = DewPointClassifier.classify(9.94).unwrap();
//! assert_eq!(dew.value, 9.9);
//! assert_eq!(dew.category.label, "Very Dry");
//!
//! let rh = HumidityClassifier.classify(70.0).unwrap();
//! assert_eq!(rh.category.label, "Poor high humidity");
//! ```

use crate::constants::thresholds::{
    DEW_POINT_COMFORTABLE_MIN, DEW_POINT_HUMID_MIN, DEW_POINT_OPPRESSIVE_MIN,
    DEW_POINT_PLEASANT_MIN, DEW_POINT_SLIGHTLY_HUMID_MIN, DEW_POINT_VERY_HUMID_MIN,
    HUMIDITY_CRITICAL_HIGH, HUMIDITY_HIGH_MIN, HUMIDITY_LOW_MIN, HUMIDITY_NORMAL_MIN,
};

use super::table::{classify_with, round_to_tenth, Band, Bound, ThresholdTable};
use super::{AlertLevel, Classified, Classifier};

/// Relative humidity bands, highest first
pub const HUMIDITY_TABLE: [Band; 5] = [
    Band::new(Bound::AtLeast(HUMIDITY_CRITICAL_HIGH), "Poor high humidity", AlertLevel::High),
    Band::new(Bound::Between(HUMIDITY_HIGH_MIN, HUMIDITY_CRITICAL_HIGH), "Fair", AlertLevel::Elevated),
    Band::new(Bound::Between(HUMIDITY_NORMAL_MIN, HUMIDITY_HIGH_MIN), "Maintain your healthy", AlertLevel::Low),
    Band::new(Bound::Between(HUMIDITY_LOW_MIN, HUMIDITY_NORMAL_MIN), "Fair", AlertLevel::Elevated),
    Band::new(Bound::Below(HUMIDITY_LOW_MIN), "Poor low humidity", AlertLevel::High),
];

/// Dew point bands, driest first
pub const DEW_POINT_TABLE: [Band; 7] = [
    Band::new(Bound::Below(DEW_POINT_COMFORTABLE_MIN), "Very Dry", AlertLevel::Low),
    Band::new(Bound::Between(DEW_POINT_COMFORTABLE_MIN, DEW_POINT_PLEASANT_MIN), "Comfortable", AlertLevel::Low),
    Band::new(Bound::Between(DEW_POINT_PLEASANT_MIN, DEW_POINT_SLIGHTLY_HUMID_MIN), "Pleasant", AlertLevel::Moderate),
    Band::new(Bound::Between(DEW_POINT_SLIGHTLY_HUMID_MIN, DEW_POINT_HUMID_MIN), "Slightly Humid", AlertLevel::Moderate),
    Band::new(Bound::Between(DEW_POINT_HUMID_MIN, DEW_POINT_VERY_HUMID_MIN), "Humid", AlertLevel::Elevated),
    Band::new(Bound::Between(DEW_POINT_VERY_HUMID_MIN, DEW_POINT_OPPRESSIVE_MIN), "Very Humid", AlertLevel::High),
    Band::new(Bound::AtLeast(DEW_POINT_OPPRESSIVE_MIN), "Oppressive", AlertLevel::High),
];

/// Classifies relative humidity percentage
#[derive(Debug, Clone, Copy, Default)]
pub struct HumidityClassifier;

impl Classifier for HumidityClassifier {
    type Output = Classified;

    fn classify(&self, raw: f64) -> Option<Classified> {
        let category = classify_with(&HUMIDITY_TABLE, raw)?;
        Some(Classified { value: raw, category })
    }

    fn table(&self) -> Option<&'static ThresholdTable> {
        Some(&HUMIDITY_TABLE)
    }
}

/// Classifies dew point after rounding to one decimal
#[derive(Debug, Clone, Copy, Default)]
pub struct DewPointClassifier;

impl Classifier for DewPointClassifier {
    type Output = Classified;

    fn classify(&self, raw: f64) -> Option<Classified> {
        let value = round_to_tenth(raw);
        let category = classify_with(&DEW_POINT_TABLE, value)?;
        Some(Classified { value, category })
    }

    fn table(&self) -> Option<&'static ThresholdTable> {
        Some(&DEW_POINT_TABLE)
    }
}
