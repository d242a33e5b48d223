//! Weather Metric Classification
//!
//! ## Overview
//!
//! Raw telemetry is hard to read at a glance. This module turns numbers into
//! words and a severity colour, one metric at a time:
//!
//! ```text
//!  raw value ──► round for display ──► threshold table ──► CategoryResult
//!   (f64)          (per metric)         (first match)      label + AlertLevel
//! ```
//!
//! | Metric       | Input      | Rounding            | Module           |
//! |--------------|------------|---------------------|------------------|
//! | Humidity     | %          | none                | [`humidity`]     |
//! | Dew point    | °          | 1 decimal           | [`humidity`]     |
//! | Visibility   | metres     | km, 1 decimal       | [`visibility`]   |
//! | UV index     | index      | half-up integer     | [`uv`]           |
//! | Wind bearing | degrees    | 22.5° sectors       | [`wind`]         |
//!
//! ## Design Philosophy
//!
//! 1. **Stateless**: every classifier is a unit struct; results depend only on
//!    the input and the constant tables.
//! 2. **Total**: tables cover the whole real line, so a finite value always
//!    gets a category.
//! 3. **Absence is not an error**: a missing reading yields `None`, which the
//!    panels render as "unavailable". Zero is a reading like any other.
//!
//! ## Usage
//!
//! ```rust
//! use skypanel_core::classify::{AlertLevel, Classifier, UvClassifier, VisibilityClassifier};
//!
//! let uv = UvClassifier.classify(10.6).unwrap();
//! assert_eq!(uv.category.label, "Extreme");
//! assert_eq!(uv.icon_index, 11);
//!
//! // Visibility missing from the snapshot: unavailable, nothing thrown
//! assert!(VisibilityClassifier.classify_reading(None).is_none());
//! assert_eq!(AlertLevel::High.indicator(), "code-red");
//! ```

pub mod humidity;
pub mod table;
pub mod uv;
pub mod visibility;
pub mod wind;

use serde::Serialize;

pub use humidity::{DewPointClassifier, HumidityClassifier, DEW_POINT_TABLE, HUMIDITY_TABLE};
pub use table::{classify_with, format_tenth, round_half_up, round_to_tenth, Band, Bound, ThresholdTable};
pub use uv::{UvClassifier, UvReading, UV_TABLE};
pub use visibility::{VisibilityClassifier, VISIBILITY_TABLE};
pub use wind::{CompassPoint, WindDirectionClassifier};

/// Ordinal severity attached to a classified metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Low,
    Moderate,
    Elevated,
    High,
}

impl AlertLevel {
    /// Name of the indicator asset for this level
    pub fn indicator(self) -> &'static str {
        match self {
            AlertLevel::Low => "code-green",
            AlertLevel::Moderate => "code-yellow",
            AlertLevel::Elevated => "code-orange",
            AlertLevel::High => "code-red",
        }
    }
}

/// Label plus severity for one classified metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryResult {
    pub label: &'static str,
    pub level: AlertLevel,
}

/// Display value together with its category
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classified {
    /// Value after display rounding/unit conversion
    pub value: f64,
    pub category: CategoryResult,
}

/// Common interface of every metric classifier
pub trait Classifier {
    /// What a successful classification produces
    type Output;

    /// Classify a present reading. `None` when the value is not finite.
    fn classify(&self, raw: f64) -> Option<Self::Output>;

    /// Classify a possibly-absent reading
    fn classify_reading(&self, raw: Option<f64>) -> Option<Self::Output> {
        raw.and_then(|value| self.classify(value))
    }

    /// Backing threshold table, if the classifier is table driven
    fn table(&self) -> Option<&'static ThresholdTable> {
        None
    }
}
