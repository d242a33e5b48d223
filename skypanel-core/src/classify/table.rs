//! Threshold Tables and Shared Classification Utilities
//!
//! ## Overview
//!
//! Every banded metric (dew point, humidity, visibility, UV index) is
//! classified the same way: an ordered list of [`Band`]s is walked top to
//! bottom and the first band whose [`Bound`] contains the value wins.
//!
//! ```text
//! value ──► Band 0? ──no──► Band 1? ──no──► ... ──► Band N
//!              │yes            │yes                  │yes
//!              ▼               ▼                     ▼
//!        CategoryResult  CategoryResult        CategoryResult
//! ```
//!
//! Tables are written so they are exhaustive over the real line: the first
//! band is open below and the last is open above. A finite input therefore
//! always lands in a band; non-finite input (NaN, ±∞) is reported as
//! unclassified so callers can treat it like a missing reading.
//!
//! ## Rounding
//!
//! Display rounding matches what users expect from a web dashboard rather
//! than IEEE "round half to even" or Rust's "half away from zero":
//!
//! - [`round_half_up`]: `-2.5 → -2`, `2.5 → 3` (temperatures, UV index)
//! - [`round_to_tenth`]: one decimal for dew point, visibility and wind speed
//!
//! Tenths are rounded on the decimal value, not on its binary expansion.
//! `0.95` is stored as `0.94999...` but still rounds to `1.0`, so a value
//! that prints as a half-tenth always moves to the upper tenth and into
//! the upper band when it sits on an edge.

use super::{AlertLevel, CategoryResult};

/// Interval a band covers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// Everything strictly below the edge: `(-∞, edge)`
    Below(f64),
    /// Half-open, lower-inclusive: `[lo, hi)`
    Between(f64, f64),
    /// Everything at or above the edge: `[edge, ∞)`
    AtLeast(f64),
}

impl Bound {
    /// Check whether the value falls inside this interval
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        match *self {
            Bound::Below(edge) => value < edge,
            Bound::Between(lo, hi) => value >= lo && value < hi,
            Bound::AtLeast(edge) => value >= edge,
        }
    }
}

/// One row of a threshold table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    /// Interval this band covers
    pub bound: Bound,
    /// Result reported when the value falls in the band
    pub category: CategoryResult,
}

impl Band {
    /// Build a band row
    pub const fn new(bound: Bound, label: &'static str, level: AlertLevel) -> Self {
        Self {
            bound,
            category: CategoryResult { label, level },
        }
    }
}

/// Ordered rows, evaluated top to bottom
pub type ThresholdTable = [Band];

/// Classify a value against a table. First matching band wins.
///
/// Returns `None` for non-finite input.
pub fn classify_with(table: &ThresholdTable, value: f64) -> Option<CategoryResult> {
    if !value.is_finite() {
        log::debug!("Refusing to classify non-finite value {}", value);
        return None;
    }

    table
        .iter()
        .find(|band| band.bound.contains(value))
        .map(|band| band.category)
}

/// Round to the nearest integer, ties toward positive infinity
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    libm::floor(value + 0.5)
}

/// Round to one decimal place for display
///
/// Half-tenths go up as written in decimal: `0.95 → 1.0`, `1.95 → 2.0`.
#[inline]
pub fn round_to_tenth(value: f64) -> f64 {
    libm::round(value * 10.0) / 10.0
}

/// Format a value with exactly one decimal, the way panels display it
pub fn format_tenth(value: f64) -> String {
    format!("{:.1}", round_to_tenth(value))
}
