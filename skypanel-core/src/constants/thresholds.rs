//! Classification Thresholds
//!
//! Band boundaries for every classified metric. Bands are evaluated top to
//! bottom by the classifiers in [`crate::classify`]; each boundary here is the
//! lower-inclusive edge of the band named after it unless noted otherwise.

// ===== DEW POINT (°, one decimal) =====

/// Dew point below which air reads as "Very Dry" (°).
///
/// Everything under this edge is one band; the table has no lower limit.
pub const DEW_POINT_COMFORTABLE_MIN: f64 = 10.0;

/// Start of the "Pleasant" dew point band (°).
pub const DEW_POINT_PLEASANT_MIN: f64 = 13.0;

/// Start of the "Slightly Humid" dew point band (°).
pub const DEW_POINT_SLIGHTLY_HUMID_MIN: f64 = 16.0;

/// Start of the "Humid" dew point band (°).
pub const DEW_POINT_HUMID_MIN: f64 = 18.0;

/// Start of the "Very Humid" dew point band (°).
pub const DEW_POINT_VERY_HUMID_MIN: f64 = 21.0;

/// Dew point at or above which air is "Oppressive" (°).
///
/// Open-ended upper band.
pub const DEW_POINT_OPPRESSIVE_MIN: f64 = 24.0;

// ===== RELATIVE HUMIDITY (%) =====

/// Humidity at or above which the reading is "Poor high humidity" (%).
pub const HUMIDITY_CRITICAL_HIGH: f64 = 70.0;

/// Start of the upper "Fair" humidity band (%), ends at [`HUMIDITY_CRITICAL_HIGH`].
pub const HUMIDITY_HIGH_MIN: f64 = 60.0;

/// Start of the healthy humidity band (%), ends at [`HUMIDITY_HIGH_MIN`].
pub const HUMIDITY_NORMAL_MIN: f64 = 30.0;

/// Start of the lower "Fair" humidity band (%), ends at [`HUMIDITY_NORMAL_MIN`].
///
/// Anything below is "Poor low humidity".
pub const HUMIDITY_LOW_MIN: f64 = 25.0;

// ===== VISIBILITY (km, one decimal) =====

/// Metres per kilometre, for converting the raw visibility reading.
pub const METERS_PER_KM: f64 = 1000.0;

/// Start of the "Thick fog" band (km). Below is "Dense fog".
pub const VISIBILITY_THICK_FOG_MIN: f64 = 0.05;

/// Start of the "Moderate Fog" band (km).
pub const VISIBILITY_MODERATE_FOG_MIN: f64 = 0.2;

/// Start of the "Light Fog" band (km).
pub const VISIBILITY_LIGHT_FOG_MIN: f64 = 0.5;

/// Start of the "Thin Fog" band (km).
pub const VISIBILITY_THIN_FOG_MIN: f64 = 1.0;

/// Start of the "Haze" band (km).
pub const VISIBILITY_HAZE_MIN: f64 = 2.0;

/// Start of the "Light Haze" band (km).
pub const VISIBILITY_LIGHT_HAZE_MIN: f64 = 4.0;

/// Visibility at or above which the sky is "Clear" (km).
pub const VISIBILITY_CLEAR_MIN: f64 = 10.0;

// ===== UV INDEX (rounded to integer) =====

/// First integer UV index in the "Moderate" band. 0-2 is "Low".
pub const UV_MODERATE_MIN: f64 = 3.0;

/// First integer UV index in the "High" band.
pub const UV_HIGH_MIN: f64 = 6.0;

/// First integer UV index in the "Very High" band.
pub const UV_VERY_HIGH_MIN: f64 = 8.0;

/// First integer UV index in the "Extreme" band.
pub const UV_EXTREME_MIN: f64 = 11.0;

/// Highest UV icon index; every reading at or above it shares one icon.
pub const UV_ICON_MAX_INDEX: u8 = 11;

// ===== WIND DIRECTION =====

/// Number of compass sectors used for wind direction labels.
pub const COMPASS_SECTORS: u32 = 16;

/// Width of one compass sector in degrees (360 / 16).
pub const COMPASS_SECTOR_DEGREES: f64 = 22.5;
