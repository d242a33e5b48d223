//! Dashboard Defaults
//!
//! Values the dashboard starts with before the user has picked anything.

// ===== DEFAULT LOCATION =====

/// Location shown on first load.
pub const DEFAULT_LOCATION_NAME: &str = "Cebu City";

/// Country code of the default location.
pub const DEFAULT_LOCATION_COUNTRY: &str = "PH";

/// State/province of the default location.
pub const DEFAULT_LOCATION_STATE: &str = "Cebu";

/// Latitude of the default location (decimal degrees).
pub const DEFAULT_LATITUDE: f64 = 10.317;

/// Longitude of the default location (decimal degrees).
pub const DEFAULT_LONGITUDE: f64 = 123.891;

// ===== ASSETS =====

/// Base path prepended to every icon asset reference.
pub const DEFAULT_ICON_BASE: &str = "/resource/MWMeteocons/meteocons-weather-icons";

/// Country flag image URL template; `{country}` is replaced by the lower-cased code.
pub const FLAG_URL_TEMPLATE: &str = "http://openweathermap.org/images/flags/{country}.png";

// ===== TIME =====

/// Seconds per hour, for timezone offset sanity checks.
pub const SECONDS_PER_HOUR: i32 = 3600;

/// Largest timezone offset accepted from a forecast document (±18h, chrono's limit).
pub const MAX_TIMEZONE_OFFSET_SECS: i32 = 18 * SECONDS_PER_HOUR;
