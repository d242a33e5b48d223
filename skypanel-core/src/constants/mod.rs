//! Constants for SkyPanel Core
//!
//! Centralized, documented constants used throughout the dashboard. Every
//! numeric threshold a classifier compares against lives here rather than as
//! a magic number next to the comparison.
//!
//! ## Organization
//!
//! - **Thresholds**: band edges for dew point, humidity, visibility, UV index
//!   and the compass sectors used for wind direction
//! - **Defaults**: initial location, asset base paths, time limits
//!
//! ## Usage Guidelines
//!
//! 1. Use these constants instead of literals in classifier code
//! 2. Include units in the name (`_MIN`, `_KM`, `_DEGREES`)
//! 3. Keep band edges in table order so the file reads like the table

/// Band edges for every classified metric.
pub mod thresholds;

/// Initial location, asset paths and time limits.
pub mod defaults;

pub use thresholds::{
    COMPASS_SECTORS, COMPASS_SECTOR_DEGREES, METERS_PER_KM, UV_ICON_MAX_INDEX,
};

pub use defaults::{
    DEFAULT_ICON_BASE, DEFAULT_LATITUDE, DEFAULT_LONGITUDE,
    DEFAULT_LOCATION_COUNTRY, DEFAULT_LOCATION_NAME, DEFAULT_LOCATION_STATE,
};
