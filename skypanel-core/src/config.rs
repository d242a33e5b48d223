//! Dashboard Configuration
//!
//! Everything the dashboard needs before the first retrieval: which
//! location to start on, which unit system to request, and where the icon
//! assets live. All fields have defaults, so an empty JSON object is a
//! valid configuration.
//!
//! ```rust
//! use skypanel_core::config::DashboardConfig;
//! use skypanel_core::model::UnitSystem;
//!
//! let config = DashboardConfig::from_json(r#"{ "units": "imperial" }"#).unwrap();
//! assert_eq!(config.units, UnitSystem::Imperial);
//! assert_eq!(config.location.name, "Cebu City");
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::defaults::{DEFAULT_ICON_BASE, MAX_TIMEZONE_OFFSET_SECS};
use crate::errors::ConfigError;
use crate::icons::MeteoconsIcons;
use crate::model::{LocationSelection, RetrievalRequest, UnitSystem};

/// Startup configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Location shown on first load
    pub location: LocationSelection,
    /// Units requested from the forecast source
    pub units: UnitSystem,
    /// Base path of the icon assets
    pub icon_base: String,
    /// Offset used when a document carries none, seconds east of UTC
    pub fallback_timezone_offset: i32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            location: LocationSelection::default(),
            units: UnitSystem::default(),
            icon_base: DEFAULT_ICON_BASE.to_string(),
            fallback_timezone_offset: 0,
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a JSON configuration document
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Start on a different location
    pub fn location(mut self, location: LocationSelection) -> Self {
        self.location = location;
        self
    }

    /// Request a different unit system
    pub fn units(mut self, units: UnitSystem) -> Self {
        self.units = units;
        self
    }

    /// Serve icons from a different base path
    pub fn icon_base(mut self, base: impl Into<String>) -> Self {
        self.icon_base = base.into();
        self
    }

    /// Fallback timezone for documents without an offset
    pub fn fallback_timezone_offset(mut self, seconds: i32) -> Self {
        self.fallback_timezone_offset = seconds;
        self
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let location = &self.location;
        if !location.latitude.is_finite() || !(-90.0..=90.0).contains(&location.latitude) {
            return Err(ConfigError::Invalid {
                field: "location.latitude",
                reason: "must be within -90..=90",
            });
        }
        if !location.longitude.is_finite() || !(-180.0..=180.0).contains(&location.longitude) {
            return Err(ConfigError::Invalid {
                field: "location.longitude",
                reason: "must be within -180..=180",
            });
        }
        if location.name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "location.name",
                reason: "must not be empty",
            });
        }
        if self.fallback_timezone_offset.abs() > MAX_TIMEZONE_OFFSET_SECS {
            return Err(ConfigError::Invalid {
                field: "fallback_timezone_offset",
                reason: "must be within ±18 hours",
            });
        }
        Ok(())
    }

    /// Icon resolver rooted at the configured base
    pub fn icons(&self) -> MeteoconsIcons {
        MeteoconsIcons::new(self.icon_base.clone())
    }

    /// Retrieval request for the configured start location
    pub fn initial_request(&self) -> RetrievalRequest {
        RetrievalRequest::for_location(&self.location, self.units)
    }
}
