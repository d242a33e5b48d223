//! Forecast Document Model
//!
//! ## Overview
//!
//! Shapes of the data that enters the dashboard from the retrieval and
//! location-search collaborators. The field names follow the OpenWeather
//! One Call document so a response body can be decoded directly:
//!
//! ```text
//! ForecastDocument
//! ├── timezone_offset   seconds east of UTC (optional)
//! ├── current           CurrentConditions (the snapshot)
//! │   ├── dt, temp, humidity, dew_point, visibility, uvi
//! │   ├── wind_speed, wind_deg, clouds, sunrise, sunset
//! │   ├── rain { 1h }   optional precipitation
//! │   └── weather[]     primary, secondary condition
//! └── daily[]           DailyForecastEntry, chronological
//! ```
//!
//! Every metric that gets classified is `Option<f64>`: a field missing from
//! the document is absent, a field equal to `0` is a reading. Nothing here is
//! mutated after decoding; a new document replaces the old one wholesale.

use serde::{Deserialize, Serialize};

use crate::constants::defaults::{
    DEFAULT_LATITUDE, DEFAULT_LOCATION_COUNTRY, DEFAULT_LOCATION_NAME, DEFAULT_LOCATION_STATE,
    DEFAULT_LONGITUDE, FLAG_URL_TEMPLATE,
};
use crate::errors::RetrievalResult;

/// Epoch seconds, UTC
pub type EpochSeconds = i64;

/// One weather condition as reported by the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherCondition {
    /// Numeric condition id (e.g. 800 for clear sky)
    #[serde(default)]
    pub id: u32,
    /// Condition group, e.g. "Clouds"
    #[serde(default)]
    pub main: String,
    /// Human-readable description, e.g. "broken clouds"
    #[serde(default)]
    pub description: String,
    /// Condition code, two digits plus `d`/`n`, e.g. "04d"
    pub icon: String,
}

/// Precipitation over the last hour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Precipitation {
    #[serde(rename = "1h", alias = "oneHour", default)]
    pub one_hour: Option<f64>,
}

/// Current-conditions snapshot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Observation time
    #[serde(default)]
    pub dt: Option<EpochSeconds>,
    #[serde(default)]
    pub temp: Option<f64>,
    /// Relative humidity, %
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub dew_point: Option<f64>,
    /// Visibility in metres
    #[serde(default)]
    pub visibility: Option<f64>,
    #[serde(default)]
    pub uvi: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
    /// Wind bearing in degrees
    #[serde(default)]
    pub wind_deg: Option<f64>,
    /// Cloudiness, %
    #[serde(default)]
    pub clouds: Option<f64>,
    #[serde(default)]
    pub sunrise: Option<EpochSeconds>,
    #[serde(default)]
    pub sunset: Option<EpochSeconds>,
    #[serde(default)]
    pub rain: Option<Precipitation>,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

impl CurrentConditions {
    /// Primary condition, if reported
    pub fn primary_condition(&self) -> Option<&WeatherCondition> {
        self.weather.first()
    }

    /// Secondary condition, if reported
    pub fn secondary_condition(&self) -> Option<&WeatherCondition> {
        self.weather.get(1)
    }

    /// One-hour rain amount, if reported
    pub fn rain_one_hour(&self) -> Option<f64> {
        self.rain.and_then(|rain| rain.one_hour)
    }
}

/// Day/night temperatures for one forecast day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyTemperature {
    pub day: f64,
    pub night: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// One day of the week forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    pub dt: EpochSeconds,
    pub temp: DailyTemperature,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

impl DailyForecastEntry {
    /// Condition code used for the day's icon
    pub fn condition_code(&self) -> Option<&str> {
        self.weather.first().map(|condition| condition.icon.as_str())
    }
}

/// Complete retrieval result
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastDocument {
    /// Seconds east of UTC for the forecast location
    #[serde(default)]
    pub timezone_offset: Option<i32>,
    #[serde(default)]
    pub current: CurrentConditions,
    #[serde(default)]
    pub daily: Vec<DailyForecastEntry>,
}

impl ForecastDocument {
    /// Decode a document from its JSON text
    pub fn from_json(text: &str) -> RetrievalResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Unit system requested from the retrieval collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl UnitSystem {
    /// Query parameter value
    pub fn as_str(self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
            UnitSystem::Standard => "standard",
        }
    }
}

/// The location forecasts are retrieved for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSelection {
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationSelection {
    /// Display label, "name, country"
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

impl Default for LocationSelection {
    fn default() -> Self {
        Self {
            name: DEFAULT_LOCATION_NAME.to_string(),
            country: DEFAULT_LOCATION_COUNTRY.to_string(),
            state: Some(DEFAULT_LOCATION_STATE.to_string()),
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
        }
    }
}

/// One match returned by the location-search collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCandidate {
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lon")]
    pub longitude: f64,
}

impl LocationCandidate {
    /// Country flag image URL
    pub fn flag_url(&self) -> String {
        FLAG_URL_TEMPLATE.replace("{country}", &self.country.to_lowercase())
    }
}

impl From<LocationCandidate> for LocationSelection {
    fn from(candidate: LocationCandidate) -> Self {
        Self {
            name: candidate.name,
            country: candidate.country,
            state: candidate.state,
            latitude: candidate.latitude,
            longitude: candidate.longitude,
        }
    }
}

/// Arguments for one retrieval
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RetrievalRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub units: UnitSystem,
}

impl RetrievalRequest {
    /// Request for a selected location
    pub fn for_location(location: &LocationSelection, units: UnitSystem) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
            units,
        }
    }
}
