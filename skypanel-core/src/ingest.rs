//! Ingestion Orchestrator
//!
//! ## Overview
//!
//! The orchestrator sits between the forecast source and the bus. It owns
//! the current-conditions panel (location, temperature, sky) and is the only
//! component that publishes:
//!
//! ```text
//!                  ┌────────────────────────────────────────────┐
//! ForecastSource ─►│ ingest(Result<ForecastDocument, _>)        │
//!                  │   1. round temperature                     │
//!                  │   2. resolve condition icons               │
//!                  │   3. classify uv/humidity/visibility/dew   │
//!                  │   4. publish today-highlights              │──► EventBus
//!                  │      publish week-forecast                 │──► EventBus
//!                  │                                            │
//! user picks   ───►│ change_location(selection)                 │
//! a location       │   publish location-changed{changed:true}   │──► EventBus
//!                  │   reset own state, hand back next request  │
//!                  └────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Semantics
//!
//! A retrieval error is logged and otherwise ignored: no state changes,
//! nothing is published, and every panel keeps showing the last good data.
//! Retrying is the source's business.
//!
//! ## Usage
//!
//! ```rust
//! use skypanel_core::bus::EventBus;
//! use skypanel_core::config::DashboardConfig;
//! use skypanel_core::ingest::IngestionOrchestrator;
//!
//! let bus = EventBus::shared();
//! let mut orchestrator = IngestionOrchestrator::new(bus, &DashboardConfig::default());
//!
//! let report = orchestrator
//!     .ingest_json(r#"{ "current": { "temp": 28.5, "uvi": 0 }, "daily": [] }"#)
//!     .unwrap();
//! assert_eq!(report.highlights.delivered, 0); // nobody subscribed yet
//! assert_eq!(orchestrator.state().temperature, Some(29));
//! ```

use std::sync::Arc;

use log::{debug, error, info};
use serde::Serialize;

use crate::bus::{DispatchReport, EventBus};
use crate::classify::{
    round_half_up, Classifier, DewPointClassifier, HumidityClassifier, UvClassifier,
    VisibilityClassifier,
};
use crate::config::DashboardConfig;
use crate::errors::RetrievalResult;
use crate::events::{
    DashboardEvent, HighlightCategories, LocationChanged, TodayHighlights, WeekForecast,
};
use crate::icons::{IconRef, IconResolver, MeteoconsIcons};
use crate::model::{
    CurrentConditions, ForecastDocument, LocationCandidate, LocationSelection, RetrievalRequest,
    UnitSystem, WeatherCondition,
};
use crate::time::{format_clock, format_weekday, location_offset};
use crate::traits::{ForecastSource, LocationSearch};

/// A weather condition ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionDisplay {
    /// `None` when the code has no artwork
    pub icon: Option<IconRef>,
    pub description: String,
}

/// Current-conditions panel state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditionsState {
    /// Temperature rounded half-up
    pub temperature: Option<i64>,
    pub primary: Option<ConditionDisplay>,
    pub secondary: Option<ConditionDisplay>,
    /// Local weekday of the observation, e.g. "Monday"
    pub weekday: Option<String>,
    /// Local 12-hour time of the observation, e.g. "9:41 AM"
    pub time: Option<String>,
    /// Cloudiness, %
    pub cloudiness: Option<f64>,
    /// Rain over the last hour; `None` hides the rain row
    pub rain_one_hour: Option<f64>,
    /// Set once a snapshot has been ingested for the current location
    pub has_data: bool,
}

impl CurrentConditionsState {
    /// Nothing known yet
    pub const BASELINE: Self = Self {
        temperature: None,
        primary: None,
        secondary: None,
        weekday: None,
        time: None,
        cloudiness: None,
        rain_one_hour: None,
        has_data: false,
    };
}

impl Default for CurrentConditionsState {
    fn default() -> Self {
        Self::BASELINE
    }
}

/// Dispatch results of one successful ingestion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub highlights: DispatchReport,
    pub week: DispatchReport,
}

/// Running counters, for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub ingested: u64,
    pub failed: u64,
    pub location_changes: u64,
}

/// Turns forecast documents into panel state and bus events
pub struct IngestionOrchestrator<R: IconResolver = MeteoconsIcons> {
    bus: Arc<EventBus<DashboardEvent>>,
    icons: R,
    location: LocationSelection,
    units: UnitSystem,
    fallback_timezone_offset: i32,
    state: CurrentConditionsState,
    stats: IngestStats,
}

impl IngestionOrchestrator<MeteoconsIcons> {
    /// Orchestrator using the Meteocons icon set from `config`
    pub fn new(bus: Arc<EventBus<DashboardEvent>>, config: &DashboardConfig) -> Self {
        Self::with_resolver(bus, config, config.icons())
    }
}

impl<R: IconResolver> IngestionOrchestrator<R> {
    /// Orchestrator with a custom icon resolver
    pub fn with_resolver(bus: Arc<EventBus<DashboardEvent>>, config: &DashboardConfig, icons: R) -> Self {
        Self {
            bus,
            icons,
            location: config.location.clone(),
            units: config.units,
            fallback_timezone_offset: config.fallback_timezone_offset,
            state: CurrentConditionsState::BASELINE,
            stats: IngestStats::default(),
        }
    }

    /// Process one retrieval outcome.
    ///
    /// Returns `None` when the retrieval failed; nothing was changed or published.
    pub fn ingest(&mut self, outcome: RetrievalResult<ForecastDocument>) -> Option<IngestReport> {
        let document = match outcome {
            Ok(document) => document,
            Err(err) => {
                error!("Forecast retrieval for {} failed: {}", self.location.label(), err);
                self.stats.failed += 1;
                return None;
            }
        };

        let offset = document
            .timezone_offset
            .unwrap_or(self.fallback_timezone_offset);

        self.state = self.derive_state(&document.current, offset);

        let highlights = build_highlights(&document.current, offset);
        let week = WeekForecast {
            daily: document.daily,
            timezone_offset: Some(offset),
        };

        let report = IngestReport {
            highlights: self.bus.publish(highlights.into()),
            week: self.bus.publish(week.into()),
        };

        self.stats.ingested += 1;
        info!(
            "Ingested forecast for {} ({} highlight, {} week subscriber(s))",
            self.location.label(),
            report.highlights.delivered,
            report.week.delivered
        );
        Some(report)
    }

    /// Decode and ingest a JSON document; decode failures count as
    /// retrieval failures
    pub fn ingest_json(&mut self, text: &str) -> Option<IngestReport> {
        self.ingest(ForecastDocument::from_json(text))
    }

    /// Retrieve from `source` for the current location and ingest the result
    pub fn refresh(&mut self, source: &dyn ForecastSource) -> Option<IngestReport> {
        let request = self.retrieval_request();
        debug!("Refreshing forecast at ({}, {})", request.latitude, request.longitude);
        self.ingest(source.fetch(&request))
    }

    /// Switch to another location.
    ///
    /// Tells every panel to drop its derived state, resets this panel, and
    /// returns the request for the new location's forecast.
    pub fn change_location(&mut self, selection: impl Into<LocationSelection>) -> RetrievalRequest {
        let selection = selection.into();

        let report = self
            .bus
            .publish(DashboardEvent::LocationChanged(LocationChanged { changed: true }));
        self.state = CurrentConditionsState::BASELINE;

        info!(
            "Location changed from {} to {} ({} panel(s) reset)",
            self.location.label(),
            selection.label(),
            report.delivered
        );
        self.location = selection;
        self.stats.location_changes += 1;
        self.retrieval_request()
    }

    /// Candidates for a free-text query. Blank queries match nothing.
    pub fn search_locations(&self, search: &dyn LocationSearch, query: &str) -> Vec<LocationCandidate> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        search.search(query)
    }

    /// Request for the current location
    pub fn retrieval_request(&self) -> RetrievalRequest {
        RetrievalRequest::for_location(&self.location, self.units)
    }

    pub fn location(&self) -> &LocationSelection {
        &self.location
    }

    /// Label shown in the location header
    pub fn location_label(&self) -> String {
        self.location.label()
    }

    pub fn state(&self) -> &CurrentConditionsState {
        &self.state
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }

    pub fn icons(&self) -> &R {
        &self.icons
    }

    fn condition_display(&self, condition: &WeatherCondition) -> ConditionDisplay {
        let icon = self.icons.resolve_str(&condition.icon);
        if icon.is_none() {
            debug!("No icon for condition code {:?}", condition.icon);
        }
        ConditionDisplay {
            icon,
            description: condition.description.clone(),
        }
    }

    fn derive_state(&self, current: &CurrentConditions, offset: i32) -> CurrentConditionsState {
        let offset = location_offset(Some(offset));

        CurrentConditionsState {
            temperature: current
                .temp
                .filter(|temp| temp.is_finite())
                .map(|temp| round_half_up(temp) as i64),
            primary: current.primary_condition().map(|c| self.condition_display(c)),
            secondary: current.secondary_condition().map(|c| self.condition_display(c)),
            weekday: current.dt.and_then(|dt| format_weekday(dt, offset)),
            time: current.dt.and_then(|dt| format_clock(dt, offset)),
            cloudiness: current.clouds,
            rain_one_hour: current.rain_one_hour(),
            has_data: true,
        }
    }
}

/// Raw readings plus categories, ready to publish
fn build_highlights(current: &CurrentConditions, offset: i32) -> TodayHighlights {
    TodayHighlights {
        uvi: current.uvi,
        wind_speed: current.wind_speed,
        wind_deg: current.wind_deg,
        sunrise: current.sunrise,
        sunset: current.sunset,
        humidity: current.humidity,
        visibility: current.visibility,
        dew_point: current.dew_point,
        timezone_offset: Some(offset),
        categories: HighlightCategories {
            uv: UvClassifier.classify_reading(current.uvi),
            humidity: HumidityClassifier.classify_reading(current.humidity),
            visibility: VisibilityClassifier.classify_reading(current.visibility),
            dew_point: DewPointClassifier.classify_reading(current.dew_point),
        },
    }
}
