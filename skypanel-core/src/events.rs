//! Dashboard Events
//!
//! ## Overview
//!
//! The closed set of events that travel over the [`EventBus`](crate::bus::EventBus).
//! There are exactly three, each with a fixed payload shape:
//!
//! | Wire name          | Variant                             | Payload                  |
//! |--------------------|-------------------------------------|--------------------------|
//! | `today-highlights` | [`DashboardEvent::TodayHighlights`] | [`TodayHighlights`]      |
//! | `week-forecast`    | [`DashboardEvent::WeekForecast`]    | [`WeekForecast`]         |
//! | `location-changed` | [`DashboardEvent::LocationChanged`] | [`LocationChanged`]      |
//!
//! ## Immutability
//!
//! Large payloads are wrapped in [`Arc`] and handlers receive `&DashboardEvent`,
//! so once an event is published nobody can change what subscribers see.
//! Publishing a fresh snapshot means building a new payload.
//!
//! ## Wire Format
//!
//! Payloads serialize with camelCase field names (`windSpeed`, `dewPoint`,
//! ...) so they can be logged or forwarded verbatim:
//!
//! ```rust
//! use skypanel_core::events::{DashboardEvent, LocationChanged};
//!
//! let event = DashboardEvent::LocationChanged(LocationChanged { changed: true });
//! assert_eq!(event.name(), "location-changed");
//! assert_eq!(event.payload_json().unwrap(), r#"{"changed":true}"#);
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::bus::BusEvent;
use crate::classify::{Classified, UvReading};
use crate::model::{DailyForecastEntry, EpochSeconds};

/// Routing key of a [`DashboardEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    TodayHighlights,
    WeekForecast,
    LocationChanged,
}

impl EventKind {
    /// Every kind, in a stable order
    pub const ALL: [EventKind; 3] = [
        EventKind::TodayHighlights,
        EventKind::WeekForecast,
        EventKind::LocationChanged,
    ];

    /// Wire name of the event
    pub const fn name(self) -> &'static str {
        match self {
            EventKind::TodayHighlights => "today-highlights",
            EventKind::WeekForecast => "week-forecast",
            EventKind::LocationChanged => "location-changed",
        }
    }

    /// Look up a kind by wire name. Unknown or empty names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Categories derived from one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightCategories {
    pub uv: Option<UvReading>,
    pub humidity: Option<Classified>,
    pub visibility: Option<Classified>,
    pub dew_point: Option<Classified>,
}

/// Today's highlights: raw readings plus their derived categories
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayHighlights {
    pub uvi: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_deg: Option<f64>,
    pub sunrise: Option<EpochSeconds>,
    pub sunset: Option<EpochSeconds>,
    pub humidity: Option<f64>,
    /// Metres
    pub visibility: Option<f64>,
    pub dew_point: Option<f64>,
    /// Seconds east of UTC, for local time display
    pub timezone_offset: Option<i32>,
    pub categories: HighlightCategories,
}

/// The week forecast sequence, in source order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WeekForecast {
    pub daily: Vec<DailyForecastEntry>,
    #[serde(rename = "timezoneOffset")]
    pub timezone_offset: Option<i32>,
}

/// Location change notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocationChanged {
    /// Subscribers reset to baseline only when set
    pub changed: bool,
}

/// Every event published on the dashboard bus
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    TodayHighlights(Arc<TodayHighlights>),
    WeekForecast(Arc<WeekForecast>),
    LocationChanged(LocationChanged),
}

impl DashboardEvent {
    /// Wire name of this event
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Payload encoded as JSON
    pub fn payload_json(&self) -> serde_json::Result<String> {
        match self {
            DashboardEvent::TodayHighlights(payload) => serde_json::to_string(payload.as_ref()),
            DashboardEvent::WeekForecast(payload) => serde_json::to_string(payload.as_ref()),
            DashboardEvent::LocationChanged(payload) => serde_json::to_string(payload),
        }
    }
}

impl BusEvent for DashboardEvent {
    type Kind = EventKind;

    fn kind(&self) -> EventKind {
        match self {
            DashboardEvent::TodayHighlights(_) => EventKind::TodayHighlights,
            DashboardEvent::WeekForecast(_) => EventKind::WeekForecast,
            DashboardEvent::LocationChanged(_) => EventKind::LocationChanged,
        }
    }
}

impl From<TodayHighlights> for DashboardEvent {
    fn from(payload: TodayHighlights) -> Self {
        DashboardEvent::TodayHighlights(Arc::new(payload))
    }
}

impl From<WeekForecast> for DashboardEvent {
    fn from(payload: WeekForecast) -> Self {
        DashboardEvent::WeekForecast(Arc::new(payload))
    }
}

impl From<LocationChanged> for DashboardEvent {
    fn from(payload: LocationChanged) -> Self {
        DashboardEvent::LocationChanged(payload)
    }
}
