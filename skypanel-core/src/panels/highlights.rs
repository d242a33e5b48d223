//! Today's Highlights Panel
//!
//! Six tiles, each derived from one part of the `today-highlights` payload:
//!
//! ```text
//! ┌────────────┬────────────┬─────────────────┐
//! │ UV index   │ Wind       │ Sunrise/Sunset  │
//! │ 11 Extreme │ 3.6 m/s  N │ 6:20 AM 5:56 PM │
//! ├────────────┼────────────┼─────────────────┤
//! │ Humidity   │ Visibility │ Dew point       │
//! │ 74 ● red   │ 10.0 Clear │ 24.0 Oppressive │
//! └────────────┴────────────┴─────────────────┘
//! ```
//!
//! A tile whose reading is missing stays `None` ("unavailable") without
//! affecting the others. Wind direction and local sun times are computed
//! here; the banded categories arrive precomputed in the payload.

use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;
use serde::Serialize;

use crate::bus::EventBus;
use crate::classify::{format_tenth, AlertLevel, Classified, CompassPoint};
use crate::errors::{HandlerError, HandlerResult};
use crate::events::{DashboardEvent, EventKind, TodayHighlights};
use crate::icons::{IconRef, MeteoconsIcons};
use crate::time::{format_clock, location_offset};

use super::Panel;

/// UV tile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UvTile {
    pub value: i32,
    pub label: &'static str,
    pub level: AlertLevel,
    pub icon: IconRef,
}

/// Banded metric tile (humidity, visibility, dew point)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTile {
    /// Value as displayed
    pub display: String,
    pub label: &'static str,
    pub level: AlertLevel,
    pub alert_icon: IconRef,
}

/// Local sunrise and sunset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SunTimes {
    pub sunrise: String,
    pub sunset: String,
}

/// Everything the panel shows; `None` marks an unavailable tile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightsState {
    pub uv: Option<UvTile>,
    /// One decimal
    pub wind_speed: Option<String>,
    pub wind_direction: Option<CompassPoint>,
    pub sun: Option<SunTimes>,
    pub humidity: Option<MetricTile>,
    pub visibility: Option<MetricTile>,
    pub dew_point: Option<MetricTile>,
}

impl HighlightsState {
    /// All tiles unavailable
    pub const BASELINE: Self = Self {
        uv: None,
        wind_speed: None,
        wind_direction: None,
        sun: None,
        humidity: None,
        visibility: None,
        dew_point: None,
    };

    /// Derive every tile from a payload
    pub fn from_payload(payload: &TodayHighlights, icons: &MeteoconsIcons) -> Self {
        let categories = &payload.categories;
        let offset = location_offset(payload.timezone_offset);

        let sun = match (payload.sunrise, payload.sunset) {
            (Some(sunrise), Some(sunset)) => format_clock(sunrise, offset)
                .zip(format_clock(sunset, offset))
                .map(|(sunrise, sunset)| SunTimes { sunrise, sunset }),
            _ => None,
        };

        Self {
            uv: categories.uv.map(|uv| UvTile {
                value: uv.rounded,
                label: uv.category.label,
                level: uv.category.level,
                icon: icons.uv_index(uv.icon_index),
            }),
            wind_speed: payload
                .wind_speed
                .filter(|speed| speed.is_finite())
                .map(format_tenth),
            wind_direction: payload.wind_deg.and_then(CompassPoint::from_degrees),
            sun,
            humidity: categories
                .humidity
                .map(|humidity| metric_tile(humidity, humidity.value.to_string(), icons)),
            visibility: categories
                .visibility
                .map(|visibility| metric_tile(visibility, format_tenth(visibility.value), icons)),
            dew_point: categories
                .dew_point
                .map(|dew| metric_tile(dew, format_tenth(dew.value), icons)),
        }
    }

    /// True when every tile is unavailable
    pub fn is_baseline(&self) -> bool {
        self == &Self::BASELINE
    }
}

impl Default for HighlightsState {
    fn default() -> Self {
        Self::BASELINE
    }
}

fn metric_tile(classified: Classified, display: String, icons: &MeteoconsIcons) -> MetricTile {
    MetricTile {
        display,
        label: classified.category.label,
        level: classified.category.level,
        alert_icon: icons.alert(classified.category.level),
    }
}

/// Panel controller for today's highlights
pub struct HighlightsPanel {
    bus: Arc<EventBus<DashboardEvent>>,
    icons: MeteoconsIcons,
    state: Mutex<HighlightsState>,
}

impl HighlightsPanel {
    /// Create the panel and subscribe it to the bus
    pub fn activate(bus: &Arc<EventBus<DashboardEvent>>, icons: MeteoconsIcons) -> Arc<Self> {
        let panel = Arc::new(Self {
            bus: Arc::clone(bus),
            icons,
            state: Mutex::new(HighlightsState::BASELINE),
        });
        bus.subscribe(EventKind::TodayHighlights, &panel, Self::on_highlights);
        bus.subscribe(EventKind::LocationChanged, &panel, Self::on_location_changed);
        panel
    }

    /// Unsubscribe from the bus; state stays as last shown
    pub fn deactivate(&self) {
        self.bus
            .unsubscribe(EventKind::TodayHighlights, self, Self::on_highlights);
        self.bus
            .unsubscribe(EventKind::LocationChanged, self, Self::on_location_changed);
        debug!("Highlights panel deactivated");
    }

    /// Whether the panel is currently subscribed
    pub fn is_active(&self) -> bool {
        self.bus
            .is_subscribed(EventKind::TodayHighlights, self, Self::on_highlights)
    }

    /// Snapshot of what the panel shows
    pub fn state(&self) -> HighlightsState {
        match self.state.lock() {
            Ok(state) => state.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HighlightsState>, HandlerError> {
        self.state
            .lock()
            .map_err(|_| HandlerError::new("highlights state lock poisoned"))
    }

    fn on_highlights(&self, event: &DashboardEvent) -> HandlerResult {
        let DashboardEvent::TodayHighlights(payload) = event else {
            return Ok(());
        };
        let next = HighlightsState::from_payload(payload, &self.icons);
        *self.lock()? = next;
        Ok(())
    }

    fn on_location_changed(&self, event: &DashboardEvent) -> HandlerResult {
        if let DashboardEvent::LocationChanged(notice) = event {
            if notice.changed {
                *self.lock()? = HighlightsState::BASELINE;
                debug!("Highlights panel reset to baseline");
            }
        }
        Ok(())
    }
}

impl Panel for HighlightsPanel {
    fn name(&self) -> &'static str {
        "highlights"
    }

    fn deactivate(&self) {
        HighlightsPanel::deactivate(self);
    }

    fn is_baseline(&self) -> bool {
        self.state().is_baseline()
    }
}
