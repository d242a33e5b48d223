//! Week Forecast Panel
//!
//! Keeps the daily sequence exactly as published and renders one card per
//! day. The first card is the highlighted one.

use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;
use serde::Serialize;

use crate::bus::EventBus;
use crate::classify::round_half_up;
use crate::errors::{HandlerError, HandlerResult};
use crate::events::{DashboardEvent, EventKind, WeekForecast};
use crate::icons::{IconRef, IconResolver, MeteoconsIcons};
use crate::model::DailyForecastEntry;
use crate::time::{format_short_weekday, location_offset};

use super::Panel;

/// One day of the forecast strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayForecastCard {
    /// Short local weekday, e.g. "Mon"
    pub weekday: String,
    pub icon: Option<IconRef>,
    pub day_temperature: i64,
    pub night_temperature: i64,
    /// Set on the first card only
    pub is_active: bool,
}

impl DayForecastCard {
    /// Card for the `index`-th entry of the sequence
    pub fn from_entry(
        index: usize,
        entry: &DailyForecastEntry,
        timezone_offset: Option<i32>,
        icons: &MeteoconsIcons,
    ) -> Self {
        let offset = location_offset(timezone_offset);
        Self {
            weekday: format_short_weekday(entry.dt, offset).unwrap_or_default(),
            icon: entry.condition_code().and_then(|code| icons.resolve_str(code)),
            day_temperature: round_half_up(entry.temp.day) as i64,
            night_temperature: round_half_up(entry.temp.night) as i64,
            is_active: index == 0,
        }
    }
}

/// What the panel shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekForecastState {
    /// Sequence as received, in source order
    pub daily: Vec<DailyForecastEntry>,
    pub cards: Vec<DayForecastCard>,
}

impl WeekForecastState {
    /// No forecast
    pub const BASELINE: Self = Self {
        daily: Vec::new(),
        cards: Vec::new(),
    };

    pub fn from_payload(payload: &WeekForecast, icons: &MeteoconsIcons) -> Self {
        let cards = payload
            .daily
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                DayForecastCard::from_entry(index, entry, payload.timezone_offset, icons)
            })
            .collect();

        Self {
            daily: payload.daily.clone(),
            cards,
        }
    }

    pub fn is_baseline(&self) -> bool {
        self.daily.is_empty() && self.cards.is_empty()
    }
}

impl Default for WeekForecastState {
    fn default() -> Self {
        Self::BASELINE
    }
}

/// Panel controller for the week forecast strip
pub struct WeekForecastPanel {
    bus: Arc<EventBus<DashboardEvent>>,
    icons: MeteoconsIcons,
    state: Mutex<WeekForecastState>,
}

impl WeekForecastPanel {
    /// Create the panel and subscribe it to the bus
    pub fn activate(bus: &Arc<EventBus<DashboardEvent>>, icons: MeteoconsIcons) -> Arc<Self> {
        let panel = Arc::new(Self {
            bus: Arc::clone(bus),
            icons,
            state: Mutex::new(WeekForecastState::BASELINE),
        });
        bus.subscribe(EventKind::WeekForecast, &panel, Self::on_week_forecast);
        bus.subscribe(EventKind::LocationChanged, &panel, Self::on_location_changed);
        panel
    }

    /// Unsubscribe from the bus
    pub fn deactivate(&self) {
        let removed = self.bus.unsubscribe_owner(self);
        debug!("Week forecast panel deactivated ({} subscription(s) removed)", removed);
    }

    pub fn is_active(&self) -> bool {
        self.bus
            .is_subscribed(EventKind::WeekForecast, self, Self::on_week_forecast)
    }

    /// Snapshot of what the panel shows
    pub fn state(&self) -> WeekForecastState {
        match self.state.lock() {
            Ok(state) => state.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, WeekForecastState>, HandlerError> {
        self.state
            .lock()
            .map_err(|_| HandlerError::new("week forecast state lock poisoned"))
    }

    fn on_week_forecast(&self, event: &DashboardEvent) -> HandlerResult {
        let DashboardEvent::WeekForecast(payload) = event else {
            return Ok(());
        };
        let next = WeekForecastState::from_payload(payload, &self.icons);
        *self.lock()? = next;
        Ok(())
    }

    fn on_location_changed(&self, event: &DashboardEvent) -> HandlerResult {
        if let DashboardEvent::LocationChanged(notice) = event {
            if notice.changed {
                *self.lock()? = WeekForecastState::BASELINE;
                debug!("Week forecast panel reset to baseline");
            }
        }
        Ok(())
    }
}

impl Panel for WeekForecastPanel {
    fn name(&self) -> &'static str {
        "week-forecast"
    }

    fn deactivate(&self) {
        WeekForecastPanel::deactivate(self);
    }

    fn is_baseline(&self) -> bool {
        self.state().is_baseline()
    }
}
