//! Common fixtures for dashboard integration tests
//!
//! - Recorded forecast documents for two locations
//! - A fully wired dashboard (bus, both panels, orchestrator)
//! - An event tap that records every publish in order

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use skypanel_core::{
    DashboardConfig, DashboardEvent, EventBus, EventKind, HandlerResult, HighlightsPanel,
    IngestionOrchestrator, LocationCandidate, Panel, WeekForecastPanel,
};

/// Icon base used by every fixture
pub const ICON_BASE: &str = "/icons";

/// Cebu, 2023-11-15 06:13 local (UTC+8)
pub const CEBU_SNAPSHOT: &str = r#"{
    "timezone_offset": 28800,
    "current": {
        "dt": 1700000000,
        "sunrise": 1699998780,
        "sunset": 1700041020,
        "temp": 29.6,
        "humidity": 74,
        "dew_point": 24.3,
        "uvi": 7.4,
        "clouds": 40,
        "visibility": 10000,
        "wind_speed": 3.6,
        "wind_deg": 60,
        "rain": { "1h": 0.25 },
        "weather": [
            { "id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d" }
        ]
    },
    "daily": [
        { "dt": 1699963200, "temp": { "day": 30.5, "night": 25.1 }, "weather": [{ "icon": "10d" }] },
        { "dt": 1700049600, "temp": { "day": 31.0, "night": 24.8 }, "weather": [{ "icon": "01d" }] },
        { "dt": 1700136000, "temp": { "day": 29.4, "night": 24.5 }, "weather": [{ "icon": "04d" }] }
    ]
}"#;

/// Davao, same instant; the station reported no visibility
pub const DAVAO_SNAPSHOT: &str = r#"{
    "timezone_offset": 28800,
    "current": {
        "dt": 1700000000,
        "sunrise": 1699998000,
        "sunset": 1700040600,
        "temp": 27.2,
        "humidity": 65,
        "dew_point": 20.0,
        "uvi": 0,
        "clouds": 90,
        "wind_speed": 1.2,
        "wind_deg": 0,
        "weather": [
            { "id": 501, "main": "Rain", "description": "moderate rain", "icon": "10n" }
        ]
    },
    "daily": [
        { "dt": 1699963200, "temp": { "day": 28.0, "night": 23.5 }, "weather": [{ "icon": "10d" }] }
    ]
}"#;

pub fn davao() -> LocationCandidate {
    LocationCandidate {
        name: "Davao City".into(),
        country: "PH".into(),
        state: Some("Davao Region".into()),
        latitude: 7.0731,
        longitude: 125.6128,
    }
}

/// Bus, both panels and the orchestrator, wired like the application
pub struct Dashboard {
    pub bus: Arc<EventBus<DashboardEvent>>,
    pub highlights: Arc<HighlightsPanel>,
    pub week: Arc<WeekForecastPanel>,
    pub orchestrator: IngestionOrchestrator,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::with_config(DashboardConfig::default().icon_base(ICON_BASE))
    }

    pub fn with_config(config: DashboardConfig) -> Self {
        let bus = EventBus::shared();
        let highlights = HighlightsPanel::activate(&bus, config.icons());
        let week = WeekForecastPanel::activate(&bus, config.icons());
        let orchestrator = IngestionOrchestrator::new(Arc::clone(&bus), &config);
        Self { bus, highlights, week, orchestrator }
    }

    /// Every panel shows nothing derived
    pub fn is_baseline(&self) -> bool {
        self.highlights.is_baseline() && self.week.is_baseline() && !self.orchestrator.state().has_data
    }
}

/// Records every event published on a bus
#[derive(Default)]
pub struct Tap {
    pub events: Mutex<Vec<DashboardEvent>>,
}

impl Tap {
    pub fn attach(bus: &Arc<EventBus<DashboardEvent>>) -> Arc<Self> {
        let tap = Arc::new(Self::default());
        for kind in EventKind::ALL {
            bus.subscribe(kind, &tap, Self::record);
        }
        tap
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|event| event.name()).collect()
    }

    fn record(&self, event: &DashboardEvent) -> HandlerResult {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}
