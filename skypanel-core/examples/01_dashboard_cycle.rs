//! Dashboard Cycle Example
//!
//! One complete reactive cycle: panels subscribe, a forecast document is
//! ingested, the user switches location, the next document arrives.
//!
//! ## What You'll Learn
//!
//! - Wiring panels and the orchestrator to one shared bus
//! - Reading derived panel state after an ingestion
//! - How a location change resets every panel to baseline
//! - What a failed retrieval does (nothing)
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_dashboard_cycle
//! ```

use skypanel_core::{
    DashboardConfig, EventBus, HighlightsPanel, IngestionOrchestrator, LocationCandidate, Panel,
    RetrievalError, WeekForecastPanel,
};

const SNAPSHOT: &str = r#"{
    "timezone_offset": 28800,
    "current": {
        "dt": 1700000000, "sunrise": 1699998780, "sunset": 1700041020,
        "temp": 29.6, "humidity": 74, "dew_point": 24.3, "uvi": 7.4,
        "clouds": 40, "visibility": 10000, "wind_speed": 3.6, "wind_deg": 60,
        "weather": [{ "id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d" }]
    },
    "daily": [
        { "dt": 1699963200, "temp": { "day": 30.5, "night": 25.1 }, "weather": [{ "icon": "10d" }] },
        { "dt": 1700049600, "temp": { "day": 31.0, "night": 24.8 }, "weather": [{ "icon": "01d" }] }
    ]
}"#;

fn main() {
    println!("SkyPanel Dashboard Cycle Example");
    println!("================================\n");

    let config = DashboardConfig::default();
    let bus = EventBus::shared();
    let highlights = HighlightsPanel::activate(&bus, config.icons());
    let week = WeekForecastPanel::activate(&bus, config.icons());
    let mut orchestrator = IngestionOrchestrator::new(bus, &config);

    println!("Location: {}", orchestrator.location_label());
    println!("Panels at baseline: {}\n", highlights.is_baseline() && week.is_baseline());

    // Ingest a snapshot
    let Some(report) = orchestrator.ingest_json(SNAPSHOT) else {
        println!("Snapshot rejected");
        return;
    };
    println!(
        "Ingested: today-highlights -> {} panel(s), week-forecast -> {} panel(s)",
        report.highlights.delivered, report.week.delivered
    );

    let current = orchestrator.state();
    if let (Some(temperature), Some(time)) = (current.temperature, current.time.as_deref()) {
        println!("  Now: {}°, {}", temperature, time);
    }

    let state = highlights.state();
    if let Some(uv) = &state.uv {
        println!("  UV index:   {:>5}  {} ({})", uv.value, uv.label, uv.level.indicator());
    }
    for (name, tile) in [
        ("Humidity", &state.humidity),
        ("Visibility", &state.visibility),
        ("Dew point", &state.dew_point),
    ] {
        match tile {
            Some(tile) => println!("  {:<11} {:>5}  {} ({})", format!("{}:", name), tile.display, tile.label, tile.level.indicator()),
            None => println!("  {:<11} unavailable", format!("{}:", name)),
        }
    }
    if let Some(direction) = state.wind_direction {
        println!("  Wind from:  {:>5}", direction);
    }
    for card in week.state().cards {
        println!("  {} {:>3}° / {:>3}°{}", card.weekday, card.day_temperature, card.night_temperature, if card.is_active { "  <" } else { "" });
    }
    println!();

    // A failed retrieval changes nothing
    let failure = Err(RetrievalError::Transport("connection refused".into()));
    println!("Failed retrieval ingested: {}", orchestrator.ingest(failure).is_some());
    println!("Highlights kept: {}\n", !highlights.is_baseline());

    // Switch location
    let davao = LocationCandidate {
        name: "Davao City".into(),
        country: "PH".into(),
        state: Some("Davao Region".into()),
        latitude: 7.0731,
        longitude: 125.6128,
    };
    let request = orchestrator.change_location(davao);
    println!("Location: {}", orchestrator.location_label());
    println!("Next request: lat={} lon={} units={}", request.latitude, request.longitude, request.units.as_str());
    println!("Panels at baseline: {}", highlights.is_baseline() && week.is_baseline());

    let stats = orchestrator.stats();
    println!("\nStats: {} ingested, {} failed, {} location change(s)", stats.ingested, stats.failed, stats.location_changes);
}
