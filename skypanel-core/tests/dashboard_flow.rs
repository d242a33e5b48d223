//! Integration tests for the dashboard cycle
//!
//! Snapshot in, every panel's derived state out; location changes; failed
//! retrievals; panels leaving mid-session.

mod common;

use skypanel_core::{
    AlertLevel, CompassPoint, DashboardConfig, DashboardEvent, EventKind, ForecastDocument,
    LocationSelection, Panel, RetrievalError, RetrievalRequest, RetrievalResult, UnitSystem,
};

use common::{davao, Dashboard, Tap, CEBU_SNAPSHOT, DAVAO_SNAPSHOT};

#[test]
fn full_cycle_populates_every_panel() {
    let mut dashboard = Dashboard::new();
    assert!(dashboard.is_baseline());

    let report = dashboard.orchestrator.ingest_json(CEBU_SNAPSHOT).unwrap();
    assert!(report.highlights.is_clean());
    assert!(report.week.is_clean());

    let current = dashboard.orchestrator.state();
    assert_eq!(current.temperature, Some(30));
    assert_eq!(current.weekday.as_deref(), Some("Wednesday"));
    assert_eq!(current.time.as_deref(), Some("6:13 AM"));
    assert_eq!(current.cloudiness, Some(40.0));
    assert_eq!(current.rain_one_hour, Some(0.25));
    assert!(current.primary.as_ref().unwrap().icon.is_some());
    assert!(current.secondary.is_none());

    let highlights = dashboard.highlights.state();
    let uv = highlights.uv.unwrap();
    assert_eq!((uv.value, uv.label, uv.level), (7, "High", AlertLevel::Elevated));
    assert_eq!(uv.icon.as_str(), "/icons/uv-index-7.svg");

    assert_eq!(highlights.wind_speed.as_deref(), Some("3.6"));
    assert_eq!(highlights.wind_direction, Some(CompassPoint::ENE));

    let sun = highlights.sun.unwrap();
    assert_eq!(sun.sunrise, "5:53 AM");
    assert_eq!(sun.sunset, "5:37 PM");

    let humidity = highlights.humidity.unwrap();
    assert_eq!(humidity.display, "74");
    assert_eq!(humidity.label, "Poor high humidity");
    assert_eq!(humidity.alert_icon.as_str(), "/icons/code-red.svg");

    let visibility = highlights.visibility.unwrap();
    assert_eq!((visibility.display.as_str(), visibility.label), ("10.0", "Clear"));

    let dew_point = highlights.dew_point.unwrap();
    assert_eq!((dew_point.display.as_str(), dew_point.label), ("24.3", "Oppressive"));

    let week = dashboard.week.state();
    let weekdays: Vec<&str> = week.cards.iter().map(|card| card.weekday.as_str()).collect();
    assert_eq!(weekdays, vec!["Tue", "Wed", "Thu"]);
    assert_eq!(week.cards[0].day_temperature, 31);
    assert_eq!(week.cards[0].night_temperature, 25);
    assert!(week.cards[0].is_active);
    assert!(week.cards[1..].iter().all(|card| !card.is_active));
}

#[test]
fn location_change_resets_then_repopulates() {
    let mut dashboard = Dashboard::new();
    dashboard.orchestrator.ingest_json(CEBU_SNAPSHOT).unwrap();
    assert!(!dashboard.highlights.is_baseline());

    let request = dashboard.orchestrator.change_location(davao());
    assert!(dashboard.is_baseline());
    assert_eq!(request.latitude, 7.0731);
    assert_eq!(request.longitude, 125.6128);
    assert_eq!(request.units, UnitSystem::Metric);
    assert_eq!(dashboard.orchestrator.location_label(), "Davao City, PH");

    dashboard.orchestrator.ingest_json(DAVAO_SNAPSHOT).unwrap();
    let highlights = dashboard.highlights.state();
    let uv = highlights.uv.unwrap();
    assert_eq!((uv.value, uv.label), (0, "Low"));
    assert_eq!(uv.icon.as_str(), "/icons/uv-index.svg");
    assert_eq!(highlights.wind_direction, Some(CompassPoint::N));
    assert_eq!(highlights.humidity.unwrap().label, "Fair");
    assert_eq!(highlights.dew_point.unwrap().label, "Humid");
    assert_eq!(dashboard.week.state().cards.len(), 1);
    assert_eq!(dashboard.orchestrator.stats().location_changes, 1);
}

#[test]
fn absent_visibility_is_unavailable_not_an_error() {
    let mut dashboard = Dashboard::new();
    let report = dashboard.orchestrator.ingest_json(DAVAO_SNAPSHOT).unwrap();
    assert!(report.highlights.is_clean());

    let highlights = dashboard.highlights.state();
    assert!(highlights.visibility.is_none());
    assert!(highlights.humidity.is_some());
    assert!(highlights.dew_point.is_some());
    assert!(highlights.uv.is_some());
    assert_eq!(dashboard.orchestrator.stats().failed, 0);
}

#[test]
fn retrieval_failure_publishes_nothing() {
    let mut dashboard = Dashboard::new();
    dashboard.orchestrator.ingest_json(CEBU_SNAPSHOT).unwrap();
    let highlights_before = dashboard.highlights.state();
    let week_before = dashboard.week.state();
    let current_before = dashboard.orchestrator.state().clone();

    let tap = Tap::attach(&dashboard.bus);
    let failure = Err(RetrievalError::Status { code: 401, message: "Invalid API key".into() });
    assert!(dashboard.orchestrator.ingest(failure).is_none());
    assert!(dashboard.orchestrator.ingest_json("{ not json").is_none());

    assert!(tap.names().is_empty());
    assert_eq!(dashboard.highlights.state(), highlights_before);
    assert_eq!(dashboard.week.state(), week_before);
    assert_eq!(dashboard.orchestrator.state(), &current_before);
    assert_eq!(dashboard.orchestrator.stats().failed, 2);
}

#[test]
fn events_publish_in_cycle_order() {
    let mut dashboard = Dashboard::new();
    let tap = Tap::attach(&dashboard.bus);

    dashboard.orchestrator.ingest_json(CEBU_SNAPSHOT);
    dashboard.orchestrator.change_location(davao());
    dashboard.orchestrator.ingest_json(DAVAO_SNAPSHOT);

    assert_eq!(
        tap.names(),
        vec![
            "today-highlights",
            "week-forecast",
            "location-changed",
            "today-highlights",
            "week-forecast",
        ]
    );
}

#[test]
fn payloads_use_wire_names() {
    let mut dashboard = Dashboard::new();
    let tap = Tap::attach(&dashboard.bus);
    dashboard.orchestrator.ingest_json(CEBU_SNAPSHOT);

    let events = tap.events.lock().unwrap();
    let highlights = events[0].payload_json().unwrap();
    for field in ["\"uvi\"", "\"windSpeed\"", "\"windDeg\"", "\"sunrise\"", "\"dewPoint\""] {
        assert!(highlights.contains(field), "{field} missing from {highlights}");
    }
    let DashboardEvent::WeekForecast(week) = &events[1] else {
        panic!("expected week forecast, got {:?}", events[1]);
    };
    assert_eq!(week.daily.len(), 3);
}

#[test]
fn deactivated_panel_stops_updating() {
    let mut dashboard = Dashboard::new();
    dashboard.highlights.deactivate();
    assert_eq!(dashboard.bus.subscriber_count(EventKind::TodayHighlights), 0);

    let report = dashboard.orchestrator.ingest_json(CEBU_SNAPSHOT).unwrap();
    assert_eq!(report.highlights.delivered, 0);
    assert_eq!(report.week.delivered, 1);
    assert!(dashboard.highlights.is_baseline());
    assert!(!dashboard.week.is_baseline());
}

#[test]
fn dropped_panel_is_never_invoked() {
    let Dashboard { bus, highlights, week, mut orchestrator } = Dashboard::new();
    drop(week);
    assert_eq!(bus.subscriber_count(EventKind::WeekForecast), 0);

    let report = orchestrator.ingest_json(CEBU_SNAPSHOT).unwrap();
    assert_eq!(report.week.delivered, 0);
    assert!(report.week.is_clean());
    assert_eq!(report.highlights.delivered, 1);
    assert!(!highlights.is_baseline());
}

#[test]
fn refresh_goes_through_the_source() {
    let mut dashboard = Dashboard::new();
    let source = |request: &RetrievalRequest| -> RetrievalResult<ForecastDocument> {
        assert_eq!(request.latitude, LocationSelection::default().latitude);
        ForecastDocument::from_json(CEBU_SNAPSHOT)
    };

    assert!(dashboard.orchestrator.refresh(&source).is_some());
    assert!(!dashboard.is_baseline());
    assert_eq!(dashboard.orchestrator.stats().ingested, 1);
}

#[test]
fn blank_search_never_reaches_the_collaborator() {
    let dashboard = Dashboard::new();
    let search = |query: &str| {
        assert!(!query.trim().is_empty(), "blank query forwarded");
        vec![davao()]
    };

    assert!(dashboard.orchestrator.search_locations(&search, "   ").is_empty());
    let found = dashboard.orchestrator.search_locations(&search, " davao ");
    assert_eq!(found[0].flag_url(), "http://openweathermap.org/images/flags/ph.png");
}

#[test]
fn config_document_drives_the_dashboard() {
    let config = DashboardConfig::from_json(
        r#"{
            "location": { "name": "Davao City", "country": "PH", "latitude": 7.0731, "longitude": 125.6128 },
            "units": "imperial",
            "icon_base": "/static/meteocons/"
        }"#,
    )
    .unwrap();

    let mut dashboard = Dashboard::with_config(config);
    let request = dashboard.orchestrator.retrieval_request();
    assert_eq!(request.units, UnitSystem::Imperial);
    assert_eq!(dashboard.orchestrator.location_label(), "Davao City, PH");

    dashboard.orchestrator.ingest_json(CEBU_SNAPSHOT).unwrap();
    let humidity = dashboard.highlights.state().humidity.unwrap();
    assert_eq!(humidity.alert_icon.as_str(), "/static/meteocons/code-red.svg");
}
