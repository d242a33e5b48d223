//! Core engine for SkyPanel
//!
//! Keeps independent weather panels in sync and turns raw forecast telemetry
//! into labels, alert levels and display values.
//!
//! - [`bus`]: synchronous publish/subscribe over a closed event set
//! - [`classify`]: threshold tables for humidity, dew point, visibility, UV, wind
//! - [`ingest`]: forecast documents in, panel state and events out
//! - [`panels`]: highlights and week forecast controllers
//!
//! The crate does no I/O; forecast retrieval and location search come in
//! through [`traits::ForecastSource`] and [`traits::LocationSearch`].
//!
//! ```no_run
//! use skypanel_core::{DashboardConfig, EventBus, HighlightsPanel, IngestionOrchestrator};
//!
//! let config = DashboardConfig::default();
//! let bus = EventBus::shared();
//! let highlights = HighlightsPanel::activate(&bus, config.icons());
//! let mut orchestrator = IngestionOrchestrator::new(bus, &config);
//!
//! # let body = "{}";
//! // body: the forecast source's JSON response
//! if orchestrator.ingest_json(body).is_some() {
//!     let state = highlights.state();
//!     println!("UV: {:?}", state.uv.map(|uv| uv.label));
//! }
//! ```

#![deny(unsafe_code)]

pub mod bus;
pub mod classify;
pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod icons;
pub mod ingest;
pub mod model;
pub mod panels;
pub mod time;
pub mod traits;

// Public API
pub use bus::{BusEvent, DispatchReport, EventBus};
pub use classify::{AlertLevel, CategoryResult, Classified, Classifier, CompassPoint};
pub use config::DashboardConfig;
pub use errors::{ConfigError, HandlerError, HandlerResult, RetrievalError, RetrievalResult};
pub use events::{DashboardEvent, EventKind, LocationChanged, TodayHighlights, WeekForecast};
pub use icons::{ConditionCode, IconRef, IconResolver, MeteoconsIcons};
pub use ingest::{CurrentConditionsState, IngestReport, IngestionOrchestrator};
pub use model::{
    DailyForecastEntry, ForecastDocument, LocationCandidate, LocationSelection, RetrievalRequest,
    UnitSystem,
};
pub use panels::{HighlightsPanel, Panel, WeekForecastPanel};
pub use traits::{ForecastSource, LocationSearch};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
