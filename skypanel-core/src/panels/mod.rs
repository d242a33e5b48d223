//! Panel Controllers
//!
//! ## Overview
//!
//! Each panel subscribes to the events it renders when activated, keeps only
//! its own derived state, and unsubscribes when deactivated:
//!
//! | Panel                 | Listens to                             | State               |
//! |-----------------------|----------------------------------------|---------------------|
//! | [`HighlightsPanel`]   | `today-highlights`, `location-changed` | [`HighlightsState`] |
//! | [`WeekForecastPanel`] | `week-forecast`, `location-changed`    | [`WeekForecastState`] |
//!
//! The current-conditions panel is the
//! [`IngestionOrchestrator`](crate::ingest::IngestionOrchestrator) itself.
//!
//! ## Lifecycle
//!
//! ```text
//! activate(&bus) ──► subscribed, BASELINE
//!      │
//!      ├── today-highlights / week-forecast ──► state derived from payload
//!      ├── location-changed { changed: true } ──► BASELINE
//!      │
//! deactivate() ──► unsubscribed (dropping the last Arc has the same effect)
//! ```
//!
//! State lives behind a per-panel `Mutex` so panels are `Send + Sync`;
//! readers get a cloned snapshot.

pub mod highlights;
pub mod week;

pub use highlights::{HighlightsPanel, HighlightsState, MetricTile, SunTimes, UvTile};
pub use week::{DayForecastCard, WeekForecastPanel, WeekForecastState};

/// Common surface of every panel controller
pub trait Panel: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Remove all of this panel's subscriptions
    fn deactivate(&self);

    /// True when the panel shows nothing derived
    fn is_baseline(&self) -> bool;
}
