//! Forecast Connectors for SkyPanel
//!
//! ## Overview
//!
//! `skypanel-core` never touches the network. This crate supplies the two
//! collaborators it needs from outside:
//!
//! - **Forecast retrieval**: `{ latitude, longitude, units }` in, a forecast
//!   document (or an error) out
//! - **Location search**: free text in, candidate locations out
//!
//! | Connector                 | Feature | Backing                                  |
//! |---------------------------|---------|------------------------------------------|
//! | [`openweather`]           | `http`  | OpenWeather One Call 3.0 + Geocoding API |
//! | [`replay`]                | always  | A recorded JSON document                 |
//!
//! Every connector implements the blocking core traits
//! ([`ForecastSource`], [`LocationSearch`]); with `std` they also implement
//! [`AsyncForecastSource`], so the retrieval can be awaited and its result
//! fed back into the orchestrator with [`refresh`].
//!
//! ## Retry Logic
//!
//! Exponential backoff on transport errors, 5xx and 429:
//! ```text
//! retry_delay = base * 2^attempt
//! ```
//! Other 4xx responses (bad API key, bad coordinates) fail immediately.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use skypanel_connectors::openweather::{OpenWeatherConfig, OpenWeatherConnector};
//! use skypanel_core::{DashboardConfig, EventBus, IngestionOrchestrator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = OpenWeatherConfig::new("your-api-key")
//!     .timeout_secs(10)
//!     .max_retries(2);
//! let source = OpenWeatherConnector::new(config)?;
//!
//! let mut orchestrator = IngestionOrchestrator::new(EventBus::shared(), &DashboardConfig::default());
//! skypanel_connectors::refresh(&mut orchestrator, &source).await;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "http")]
pub mod openweather;

pub mod replay;

#[cfg(feature = "http")]
pub use openweather::{OpenWeatherConfig, OpenWeatherConnector, OpenWeatherError};
pub use replay::ReplaySource;

pub use skypanel_core::traits::{ForecastSource, LocationSearch};

use skypanel_core::RetrievalError;
use thiserror::Error;

#[cfg(feature = "std")]
use skypanel_core::ingest::{IngestReport, IngestionOrchestrator};
#[cfg(feature = "std")]
use skypanel_core::{ForecastDocument, IconResolver, LocationCandidate, RetrievalRequest, RetrievalResult};

/// Common connector errors
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Protocol error: {0}")]
    ProtocolError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConnectorError> for RetrievalError {
    fn from(err: ConnectorError) -> Self {
        match err {
            ConnectorError::ProtocolError(message) => RetrievalError::Decode(message),
            ConnectorError::Io(err) => RetrievalError::Transport(err.to_string()),
        }
    }
}

/// Async forecast retrieval
///
/// This is the preferred trait when the host has a runtime
#[cfg(feature = "std")]
#[async_trait::async_trait]
pub trait AsyncForecastSource: Send + Sync {
    /// Retrieve the forecast for `request`
    async fn fetch(&self, request: &RetrievalRequest) -> RetrievalResult<ForecastDocument>;

    /// Candidate locations for `query`; empty on no match or error
    async fn search(&self, query: &str) -> Vec<LocationCandidate>;

    /// Get connection statistics
    fn stats(&self) -> ConnectionStats;
}

/// Retrieve for the orchestrator's current location and ingest the result.
///
/// The orchestrator is only touched once the retrieval has resolved, so a
/// panel torn down in the meantime has already left the bus.
#[cfg(feature = "std")]
pub async fn refresh<R, S>(orchestrator: &mut IngestionOrchestrator<R>, source: &S) -> Option<IngestReport>
where
    R: IconResolver,
    S: AsyncForecastSource + ?Sized,
{
    let request = orchestrator.retrieval_request();
    let outcome = source.fetch(&request).await;
    orchestrator.ingest(outcome)
}

/// Connection statistics common to all connectors
#[derive(Debug, Default, Clone)]
pub struct ConnectionStats {
    /// Successful requests
    pub requests_ok: u64,
    /// Requests that failed after all retries
    pub requests_failed: u64,
    /// Retries performed
    pub retries: u64,
    /// Response bytes received
    pub bytes_received: u64,
    /// Last error message
    pub last_error: Option<String>,
}

impl ConnectionStats {
    pub(crate) fn record_success(&mut self, bytes: usize) {
        self.requests_ok += 1;
        self.bytes_received += bytes as u64;
    }

    pub(crate) fn record_failure(&mut self, error: &impl std::fmt::Display) {
        self.requests_failed += 1;
        self.last_error = Some(error.to_string());
    }
}
