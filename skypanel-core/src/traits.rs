//! Collaborator Traits
//!
//! The core never does I/O. Forecast retrieval and location search are
//! provided from outside through these traits; `skypanel-connectors`
//! implements them over HTTP, tests implement them with closures.
//!
//! ```text
//!  RetrievalRequest ──► ForecastSource ──► Result<ForecastDocument, RetrievalError>
//!  "query"          ──► LocationSearch ──► Vec<LocationCandidate>
//! ```
//!
//! Any `Fn(&RetrievalRequest) -> RetrievalResult<ForecastDocument>` is a
//! `ForecastSource`, and any `Fn(&str) -> Vec<LocationCandidate>` is a
//! `LocationSearch`.

use crate::errors::RetrievalResult;
use crate::model::{ForecastDocument, LocationCandidate, RetrievalRequest};

/// Provides forecast documents for a location
pub trait ForecastSource: Send + Sync {
    /// Retrieve the forecast for `request`
    fn fetch(&self, request: &RetrievalRequest) -> RetrievalResult<ForecastDocument>;
}

/// Resolves free text to candidate locations
pub trait LocationSearch: Send + Sync {
    /// Candidates in relevance order; empty when nothing matched or the
    /// lookup failed
    fn search(&self, query: &str) -> Vec<LocationCandidate>;
}

impl<F> ForecastSource for F
where
    F: Fn(&RetrievalRequest) -> RetrievalResult<ForecastDocument> + Send + Sync,
{
    fn fetch(&self, request: &RetrievalRequest) -> RetrievalResult<ForecastDocument> {
        self(request)
    }
}

impl<F> LocationSearch for F
where
    F: Fn(&str) -> Vec<LocationCandidate> + Send + Sync,
{
    fn search(&self, query: &str) -> Vec<LocationCandidate> {
        self(query)
    }
}
