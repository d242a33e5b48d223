//! Replay Connector
//!
//! Serves a recorded forecast document (or a recorded failure) for every
//! request, and answers location searches from a fixed candidate list.
//! Used for offline demos, kiosk mode without an API key, and tests.

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use log::debug;
use skypanel_core::{
    ForecastDocument, ForecastSource, LocationCandidate, LocationSearch, RetrievalError,
    RetrievalRequest, RetrievalResult,
};

use crate::{ConnectionStats, ConnectorError};

/// Connector replaying a fixed outcome
pub struct ReplaySource {
    outcome: RetrievalResult<ForecastDocument>,
    candidates: Vec<LocationCandidate>,
    stats: Mutex<ConnectionStats>,
}

impl ReplaySource {
    /// Replay `document` for every request
    pub fn new(document: ForecastDocument) -> Self {
        Self::with_outcome(Ok(document))
    }

    /// Replay a failure for every request
    pub fn failing(error: RetrievalError) -> Self {
        Self::with_outcome(Err(error))
    }

    /// Replay a recorded One Call response body
    pub fn from_json(text: &str) -> Result<Self, ConnectorError> {
        ForecastDocument::from_json(text)
            .map(Self::new)
            .map_err(|e| ConnectorError::ProtocolError(e.to_string()))
    }

    /// Replay a recorded response stored at `path`
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConnectorError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        debug!("Loaded replay document from {}", path.as_ref().display());
        Self::from_json(&text)
    }

    /// Candidates offered to location searches
    pub fn with_candidates(mut self, candidates: Vec<LocationCandidate>) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn stats(&self) -> ConnectionStats {
        self.stats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn with_outcome(outcome: RetrievalResult<ForecastDocument>) -> Self {
        Self {
            outcome,
            candidates: Vec::new(),
            stats: Mutex::new(ConnectionStats::default()),
        }
    }

    fn replay(&self, request: &RetrievalRequest) -> RetrievalResult<ForecastDocument> {
        debug!("Replaying forecast for ({}, {})", request.latitude, request.longitude);
        let mut stats = self.stats.lock().unwrap_or_else(PoisonError::into_inner);
        match &self.outcome {
            Ok(_) => stats.record_success(0),
            Err(err) => stats.record_failure(err),
        }
        self.outcome.clone()
    }

    fn matching(&self, query: &str) -> Vec<LocationCandidate> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.candidates
            .iter()
            .filter(|candidate| candidate.name.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }
}

impl ForecastSource for ReplaySource {
    fn fetch(&self, request: &RetrievalRequest) -> RetrievalResult<ForecastDocument> {
        self.replay(request)
    }
}

impl LocationSearch for ReplaySource {
    fn search(&self, query: &str) -> Vec<LocationCandidate> {
        self.matching(query)
    }
}

#[cfg(feature = "std")]
#[async_trait::async_trait]
impl crate::AsyncForecastSource for ReplaySource {
    async fn fetch(&self, request: &RetrievalRequest) -> RetrievalResult<ForecastDocument> {
        self.replay(request)
    }

    async fn search(&self, query: &str) -> Vec<LocationCandidate> {
        self.matching(query)
    }

    fn stats(&self) -> ConnectionStats {
        ReplaySource::stats(self)
    }
}
