//! Error Types for the Dashboard Core
//!
//! ## Design Philosophy
//!
//! Very little in the dashboard is allowed to fail loudly. The error taxonomy
//! mirrors what can actually go wrong in a reactive cycle:
//!
//! 1. **Absent metric**: a reading missing from a snapshot. This is *not* an
//!    error at all - it is modelled as `Option::None` and surfaces only as an
//!    "unavailable" display flag.
//!
//! 2. **Retrieval failure**: the forecast source reported an error or sent a
//!    document we could not decode. Logged, and the display freezes at the
//!    last good state. See [`RetrievalError`].
//!
//! 3. **Malformed subscription**: an owner that is already gone, or an event
//!    name we do not know. Silent no-op on the bus, never an error value.
//!
//! 4. **Handler failure**: one panel's callback failed during dispatch. The
//!    bus logs it, counts it and keeps going. See [`HandlerError`].
//!
//! Nothing in this module is ever shown to the end user; the user-visible
//! symptom of any failure is "no update occurred".
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use skypanel_core::RetrievalError;
//!
//! fn describe(err: &RetrievalError) -> &'static str {
//!     match err {
//!         RetrievalError::Transport(_) => "network unreachable",
//!         RetrievalError::Status { code, .. } if *code == 401 => "bad api key",
//!         RetrievalError::Status { .. } => "service refused request",
//!         RetrievalError::Decode(_) => "unexpected document shape",
//!     }
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for retrieval operations
pub type RetrievalResult<T> = Result<T, RetrievalError>;

/// Result type returned by bus handlers
pub type HandlerResult = Result<(), HandlerError>;

/// The forecast source reported an error instead of data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetrievalError {
    /// Network or I/O failure before a response was received
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("Service returned {code}: {message}")]
    Status {
        /// HTTP-style status code
        code: u16,
        /// Body or reason supplied by the service
        message: String,
    },

    /// The response body was not a forecast document
    #[error("Could not decode forecast document: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for RetrievalError {
    fn from(err: serde_json::Error) -> Self {
        RetrievalError::Decode(err.to_string())
    }
}

/// A subscriber's callback failed while handling an event
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Handler failed: {reason}")]
pub struct HandlerError {
    /// What went wrong, for the log line
    pub reason: String,
}

impl HandlerError {
    /// Create a handler error with a reason
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// Dashboard configuration could not be loaded
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The configuration text was not valid JSON for [`crate::DashboardConfig`]
    #[error("Invalid configuration document: {0}")]
    Parse(String),

    /// A value parsed but is outside what the dashboard accepts
    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_from_serde() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        let retrieval: RetrievalError = err.into();
        assert!(matches!(retrieval, RetrievalError::Decode(_)));
    }

    #[test]
    fn display_messages() {
        let err = RetrievalError::Status { code: 401, message: "Invalid API key".into() };
        assert_eq!(err.to_string(), "Service returned 401: Invalid API key");

        let err = HandlerError::new("state lock poisoned");
        assert_eq!(err.to_string(), "Handler failed: state lock poisoned");
    }
}
