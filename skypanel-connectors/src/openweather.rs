//! OpenWeather HTTP Connector
//!
//! Forecasts come from the One Call 3.0 endpoint, location search from the
//! direct geocoding endpoint:
//!
//! ```text
//! GET {base}/data/3.0/onecall?lat=..&lon=..&units=..&exclude=minutely,hourly,alerts&appid=..
//! GET {base}/geo/1.0/direct?q=..&limit=..&appid=..
//! ```
//!
//! Requests are blocking (`ureq`). The async surface runs them on tokio's
//! blocking pool and sleeps between retries with `tokio::time::sleep`.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use log::{debug, warn};
use serde::Deserialize;
use skypanel_core::{
    ForecastDocument, ForecastSource, LocationCandidate, LocationSearch, RetrievalError,
    RetrievalRequest, RetrievalResult,
};
use thiserror::Error;

use crate::{AsyncForecastSource, ConnectionStats};

/// Public OpenWeather API host
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

const ONECALL_PATH: &str = "/data/3.0/onecall";
const GEOCODING_PATH: &str = "/geo/1.0/direct";

/// One Call sections the dashboard never reads
const ONECALL_EXCLUDE: &str = "minutely,hourly,alerts";

/// OpenWeather-specific errors
#[derive(Debug, Error)]
pub enum OpenWeatherError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<OpenWeatherError> for RetrievalError {
    fn from(err: OpenWeatherError) -> Self {
        match err {
            OpenWeatherError::Request(message) => RetrievalError::Transport(message),
            OpenWeatherError::ServerError { status, message } => RetrievalError::Status {
                code: status,
                message,
            },
            OpenWeatherError::Serialization(message) => RetrievalError::Decode(message),
            config @ OpenWeatherError::Config(_) => RetrievalError::Transport(config.to_string()),
        }
    }
}

/// Connector configuration
#[derive(Clone)]
pub struct OpenWeatherConfig {
    /// API host, without a trailing slash
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
    pub max_retries: u32,
    /// First retry delay; doubles on every further attempt
    pub backoff_base: Duration,
    /// Maximum number of geocoding candidates
    pub search_limit: u8,
    pub user_agent: String,
}

impl OpenWeatherConfig {
    /// Configuration for the public API with `api_key`
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            backoff_base: Duration::from_millis(100),
            search_limit: 5,
            user_agent: format!("skypanel/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn backoff_base_ms(mut self, millis: u64) -> Self {
        self.backoff_base = Duration::from_millis(millis);
        self
    }

    pub fn search_limit(mut self, limit: u8) -> Self {
        self.search_limit = limit;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Delay before retry number `attempt` (zero-based)
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.backoff_base.saturating_mul(1u32 << attempt.min(16))
    }
}

impl std::fmt::Debug for OpenWeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("backoff_base", &self.backoff_base)
            .field("search_limit", &self.search_limit)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

type QueryParams = Vec<(&'static str, String)>;

/// Outcome of a single HTTP attempt
enum Attempt {
    Retry(OpenWeatherError),
    Fail(OpenWeatherError),
}

/// OpenWeather connector implementing both collaborator traits
pub struct OpenWeatherConnector {
    config: OpenWeatherConfig,
    agent: ureq::Agent,
    stats: Mutex<ConnectionStats>,
}

impl OpenWeatherConnector {
    /// Create a new connector
    pub fn new(config: OpenWeatherConfig) -> Result<Self, OpenWeatherError> {
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(OpenWeatherError::Config(
                "Base URL must start with http:// or https://".into(),
            ));
        }
        if config.api_key.trim().is_empty() {
            return Err(OpenWeatherError::Config("API key must not be empty".into()));
        }

        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();

        Ok(Self {
            config,
            agent,
            stats: Mutex::new(ConnectionStats::default()),
        })
    }

    pub fn config(&self) -> &OpenWeatherConfig {
        &self.config
    }

    /// Snapshot of the connection counters
    pub fn stats(&self) -> ConnectionStats {
        self.stats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Retrieve a forecast, blocking the calling thread
    pub fn fetch_forecast(&self, request: &RetrievalRequest) -> Result<ForecastDocument, OpenWeatherError> {
        let body = self.get_blocking(self.onecall_url(), self.forecast_query(request))?;
        parse_forecast(&body)
    }

    /// Retrieve a forecast without blocking the runtime
    pub async fn fetch_forecast_async(
        &self,
        request: &RetrievalRequest,
    ) -> Result<ForecastDocument, OpenWeatherError> {
        let body = self
            .get_async(self.onecall_url(), self.forecast_query(request))
            .await?;
        parse_forecast(&body)
    }

    /// Geocode `query`, blocking the calling thread
    pub fn geocode(&self, query: &str) -> Result<Vec<LocationCandidate>, OpenWeatherError> {
        let body = self.get_blocking(self.geocoding_url(), self.geocoding_query(query))?;
        parse_candidates(&body)
    }

    /// Geocode `query` without blocking the runtime
    pub async fn geocode_async(&self, query: &str) -> Result<Vec<LocationCandidate>, OpenWeatherError> {
        let body = self
            .get_async(self.geocoding_url(), self.geocoding_query(query))
            .await?;
        parse_candidates(&body)
    }

    fn onecall_url(&self) -> String {
        format!("{}{}", self.config.base_url, ONECALL_PATH)
    }

    fn geocoding_url(&self) -> String {
        format!("{}{}", self.config.base_url, GEOCODING_PATH)
    }

    fn forecast_query(&self, request: &RetrievalRequest) -> QueryParams {
        vec![
            ("lat", request.latitude.to_string()),
            ("lon", request.longitude.to_string()),
            ("units", request.units.as_str().to_string()),
            ("exclude", ONECALL_EXCLUDE.to_string()),
            ("appid", self.config.api_key.clone()),
        ]
    }

    fn geocoding_query(&self, query: &str) -> QueryParams {
        vec![
            ("q", query.trim().to_string()),
            ("limit", self.config.search_limit.to_string()),
            ("appid", self.config.api_key.clone()),
        ]
    }

    fn get_blocking(&self, url: String, params: QueryParams) -> Result<String, OpenWeatherError> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                std::thread::sleep(self.config.backoff_delay(attempt - 1));
                self.update_stats(|stats| stats.retries += 1);
            }

            match get_once(&self.agent, &url, &params) {
                Ok(body) => return Ok(self.succeeded(body)),
                Err(Attempt::Fail(err)) => return Err(self.failed(err)),
                Err(Attempt::Retry(err)) => {
                    self.retrying(&url, attempt, &err);
                    last_error = Some(err);
                }
            }
        }

        Err(self.failed(exhausted(last_error)))
    }

    async fn get_async(&self, url: String, params: QueryParams) -> Result<String, OpenWeatherError> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tokio::time::sleep(self.config.backoff_delay(attempt - 1)).await;
                self.update_stats(|stats| stats.retries += 1);
            }

            let agent = self.agent.clone();
            let (task_url, task_params) = (url.clone(), params.clone());
            let outcome = tokio::task::spawn_blocking(move || get_once(&agent, &task_url, &task_params))
                .await
                .unwrap_or_else(|err| Err(Attempt::Fail(OpenWeatherError::Request(err.to_string()))));

            match outcome {
                Ok(body) => return Ok(self.succeeded(body)),
                Err(Attempt::Fail(err)) => return Err(self.failed(err)),
                Err(Attempt::Retry(err)) => {
                    self.retrying(&url, attempt, &err);
                    last_error = Some(err);
                }
            }
        }

        Err(self.failed(exhausted(last_error)))
    }

    fn update_stats(&self, update: impl FnOnce(&mut ConnectionStats)) {
        update(&mut self.stats.lock().unwrap_or_else(PoisonError::into_inner));
    }

    fn succeeded(&self, body: String) -> String {
        self.update_stats(|stats| stats.record_success(body.len()));
        body
    }

    fn failed(&self, err: OpenWeatherError) -> OpenWeatherError {
        self.update_stats(|stats| stats.record_failure(&err));
        err
    }

    fn retrying(&self, url: &str, attempt: u32, err: &OpenWeatherError) {
        warn!(
            "OpenWeather request to {} failed (attempt {}/{}): {}",
            url,
            attempt + 1,
            self.config.max_retries + 1,
            err
        );
    }
}

fn exhausted(last_error: Option<OpenWeatherError>) -> OpenWeatherError {
    last_error.unwrap_or_else(|| OpenWeatherError::Request("Max retries exceeded".into()))
}

fn get_once(agent: &ureq::Agent, url: &str, params: &[(&'static str, String)]) -> Result<String, Attempt> {
    let request = params
        .iter()
        .fold(agent.get(url), |request, (key, value)| request.query(key, value));

    match request.call() {
        Ok(resp) => resp
            .into_string()
            .map_err(|e| Attempt::Retry(OpenWeatherError::Request(e.to_string()))),
        Err(ureq::Error::Status(code, resp)) => {
            let body = resp.into_string().unwrap_or_default();
            let err = OpenWeatherError::ServerError {
                status: code,
                message: service_message(&body),
            };
            if code >= 500 || code == 429 {
                Err(Attempt::Retry(err))
            } else {
                Err(Attempt::Fail(err))
            }
        }
        Err(ureq::Error::Transport(e)) => Err(Attempt::Retry(OpenWeatherError::Request(e.to_string()))),
    }
}

/// Error body: `{"cod": 401, "message": "Invalid API key. ..."}`
#[derive(Deserialize)]
struct ServiceError {
    message: String,
}

fn service_message(body: &str) -> String {
    match serde_json::from_str::<ServiceError>(body) {
        Ok(parsed) => parsed.message,
        Err(_) => body.trim().to_string(),
    }
}

fn parse_forecast(body: &str) -> Result<ForecastDocument, OpenWeatherError> {
    serde_json::from_str(body).map_err(|e| OpenWeatherError::Serialization(e.to_string()))
}

/// Decode a geocoding response; candidates keep the service's order
pub fn parse_candidates(body: &str) -> Result<Vec<LocationCandidate>, OpenWeatherError> {
    serde_json::from_str(body).map_err(|e| OpenWeatherError::Serialization(e.to_string()))
}

impl ForecastSource for OpenWeatherConnector {
    fn fetch(&self, request: &RetrievalRequest) -> RetrievalResult<ForecastDocument> {
        Ok(self.fetch_forecast(request)?)
    }
}

impl LocationSearch for OpenWeatherConnector {
    fn search(&self, query: &str) -> Vec<LocationCandidate> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        match self.geocode(query) {
            Ok(candidates) => {
                debug!("Geocoding {:?} returned {} candidate(s)", query, candidates.len());
                candidates
            }
            Err(err) => {
                warn!("Geocoding {:?} failed: {}", query, err);
                Vec::new()
            }
        }
    }
}

#[async_trait::async_trait]
impl AsyncForecastSource for OpenWeatherConnector {
    async fn fetch(&self, request: &RetrievalRequest) -> RetrievalResult<ForecastDocument> {
        Ok(self.fetch_forecast_async(request).await?)
    }

    async fn search(&self, query: &str) -> Vec<LocationCandidate> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        match self.geocode_async(query).await {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!("Geocoding {:?} failed: {}", query, err);
                Vec::new()
            }
        }
    }

    fn stats(&self) -> ConnectionStats {
        OpenWeatherConnector::stats(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skypanel_core::UnitSystem;

    // Nothing listens on the discard port; connections are refused at once
    const UNREACHABLE: &str = "http://127.0.0.1:9";

    fn param<'a>(params: &'a QueryParams, key: &str) -> Option<&'a str> {
        params.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_config_builder() {
        let config = OpenWeatherConfig::new("key")
            .base_url("https://example.com/")
            .timeout_secs(10)
            .max_retries(5)
            .search_limit(3)
            .user_agent("dashboard-test");

        assert_eq!(config.base_url, "https://example.com");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.search_limit, 3);
        assert_eq!(config.user_agent, "dashboard-test");
    }

    #[test]
    fn test_url_validation() {
        assert!(OpenWeatherConnector::new(OpenWeatherConfig::new("key").base_url("ftp://example.com")).is_err());
        assert!(OpenWeatherConnector::new(OpenWeatherConfig::new("  ")).is_err());
        assert!(OpenWeatherConnector::new(OpenWeatherConfig::new("key")).is_ok());
    }

    #[test]
    fn api_key_is_not_logged() {
        let debug = format!("{:?}", OpenWeatherConfig::new("secret-key"));
        assert!(!debug.contains("secret-key"));
    }

    #[test]
    fn backoff_doubles() {
        let config = OpenWeatherConfig::new("key");
        assert_eq!(config.backoff_delay(0), Duration::from_millis(100));
        assert_eq!(config.backoff_delay(1), Duration::from_millis(200));
        assert_eq!(config.backoff_delay(2), Duration::from_millis(400));
    }

    #[test]
    fn forecast_request_shape() {
        let connector = OpenWeatherConnector::new(OpenWeatherConfig::new("key")).unwrap();
        let request = RetrievalRequest { latitude: 10.317, longitude: 123.891, units: UnitSystem::Imperial };
        let params = connector.forecast_query(&request);

        assert_eq!(connector.onecall_url(), "https://api.openweathermap.org/data/3.0/onecall");
        assert_eq!(param(&params, "lat"), Some("10.317"));
        assert_eq!(param(&params, "lon"), Some("123.891"));
        assert_eq!(param(&params, "units"), Some("imperial"));
        assert_eq!(param(&params, "exclude"), Some("minutely,hourly,alerts"));
        assert_eq!(param(&params, "appid"), Some("key"));
    }

    #[test]
    fn geocoding_request_shape() {
        let connector = OpenWeatherConnector::new(OpenWeatherConfig::new("key").search_limit(2)).unwrap();
        let params = connector.geocoding_query("  Davao ");

        assert_eq!(connector.geocoding_url(), "https://api.openweathermap.org/geo/1.0/direct");
        assert_eq!(param(&params, "q"), Some("Davao"));
        assert_eq!(param(&params, "limit"), Some("2"));
    }

    #[test]
    fn geocoding_body_decodes() {
        let body = r#"[
            {"name": "Cebu City", "local_names": {"en": "Cebu City"}, "lat": 10.2931, "lon": 123.9020, "country": "PH", "state": "Central Visayas"},
            {"name": "Cebu", "lat": 10.3, "lon": 123.9, "country": "PH"}
        ]"#;
        let candidates = parse_candidates(body).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].name, "Cebu City");
        assert_eq!(candidates[0].state.as_deref(), Some("Central Visayas"));
        assert_eq!(candidates[1].state, None);
        assert!((candidates[1].longitude - 123.9).abs() < 1e-9);

        assert!(parse_candidates("{}").is_err());
    }

    #[test]
    fn service_messages() {
        assert_eq!(
            service_message(r#"{"cod": 401, "message": "Invalid API key."}"#),
            "Invalid API key."
        );
        assert_eq!(service_message(" Bad Gateway \n"), "Bad Gateway");
    }

    #[test]
    fn errors_map_to_retrieval_errors() {
        let err: RetrievalError = OpenWeatherError::ServerError { status: 401, message: "Invalid API key.".into() }.into();
        assert_eq!(err, RetrievalError::Status { code: 401, message: "Invalid API key.".into() });

        let err: RetrievalError = OpenWeatherError::Serialization("eof".into()).into();
        assert_eq!(err, RetrievalError::Decode("eof".into()));

        let err: RetrievalError = OpenWeatherError::Request("refused".into()).into();
        assert_eq!(err, RetrievalError::Transport("refused".into()));
    }

    #[test]
    fn unreachable_host_fails_after_retries() {
        let config = OpenWeatherConfig::new("key")
            .base_url(UNREACHABLE)
            .timeout_secs(2)
            .max_retries(1)
            .backoff_base_ms(1);
        let connector = OpenWeatherConnector::new(config).unwrap();

        let result = ForecastSource::fetch(&connector, &RetrievalRequest::for_location(&Default::default(), UnitSystem::Metric));
        assert!(matches!(result, Err(RetrievalError::Transport(_))));

        let stats = connector.stats();
        assert_eq!(stats.requests_ok, 0);
        assert_eq!(stats.requests_failed, 1);
        assert_eq!(stats.retries, 1);
        assert!(stats.last_error.is_some());

        assert!(LocationSearch::search(&connector, "Cebu").is_empty());
        assert!(LocationSearch::search(&connector, "   ").is_empty());
    }

    #[tokio::test]
    async fn unreachable_host_fails_async() {
        let config = OpenWeatherConfig::new("key")
            .base_url(UNREACHABLE)
            .timeout_secs(2)
            .max_retries(0);
        let connector = OpenWeatherConnector::new(config).unwrap();

        let request = RetrievalRequest::for_location(&Default::default(), UnitSystem::Metric);
        let result = AsyncForecastSource::fetch(&connector, &request).await;
        assert!(matches!(result, Err(RetrievalError::Transport(_))));
        assert_eq!(AsyncForecastSource::stats(&connector).requests_failed, 1);
    }
}
