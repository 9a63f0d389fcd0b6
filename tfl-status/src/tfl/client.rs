//! Transit API HTTP client.
//!
//! Provides async methods for querying the unified transit API.
//! Handles the optional application key and maps HTTP failures to
//! [`TflError`].

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::domain::{Coordinates, Line};

use super::error::TflError;
use super::provider::{RAIL_MODES, TransitApi};
use super::types::{
    ArrivalDto, CrowdingDayDto, CrowdingLiveDto, JourneyResultsDto, LineDto, SearchMatchDto,
    SearchResponse, StopPointDto,
};

/// Default base URL for the transit API.
const DEFAULT_BASE_URL: &str = "https://api.tfl.gov.uk";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable holding the application key.
pub const APP_KEY_VAR: &str = "TFL_APP_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_VAR: &str = "TFL_API_BASE";

/// Configuration for the transit API client.
#[derive(Debug, Clone)]
pub struct TflConfig {
    /// Application key, sent as the `app_key` query parameter.
    /// Anonymous access works but is rate limited more aggressively.
    pub app_key: Option<String>,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TflConfig {
    /// Create a new config with the given application key.
    pub fn new(app_key: Option<String>) -> Self {
        Self {
            app_key: app_key.filter(|k| !k.trim().is_empty()),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Build a config from `TFL_APP_KEY` and `TFL_API_BASE`.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build a config from a variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let config = Self::new(lookup(APP_KEY_VAR));
        match lookup(BASE_URL_VAR).filter(|u| !u.trim().is_empty()) {
            Some(url) => config.with_base_url(url),
            None => config,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TflConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Transit API client.
#[derive(Debug, Clone)]
pub struct TflClient {
    http: reqwest::Client,
    base_url: Url,
    app_key: Option<String>,
}

impl TflClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TflConfig) -> Result<Self, TflError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| TflError::InvalidUrl(format!("{}: {e}", config.base_url)))?;

        if base_url.cannot_be_a_base() {
            return Err(TflError::InvalidUrl(config.base_url));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            app_key: config.app_key,
        })
    }

    /// Build the URL for a path, percent-encoding each segment.
    fn url(&self, segments: &[&str]) -> Result<Url, TflError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TflError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issue a GET request and decode the JSON body.
    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T, TflError> {
        let url = self.url(segments)?;
        debug!(path = url.path(), "GET");

        let mut request = self.http.get(url.clone()).query(query);
        if let Some(key) = &self.app_key {
            request = request.query(&[("app_key", key.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();
        trace!(path = url.path(), status = status.as_u16(), "response");

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(TflError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TflError::RateLimited);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(TflError::NotFound {
                path: url.path().to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TflError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| TflError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl TransitApi for TflClient {
    async fn line_status(&self, lines: &[Line]) -> Result<Vec<LineDto>, TflError> {
        let ids = lines.iter().map(|l| l.slug()).collect::<Vec<_>>().join(",");
        self.get(&["Line", ids.as_str(), "Status"], &[]).await
    }

    async fn search_stop_points(&self, query: &str) -> Result<Vec<SearchMatchDto>, TflError> {
        let response: SearchResponse = self
            .get(&["StopPoint", "Search", query], &[("modes", RAIL_MODES)])
            .await?;
        Ok(response.matches)
    }

    async fn stop_point(&self, id: &str) -> Result<StopPointDto, TflError> {
        self.get(&["StopPoint", id], &[]).await
    }

    async fn arrivals(&self, stop_id: &str) -> Result<Vec<ArrivalDto>, TflError> {
        self.get(&["StopPoint", stop_id, "Arrivals"], &[]).await
    }

    async fn journey_results(
        &self,
        from: Coordinates,
        to: Coordinates,
    ) -> Result<JourneyResultsDto, TflError> {
        let from = from.to_string();
        let to = to.to_string();
        self.get(
            &["Journey", "JourneyResults", from.as_str(), "to", to.as_str()],
            &[],
        )
        .await
    }

    async fn crowding_live(&self, naptan: &str) -> Result<CrowdingLiveDto, TflError> {
        self.get(&["Crowding", naptan, "Live"], &[]).await
    }

    async fn crowding_day(&self, naptan: &str) -> Result<CrowdingDayDto, TflError> {
        self.get(&["Crowding", naptan], &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = TflConfig::new(Some("key".into()))
            .with_base_url("http://localhost:8080")
            .with_timeout(60);

        assert_eq!(config.app_key.as_deref(), Some("key"));
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = TflConfig::default();

        assert_eq!(config.app_key, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn blank_app_key_ignored() {
        assert_eq!(TflConfig::new(Some("  ".into())).app_key, None);
    }

    #[test]
    fn config_from_vars() {
        let config = TflConfig::from_vars(|name| match name {
            APP_KEY_VAR => Some("secret".into()),
            BASE_URL_VAR => Some("http://localhost:9000".into()),
            _ => None,
        });
        assert_eq!(config.app_key.as_deref(), Some("secret"));
        assert_eq!(config.base_url, "http://localhost:9000");

        let config = TflConfig::from_vars(|_| None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn client_creation() {
        assert!(TflClient::new(TflConfig::default()).is_ok());
        assert!(TflClient::new(TflConfig::default().with_base_url("not a url")).is_err());
        assert!(TflClient::new(TflConfig::default().with_base_url("mailto:x@example.com")).is_err());
    }

    #[test]
    fn url_encodes_segments() {
        let client = TflClient::new(TflConfig::default()).unwrap();
        let url = client.url(&["StopPoint", "Search", "oxford circus"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.tfl.gov.uk/StopPoint/Search/oxford%20circus"
        );
    }

    #[test]
    fn url_keeps_base_path() {
        let config = TflConfig::default().with_base_url("http://localhost:8080/proxy/");
        let client = TflClient::new(config).unwrap();
        let url = client.url(&["Line", "victoria,central", "Status"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/proxy/Line/victoria,central/Status"
        );
    }

    #[test]
    fn journey_url_uses_coordinates() {
        let client = TflClient::new(TflConfig::default()).unwrap();
        let from = Coordinates {
            lat: 51.515,
            lon: -0.1415,
        }
        .to_string();
        let to = Coordinates {
            lat: 51.53,
            lon: -0.1238,
        }
        .to_string();
        let url = client
            .url(&["Journey", "JourneyResults", from.as_str(), "to", to.as_str()])
            .unwrap();
        assert_eq!(
            url.path(),
            "/Journey/JourneyResults/51.515,-0.1415/to/51.53,-0.1238"
        );
    }
}
