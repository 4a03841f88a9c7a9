//! `IsochroneTransport` backed by `reqwest`.
//!
//! The transport resolves the relative [`RequestUrl`] against a configured
//! service root, asks for `application/json`, and maps client errors onto
//! [`TransportError`] variants. It holds no runtime of its own: the future it
//! returns runs on whichever Tokio runtime drives the request.

use std::time::Duration;

use async_trait::async_trait;
use isochrone_core::{IsochroneTransport, RequestUrl, TransportError};
use log::debug;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderValue};
use serde_json::Value;
use thiserror::Error;

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = "otp-isochrone/0.1";

/// Root of a locally running OTP server; `/otp/routers/...` is appended.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Request timeout applied when none is configured.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const JSON_MEDIA_TYPE: &str = "application/json";

/// Error returned when [`HttpIsochroneTransport`] cannot be constructed.
#[derive(Debug, Error)]
pub enum TransportBuildError {
    /// The underlying `reqwest` client rejected the configuration.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Where and how [`HttpIsochroneTransport`] reaches the OTP server.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use isochrone_http::HttpIsochroneTransportConfig;
///
/// let config = HttpIsochroneTransportConfig::new("https://otp.example.org/")
///     .with_timeout(Duration::from_secs(90));
/// assert_eq!(config.base_url, "https://otp.example.org/");
/// ```
#[derive(Debug, Clone)]
pub struct HttpIsochroneTransportConfig {
    /// OTP server root without the `/otp` prefix, e.g.
    /// `"http://localhost:8080"`. A trailing slash is ignored.
    pub base_url: String,
    /// Budget for connecting and for the whole isochrone request.
    pub timeout: Duration,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for HttpIsochroneTransportConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl HttpIsochroneTransportConfig {
    /// Target the OTP server at `base_url` with the default timeout and user
    /// agent.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Replace the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the `User-Agent` header value.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP transport for the OTP isochrone endpoint.
///
/// One GET per call; no retries. Non-2xx statuses, timeouts, connection
/// failures and bodies that are not JSON all surface as [`TransportError`].
#[derive(Debug, Clone)]
pub struct HttpIsochroneTransport {
    client: Client,
    config: HttpIsochroneTransportConfig,
}

impl HttpIsochroneTransport {
    /// Create a transport for the OTP server rooted at `base_url`, with the
    /// default timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportBuildError> {
        Self::with_config(HttpIsochroneTransportConfig::new(base_url))
    }

    /// Create a transport from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_config(config: HttpIsochroneTransportConfig) -> Result<Self, TransportBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(TransportBuildError::HttpClient)?;
        Ok(Self { client, config })
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &HttpIsochroneTransportConfig {
        &self.config
    }

    /// Absolute URL for `url` under the configured OTP server root.
    #[must_use]
    pub fn absolute_url(&self, url: &RequestUrl) -> String {
        url.resolve(&self.config.base_url)
    }

    /// Classify a `reqwest` failure for `target`. A timeout takes precedence
    /// over every other classification.
    fn classify_failure(&self, error: &reqwest::Error, target: &str) -> TransportError {
        let url = target.to_owned();
        let message = error.to_string();
        match error.status() {
            _ if error.is_timeout() => TransportError::Timeout {
                url,
                timeout_secs: self.config.timeout.as_secs(),
            },
            Some(status) => TransportError::Http {
                url,
                status: status.as_u16(),
                message,
            },
            None if error.is_decode() => TransportError::Decode { url, message },
            None => TransportError::Network { url, message },
        }
    }
}

#[async_trait(?Send)]
impl IsochroneTransport for HttpIsochroneTransport {
    async fn get_json(&self, url: &RequestUrl) -> Result<Value, TransportError> {
        let absolute = self.absolute_url(url);
        debug!("GET {absolute}");

        let response = self
            .client
            .get(&absolute)
            .header(ACCEPT, HeaderValue::from_static(JSON_MEDIA_TYPE))
            .send()
            .await
            .map_err(|err| self.classify_failure(&err, &absolute))?
            .error_for_status()
            .map_err(|err| self.classify_failure(&err, &absolute))?;

        response
            .json::<Value>()
            .await
            .map_err(|err| self.classify_failure(&err, &absolute))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isochrone_core::{Cutoffs, QueryParameters};
    use rstest::{fixture, rstest};

    #[fixture]
    fn request_url() -> RequestUrl {
        let params = QueryParameters::new().with_router("abc").with_mode("WALK");
        RequestUrl::build(&params, &Cutoffs::from([300, 600]))
    }

    #[rstest]
    fn absolute_url_joins_base_and_request(request_url: RequestUrl) {
        let transport =
            HttpIsochroneTransport::new("http://otp.example.com").expect("transport should build");

        assert_eq!(
            transport.absolute_url(&request_url),
            "http://otp.example.com/otp/routers/abc/isochrone?mode=WALK&routerId=abc&cutoffSec=300&cutoffSec=600"
        );
    }

    #[rstest]
    fn absolute_url_strips_trailing_slash(request_url: RequestUrl) {
        let transport =
            HttpIsochroneTransport::new("http://otp.example.com/").expect("transport should build");

        let url = transport.absolute_url(&request_url);

        assert!(url.starts_with("http://otp.example.com/otp/routers/"));
        assert!(!url.contains("//otp/"));
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = HttpIsochroneTransportConfig::new("http://example.com")
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }

    #[rstest]
    fn default_config_targets_local_server() {
        let config = HttpIsochroneTransportConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }
}
