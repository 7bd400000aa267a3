//! Gateway configuration with sensible defaults.
//!
//! [`GatewayConfig`] controls where search requests go, which bearer
//! credential they carry, and the transport timeout. The locale and adult
//! content flags are fixed and not configurable.

use crate::error::SetupError;

/// Default TMDB API v3 base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Locale sent with every search request.
pub const LANGUAGE: &str = "en-US";

/// Adult content flag sent with every search request.
pub const INCLUDE_ADULT: bool = false;

/// Configuration for a [`TmdbGateway`](crate::TmdbGateway).
#[derive(Clone)]
pub struct GatewayConfig {
    /// API base URL; requests go to `{base_url}/search/movie`.
    pub base_url: String,
    /// Bearer credential for the `Authorization` header. An empty token is
    /// allowed and simply fails with 401 at request time.
    pub bearer_token: String,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent string. If `None`, `moviescout/<version>` is used.
    pub user_agent: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            bearer_token: String::new(),
            timeout_seconds: 10,
            user_agent: None,
        }
    }
}

// Keeps the token out of debug logs.
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url)
            .field("bearer_token", &"<redacted>")
            .field("timeout_seconds", &self.timeout_seconds)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl GatewayConfig {
    /// Create a config for the default endpoint with the given token.
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self {
            bearer_token: bearer_token.into(),
            ..Default::default()
        }
    }

    /// Set a custom base URL (used for mock servers in tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `base_url` must parse as an absolute `http` or `https` URL
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), SetupError> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| SetupError::Config(format!("invalid base_url {:?}: {e}", self.base_url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SetupError::Config(format!(
                "base_url must use http or https, got {}",
                parsed.scheme()
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(SetupError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Full URL of the movie search endpoint.
    pub fn search_url(&self) -> String {
        format!("{}/search/movie", self.base_url.trim_end_matches('/'))
    }
}
