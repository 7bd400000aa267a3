//! Error types for the moviescout-tmdb crate.
//!
//! A search request has exactly one failure kind, [`FetchError`]. Transport
//! failures, non-2xx statuses and malformed bodies are not told apart by
//! callers; the detail string exists for logs. No bearer token appears in
//! error messages.

/// A single failed search request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("movie search failed: {detail}")]
pub struct FetchError {
    detail: String,
}

impl FetchError {
    /// Create a fetch error with a diagnostic detail.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// Diagnostic detail, suitable for logging.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Errors raised while constructing a gateway.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// Invalid gateway configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Convenience type alias for search results.
pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_fetch_error() {
        let err = FetchError::new("HTTP 401: Invalid API key");
        assert_eq!(
            err.to_string(),
            "movie search failed: HTTP 401: Invalid API key"
        );
        assert_eq!(err.detail(), "HTTP 401: Invalid API key");
    }

    #[test]
    fn display_setup_config() {
        let err = SetupError::Config("timeout_seconds must be greater than 0".into());
        assert_eq!(
            err.to_string(),
            "config error: timeout_seconds must be greater than 0"
        );
    }

    #[test]
    fn display_setup_client() {
        let err = SetupError::Client("tls backend unavailable".into());
        assert_eq!(err.to_string(), "HTTP client error: tls backend unavailable");
    }

    #[test]
    fn errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FetchError>();
        assert_send_sync::<SetupError>();
    }
}
