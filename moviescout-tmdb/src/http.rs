//! Shared HTTP client for search requests.

use crate::config::GatewayConfig;
use crate::error::SetupError;
use std::time::Duration;

/// User-Agent sent when the config does not override it.
pub fn default_user_agent() -> String {
    format!("moviescout/{}", env!("CARGO_PKG_VERSION"))
}

/// Build a [`reqwest::Client`] configured for TMDB requests.
///
/// The client has:
/// - Timeout from config
/// - Custom User-Agent if configured, else [`default_user_agent`]
/// - gzip decompression
///
/// # Errors
///
/// Returns [`SetupError::Client`] if the client cannot be constructed.
pub fn build_client(config: &GatewayConfig) -> Result<reqwest::Client, SetupError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => default_user_agent(),
    };

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| SetupError::Client(format!("failed to build HTTP client: {e}")))
}
