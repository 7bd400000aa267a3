//! The fetch gateway: one HTTP request per `(query, page)`.
//!
//! [`MovieGateway`] is the seam between the session controller and the
//! network. [`TmdbGateway`] is the real implementation; tests substitute
//! scripted gateways.

use std::future::Future;
use std::sync::Arc;

use reqwest::header::AUTHORIZATION;

use crate::config::{GatewayConfig, INCLUDE_ADULT, LANGUAGE};
use crate::error::{FetchError, SetupError};
use crate::http::build_client;
use crate::types::{PageNumber, ResultPage, SearchQuery};

/// A source of movie search result pages.
///
/// Implementations perform a single attempt per call: no retry, no backoff
/// and no caching. Callers must not pass an empty query.
///
/// All implementations must be `Send + Sync` so a session can hold them
/// behind an [`Arc`] while requests are in flight.
pub trait MovieGateway: Send + Sync {
    /// Fetch one page of results for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on transport failure, non-2xx status, or a
    /// body that does not decode as a [`ResultPage`].
    fn fetch(
        &self,
        query: &SearchQuery,
        page: PageNumber,
    ) -> impl Future<Output = Result<ResultPage, FetchError>> + Send;
}

impl<G: MovieGateway> MovieGateway for Arc<G> {
    fn fetch(
        &self,
        query: &SearchQuery,
        page: PageNumber,
    ) -> impl Future<Output = Result<ResultPage, FetchError>> + Send {
        (**self).fetch(query, page)
    }
}

/// TMDB `/search/movie` client.
pub struct TmdbGateway {
    client: reqwest::Client,
    search_url: String,
    bearer_token: String,
}

impl TmdbGateway {
    /// Build a gateway from a validated config.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if the config is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &GatewayConfig) -> Result<Self, SetupError> {
        config.validate()?;
        let client = build_client(config)?;
        Ok(Self {
            client,
            search_url: config.search_url(),
            bearer_token: config.bearer_token.clone(),
        })
    }

    /// Endpoint this gateway sends requests to.
    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    fn map_http_error(status: reqwest::StatusCode, body: &str) -> FetchError {
        FetchError::new(format!(
            "HTTP {}: {}",
            status.as_u16(),
            extract_status_message(body)
        ))
    }
}

impl MovieGateway for TmdbGateway {
    async fn fetch(&self, query: &SearchQuery, page: PageNumber) -> Result<ResultPage, FetchError> {
        tracing::trace!(query = %query, page = page.get(), "searching movies");

        let include_adult = INCLUDE_ADULT.to_string();
        let page_param = page.get().to_string();
        let response = self
            .client
            .get(&self.search_url)
            .query(&[
                ("query", query.as_str()),
                ("include_adult", include_adult.as_str()),
                ("language", LANGUAGE),
                ("page", page_param.as_str()),
            ])
            .header(AUTHORIZATION, format!("Bearer {}", self.bearer_token))
            .send()
            .await
            .map_err(|e| {
                let err = FetchError::new(format!("request failed: {}", e.without_url()));
                tracing::warn!(page = page.get(), error = %err, "movie search request failed");
                err
            })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            let err = Self::map_http_error(status, &body_text);
            tracing::warn!(status = status.as_u16(), error = %err, "movie search rejected");
            return Err(err);
        }

        let result_page: ResultPage = response.json().await.map_err(|e| {
            let err = FetchError::new(format!("malformed response body: {}", e.without_url()));
            tracing::warn!(error = %err, "movie search returned an unreadable body");
            err
        })?;

        tracing::debug!(
            page = page.get(),
            count = result_page.results.len(),
            total_pages = result_page.total_pages,
            "movie search returned results"
        );
        Ok(result_page)
    }
}

/// Extract `status_message` from a TMDB error body, falling back to the raw body.
fn extract_status_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("status_message")
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}
