//! # moviescout-tmdb
//!
//! Fetch gateway for the TMDB movie search API.
//!
//! This crate turns a `(query, page)` pair into exactly one
//! `GET /search/movie` request and hands back the decoded result page.
//!
//! ## Design
//!
//! - Stateless: no cache, no retry, no backoff. Caching and stale-result
//!   handling belong to the caller.
//! - Fixed request flags: `include_adult=false`, `language=en-US`
//! - Static bearer credential from [`GatewayConfig`]
//! - Every failure is a single [`FetchError`] kind
//!
//! ## Security
//!
//! - The bearer token never appears in `Debug` output or error messages
//! - Search queries are logged only at trace level

pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod types;

pub use config::GatewayConfig;
pub use error::{FetchError, Result, SetupError};
pub use gateway::{MovieGateway, TmdbGateway};
pub use types::{ImageSize, MovieSummary, PageNumber, ResultPage, SearchQuery};

/// Fetch one page of movie results with a one-off gateway.
///
/// Convenience wrapper that builds a [`TmdbGateway`] from `config` and
/// performs a single request. Long-lived callers should build the gateway
/// once and reuse it.
///
/// # Errors
///
/// Returns [`FetchError`] if the gateway cannot be built or the request fails.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> moviescout_tmdb::Result<()> {
/// use moviescout_tmdb::{GatewayConfig, PageNumber, SearchQuery};
///
/// let config = GatewayConfig::new(std::env::var("TMDB_TOKEN").unwrap_or_default());
/// let page = moviescout_tmdb::fetch_movies(&config, &SearchQuery::new("dune"), PageNumber::FIRST).await?;
/// for movie in &page.results {
///     println!("{} ({})", movie.title, movie.release_date);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn fetch_movies(
    config: &GatewayConfig,
    query: &SearchQuery,
    page: PageNumber,
) -> Result<ResultPage> {
    let gateway = TmdbGateway::new(config).map_err(|e| FetchError::new(e.to_string()))?;
    gateway.fetch(query, page).await
}
