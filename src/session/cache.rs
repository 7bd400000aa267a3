//! In-memory request cache for result pages.
//!
//! Keyed by the exact `(query, page)` pair. Uses [`moka`] with a TTL and a
//! capacity bound. Only successful pages are cached; failures are never
//! stored, so revisiting a failed key always issues a fresh attempt.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use moviescout_tmdb::ResultPage;

use super::key::FetchKey;
use crate::config::CacheConfig;

/// Cache of settled result pages.
#[derive(Clone)]
pub struct ResultCache {
    inner: Option<Cache<FetchKey, Arc<ResultPage>>>,
}

impl ResultCache {
    /// Build a cache from config. A TTL of 0 disables caching.
    pub fn new(config: &CacheConfig) -> Self {
        if config.ttl_seconds == 0 {
            return Self::disabled();
        }
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(Duration::from_secs(config.ttl_seconds))
            .build();
        Self { inner: Some(cache) }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Returns `Some(page)` on a fresh hit, `None` on miss or when disabled.
    pub fn get(&self, key: &FetchKey) -> Option<Arc<ResultPage>> {
        self.inner.as_ref().and_then(|c| c.get(key))
    }

    pub fn insert(&self, key: FetchKey, page: Arc<ResultPage>) {
        if let Some(cache) = &self.inner {
            cache.insert(key, page);
        }
    }

    pub fn invalidate(&self, key: &FetchKey) {
        if let Some(cache) = &self.inner {
            cache.invalidate(key);
        }
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
