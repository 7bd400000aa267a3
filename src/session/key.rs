//! Fetch keys and tickets.

use moviescout_tmdb::{PageNumber, SearchQuery};
use std::fmt;

/// The `(query, page)` pair identifying one request/response cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchKey {
    query: SearchQuery,
    page: PageNumber,
}

impl FetchKey {
    pub fn new(query: SearchQuery, page: PageNumber) -> Self {
        Self { query, page }
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn page(&self) -> PageNumber {
        self.page
    }
}

impl fmt::Display for FetchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} p{}", self.query.as_str(), self.page)
    }
}

/// Monotonic request generation, unique per issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(pub(crate) u64);

/// A fetch the controller wants performed.
///
/// The ticket must be handed back to
/// [`SearchController::settle`](super::SearchController::settle) with the
/// outcome. Tickets are only created by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    key: FetchKey,
    generation: Generation,
}

impl FetchTicket {
    pub(crate) fn new(key: FetchKey, generation: Generation) -> Self {
        Self { key, generation }
    }

    pub fn key(&self) -> &FetchKey {
        &self.key
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }
}
