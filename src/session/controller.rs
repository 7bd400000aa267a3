//! The search session state machine.
//!
//! [`SearchController`] owns the user-visible state triple
//! `(query, page, selection)` and the request bookkeeping behind it. It
//! performs no I/O: operations return [`Effects`] naming the fetch to issue
//! and the notices to emit, and completed fetches come back through
//! [`SearchController::settle`].
//!
//! # Stale results
//!
//! Every issued fetch gets a [`FetchTicket`] carrying its key and a fresh
//! generation. A completion is applied only when its generation is still the
//! in-flight generation for its key and its key is the current key.
//! Everything else is discarded, so an out-of-order response can never
//! overwrite newer state.

use std::collections::HashMap;
use std::sync::Arc;

use moviescout_tmdb::{FetchError, MovieSummary, PageNumber, ResultPage, SearchQuery};

use super::cache::ResultCache;
use super::key::{FetchKey, FetchTicket, Generation};
use super::notify::Notice;
use super::view::{PageView, Pager, ViewState};
use crate::error::{Result, ScoutError};

/// Work requested by a controller operation.
#[derive(Debug, Default, PartialEq)]
#[must_use = "the fetch ticket and notices must be dispatched"]
pub struct Effects {
    /// Fetch to issue, if the current key needs one.
    pub fetch: Option<FetchTicket>,
    /// Notices to hand to the notification sink.
    pub notices: Vec<Notice>,
}

/// Result of handing a completed fetch back to the controller.
#[derive(Debug, PartialEq)]
pub enum Settlement {
    /// The outcome became the current key's result.
    Applied { key: FetchKey, effects: Effects },
    /// The outcome was dropped without touching state.
    Discarded { key: FetchKey, reason: DiscardReason },
}

/// Why a completion was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// The user moved to another query or page before it settled.
    KeyChanged,
    /// A newer request for the same key was issued.
    Superseded,
}

/// Query/pagination/selection state machine.
#[derive(Debug)]
pub struct SearchController {
    query: SearchQuery,
    page: PageNumber,
    selection: Option<MovieSummary>,
    cache: ResultCache,
    in_flight: HashMap<FetchKey, Generation>,
    /// Most recent failure, kept only while its key is current.
    failure: Option<(FetchKey, FetchError)>,
    /// Last settled page on screen, for any key.
    shown: Option<(FetchKey, Arc<ResultPage>)>,
    /// Key the no-results notice was last emitted for, while still `Empty`.
    empty_notified: Option<FetchKey>,
    next_generation: u64,
    view: ViewState,
}

impl SearchController {
    /// A fresh session: empty query, page 1, nothing selected.
    pub fn new(cache: ResultCache) -> Self {
        Self {
            query: SearchQuery::empty(),
            page: PageNumber::FIRST,
            selection: None,
            cache,
            in_flight: HashMap::new(),
            failure: None,
            shown: None,
            empty_notified: None,
            next_generation: 0,
            view: ViewState::Idle,
        }
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn page(&self) -> PageNumber {
        self.page
    }

    pub fn selection(&self) -> Option<&MovieSummary> {
        self.selection.as_ref()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The current fetch key, or `None` while the query is empty.
    pub fn current_key(&self) -> Option<FetchKey> {
        if self.query.is_empty() {
            None
        } else {
            Some(FetchKey::new(self.query.clone(), self.page))
        }
    }

    /// Number of fetches issued and not yet settled.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Pagination controls for the page on screen, when it has more than one page.
    pub fn pager(&self) -> Option<Pager> {
        let total = self.view.total_pages()?;
        Pager::new(self.page, total)
    }

    /// Start a new search. The page always resets to 1.
    ///
    /// An empty query goes `Idle` without fetching.
    pub fn submit_query(&mut self, query: impl Into<SearchQuery>) -> Effects {
        self.query = query.into();
        self.page = PageNumber::FIRST;
        tracing::debug!(empty = self.query.is_empty(), "query submitted");
        self.forget_stale_failure();
        let fetch = self.ensure_fetch(false);
        self.finish(fetch)
    }

    /// Move to another page of the current query.
    ///
    /// The bound `[1, total_pages]` is the caller's to respect.
    pub fn go_to_page(&mut self, page: PageNumber) -> Effects {
        self.page = page;
        tracing::debug!(page = page.get(), "page changed");
        self.forget_stale_failure();
        let fetch = self.ensure_fetch(false);
        self.finish(fetch)
    }

    /// Re-fetch the current key, bypassing the cache.
    ///
    /// Any older in-flight request for the key is superseded.
    pub fn refresh(&mut self) -> Effects {
        let fetch = self.ensure_fetch(true);
        self.finish(fetch)
    }

    /// Select one of the visible movies.
    ///
    /// The stored selection is the visible item with the same id, so a
    /// selection is always an element of a page the user was shown.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::UnknownMovie`] if no visible item has `movie.id`.
    pub fn select_movie(&mut self, movie: &MovieSummary) -> Result<()> {
        let visible = self
            .view
            .items()
            .iter()
            .find(|m| m.id == movie.id)
            .cloned()
            .ok_or(ScoutError::UnknownMovie(movie.id))?;
        tracing::debug!(movie_id = visible.id, "movie selected");
        self.selection = Some(visible);
        Ok(())
    }

    pub fn dismiss_selection(&mut self) {
        self.selection = None;
    }

    /// Hand back the outcome of a fetch issued through `ticket`.
    pub fn settle(
        &mut self,
        ticket: FetchTicket,
        outcome: std::result::Result<ResultPage, FetchError>,
    ) -> Settlement {
        let key = ticket.key().clone();
        match self.in_flight.get(&key) {
            Some(generation) if *generation == ticket.generation() => {
                self.in_flight.remove(&key);
            }
            _ => {
                tracing::debug!(key = %key, "discarding superseded result");
                return Settlement::Discarded {
                    key,
                    reason: DiscardReason::Superseded,
                };
            }
        }

        if self.current_key().as_ref() != Some(&key) {
            tracing::debug!(key = %key, "discarding stale result");
            return Settlement::Discarded {
                key,
                reason: DiscardReason::KeyChanged,
            };
        }

        match outcome {
            Ok(page) => {
                let page = Arc::new(page);
                self.cache.insert(key.clone(), Arc::clone(&page));
                self.failure = None;
                self.shown = Some((key.clone(), page));
            }
            Err(err) => {
                tracing::debug!(key = %key, error = %err, "search failed");
                self.failure = Some((key.clone(), err));
            }
        }

        let effects = self.finish(None);
        Settlement::Applied { key, effects }
    }

    /// Re-derive the view, e.g. after a cache entry expired.
    ///
    /// Refetches the current key when its cached page is gone and nothing is
    /// in flight. A recorded failure is left alone, and so is a disabled
    /// cache. Emits a notice only if the view moved into `Empty` since the
    /// last evaluation.
    pub fn reevaluate(&mut self) -> Effects {
        let retry_blocked = self.failure_for_current().is_some() || !self.cache.is_enabled();
        let fetch = if retry_blocked {
            None
        } else {
            self.ensure_fetch(false)
        };
        self.finish(fetch)
    }

    /// Issue a ticket for the current key unless a fresh cached page or an
    /// in-flight request already covers it.
    fn ensure_fetch(&mut self, force: bool) -> Option<FetchTicket> {
        let key = self.current_key()?;
        if force {
            self.cache.invalidate(&key);
        } else if self.cache.get(&key).is_some() || self.in_flight.contains_key(&key) {
            return None;
        }

        let generation = Generation(self.next_generation);
        self.next_generation += 1;
        self.in_flight.insert(key.clone(), generation);
        self.failure = None;
        tracing::debug!(key = %key, generation = generation.0, "issuing fetch");
        Some(FetchTicket::new(key, generation))
    }

    fn finish(&mut self, fetch: Option<FetchTicket>) -> Effects {
        let next = self.derive();
        if next.kind() != self.view.kind() {
            tracing::debug!(from = ?self.view.kind(), to = ?next.kind(), "view changed");
        }
        self.view = next;

        // Whatever settled page is on screen now is what a later key keeps
        // visible while it loads.
        let settled = match &self.view {
            ViewState::Populated(view) if !view.placeholder => {
                Some((view.key.clone(), Arc::clone(&view.page)))
            }
            ViewState::Empty { key, .. } => self.cache.get(key).map(|page| (key.clone(), page)),
            _ => None,
        };
        if settled.is_some() {
            self.shown = settled;
        }

        let mut notices = Vec::new();
        match &self.view {
            ViewState::Empty { key, .. } => {
                if self.empty_notified.as_ref() != Some(key) {
                    notices.push(Notice::NoResults(key.clone()));
                    self.empty_notified = Some(key.clone());
                }
            }
            _ => self.empty_notified = None,
        }

        Effects { fetch, notices }
    }

    fn failure_for_current(&self) -> Option<&FetchError> {
        let key = self.current_key()?;
        self.failure
            .as_ref()
            .filter(|(failed, _)| *failed == key)
            .map(|(_, err)| err)
    }

    /// Drop a failure recorded for a key the user has moved away from.
    fn forget_stale_failure(&mut self) {
        if self.failure_for_current().is_none() {
            self.failure = None;
        }
    }

    fn derive(&self) -> ViewState {
        let Some(key) = self.current_key() else {
            return ViewState::Idle;
        };

        if let Some(page) = self.cache.get(&key) {
            return settled_view(key, page);
        }

        let shown_for_key = self
            .shown
            .as_ref()
            .filter(|(shown_key, _)| *shown_key == key)
            .map(|(_, page)| Arc::clone(page));

        if self.in_flight.contains_key(&key) {
            if let Some(page) = shown_for_key {
                return settled_view(key, page);
            }
            return match &self.shown {
                Some((shown_key, page)) if !page.is_empty() => ViewState::Populated(PageView {
                    key: shown_key.clone(),
                    page: Arc::clone(page),
                    placeholder: true,
                }),
                _ => ViewState::Loading,
            };
        }

        if let Some(err) = self.failure_for_current() {
            return ViewState::Error(err.clone());
        }

        match shown_for_key {
            Some(page) => settled_view(key, page),
            None => ViewState::Loading,
        }
    }
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new(ResultCache::default())
    }
}

fn settled_view(key: FetchKey, page: Arc<ResultPage>) -> ViewState {
    if page.is_empty() {
        ViewState::Empty {
            key,
            total_pages: page.total_pages,
        }
    } else {
        ViewState::Populated(PageView {
            key,
            page,
            placeholder: false,
        })
    }
}
