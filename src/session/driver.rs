//! Async session driver.
//!
//! [`SearchSession`] connects a [`SearchController`] to a [`MovieGateway`]
//! and a [`NotificationSink`]. Fetches run as futures owned by the session
//! and polled on the caller's task; nothing is spawned. Completions are fed
//! back to the controller in whatever order the network delivers them.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::stream::{FuturesUnordered, StreamExt};
use moviescout_tmdb::{
    FetchError, MovieGateway, MovieSummary, PageNumber, ResultPage, SearchQuery, TmdbGateway,
};

use super::cache::ResultCache;
use super::controller::{Effects, SearchController, Settlement};
use super::key::FetchTicket;
use super::notify::{Notice, NotificationSink};
use super::view::{Pager, ViewState};
use crate::config::ScoutConfig;
use crate::error::Result;

type Completion = (FetchTicket, std::result::Result<ResultPage, FetchError>);

/// A running search session.
pub struct SearchSession<G, N> {
    controller: SearchController,
    gateway: Arc<G>,
    notifier: N,
    pending: FuturesUnordered<BoxFuture<'static, Completion>>,
}

impl<N: NotificationSink> SearchSession<TmdbGateway, N> {
    /// Build a session against TMDB from the loaded config.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Setup`](crate::ScoutError::Setup) if the gateway cannot be built.
    pub fn from_config(config: &ScoutConfig, notifier: N) -> Result<Self> {
        if !config.has_token() {
            tracing::warn!(
                "no TMDB token configured (set {}); searches will fail",
                crate::config::TOKEN_ENV_VAR
            );
        }
        let gateway = TmdbGateway::new(&config.gateway_config())?;
        Ok(Self::new(gateway, notifier, ResultCache::new(&config.cache)))
    }
}

impl<G, N> SearchSession<G, N>
where
    G: MovieGateway + 'static,
    N: NotificationSink,
{
    pub fn new(gateway: G, notifier: N, cache: ResultCache) -> Self {
        Self {
            controller: SearchController::new(cache),
            gateway: Arc::new(gateway),
            notifier,
            pending: FuturesUnordered::new(),
        }
    }

    /// Start a new search on page 1.
    pub fn submit_query(&mut self, query: impl Into<SearchQuery>) -> &ViewState {
        let effects = self.controller.submit_query(query);
        self.dispatch(effects);
        self.controller.view()
    }

    /// Move to another page of the current query.
    pub fn go_to_page(&mut self, page: PageNumber) -> &ViewState {
        let effects = self.controller.go_to_page(page);
        self.dispatch(effects);
        self.controller.view()
    }

    /// Re-fetch the current page, bypassing the cache.
    pub fn refresh(&mut self) -> &ViewState {
        let effects = self.controller.refresh();
        self.dispatch(effects);
        self.controller.view()
    }

    /// Re-derive the view and refetch an expired page.
    pub fn reevaluate(&mut self) -> &ViewState {
        let effects = self.controller.reevaluate();
        self.dispatch(effects);
        self.controller.view()
    }

    /// Select one of the visible movies.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::UnknownMovie`](crate::ScoutError::UnknownMovie) if it is not visible.
    pub fn select_movie(&mut self, movie: &MovieSummary) -> Result<()> {
        self.controller.select_movie(movie)
    }

    pub fn dismiss_selection(&mut self) {
        self.controller.dismiss_selection();
    }

    /// Wait for the next in-flight fetch to complete and settle it.
    ///
    /// Returns `None` immediately when nothing is in flight.
    pub async fn settle_next(&mut self) -> Option<Settlement> {
        let (ticket, outcome) = self.pending.next().await?;
        let settlement = self.controller.settle(ticket, outcome);
        if let Settlement::Applied { effects, .. } = &settlement {
            self.emit(&effects.notices);
        }
        Some(settlement)
    }

    /// Settle every in-flight fetch.
    pub async fn settle_all(&mut self) {
        while self.settle_next().await.is_some() {}
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn view(&self) -> &ViewState {
        self.controller.view()
    }

    pub fn query(&self) -> &SearchQuery {
        self.controller.query()
    }

    pub fn page(&self) -> PageNumber {
        self.controller.page()
    }

    pub fn selection(&self) -> Option<&MovieSummary> {
        self.controller.selection()
    }

    pub fn pager(&self) -> Option<Pager> {
        self.controller.pager()
    }

    pub fn controller(&self) -> &SearchController {
        &self.controller
    }

    fn dispatch(&mut self, effects: Effects) {
        if let Some(ticket) = effects.fetch {
            let gateway = Arc::clone(&self.gateway);
            self.pending.push(Box::pin(async move {
                let outcome = gateway
                    .fetch(ticket.key().query(), ticket.key().page())
                    .await;
                (ticket, outcome)
            }));
        }
        self.emit(&effects.notices);
    }

    fn emit(&self, notices: &[Notice]) {
        for notice in notices {
            self.notifier.notify(notice);
        }
    }
}
