//! Session lifecycle tests against a scripted gateway.
//!
//! Each expected request gets a oneshot channel; the test decides when and
//! in which order responses arrive, which makes out-of-order completion
//! deterministic.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use moviescout::session::{
    DiscardReason, Notice, ResultCache, SearchSession, Settlement, ViewKind, ViewState,
};
use moviescout_tmdb::{FetchError, MovieGateway, MovieSummary, PageNumber, ResultPage, SearchQuery};
use tokio::sync::oneshot;

type Reply = Result<ResultPage, FetchError>;

#[derive(Default)]
struct ScriptedGateway {
    calls: Mutex<Vec<(String, u32)>>,
    replies: Mutex<HashMap<(String, u32), oneshot::Receiver<Reply>>>,
}

impl ScriptedGateway {
    /// Register an expected request; the returned sender releases its reply.
    fn expect(&self, query: &str, page: u32) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.replies
            .lock()
            .expect("replies lock")
            .insert((query.to_string(), page), rx);
        tx
    }

    fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl MovieGateway for ScriptedGateway {
    async fn fetch(&self, query: &SearchQuery, page: PageNumber) -> Reply {
        let key = (query.as_str().to_string(), page.get());
        self.calls.lock().expect("calls lock").push(key.clone());
        let reply = self.replies.lock().expect("replies lock").remove(&key);
        match reply {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(FetchError::new("reply dropped"))),
            None => Err(FetchError::new(format!("unscripted request {key:?}"))),
        }
    }
}

fn movie(id: u64) -> MovieSummary {
    MovieSummary {
        id,
        title: format!("Movie {id}"),
        poster_path: None,
        backdrop_path: None,
        overview: String::new(),
        release_date: String::new(),
        vote_average: 0.0,
        extra: serde_json::Map::new(),
    }
}

fn reply(ids: &[u64], total_pages: u32) -> Reply {
    Ok(ResultPage {
        results: ids.iter().copied().map(movie).collect(),
        total_pages,
    })
}

fn page(n: u32) -> PageNumber {
    PageNumber::new(n).expect("nonzero page")
}

fn recording_sink() -> (Rc<RefCell<Vec<Notice>>>, impl Fn(&Notice)) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink_seen = Rc::clone(&seen);
    (seen, move |n: &Notice| sink_seen.borrow_mut().push(n.clone()))
}

fn ids(view: &ViewState) -> Vec<u64> {
    view.items().iter().map(|m| m.id).collect()
}

#[tokio::test]
async fn empty_query_never_calls_gateway() {
    let gateway = Arc::new(ScriptedGateway::default());
    let (_seen, sink) = recording_sink();
    let mut session = SearchSession::new(Arc::clone(&gateway), sink, ResultCache::default());

    let view = session.submit_query("");
    assert_eq!(view, &ViewState::Idle);
    assert!(!session.has_pending());
    assert!(session.settle_next().await.is_none());
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn late_response_for_previous_page_is_ignored() {
    let gateway = Arc::new(ScriptedGateway::default());
    let page_one = gateway.expect("dune", 1);
    let page_two = gateway.expect("dune", 2);
    let (_seen, sink) = recording_sink();
    let mut session = SearchSession::new(Arc::clone(&gateway), sink, ResultCache::default());

    session.submit_query("dune");
    session.go_to_page(page(2));

    page_two.send(reply(&[20, 21], 3)).expect("receiver alive");
    let first = session.settle_next().await.expect("a completion");
    assert!(matches!(first, Settlement::Applied { .. }));
    assert_eq!(ids(session.view()), vec![20, 21]);

    page_one.send(reply(&[10], 3)).expect("receiver alive");
    let second = session.settle_next().await.expect("a completion");
    assert!(matches!(
        second,
        Settlement::Discarded {
            reason: DiscardReason::KeyChanged,
            ..
        }
    ));

    assert_eq!(session.page(), page(2));
    assert_eq!(ids(session.view()), vec![20, 21]);
    let mut calls = gateway.calls();
    calls.sort();
    assert_eq!(calls, vec![("dune".to_string(), 1), ("dune".to_string(), 2)]);
}

#[tokio::test]
async fn response_for_superseded_query_is_ignored() {
    let gateway = Arc::new(ScriptedGateway::default());
    let dune = gateway.expect("dune", 1);
    let alien = gateway.expect("alien", 1);
    let (_seen, sink) = recording_sink();
    let mut session = SearchSession::new(Arc::clone(&gateway), sink, ResultCache::default());

    session.submit_query("dune");
    session.submit_query("alien");

    dune.send(reply(&[1], 1)).expect("receiver alive");
    alien.send(reply(&[2], 1)).expect("receiver alive");
    session.settle_all().await;

    assert_eq!(session.query().as_str(), "alien");
    assert_eq!(ids(session.view()), vec![2]);
}

#[tokio::test]
async fn empty_results_notify_once() {
    let gateway = Arc::new(ScriptedGateway::default());
    let tx = gateway.expect("zzzz", 1);
    let (seen, sink) = recording_sink();
    let mut session = SearchSession::new(Arc::clone(&gateway), sink, ResultCache::default());

    session.submit_query("zzzz");
    tx.send(reply(&[], 0)).expect("receiver alive");
    session.settle_all().await;

    assert_eq!(session.view().kind(), ViewKind::Empty);
    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(seen.borrow()[0].message(), "No movies found for your request.");

    // Same key again: served from cache, state unchanged, no second notice.
    session.submit_query("zzzz");
    assert!(!session.has_pending());
    assert_eq!(seen.borrow().len(), 1);
}

#[tokio::test]
async fn failure_shows_error_and_keeps_selection_and_page() {
    let gateway = Arc::new(ScriptedGateway::default());
    let first = gateway.expect("dune", 1);
    let second = gateway.expect("dune", 2);
    let (_seen, sink) = recording_sink();
    let mut session = SearchSession::new(Arc::clone(&gateway), sink, ResultCache::default());

    session.submit_query("dune");
    first.send(reply(&[1, 2], 3)).expect("receiver alive");
    session.settle_all().await;
    let chosen = session.view().items()[0].clone();
    session.select_movie(&chosen).expect("visible movie");

    session.go_to_page(page(2));
    second
        .send(Err(FetchError::new("HTTP 503: unavailable")))
        .expect("receiver alive");
    session.settle_all().await;

    assert_eq!(session.view().kind(), ViewKind::Error);
    assert_eq!(session.page(), page(2));
    assert_eq!(session.selection().map(|m| m.id), Some(1));
}

#[tokio::test]
async fn error_clears_on_retry() {
    let gateway = Arc::new(ScriptedGateway::default());
    let failing = gateway.expect("dune", 1);
    let (_seen, sink) = recording_sink();
    let mut session = SearchSession::new(Arc::clone(&gateway), sink, ResultCache::default());

    session.submit_query("dune");
    failing
        .send(Err(FetchError::new("HTTP 500")))
        .expect("receiver alive");
    session.settle_all().await;
    assert_eq!(session.view().kind(), ViewKind::Error);

    let retry = gateway.expect("dune", 1);
    session.submit_query("dune");
    assert_eq!(session.view(), &ViewState::Loading);
    retry.send(reply(&[7], 1)).expect("receiver alive");
    session.settle_all().await;

    assert_eq!(ids(session.view()), vec![7]);
    assert_eq!(gateway.calls().len(), 2);
}

#[tokio::test]
async fn selection_survives_new_search() {
    let gateway = Arc::new(ScriptedGateway::default());
    let dune = gateway.expect("dune", 1);
    let _other = gateway.expect("other", 1);
    let (_seen, sink) = recording_sink();
    let mut session = SearchSession::new(Arc::clone(&gateway), sink, ResultCache::default());

    session.submit_query("dune");
    dune.send(reply(&[1], 1)).expect("receiver alive");
    session.settle_all().await;
    let chosen = session.view().items()[0].clone();
    session.select_movie(&chosen).expect("visible movie");

    session.submit_query("other");
    assert_eq!(session.selection(), Some(&chosen));

    session.dismiss_selection();
    assert!(session.selection().is_none());
}

#[tokio::test]
async fn pagination_keeps_previous_page_on_screen() {
    let gateway = Arc::new(ScriptedGateway::default());
    let one = gateway.expect("dune", 1);
    let two = gateway.expect("dune", 2);
    let (_seen, sink) = recording_sink();
    let mut session = SearchSession::new(Arc::clone(&gateway), sink, ResultCache::default());

    session.submit_query("dune");
    one.send(reply(&[1], 3)).expect("receiver alive");
    session.settle_all().await;

    let view = session.go_to_page(page(2));
    assert!(view.is_placeholder());
    assert_eq!(ids(view), vec![1]);

    two.send(reply(&[2], 3)).expect("receiver alive");
    session.settle_all().await;
    assert!(!session.view().is_placeholder());
    assert_eq!(ids(session.view()), vec![2]);
}

#[tokio::test]
async fn commands_stay_within_pager_bounds() {
    use moviescout::command::{Action, Command, apply};

    let gateway = Arc::new(ScriptedGateway::default());
    let first = gateway.expect("dune", 1);
    let (_seen, sink) = recording_sink();
    let mut session = SearchSession::new(Arc::clone(&gateway), sink, ResultCache::default());

    assert_eq!(apply(&mut session, Command::Search("dune".into())), Action::Render);
    first.send(reply(&[1, 2], 2)).expect("receiver alive");
    session.settle_all().await;

    assert!(matches!(apply(&mut session, Command::Prev), Action::Reject(_)));
    assert!(matches!(apply(&mut session, Command::Page(3)), Action::Reject(_)));
    assert!(!session.has_pending());

    assert!(matches!(apply(&mut session, Command::Open(0)), Action::Reject(_)));
    assert_eq!(apply(&mut session, Command::Open(2)), Action::ShowDetail);
    assert_eq!(session.selection().map(|m| m.id), Some(2));

    let _second = gateway.expect("dune", 2);
    assert_eq!(apply(&mut session, Command::Next), Action::Render);
    assert!(session.has_pending());
    assert_eq!(session.page(), page(2));
}

#[tokio::test]
async fn page_revisited_from_cache_stays_on_screen_while_next_loads() {
    let gateway = Arc::new(ScriptedGateway::default());
    let one = gateway.expect("dune", 1);
    let two = gateway.expect("dune", 2);
    let three = gateway.expect("dune", 3);
    let (_seen, sink) = recording_sink();
    let mut session = SearchSession::new(Arc::clone(&gateway), sink, ResultCache::default());

    session.submit_query("dune");
    one.send(reply(&[1], 3)).expect("receiver alive");
    session.settle_all().await;
    session.go_to_page(page(2));
    two.send(reply(&[2], 3)).expect("receiver alive");
    session.settle_all().await;

    session.go_to_page(PageNumber::FIRST);
    assert!(!session.has_pending());
    assert_eq!(ids(session.view()), vec![1]);

    let view = session.go_to_page(page(3));
    assert!(view.is_placeholder());
    assert_eq!(ids(view), vec![1]);

    three.send(reply(&[3], 3)).expect("receiver alive");
    session.settle_all().await;
    assert_eq!(ids(session.view()), vec![3]);
    assert_eq!(gateway.calls().len(), 3);
}
