//! Derived view state and pagination controls.
//!
//! View state is computed by the controller from its request bookkeeping;
//! nothing here holds logic beyond accessors and the pager window.

use std::sync::Arc;

use moviescout_tmdb::{FetchError, MovieSummary, PageNumber, ResultPage};

use super::key::FetchKey;

/// What the presentation layer should show.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// No active search.
    Idle,
    /// A request is in flight and there is nothing to keep on screen.
    Loading,
    /// The latest request for the current key failed.
    Error(FetchError),
    /// The current key settled with zero results.
    Empty {
        key: FetchKey,
        total_pages: u32,
    },
    /// Results to render.
    Populated(PageView),
}

/// A result page as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    /// Key that produced `page`. Differs from the current key when
    /// `placeholder` is set.
    pub key: FetchKey,
    pub page: Arc<ResultPage>,
    /// Previous results kept visible while the current key is loading.
    pub placeholder: bool,
}

impl PageView {
    pub fn items(&self) -> &[MovieSummary] {
        &self.page.results
    }

    pub fn total_pages(&self) -> u32 {
        self.page.total_pages
    }
}

/// Discriminant of [`ViewState`], handy for logging and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Idle,
    Loading,
    Error,
    Empty,
    Populated,
}

impl ViewState {
    pub fn kind(&self) -> ViewKind {
        match self {
            Self::Idle => ViewKind::Idle,
            Self::Loading => ViewKind::Loading,
            Self::Error(_) => ViewKind::Error,
            Self::Empty { .. } => ViewKind::Empty,
            Self::Populated(_) => ViewKind::Populated,
        }
    }

    /// Visible movies; empty unless populated.
    pub fn items(&self) -> &[MovieSummary] {
        match self {
            Self::Populated(view) => view.items(),
            _ => &[],
        }
    }

    /// Total page count of the page on screen, if any.
    pub fn total_pages(&self) -> Option<u32> {
        match self {
            Self::Empty { total_pages, .. } => Some(*total_pages),
            Self::Populated(view) => Some(view.total_pages()),
            _ => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Populated(view) if view.placeholder)
    }
}

/// Number of consecutive pages shown around the current page.
pub const PAGE_RANGE_DISPLAYED: u32 = 5;

/// Number of pages always shown at each end.
pub const MARGIN_PAGES_DISPLAYED: u32 = 1;

/// Pagination controls for a multi-page result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: PageNumber,
    total: u32,
}

/// One slot of the rendered pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerSlot {
    Page { number: u32, current: bool },
    Gap,
}

impl Pager {
    /// Returns `None` when there is at most one page.
    pub fn new(current: PageNumber, total: u32) -> Option<Self> {
        (total > 1).then_some(Self { current, total })
    }

    pub fn current(&self) -> PageNumber {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Whether `page` is a valid choice.
    pub fn contains(&self, page: u32) -> bool {
        (1..=self.total).contains(&page)
    }

    /// The page `page`, if valid.
    pub fn page(&self, page: u32) -> Option<PageNumber> {
        if self.contains(page) {
            PageNumber::new(page)
        } else {
            None
        }
    }

    pub fn next(&self) -> Option<PageNumber> {
        let next = self.current.next();
        (next != self.current && self.contains(next.get())).then_some(next)
    }

    pub fn prev(&self) -> Option<PageNumber> {
        self.current.prev().filter(|p| self.contains(p.get()))
    }

    /// Pages to display: a window of [`PAGE_RANGE_DISPLAYED`] pages around
    /// the current one, [`MARGIN_PAGES_DISPLAYED`] at each end, and gaps
    /// between non-adjacent runs.
    pub fn slots(&self) -> Vec<PagerSlot> {
        let current = self.current.get().min(self.total);
        let half = PAGE_RANGE_DISPLAYED / 2;
        let mut start = current.saturating_sub(half).max(1);
        let end = (start + PAGE_RANGE_DISPLAYED - 1).min(self.total);
        start = (end + 1).saturating_sub(PAGE_RANGE_DISPLAYED).max(1);

        let visible = |n: u32| {
            n <= MARGIN_PAGES_DISPLAYED
                || n > self.total.saturating_sub(MARGIN_PAGES_DISPLAYED)
                || (start..=end).contains(&n)
        };

        let mut slots = Vec::new();
        let mut last_shown = 0;
        for n in (1..=self.total).filter(|&n| visible(n)) {
            if n > last_shown + 1 {
                slots.push(PagerSlot::Gap);
            }
            slots.push(PagerSlot::Page {
                number: n,
                current: n == current,
            });
            last_shown = n;
        }
        slots
    }
}
