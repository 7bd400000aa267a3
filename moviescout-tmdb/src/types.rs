//! Core types for movie search requests and responses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Base URL for TMDB poster and backdrop images.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// A user-entered search query.
///
/// The empty query means "no active search". Queries are compared exactly;
/// no case folding or trimming is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Wrap a query string as entered.
    pub fn new(query: impl Into<String>) -> Self {
        Self(query.into())
    }

    /// The empty "no active search" query.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SearchQuery {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SearchQuery {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A 1-based result page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Returns `None` for zero.
    pub fn new(page: u32) -> Option<Self> {
        NonZeroU32::new(page).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// The following page, saturating at `u32::MAX`.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The preceding page, or `None` on the first page.
    pub fn prev(self) -> Option<Self> {
        Self::new(self.get() - 1)
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One movie as returned by the search endpoint.
///
/// Only the fields the client displays are typed; everything else in the
/// response object is carried through untouched in [`MovieSummary::extra`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// TMDB movie identifier.
    pub id: u64,
    #[serde(default)]
    pub title: String,
    /// Relative poster image path, e.g. `/abc.jpg`.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Relative backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: String,
    /// Release date as sent by the API (`YYYY-MM-DD`, may be empty).
    #[serde(default)]
    pub release_date: String,
    /// Average user rating out of 10.
    #[serde(default)]
    pub vote_average: f64,
    /// Fields not interpreted by the client.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MovieSummary {
    /// The release year, if the release date carries one.
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .get(..4)
            .filter(|y| y.chars().all(|c| c.is_ascii_digit()))
    }

    /// Poster URL at grid size.
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|p| image_url(p, ImageSize::Poster))
    }

    /// Backdrop URL at full size.
    pub fn backdrop_url(&self) -> Option<String> {
        self.backdrop_path
            .as_deref()
            .map(|p| image_url(p, ImageSize::Original))
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    /// Movies on this page, in API order. May be empty.
    pub results: Vec<MovieSummary>,
    /// Total number of pages the API reports for the query.
    pub total_pages: u32,
}

impl ResultPage {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Image sizes used by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// `w500`, used for grid posters.
    Poster,
    /// `original`, used for detail backdrops.
    Original,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Poster => "w500",
            Self::Original => "original",
        }
    }
}

/// Build an absolute image URL from a relative TMDB image path.
pub fn image_url(path: &str, size: ImageSize) -> String {
    let path = path.trim_start_matches('/');
    format!("{IMAGE_BASE_URL}/{}/{path}", size.as_str())
}
