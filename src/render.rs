//! Plain-text rendering of view state for the terminal client.

use std::fmt::Write as _;

use moviescout_tmdb::MovieSummary;

use crate::session::{Pager, PagerSlot, ViewState};

/// Shown while no search is active.
pub const IDLE_TEXT: &str = "Type a movie title and press Enter to search.";

/// Shown while a first request is in flight.
pub const LOADING_TEXT: &str = "Loading movies, please wait...";

/// Shown when the current request failed.
pub const ERROR_TEXT: &str = "There was an error, please try again...";

/// Render the grid (or status line) plus the pager.
pub fn render_view(view: &ViewState, pager: Option<Pager>) -> String {
    let mut out = String::new();
    match view {
        ViewState::Idle => out.push_str(IDLE_TEXT),
        ViewState::Loading => out.push_str(LOADING_TEXT),
        ViewState::Error(_) => out.push_str(ERROR_TEXT),
        ViewState::Empty { .. } => out.push_str("(no results)"),
        ViewState::Populated(page) => {
            if page.placeholder {
                out.push_str("(updating...)\n");
            }
            for (i, movie) in page.items().iter().enumerate() {
                let _ = writeln!(out, "{:>3}. {}", i + 1, grid_line(movie));
            }
            // Drop the final newline.
            out.pop();
        }
    }

    if let Some(pager) = pager {
        if !matches!(view, ViewState::Loading | ViewState::Error(_)) {
            out.push('\n');
            out.push_str(&render_pager(&pager));
        }
    }
    out
}

fn grid_line(movie: &MovieSummary) -> String {
    let mut line = movie.title.clone();
    if let Some(year) = movie.release_year() {
        let _ = write!(line, " ({year})");
    }
    if movie.vote_average > 0.0 {
        let _ = write!(line, "  * {:.1}", movie.vote_average);
    }
    line
}

/// Render the pager as `<- 1 ... 4 [5] 6 ... 20 ->`.
pub fn render_pager(pager: &Pager) -> String {
    let mut parts = Vec::new();
    if pager.prev().is_some() {
        parts.push("<-".to_string());
    }
    for slot in pager.slots() {
        parts.push(match slot {
            PagerSlot::Page {
                number,
                current: true,
            } => format!("[{number}]"),
            PagerSlot::Page { number, .. } => number.to_string(),
            PagerSlot::Gap => "...".to_string(),
        });
    }
    if pager.next().is_some() {
        parts.push("->".to_string());
    }
    parts.join(" ")
}

/// Render the detail overlay for a selected movie.
pub fn render_detail(movie: &MovieSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", movie.title);
    if let Some(url) = movie.backdrop_url() {
        let _ = writeln!(out, "{url}");
    }
    if !movie.overview.is_empty() {
        let _ = writeln!(out, "{}", movie.overview);
    }
    let release = if movie.release_date.is_empty() {
        "unknown"
    } else {
        movie.release_date.as_str()
    };
    let _ = writeln!(out, "Release date: {release}");
    let _ = write!(out, "Rating: {:.1}/10", movie.vote_average);
    out
}

/// Interactive help text.
pub const HELP_TEXT: &str = "\
<text>       search for movies
:page N      go to page N
:next :prev  next / previous page
:open N      show details for result N
:close       close the details view
:refresh     reload the current page
:help        show this help
:quit        exit";
