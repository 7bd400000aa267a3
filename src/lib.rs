//! moviescout: terminal movie search over the TMDB API.
//!
//! # Architecture
//!
//! - **Fetch gateway** (`moviescout-tmdb`): one HTTP GET per `(query, page)`
//! - **Session controller**: sans-IO state machine over query, page and
//!   selection, with a keyed request cache and stale-result rejection
//! - **Session driver**: polls in-flight fetches and feeds completions back
//! - **Front end**: command parsing and plain-text rendering for the
//!   `moviescout` binary

pub mod command;
pub mod config;
pub mod error;
pub mod render;
pub mod session;

pub use config::ScoutConfig;
pub use error::{Result, ScoutError};
pub use session::{SearchController, SearchSession, ViewState};
