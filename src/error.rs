//! Error types for moviescout.

use moviescout_tmdb::SetupError;

/// Top-level error type for the search client.
///
/// Failed searches are not represented here: a [`moviescout_tmdb::FetchError`]
/// becomes the `Error` view state instead of propagating.
#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    /// Configuration file could not be parsed or is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// The fetch gateway could not be constructed.
    #[error("gateway setup error: {0}")]
    Setup(#[from] SetupError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A movie that is not among the visible results was selected.
    #[error("movie {0} is not among the visible results")]
    UnknownMovie(u64),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ScoutError>;
