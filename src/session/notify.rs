//! One-shot user notifications.

use super::key::FetchKey;

/// Message shown when a search settles with no results.
pub const NO_RESULTS_MESSAGE: &str = "No movies found for your request.";

/// A user-facing, non-blocking notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The given key settled with zero results.
    NoResults(FetchKey),
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoResults(_) => NO_RESULTS_MESSAGE,
        }
    }
}

/// Receiver of notices (toast area, status line, log).
pub trait NotificationSink {
    fn notify(&self, notice: &Notice);
}

impl<F: Fn(&Notice)> NotificationSink for F {
    fn notify(&self, notice: &Notice) {
        self(notice)
    }
}

/// Sink that writes notices to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, notice: &Notice) {
        match notice {
            Notice::NoResults(key) => tracing::info!(key = %key, "{}", notice.message()),
        }
    }
}
