//! Query/pagination/result lifecycle.
//!
//! - [`SearchController`]: sans-IO state machine over query, page and selection
//! - [`SearchSession`]: drives a controller against a gateway
//! - [`ResultCache`]: keyed cache of settled pages
//! - [`ViewState`]: what the presentation layer renders

pub mod cache;
pub mod controller;
pub mod driver;
pub mod key;
pub mod notify;
pub mod view;

pub use cache::ResultCache;
pub use controller::{DiscardReason, Effects, SearchController, Settlement};
pub use driver::SearchSession;
pub use key::{FetchKey, FetchTicket, Generation};
pub use notify::{LogNotifier, Notice, NotificationSink, NO_RESULTS_MESSAGE};
pub use view::{PageView, Pager, PagerSlot, ViewKind, ViewState};
