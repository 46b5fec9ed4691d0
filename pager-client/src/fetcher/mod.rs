//! Paged data fetchers
//!
//! A [`DataFetcher`] owns one [`TableState`] and refreshes it from some
//! source. Two implementations exist and are picked by the caller:
//!
//! - [`SubDataApi`]: POSTs the current query to a live endpoint
//! - [`MockSubDataApi`]: serves a fixed item list after a delay
//!
//! # Loading contract
//!
//! [`DataFetcher::get_data`] switches the table to loading and clears its
//! items *before* it returns the future, so a UI observes the blank state
//! immediately. The future settles the state when the source answers.
//!
//! # Overlapping fetches
//!
//! Every call takes a ticket. Only the most recently issued call may write
//! its result back; earlier calls resolve to [`FetchOutcome::Superseded`]
//! no matter in which order the responses arrive.

mod mock;
mod state;
mod sub_data;

pub use mock::{DEFAULT_MOCK_DELAY, MockSubDataApi, mock_response};
pub use state::{DEFAULT_PAGE_SIZE, TableState};
pub use sub_data::{SubDataApi, SubDataApiBuilder};

use futures::future::BoxFuture;
use shared::ApiQuery;

use crate::ClientResult;

/// How a finished fetch affected the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Result was written to the table state
    Applied,
    /// A newer fetch was issued meanwhile; the result was dropped
    Superseded,
}

/// A paged, searchable table backed by some data source
pub trait DataFetcher<T>: Send + Sync {
    /// Fetch the current page.
    ///
    /// The Idle -> Loading transition happens during this call; the
    /// returned future performs the request. A failure of the latest fetch
    /// puts the table back to idle, records the message in
    /// [`TableState::last_error`] and is returned as `Err`.
    fn get_data(&self) -> BoxFuture<'static, ClientResult<FetchOutcome>>;

    /// Snapshot of the table state
    fn state(&self) -> TableState<T>;

    /// Query the next fetch would send
    fn current_query(&self) -> ApiQuery;

    /// Select a 1-based page (0 is treated as 1)
    fn set_page(&self, page: u64);

    /// Change the page size (0 is treated as 1)
    fn set_page_size(&self, page_size: u64);

    /// Change the free-text keyword
    fn set_search_text(&self, text: Option<String>);
}
