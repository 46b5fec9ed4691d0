//! Pager Client - paged table client for list APIs
//!
//! Keeps the state of a paged, searchable table in sync with a list
//! endpoint, or with a mock source when no backend is around.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod http;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use fetcher::{
    DEFAULT_MOCK_DELAY, DEFAULT_PAGE_SIZE, DataFetcher, FetchOutcome, MockSubDataApi, SubDataApi,
    SubDataApiBuilder, TableState, mock_response,
};
pub use http::{HttpClient, NetworkHttpClient};

// Re-export shared types for convenience
pub use shared::{
    ApiQuery, Filter, ListResponse, Operator, QueryBuilder, QueryError, SearchQuery, Sort,
    autocomplete_query, get_all_page,
};
