//! Shared types for the pager workspace
//!
//! Wire types of the list API and the pure functions that build them:
//! operator mapping, filter merging, page arithmetic.

pub mod error;
pub mod query;
pub mod request;
pub mod response;

// Re-exports
pub use error::{QueryError, QueryResult};
pub use query::{
    ApiQuery, Filter, Operator, Page, QueryBuilder, SearchQuery, Sort, autocomplete_query,
    get_all_page,
};
pub use request::SubDataRequest;
pub use response::ListResponse;
