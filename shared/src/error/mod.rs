//! Error types for query construction

use thiserror::Error;

/// Errors raised while normalizing UI input into an [`ApiQuery`](crate::query::ApiQuery)
///
/// These indicate a caller bug (bad operator symbol, ...) and are meant to
/// fail loudly rather than be retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Operator symbol is not part of the UI operator alphabet
    #[error("unknown filter operator: {0:?}")]
    UnknownOperator(String),
}

pub type QueryResult<T> = Result<T, QueryError>;
