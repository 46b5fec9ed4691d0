//! List query types and the builders that produce them

mod builder;
mod operator;
mod types;

pub use builder::{QueryBuilder, ValueFormatter, autocomplete_query, get_all_page};
pub use operator::Operator;
pub use types::{ApiQuery, Filter, Page, SearchQuery, Sort};
