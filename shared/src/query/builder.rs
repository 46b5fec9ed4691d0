//! Query builder
//!
//! Turns UI paging/sort/search intent into an [`ApiQuery`].
//!
//! # Filter merging
//!
//! Predicates using a merge operator (`contain_in`, `not_contain_in`, `in`,
//! `not_in`) on the same key collapse into one filter whose value is
//! the list of all entered values:
//!
//! ```
//! use shared::query::{QueryBuilder, SearchQuery};
//! use serde_json::json;
//!
//! let query = QueryBuilder::new(1, 15)
//!     .search_queries(vec![
//!         SearchQuery::new("state", "=", "RUNNING"),
//!         SearchQuery::new("state", "=", "STOPPED"),
//!         SearchQuery::new("cpu", ">", 4),
//!     ])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     serde_json::to_value(&query.filter).unwrap(),
//!     json!([
//!         { "k": "cpu", "o": "gt", "v": 4 },
//!         { "k": "state", "o": "in", "v": ["RUNNING", "STOPPED"] },
//!     ])
//! );
//! ```
//!
//! Comparison operators are never merged. Standalone filters come first in
//! entry order, merged groups follow in the order they were opened.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use super::operator::Operator;
use super::types::{ApiQuery, Filter, Page, SearchQuery, Sort};
use crate::error::QueryResult;

/// `(key, value) -> value` hook applied to every search query value
pub type ValueFormatter = Box<dyn Fn(&str, Value) -> Value + Send + Sync>;

/// Builder for the default list query
pub struct QueryBuilder {
    this_page: u64,
    page_size: u64,
    sort: Option<Sort>,
    search_text: Option<String>,
    search_queries: Option<Vec<SearchQuery>>,
    value_formatter: Option<ValueFormatter>,
}

impl fmt::Debug for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("this_page", &self.this_page)
            .field("page_size", &self.page_size)
            .field("sort", &self.sort)
            .field("search_text", &self.search_text)
            .field("search_queries", &self.search_queries)
            .field("value_formatter", &self.value_formatter.is_some())
            .finish()
    }
}

impl QueryBuilder {
    /// Start a query for the given 1-based page
    pub fn new(this_page: u64, page_size: u64) -> Self {
        Self {
            this_page,
            page_size,
            sort: None,
            search_text: None,
            search_queries: None,
            value_formatter: None,
        }
    }

    /// Sort by `key`. An empty key means no sort at all.
    pub fn sort_by(mut self, key: impl Into<String>, desc: Option<bool>) -> Self {
        let key = key.into();
        self.sort = (!key.is_empty()).then(|| Sort::new(key, desc));
        self
    }

    /// Free-text keyword. Empty text is dropped.
    pub fn search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    pub fn search_queries(mut self, queries: Vec<SearchQuery>) -> Self {
        self.search_queries = Some(queries);
        self
    }

    pub fn value_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&str, Value) -> Value + Send + Sync + 'static,
    {
        self.value_formatter = Some(Box::new(formatter));
        self
    }

    /// Build the query.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnknownOperator`](crate::error::QueryError::UnknownOperator)
    /// if any search query uses a symbol outside the operator alphabet.
    pub fn build(self) -> QueryResult<ApiQuery> {
        let mut query = ApiQuery {
            page: Page::nth(self.this_page, self.page_size),
            sort: self.sort,
            keyword: None,
            filter: None,
            only: None,
        }
        .with_keyword(self.search_text.as_deref());

        if let Some(search_queries) = self.search_queries {
            let filters = merge_filters(search_queries, self.value_formatter.as_deref())?;
            if !filters.is_empty() {
                query.filter = Some(filters);
            }
        }

        Ok(query)
    }
}

/// Resolve operators and merge repeated merge-operator predicates
fn merge_filters(
    search_queries: Vec<SearchQuery>,
    formatter: Option<&(dyn Fn(&str, Value) -> Value + Send + Sync)>,
) -> QueryResult<Vec<Filter>> {
    let mut standalone = Vec::new();
    let mut groups: Vec<Filter> = Vec::new();
    let mut group_index: HashMap<String, usize> = HashMap::new();

    for q in search_queries {
        let op = q.resolve_operator()?;
        let value = match formatter {
            Some(format) => format(&q.key, q.value),
            None => q.value,
        };

        if !op.is_mergeable() {
            standalone.push(Filter::new(q.key, op, value));
            continue;
        }

        let group_key = format!("{}:{}", q.key, op);
        match group_index.get(&group_key) {
            Some(&idx) => {
                if let Value::Array(values) = &mut groups[idx].v {
                    values.push(value);
                }
            }
            None => {
                group_index.insert(group_key, groups.len());
                groups.push(Filter::new(q.key, op, Value::Array(vec![value])));
            }
        }
    }

    standalone.extend(groups);
    Ok(standalone)
}

/// Single-field lookup query for type-ahead suggestions
///
/// Always page 1, restricted to `key` via `only`. A present, non-blank
/// `value` adds one `contain` filter; the operator map is bypassed on
/// purpose since suggestions are substring matches.
pub fn autocomplete_query(
    key: impl Into<String>,
    value: Option<Value>,
    item_limit: Option<u64>,
    sort: Option<Sort>,
) -> ApiQuery {
    let key = key.into();
    let filter = value
        .filter(|v| !is_blank(v))
        .map(|v| vec![Filter::new(key.clone(), Operator::Contain, v)]);

    ApiQuery {
        page: Page {
            start: 1,
            limit: item_limit,
        },
        sort: sort.filter(|s| !s.key.is_empty()),
        keyword: None,
        filter,
        only: Some(vec![key]),
    }
}

/// Total page count for a list, never less than 1
///
/// A page size of 0 also yields 1.
pub fn get_all_page(total_count: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 1;
    }
    total_count.div_ceil(page_size).max(1)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
