//! Wire types for list queries
//!
//! ```json
//! {
//!     "page": { "start": 1, "limit": 15 },
//!     "sort": { "key": "name", "desc": true },
//!     "keyword": "ec2",
//!     "filter": [{ "k": "state", "o": "in", "v": ["RUNNING", "STOPPED"] }],
//!     "only": ["name"]
//! }
//! ```
//!
//! Every optional field is left out of the JSON entirely when unset. The
//! backend treats "no sort" and "ascending sort" differently.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::operator::Operator;
use crate::error::QueryResult;

/// One raw filter predicate as entered in the UI
///
/// `operator` is still the UI symbol (`"="`, `">="`, ...). Use
/// [`try_new`](Self::try_new) where UI input enters; [`QueryBuilder`](super::QueryBuilder)
/// resolves the symbol again when the query is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub key: String,
    pub operator: String,
    pub value: Value,
}

impl SearchQuery {
    pub fn new(key: impl Into<String>, operator: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    /// Like [`new`](Self::new), but rejects symbols outside the operator
    /// alphabet right away
    pub fn try_new(
        key: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> QueryResult<Self> {
        let query = Self::new(key, operator, value);
        query.resolve_operator()?;
        Ok(query)
    }

    /// Normalized operator for the stored symbol
    pub fn resolve_operator(&self) -> QueryResult<Operator> {
        Operator::from_symbol(&self.operator)
    }
}

/// Normalized filter
///
/// For merge operators `v` is always an array of the collected values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub k: String,
    pub o: Operator,
    pub v: Value,
}

impl Filter {
    pub fn new(key: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            k: key.into(),
            o: operator,
            v: value.into(),
        }
    }
}

/// Sort order (at most one per query)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<bool>,
}

impl Sort {
    pub fn new(key: impl Into<String>, desc: Option<bool>) -> Self {
        Self {
            key: key.into(),
            desc,
        }
    }

    pub fn asc(key: impl Into<String>) -> Self {
        Self::new(key, Some(false))
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self::new(key, Some(true))
    }
}

/// Page window, `start` is 1-based and inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub start: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl Page {
    /// Window for the given 1-based page number
    ///
    /// Page 0 is treated as page 1.
    pub fn nth(this_page: u64, page_size: u64) -> Self {
        Self {
            start: this_page
                .saturating_sub(1)
                .saturating_mul(page_size)
                .saturating_add(1),
            limit: Some(page_size),
        }
    }
}

/// Full normalized request query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiQuery {
    pub page: Page,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Vec<Filter>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only: Option<Vec<String>>,
}

impl ApiQuery {
    /// Bare query for one page, nothing else set
    pub fn paged(this_page: u64, page_size: u64) -> Self {
        Self {
            page: Page::nth(this_page, page_size),
            sort: None,
            keyword: None,
            filter: None,
            only: None,
        }
    }

    /// Set the keyword; empty text leaves it unset
    pub fn with_keyword(mut self, keyword: Option<&str>) -> Self {
        self.keyword = keyword.filter(|k| !k.is_empty()).map(str::to_string);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;
    use serde_json::json;

    #[test]
    fn test_page_start_formula() {
        for page_size in [1u64, 7, 15, 100] {
            for this_page in 1u64..=5 {
                let page = Page::nth(this_page, page_size);
                assert_eq!(page.start, (this_page - 1) * page_size + 1);
                assert_eq!(page.limit, Some(page_size));
            }
        }
        assert_eq!(Page::nth(0, 10).start, 1);
    }

    #[test]
    fn test_paged_query_omits_optional_fields() {
        let query = ApiQuery::paged(1, 10);
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({ "page": { "start": 1, "limit": 10 } })
        );
    }

    #[test]
    fn test_empty_keyword_is_omitted() {
        let query = ApiQuery::paged(2, 15).with_keyword(Some(""));
        assert!(query.keyword.is_none());

        let query = ApiQuery::paged(2, 15).with_keyword(Some("web"));
        assert_eq!(query.keyword.as_deref(), Some("web"));
        assert_eq!(query.page.start, 16);
    }

    #[test]
    fn test_sort_without_direction() {
        let sort = Sort::new("created_at", None);
        assert_eq!(serde_json::to_value(&sort).unwrap(), json!({ "key": "created_at" }));
        assert_eq!(
            serde_json::to_value(Sort::desc("name")).unwrap(),
            json!({ "key": "name", "desc": true })
        );
    }

    #[test]
    fn test_search_query_from_ui_json() {
        let raw = json!({ "key": "state", "operator": "!=", "value": "DELETED" });
        let query: SearchQuery = serde_json::from_value(raw).unwrap();
        assert_eq!(query, SearchQuery::new("state", "!=", "DELETED"));
        assert_eq!(query.resolve_operator(), Ok(Operator::NotIn));
    }

    #[test]
    fn test_try_new_checks_operator() {
        let query = SearchQuery::try_new("cpu", ">=", 4).unwrap();
        assert_eq!(query.operator, ">=");
        assert_eq!(query.value, json!(4));

        let err = SearchQuery::try_new("cpu", "=>", 4).unwrap_err();
        assert_eq!(err, QueryError::UnknownOperator("=>".into()));
    }
}
