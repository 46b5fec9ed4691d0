//! Table state and its sequenced owner

use std::sync::RwLock;

use shared::ApiQuery;

/// Page size a table starts with
pub const DEFAULT_PAGE_SIZE: u64 = 15;

/// UI-facing state of one paged table
///
/// `all_page` is derived from the last successful response and is never
/// less than 1.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState<T> {
    pub items: Vec<T>,
    pub page_size: u64,
    pub all_page: u64,
    pub this_page: u64,
    pub search_text: Option<String>,
    pub loading: bool,
    /// Message of the last failed fetch, cleared when a new fetch starts
    pub last_error: Option<String>,
}

impl<T> Default for TableState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            all_page: 1,
            this_page: 1,
            search_text: None,
            loading: false,
            last_error: None,
        }
    }
}

impl<T> TableState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: u64) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }

    /// Query for the current page, keyword and page size
    pub fn current_query(&self) -> ApiQuery {
        ApiQuery::paged(self.this_page, self.page_size).with_keyword(self.search_text.as_deref())
    }
}

struct Inner<T> {
    state: TableState<T>,
    /// Ticket of the most recently issued fetch
    latest: u64,
}

/// Owner of a [`TableState`] shared between a fetcher and its in-flight futures
///
/// Every fetch takes a ticket in [`begin`](Self::begin); only the holder of
/// the latest ticket may [`settle`](Self::settle) the state.
pub(crate) struct StateCell<T> {
    inner: RwLock<Inner<T>>,
}

impl<T: Clone> StateCell<T> {
    pub(crate) fn new(state: TableState<T>) -> Self {
        Self {
            inner: RwLock::new(Inner { state, latest: 0 }),
        }
    }

    pub(crate) fn snapshot(&self) -> TableState<T> {
        self.read(TableState::clone)
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&TableState<T>) -> R) -> R {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        f(&inner.state)
    }

    pub(crate) fn update(&self, f: impl FnOnce(&mut TableState<T>)) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        f(&mut inner.state);
    }

    /// Idle -> Loading. Clears items, takes a new ticket and returns it
    /// together with the query to send.
    pub(crate) fn begin(&self) -> (u64, ApiQuery) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.latest += 1;
        inner.state.loading = true;
        inner.state.items.clear();
        inner.state.last_error = None;
        (inner.latest, inner.state.current_query())
    }

    /// Loading -> Idle, only for the latest ticket. Returns `false` and
    /// leaves the state untouched for a stale ticket.
    pub(crate) fn settle(&self, ticket: u64, f: impl FnOnce(&mut TableState<T>)) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if inner.latest != ticket {
            return false;
        }
        f(&mut inner.state);
        inner.state.loading = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_initial_state() {
        let state = TableState::<String>::new();
        assert_eq!(state.page_size, 15);
        assert_eq!(state.this_page, 1);
        assert_eq!(state.all_page, 1);
        assert!(state.items.is_empty());
        assert!(!state.loading);
        assert_eq!(TableState::<String>::with_page_size(0).page_size, 1);
    }

    #[test]
    fn test_current_query_tracks_state() {
        let mut state = TableState::<String>::new();
        assert_eq!(
            serde_json::to_value(state.current_query()).unwrap(),
            json!({ "page": { "start": 1, "limit": 15 } })
        );

        state.this_page = 3;
        state.page_size = 10;
        state.search_text = Some("nginx".into());
        assert_eq!(
            serde_json::to_value(state.current_query()).unwrap(),
            json!({ "page": { "start": 21, "limit": 10 }, "keyword": "nginx" })
        );

        state.search_text = Some(String::new());
        assert!(state.current_query().keyword.is_none());
    }

    #[test]
    fn test_begin_and_settle() {
        let cell = StateCell::new(TableState {
            items: vec!["old".to_string()],
            ..TableState::default()
        });

        let (first, _) = cell.begin();
        let snapshot = cell.snapshot();
        assert!(snapshot.loading);
        assert!(snapshot.items.is_empty());

        let (second, query) = cell.begin();
        assert!(second > first);
        assert_eq!(query.page.start, 1);

        assert!(!cell.settle(first, |s| s.items = vec!["stale".into()]));
        assert!(cell.snapshot().loading);

        assert!(cell.settle(second, |s| s.items = vec!["fresh".into()]));
        let snapshot = cell.snapshot();
        assert!(!snapshot.loading);
        assert_eq!(snapshot.items, vec!["fresh".to_string()]);
    }
}
