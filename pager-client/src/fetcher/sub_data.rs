//! Live fetcher for a sub-resource list of one parent record

use std::sync::Arc;

use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use shared::{ApiQuery, ListResponse, SubDataRequest};
use tracing::{debug, warn};

use super::state::{DEFAULT_PAGE_SIZE, StateCell, TableState};
use super::{DataFetcher, FetchOutcome};
use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

/// Field names the request body already uses
const RESERVED_KEYS: [&str; 2] = ["query", "key_path"];

/// Paged table over `POST <url>` scoped to one parent record
///
/// The request body is
///
/// ```json
/// { "query": { ... }, "key_path": "<key_path>", "<id_key>": "<parent_id>" }
/// ```
///
/// and the response must be a [`ListResponse`].
pub struct SubDataApi<H, T> {
    http: Arc<H>,
    url: String,
    id_key: String,
    key_path: String,
    parent_id: String,
    cell: Arc<StateCell<T>>,
}

impl<H, T> SubDataApi<H, T> {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn key_path(&self) -> &str {
        &self.key_path
    }

    pub fn parent_id(&self) -> &str {
        &self.parent_id
    }

    /// Point the table at another sub-resource path; takes effect on the
    /// next fetch
    pub fn set_key_path(&mut self, key_path: impl Into<String>) {
        self.key_path = key_path.into();
    }

    /// Point the table at another parent record; takes effect on the next
    /// fetch
    pub fn set_parent_id(&mut self, parent_id: impl Into<String>) {
        self.parent_id = parent_id.into();
    }
}

impl<H, T> DataFetcher<T> for SubDataApi<H, T>
where
    H: HttpClient + 'static,
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    fn get_data(&self) -> BoxFuture<'static, ClientResult<FetchOutcome>> {
        let (ticket, query) = self.cell.begin();
        debug!(
            url = %self.url,
            ticket,
            start = query.page.start,
            parent = %self.parent_id,
            "Fetching sub data"
        );

        let http = Arc::clone(&self.http);
        let cell = Arc::clone(&self.cell);
        let url = self.url.clone();
        let id_key = self.id_key.clone();
        let key_path = self.key_path.clone();
        let parent_id = self.parent_id.clone();

        Box::pin(async move {
            let body = SubDataRequest::new(&query, &key_path, &id_key, &parent_id);
            let result: ClientResult<ListResponse<T>> = http.post(&url, &body).await;

            match result {
                Ok(resp) => {
                    let total_count = resp.total_count;
                    let applied = cell.settle(ticket, |state| {
                        state.all_page = resp.all_page(state.page_size);
                        state.items = resp.results;
                        state.last_error = None;
                    });
                    if !applied {
                        debug!(url = %url, ticket, "Discarding superseded response");
                        return Ok(FetchOutcome::Superseded);
                    }
                    debug!(url = %url, ticket, total_count, "Sub data applied");
                    Ok(FetchOutcome::Applied)
                }
                Err(e) => {
                    let message = e.to_string();
                    if !cell.settle(ticket, |state| state.last_error = Some(message)) {
                        debug!(url = %url, ticket, error = %e, "Discarding superseded failure");
                        return Ok(FetchOutcome::Superseded);
                    }
                    warn!(url = %url, ticket, error = %e, "Failed to fetch sub data");
                    Err(e)
                }
            }
        })
    }

    fn state(&self) -> TableState<T> {
        self.cell.snapshot()
    }

    fn current_query(&self) -> ApiQuery {
        self.cell.read(TableState::current_query)
    }

    fn set_page(&self, page: u64) {
        self.cell.update(|state| state.this_page = page.max(1));
    }

    fn set_page_size(&self, page_size: u64) {
        self.cell.update(|state| state.page_size = page_size.max(1));
    }

    fn set_search_text(&self, text: Option<String>) {
        self.cell.update(|state| state.search_text = text);
    }
}

/// Builder for [`SubDataApi`]
///
/// `url`, `id_key`, `key_path` and `parent_id` are required.
#[derive(Debug, Clone, Default)]
pub struct SubDataApiBuilder {
    url: Option<String>,
    id_key: Option<String>,
    key_path: Option<String>,
    parent_id: Option<String>,
    page_size: Option<u64>,
}

impl SubDataApiBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Endpoint path, relative to the HTTP client's base URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Body field carrying the parent id (e.g. `"server_id"`)
    pub fn id_key(mut self, id_key: impl Into<String>) -> Self {
        self.id_key = Some(id_key.into());
        self
    }

    /// Sub-resource path inside the parent record
    pub fn key_path(mut self, key_path: impl Into<String>) -> Self {
        self.key_path = Some(key_path.into());
        self
    }

    pub fn parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn page_size(mut self, page_size: u64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Builds the fetcher.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if a required field is missing or empty,
    /// or if `id_key` collides with a body field.
    pub fn build<H, T>(self, http: Arc<H>) -> ClientResult<SubDataApi<H, T>>
    where
        T: Clone,
    {
        let url = required(self.url, "url")?;
        let id_key = required(self.id_key, "id_key")?;
        let key_path = required(self.key_path, "key_path")?;
        let parent_id = required(self.parent_id, "parent_id")?;

        if RESERVED_KEYS.contains(&id_key.as_str()) {
            return Err(ClientError::Config(format!(
                "id_key \"{}\" collides with a request field",
                id_key
            )));
        }

        let state = TableState::with_page_size(self.page_size.unwrap_or(DEFAULT_PAGE_SIZE));

        Ok(SubDataApi {
            http,
            url,
            id_key,
            key_path,
            parent_id,
            cell: Arc::new(StateCell::new(state)),
        })
    }
}

fn required(value: Option<String>, name: &str) -> ClientResult<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ClientError::Config(format!("{} is required", name)))
}
