// pager-client/src/fetcher/mock.rs
// Mock 数据源 - 无需后端即可驱动表格

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use shared::ApiQuery;
use tracing::debug;

use super::state::{StateCell, TableState};
use super::{DataFetcher, FetchOutcome};
use crate::error::ClientResult;

/// 默认模拟延迟
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(1000);

/// Table that serves a fixed item list after a delay
///
/// Same loading contract as [`SubDataApi`](super::SubDataApi); the page
/// count is always 1 and the query is ignored.
pub struct MockSubDataApi<T> {
    items: Arc<Vec<T>>,
    delay: Duration,
    cell: Arc<StateCell<T>>,
}

impl<T: Clone> MockSubDataApi<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(items),
            delay: DEFAULT_MOCK_DELAY,
            cell: Arc::new(StateCell::new(TableState::new())),
        }
    }

    /// 设置模拟延迟 (测试用)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<T> DataFetcher<T> for MockSubDataApi<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn get_data(&self) -> BoxFuture<'static, ClientResult<FetchOutcome>> {
        let (ticket, _) = self.cell.begin();
        self.cell.update(|state| state.all_page = 1);

        let items = Arc::clone(&self.items);
        let cell = Arc::clone(&self.cell);
        let delay = self.delay;

        Box::pin(async move {
            tokio::time::sleep(delay).await;
            let applied = cell.settle(ticket, |state| {
                state.items = items.as_ref().clone();
                state.all_page = 1;
            });
            if !applied {
                debug!(ticket, "Discarding superseded mock data");
                return Ok(FetchOutcome::Superseded);
            }
            Ok(FetchOutcome::Applied)
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

/// 延迟后返回给定数据，用于模拟接口响应
pub async fn mock_response<T>(data: T, delay: Duration) -> T {
    tokio::time::sleep(delay).await;
    data
}
