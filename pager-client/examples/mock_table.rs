//! Paged table demo
//!
//! Drives a table through a few pages. Without `PAGER_PARENT_ID` it uses
//! the mock source; with it, it talks to `PAGER_BASE_URL`.
//!
//! Run: RUST_LOG=debug cargo run --example mock_table

use std::sync::Arc;
use std::time::Duration;

use pager_client::{
    ClientConfig, DataFetcher, MockSubDataApi, NetworkHttpClient, QueryBuilder, SearchQuery,
    SubDataApi, SubDataApiBuilder,
};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let fetcher = build_fetcher()?;

    for page in 1..=2 {
        fetcher.set_page(page);
        let pending = fetcher.get_data();
        tracing::info!(page, loading = fetcher.state().loading, "Requested page");

        match pending.await {
            Ok(outcome) => {
                let state = fetcher.state();
                tracing::info!(?outcome, items = state.items.len(), all_page = state.all_page, "Page loaded");
            }
            Err(e) => tracing::error!("Fetch failed: {}", e),
        }
    }

    // 展示过滤条件合并
    let query = QueryBuilder::new(1, 15)
        .sort_by("created_at", Some(true))
        .search_queries(vec![
            SearchQuery::try_new("state", "=", "RUNNING")?,
            SearchQuery::try_new("state", "=", "STOPPED")?,
            SearchQuery::try_new("core", ">=", 4)?,
        ])
        .build()?;
    println!("{}", serde_json::to_string_pretty(&query)?);

    Ok(())
}

fn build_fetcher() -> anyhow::Result<Box<dyn DataFetcher<Value>>> {
    let Ok(parent_id) = std::env::var("PAGER_PARENT_ID") else {
        let items: Vec<Value> = (1..=5).map(|i| json!({ "name": format!("vm-{i}") })).collect();
        return Ok(Box::new(
            MockSubDataApi::new(items).with_delay(Duration::from_millis(300)),
        ));
    };

    let config = ClientConfig::from_env();
    tracing::info!(base_url = %config.base_url, "Using live endpoint");
    let http = Arc::new(config.build_http_client()?);

    let api: SubDataApi<NetworkHttpClient, Value> = SubDataApiBuilder::new()
        .url(std::env::var("PAGER_URL").unwrap_or_else(|_| "/inventory/server/get-data".into()))
        .id_key("server_id")
        .key_path(std::env::var("PAGER_KEY_PATH").unwrap_or_else(|_| "data.disks".into()))
        .parent_id(parent_id)
        .build(http)?;
    Ok(Box::new(api))
}
