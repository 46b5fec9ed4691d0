//! Client configuration

use crate::error::ClientResult;
use crate::http::NetworkHttpClient;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the data API
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | PAGER_BASE_URL | http://localhost:8080 | API 基础地址 |
/// | PAGER_TOKEN | (无) | Bearer token |
/// | PAGER_TIMEOUT_SECS | 30 | 请求超时(秒) |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Bearer token sent with every request
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// 从环境变量加载配置
    ///
    /// 未设置的项使用默认值
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("PAGER_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".into()),
        );
        config.token = std::env::var("PAGER_TOKEN").ok().filter(|t| !t.is_empty());
        config.timeout = std::env::var("PAGER_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        config
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
