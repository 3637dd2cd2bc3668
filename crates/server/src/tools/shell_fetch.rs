//! shell_fetch tool implementation.
//!
//! Routes a request through the shell cache lifecycle. Requests the cache
//! declines are performed live without touching the cache. Only `GET` and
//! `HEAD` are accepted, so the tool cannot be used to send writes.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;
use afflink_client::{LifecycleController, ShellCache, ShellRequest};
use afflink_core::Error;

const ALLOWED_METHODS: &[&str] = &["GET", "HEAD"];

fn default_method() -> String {
    "GET".to_string()
}

/// Input parameters for shell_fetch tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ShellFetchParams {
    /// The absolute URL to request.
    pub url: String,

    /// HTTP method, GET or HEAD (default: GET). Only GET requests are cached.
    #[serde(default = "default_method")]
    pub method: String,
}

/// Output structure for shell_fetch tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ShellFetchOutput {
    /// URL of the response.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Where the response came from: cache, network or passthrough.
    pub source: String,
    /// Content-Type header, if any.
    pub content_type: Option<String>,
    /// Body length in bytes.
    pub bytes: usize,
}

/// Implementation of the shell_fetch tool.
pub async fn fetch_impl(
    lifecycle: &LifecycleController<ShellCache>, params: ShellFetchParams,
) -> Result<CallToolResult, McpError> {
    let request = ShellRequest::new(&params.method, &params.url)?;
    if !ALLOWED_METHODS.contains(&request.method.as_str()) {
        return Err(Error::InvalidInput(format!("unsupported method: {}", request.method)).into());
    }

    let (source, response) = lifecycle.respond(&request).await?;

    tracing::debug!("{} {} answered from {}", request.method, request.url, source);

    json_result(&ShellFetchOutput {
        url: response.url.to_string(),
        status: response.status,
        source: source.to_string(),
        content_type: response.content_type().map(str::to_string),
        bytes: response.body.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::decode;
    use crate::tools::testing::{ORIGIN, StubFetcher, state_with};
    use afflink_core::MemoryStorage;
    use std::sync::Arc;

    fn params(url: &str) -> ShellFetchParams {
        ShellFetchParams { url: url.to_string(), method: default_method() }
    }

    #[test]
    fn test_params_default_method() {
        let params: ShellFetchParams = serde_json::from_str(r#"{"url": "http://localhost/"}"#).unwrap();
        assert_eq!(params.method, "GET");
    }

    #[tokio::test]
    async fn test_fetch_before_start_is_passthrough() {
        let fetcher = StubFetcher::new();
        let state = state_with(Arc::new(MemoryStorage::new()), fetcher.clone());

        let result = fetch_impl(&state.lifecycle, params(&format!("{ORIGIN}/index.html")))
            .await
            .unwrap();
        let output: ShellFetchOutput = decode(&result);
        assert_eq!(output.source, "passthrough");
        assert_eq!(output.status, 200);
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_after_start_served_from_cache() {
        let fetcher = StubFetcher::new();
        let state = state_with(Arc::new(MemoryStorage::new()), fetcher.clone());
        state.lifecycle.start().await.unwrap();
        let calls_after_start = fetcher.calls();

        let result = fetch_impl(&state.lifecycle, params(&format!("{ORIGIN}/index.html")))
            .await
            .unwrap();
        let output: ShellFetchOutput = decode(&result);
        assert_eq!(output.source, "cache");
        assert_eq!(output.content_type.as_deref(), Some("text/html"));
        assert_eq!(output.bytes, "<html></html>".len());
        assert_eq!(fetcher.calls(), calls_after_start);
    }

    #[tokio::test]
    async fn test_fetch_foreign_host_is_passthrough() {
        let fetcher = StubFetcher::new();
        let state = state_with(Arc::new(MemoryStorage::new()), fetcher.clone());
        state.lifecycle.start().await.unwrap();

        let result = fetch_impl(&state.lifecycle, params("https://example.com/tracker.js"))
            .await
            .unwrap();
        let output: ShellFetchOutput = decode(&result);
        assert_eq!(output.source, "passthrough");
    }

    #[tokio::test]
    async fn test_fetch_head_is_passthrough() {
        let fetcher = StubFetcher::new();
        let state = state_with(Arc::new(MemoryStorage::new()), fetcher.clone());
        state.lifecycle.start().await.unwrap();

        let params = ShellFetchParams { url: format!("{ORIGIN}/index.html"), method: "head".into() };
        let result = fetch_impl(&state.lifecycle, params).await.unwrap();
        let output: ShellFetchOutput = decode(&result);
        assert_eq!(output.source, "passthrough");
    }

    #[tokio::test]
    async fn test_fetch_write_methods_rejected() {
        let fetcher = StubFetcher::new();
        let state = state_with(Arc::new(MemoryStorage::new()), fetcher.clone());

        for method in ["POST", "put", "DELETE"] {
            let params = ShellFetchParams { url: "https://example.com/api".into(), method: method.into() };
            let err = fetch_impl(&state.lifecycle, params).await.unwrap_err();
            assert_eq!(err.code.0, -32602);
            assert!(err.message.contains("unsupported method"));
        }
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_fetch_invalid_url() {
        let state = state_with(Arc::new(MemoryStorage::new()), StubFetcher::new());
        let err = fetch_impl(&state.lifecycle, params("not a url")).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
        assert!(err.message.contains("INVALID_INPUT"));
    }
}
