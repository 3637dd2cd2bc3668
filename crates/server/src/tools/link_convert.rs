//! link_convert tool implementation.
//!
//! Expands short links and rewrites marketplace URLs with the affiliate tag.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;
use afflink_client::LinkService;

/// Input parameters for link_convert tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LinkConvertParams {
    /// The Amazon product URL or amzn.to short link to convert.
    pub url: String,
}

/// Output structure for link_convert tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LinkConvertOutput {
    /// The trimmed input.
    pub input: String,
    /// Expanded destination when the input was a short link.
    pub resolved: Option<String>,
    /// The affiliate-tagged URL.
    pub affiliate_url: String,
}

/// Implementation of the link_convert tool.
pub async fn convert_impl(links: &LinkService, params: LinkConvertParams) -> Result<CallToolResult, McpError> {
    let conversion = links.convert_link(&params.url).await?;

    json_result(&LinkConvertOutput {
        input: conversion.input,
        resolved: conversion.resolved,
        affiliate_url: conversion.affiliate_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use crate::tools::decode;
    use afflink_core::{AppConfig, MemoryStorage};
    use std::sync::Arc;

    fn state() -> AppState {
        AppState::with_storage(&AppConfig::default(), Arc::new(MemoryStorage::new())).unwrap()
    }

    #[tokio::test]
    async fn test_convert_impl_tags_link() {
        let state = state();
        let params = LinkConvertParams { url: "https://www.amazon.in/dp/B000X?tag=other-20".into() };

        let result = convert_impl(&state.links, params).await.unwrap();
        let output: LinkConvertOutput = decode(&result);
        assert_eq!(output.affiliate_url, "https://www.amazon.in/dp/B000X?tag=syrez-21");
        assert!(output.resolved.is_none());
    }

    #[tokio::test]
    async fn test_convert_impl_uses_configured_tag() {
        let config = AppConfig { affiliate_tag: "mine-21".into(), ..Default::default() };
        let state = AppState::with_storage(&config, Arc::new(MemoryStorage::new())).unwrap();
        let params = LinkConvertParams { url: "amzn.in/d/abc123".into() };

        let result = convert_impl(&state.links, params).await.unwrap();
        let output: LinkConvertOutput = decode(&result);
        assert_eq!(output.affiliate_url, "https://amzn.in/d/abc123?tag=mine-21");
    }

    #[tokio::test]
    async fn test_convert_impl_rejects_other_sites() {
        let state = state();
        let params = LinkConvertParams { url: "https://example.com".into() };

        let err = convert_impl(&state.links, params).await.unwrap_err();
        assert!(err.message.contains("NOT_AMAZON_URL"));
    }

    #[tokio::test]
    async fn test_convert_impl_empty() {
        let state = state();
        let err = convert_impl(&state.links, LinkConvertParams { url: "  ".into() }).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
    }
}
