//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::state::AppState;
use crate::tools::{
    LinkConvertParams, ShellFetchParams, link_convert::convert_impl, shell_fetch::fetch_impl,
    shell_generations::generations_impl,
};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for afflink.
#[derive(Clone)]
pub struct AfflinkServer {
    state: Arc<AppState>,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl AfflinkServer {
    /// Create a new server handler.
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state, tool_router: Self::tool_router() }
    }

    /// Convert an Amazon link into an affiliate link.
    ///
    /// Short links are expanded with a single HEAD probe first.
    #[tool(
        description = "Convert an Amazon product URL or amzn.to short link into an affiliate-tagged URL. Any existing tag is replaced."
    )]
    async fn link_convert(&self, params: Parameters<LinkConvertParams>) -> Result<CallToolResult, McpError> {
        convert_impl(&self.state.links, params.0).await
    }

    /// Fetch a URL through the offline shell cache.
    #[tool(
        description = "Fetch a URL through the offline shell cache with GET or HEAD. Reports whether the response came from the cache, the network, or bypassed the cache."
    )]
    async fn shell_fetch(&self, params: Parameters<ShellFetchParams>) -> Result<CallToolResult, McpError> {
        fetch_impl(&self.state.lifecycle, params.0).await
    }

    /// List stored shell cache generations.
    #[tool(description = "List the stored shell cache generations and the one this build uses.")]
    async fn shell_generations(&self) -> Result<CallToolResult, McpError> {
        generations_impl(&self.state.shell).await
    }
}

impl ServerHandler for AfflinkServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "afflink".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
