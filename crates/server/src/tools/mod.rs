//! MCP tool implementations.
//!
//! This module contains all tools exposed by the afflink server.

pub mod link_convert;
pub mod shell_fetch;
pub mod shell_generations;

pub use link_convert::LinkConvertParams;
pub use shell_fetch::ShellFetchParams;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

use afflink_core::Error;

/// Wrap a tool output as pretty JSON text content.
pub(crate) fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Decode the JSON text of a successful tool result.
#[cfg(test)]
pub(crate) fn decode<T: serde::de::DeserializeOwned>(result: &CallToolResult) -> T {
    let content_val = serde_json::to_value(&result.content[0]).unwrap();
    let text = content_val
        .get("text")
        .and_then(|v| v.as_str())
        .expect("Expected text field in content");
    serde_json::from_str(text).unwrap()
}
