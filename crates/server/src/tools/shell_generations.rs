//! shell_generations tool implementation.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;
use afflink_client::ShellCache;

/// Output structure for shell_generations tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ShellGenerationsOutput {
    /// Generation this build reads and writes.
    pub current: String,
    /// Every stored generation, oldest first.
    pub generations: Vec<String>,
}

/// Implementation of the shell_generations tool.
pub async fn generations_impl(shell: &ShellCache) -> Result<CallToolResult, McpError> {
    let generations = shell.storage().generations().await?;
    json_result(&ShellGenerationsOutput { current: shell.generation().to_string(), generations })
}
