//! afflink server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

use afflink_core::AppConfig;

mod handler;
mod state;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let state = Arc::new(state::AppState::from_config(&config).await?);

    tracing::info!(generation = %state.shell.generation(), "Starting afflink server on stdio transport");

    let lifecycle = Arc::clone(&state.lifecycle);
    tokio::spawn(async move {
        if let Err(e) = lifecycle.start().await {
            tracing::warn!("shell cache unavailable, serving requests live: {}", e);
        }
    });

    let handler = handler::AfflinkServer::new(state);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
