//! Bunsho MCP server binary.
//!
//! Exposes document editing tools to MCP clients over stdio.
//!
//! Usage:
//!   cargo run -p bunsho-mcp
//!
//! Test with MCP inspector:
//!   npx @modelcontextprotocol/inspector cargo run -p bunsho-mcp

use anyhow::Result;
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use tracing_subscriber::{EnvFilter, fmt};

use bunsho_mcp::BunshoMcp;

/// MCP server for bunsho document editing.
#[derive(Parser, Debug)]
#[command(name = "bunsho-mcp")]
#[command(about = "MCP server for bunsho document editing")]
struct Args {
    /// Log filter directive (RUST_LOG overrides)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the MCP protocol.
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let service = BunshoMcp::new()
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("MCP server error: {:?}", e);
        })?;

    tracing::info!("bunsho-mcp server ready");

    service.waiting().await?;

    tracing::info!("bunsho-mcp server shutting down");
    Ok(())
}
