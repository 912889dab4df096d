//! MCP Apps Server Binary
//!
//! ## Usage
//!
//! ```bash
//! # HTTP on :3001, every app on one endpoint
//! ./target/debug/mcp_apps
//!
//! # Desktop hosts launch a single app over stdio
//! ./target/debug/mcp_apps --stdio --app hospi-copilot
//! ```
//!
//! ## Environment Variables
//!
//! - `PORT` (optional): HTTP listen port, default 3001
//! - `WIDGET_DIST_DIR` (optional): widget build output, default `widgets`
//! - `RUST_LOG` (optional): tracing filter

use anyhow::Result;
use clap::Parser;

use mcp_apps::apps::create_server;
use mcp_apps::config::Cli;
use mcp_apps::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing();

    let ctx = cli.app_context();
    let server = create_server(cli.app, &ctx);
    tracing::info!(
        app = ?cli.app,
        transport = ?ctx.transport,
        widget_dir = %ctx.widget_dir.display(),
        "starting {}",
        server.info().name
    );

    if cli.stdio {
        server.run_stdio().await
    } else {
        run_http(server, cli.port).await
    }
}

#[cfg(feature = "server")]
async fn run_http(server: mcp_apps::mcp::McpServer, port: u16) -> Result<()> {
    mcp_apps::mcp::http::serve(std::sync::Arc::new(server), port).await
}

#[cfg(not(feature = "server"))]
async fn run_http(_server: mcp_apps::mcp::McpServer, _port: u16) -> Result<()> {
    anyhow::bail!("built without the `server` feature; run with --stdio")
}
