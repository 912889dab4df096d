//! MCP Apps - tool servers with embedded widgets
//!
//! This crate hosts three small apps behind a Model Context Protocol server:
//! the hospital admission journey copilot, a calculator and a PDF generator.
//! Each app exposes tools plus one widget document that renders tool results
//! inside the assistant host.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mcp_apps::apps::{create_server, AppSelection};
//! use mcp_apps::mcp::{AppContext, Transport};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let ctx = AppContext::new(Transport::Stdio, "widgets");
//! let server = create_server(AppSelection::HospiCopilot, &ctx);
//! server.run_stdio().await
//! # }
//! ```
//!
//! The journey logic itself lives in the `hospi-journey` crate.

// Protocol types, app trait and transports
pub mod mcp;

// Hosted apps
pub mod apps;

// Command line and environment settings
pub mod config;

// Log subscriber setup
pub mod telemetry;
