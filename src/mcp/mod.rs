//! MCP (Model Context Protocol) Server Module
//!
//! Exposes the example apps over JSON-RPC so an assistant host can call
//! their tools and load their widgets.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Assistant host + widget                    │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ JSON-RPC over stdio or POST /mcp
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      McpServer (Rust)                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Apps:                                                       │
//! │  ├── hospi-copilot  - hospital_journey                      │
//! │  ├── calculator     - add, subtract, multiply, divide       │
//! │  └── pdf-generator  - generate_pdf                          │
//! │  Resources:                                                  │
//! │  └── ui://<app>/... - widget document per app               │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod app;
#[cfg(feature = "server")]
pub mod http;
pub mod protocol;
pub mod server;

pub use app::{
    parse_args, AppContext, McpApp, ResourceError, ToolError, ToolOutput, Transport,
    WidgetResource,
};
pub use server::McpServer;
