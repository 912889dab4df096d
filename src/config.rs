//! Server Configuration
//!
//! Command line flags with environment fallbacks. A `.env` file in the
//! working directory is loaded by the binary before parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::apps::AppSelection;
use crate::mcp::{AppContext, Transport};

pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone, Parser)]
#[command(name = "mcp_apps")]
#[command(version)]
#[command(about = "MCP server hosting the hospital journey, calculator and PDF generator apps")]
#[command(long_about = None)]
pub struct Cli {
    /// Speak newline-delimited JSON-RPC on stdin/stdout instead of HTTP
    #[arg(long)]
    pub stdio: bool,

    /// App to host
    #[arg(long, value_enum, default_value = "all")]
    pub app: AppSelection,

    /// HTTP listen port
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Widget build output (`<app-id>/widget.html` per app)
    #[arg(long, env = "WIDGET_DIST_DIR", default_value = "widgets")]
    pub widget_dir: PathBuf,
}

impl Cli {
    pub fn transport(&self) -> Transport {
        if self.stdio {
            Transport::Stdio
        } else {
            Transport::Http
        }
    }

    pub fn app_context(&self) -> AppContext {
        AppContext::new(self.transport(), self.widget_dir.clone())
    }
}
