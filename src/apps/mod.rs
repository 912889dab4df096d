//! Example Apps
//!
//! Each app pairs its tools with a widget document. Apps are registered by
//! [`AppSelection`]: one app per server, or all of them on one endpoint.

pub mod calculator;
pub mod hospi_copilot;
pub mod pdf_generator;

use std::sync::Arc;

use clap::ValueEnum;

use crate::mcp::{AppContext, McpApp, McpServer};

pub use calculator::CalculatorApp;
pub use hospi_copilot::HospiCopilotApp;
pub use pdf_generator::PdfGeneratorApp;

/// Which apps a server hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AppSelection {
    HospiCopilot,
    Calculator,
    PdfGenerator,
    /// Every app on a single endpoint
    All,
}

/// Instantiate one app
fn create_app(selection: AppSelection, ctx: &AppContext) -> Vec<Arc<dyn McpApp>> {
    match selection {
        AppSelection::HospiCopilot => {
            vec![Arc::new(HospiCopilotApp::new(ctx.clone())) as Arc<dyn McpApp>]
        }
        AppSelection::Calculator => {
            vec![Arc::new(CalculatorApp::new(ctx.clone())) as Arc<dyn McpApp>]
        }
        AppSelection::PdfGenerator => {
            vec![Arc::new(PdfGeneratorApp::new(ctx.clone())) as Arc<dyn McpApp>]
        }
        AppSelection::All => [
            AppSelection::HospiCopilot,
            AppSelection::Calculator,
            AppSelection::PdfGenerator,
        ]
        .into_iter()
        .flat_map(|app| create_app(app, ctx))
        .collect(),
    }
}

/// Build the server for a selection
pub fn create_server(selection: AppSelection, ctx: &AppContext) -> McpServer {
    let mut apps = create_app(selection, ctx);
    if selection == AppSelection::All || apps.len() != 1 {
        return McpServer::multi(apps);
    }
    McpServer::single(apps.remove(0))
}
