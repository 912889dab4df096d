//! PDF Generator App
//!
//! Renders a template to PDF and hands the document back as a base64 data
//! URL the widget can preview and download.

mod document;

use std::path::Path;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::mcp::protocol::{Tool, ToolAnnotations};
use crate::mcp::{
    parse_args, AppContext, McpApp, ToolError, ToolOutput, Transport, WidgetResource,
};

pub use document::{generate_pdf, DocumentData, LineItem, PdfError, Template};

pub const APP_NAME: &str = "PDF Generator";
pub const APP_VERSION: &str = "1.0.0";

pub const TOOL_NAME: &str = "generate_pdf";
pub const RESOURCE_URI: &str = "ui://pdf-generator/widget.html";

const DATA_URL_PREFIX: &str = "data:application/pdf;base64,";

#[derive(Debug, Deserialize)]
struct GenerateArgs {
    template: Template,
    data: DocumentData,
}

/// `title` with every whitespace run replaced by `_`
pub fn filename_for(title: &str) -> String {
    let mut name = String::with_capacity(title.len() + 4);
    let mut in_space = false;
    for c in title.chars() {
        if c.is_whitespace() {
            if !in_space {
                name.push('_');
            }
            in_space = true;
        } else {
            name.push(c);
            in_space = false;
        }
    }
    name.push_str(".pdf");
    name
}

pub fn size_kb(len: usize) -> String {
    format!("{:.2}", len as f64 / 1024.0)
}

pub struct PdfGeneratorApp {
    ctx: AppContext,
    widget: WidgetResource,
}

impl PdfGeneratorApp {
    pub fn new(ctx: AppContext) -> Self {
        let mut ui = json!({
            "csp": {
                "connectDomains": [],
                "resourceDomains": ["https://cdn.jsdelivr.net"]
            }
        });
        // Hosts sandbox HTTP widgets per domain; stdio hosts reject the key
        if ctx.transport == Transport::Http {
            ui["domain"] = json!("pdf-generator");
        }

        Self {
            ctx,
            widget: WidgetResource {
                uri: RESOURCE_URI,
                name: "pdf-generator-widget",
                description: "PDF preview with download button",
                app_id: "pdf-generator",
                meta: Some(json!({ "ui": ui })),
            },
        }
    }

    async fn generate(&self, args: Value) -> Result<ToolOutput, ToolError> {
        let GenerateArgs { template, data } = parse_args(args)?;
        tracing::info!(template = template.as_str(), title = %data.title, "generate_pdf called");

        let title = data.title.clone();
        let bytes = tokio::task::spawn_blocking(move || generate_pdf(template, &data))
            .await
            .map_err(|e| ToolError::Execution(format!("PDF worker failed: {}", e)))?
            .map_err(|e| ToolError::Execution(e.to_string()))?;

        let size = size_kb(bytes.len());
        let structured = json!({
            "pdfDataUrl": format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(&bytes)),
            "filename": filename_for(&title),
            "sizeKB": size,
            "template": template.as_str(),
        });

        Ok(ToolOutput {
            structured,
            narrative: format!(
                "Generated {} PDF: {} ({} KB)",
                template.as_str(),
                title,
                size
            ),
        })
    }
}

#[async_trait]
impl McpApp for PdfGeneratorApp {
    fn id(&self) -> &'static str {
        "pdf-generator"
    }

    fn name(&self) -> &'static str {
        APP_NAME
    }

    fn version(&self) -> &'static str {
        APP_VERSION
    }

    fn tools(&self) -> Vec<Tool> {
        vec![Tool {
            name: TOOL_NAME.into(),
            title: Some("Generate PDF".into()),
            description: "Generates a PDF document from structured data using templates".into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "template": {
                        "type": "string",
                        "enum": ["simple", "invoice"],
                        "description": "Template to use"
                    },
                    "data": {
                        "type": "object",
                        "description": "Data to populate the template",
                        "properties": {
                            "title": { "type": "string" },
                            "content": { "type": "string" },
                            "date": { "type": "string" },
                            "items": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "description": { "type": "string" },
                                        "amount": { "type": "number" }
                                    },
                                    "required": ["description", "amount"]
                                }
                            }
                        },
                        "required": ["title"]
                    }
                },
                "required": ["template", "data"]
            }),
            annotations: Some(ToolAnnotations::read_only()),
            meta: Some(json!({ "ui": { "resourceUri": RESOURCE_URI } })),
        }]
    }

    fn widget(&self) -> &WidgetResource {
        &self.widget
    }

    fn widget_dir(&self) -> &Path {
        &self.ctx.widget_dir
    }

    async fn call_tool(&self, name: &str, args: Value) -> Result<ToolOutput, ToolError> {
        match name {
            TOOL_NAME => self.generate(args).await,
            _ => Err(ToolError::UnknownTool(name.to_string())),
        }
    }
}
