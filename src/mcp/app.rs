//! App Abstraction
//!
//! An app bundles one or more tools with the widget document that renders
//! their results. The server routes `tools/call` and `resources/read` to the
//! app that registered the name or URI.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;

use super::protocol::{Resource, ResourceContents, Tool, ToolCallResult, RESOURCE_MIME_TYPE};

/// Errors raised by a tool invocation
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Tool execution failed: {0}")]
    Execution(String),
}

impl ToolError {
    pub fn validation(err: impl std::fmt::Display) -> Self {
        ToolError::Validation(err.to_string())
    }
}

/// Errors raised while serving a resource
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to read widget {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Transport the server is reached over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Stdio,
    Http,
}

/// Runtime settings shared by every app
#[derive(Debug, Clone)]
pub struct AppContext {
    pub transport: Transport,
    /// Build output directory holding `<app-id>/widget.html`
    pub widget_dir: PathBuf,
}

impl AppContext {
    pub fn new(transport: Transport, widget_dir: impl Into<PathBuf>) -> Self {
        Self {
            transport,
            widget_dir: widget_dir.into(),
        }
    }
}

/// Both channels of a successful tool call
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Machine-readable payload for the widget
    pub structured: Value,
    /// Narrative for the model-facing transcript
    pub narrative: String,
}

impl From<ToolOutput> for ToolCallResult {
    fn from(output: ToolOutput) -> Self {
        ToolCallResult::structured(output.structured, output.narrative)
    }
}

/// Decode tool arguments, treating `null` as an empty object
pub fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    let args = match args {
        Value::Null => json!({}),
        Value::Object(_) => args,
        other => {
            return Err(ToolError::Validation(format!(
                "arguments must be an object, got {}",
                other
            )))
        }
    };
    serde_json::from_value(args).map_err(ToolError::validation)
}

/// The widget document of an app, read from the build output on every request
#[derive(Debug, Clone)]
pub struct WidgetResource {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Directory under the widget build output
    pub app_id: &'static str,
    pub meta: Option<Value>,
}

impl WidgetResource {
    pub fn path(&self, widget_dir: &Path) -> PathBuf {
        widget_dir.join(self.app_id).join("widget.html")
    }

    pub fn describe(&self) -> Resource {
        Resource {
            uri: self.uri.to_string(),
            name: self.name.to_string(),
            mime_type: RESOURCE_MIME_TYPE.to_string(),
            description: Some(self.description.to_string()),
        }
    }

    pub async fn read(&self, widget_dir: &Path) -> Result<ResourceContents, ResourceError> {
        let path = self.path(widget_dir);
        tracing::info!(uri = self.uri, path = %path.display(), "serving UI resource");

        let html = tokio::fs::read_to_string(&path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(format!("{} (expected at {})", self.uri, path.display()))
            } else {
                ResourceError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        Ok(ResourceContents {
            uri: self.uri.to_string(),
            mime_type: RESOURCE_MIME_TYPE.to_string(),
            text: html,
            meta: self.meta.clone(),
        })
    }
}

/// A tool-plus-widget app hosted by [`McpServer`](super::McpServer)
#[async_trait]
pub trait McpApp: Send + Sync {
    /// Folder name, also used on the command line
    fn id(&self) -> &'static str;

    /// Human-readable app name
    fn name(&self) -> &'static str;

    fn version(&self) -> &'static str;

    fn tools(&self) -> Vec<Tool>;

    fn widget(&self) -> &WidgetResource;

    /// Directory holding widget build output
    fn widget_dir(&self) -> &Path;

    async fn call_tool(&self, name: &str, args: Value) -> Result<ToolOutput, ToolError>;

    fn resources(&self) -> Vec<Resource> {
        vec![self.widget().describe()]
    }

    async fn read_resource(&self, uri: &str) -> Result<ResourceContents, ResourceError> {
        let widget = self.widget();
        if widget.uri != uri {
            return Err(ResourceError::NotFound(uri.to_string()));
        }
        widget.read(self.widget_dir()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Pair {
        a: f64,
        #[serde(default)]
        b: Option<f64>,
    }

    #[test]
    fn test_parse_args_accepts_null_as_empty() {
        let err = parse_args::<Pair>(Value::Null).unwrap_err();
        assert!(matches!(err, ToolError::Validation(msg) if msg.contains("missing field `a`")));
    }

    #[test]
    fn test_parse_args_rejects_non_objects() {
        let err = parse_args::<Pair>(json!([1, 2])).unwrap_err();
        assert!(matches!(err, ToolError::Validation(msg) if msg.contains("must be an object")));
    }

    #[test]
    fn test_parse_args_decodes_objects() {
        let pair: Pair = parse_args(json!({"a": 1, "b": 2.5})).unwrap();
        assert_eq!(pair.a, 1.0);
        assert_eq!(pair.b, Some(2.5));
    }

    #[tokio::test]
    async fn test_widget_read_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let widget = WidgetResource {
            uri: "ui://demo/widget.html",
            name: "demo-widget",
            description: "Demo",
            app_id: "demo",
            meta: None,
        };
        let err = widget.read(dir.path()).await.unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(_)));

        std::fs::create_dir_all(dir.path().join("demo")).unwrap();
        std::fs::write(dir.path().join("demo/widget.html"), "<html></html>").unwrap();
        let contents = widget.read(dir.path()).await.unwrap();
        assert_eq!(contents.text, "<html></html>");
        assert_eq!(contents.mime_type, RESOURCE_MIME_TYPE);
    }
}
