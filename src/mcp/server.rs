//! MCP Server
//!
//! Dispatches JSON-RPC messages to the hosted apps. The same server backs
//! both transports: the stdio loop below and the HTTP router in `http.rs`.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use super::app::{McpApp, ResourceError, ToolError};
use super::protocol::*;

/// Longest message excerpt written to the log
const LOG_PREVIEW_LEN: usize = 100;

/// MCP Server hosting one or more apps
pub struct McpServer {
    info: ServerInfo,
    apps: Vec<Arc<dyn McpApp>>,
    tool_routes: HashMap<String, usize>,
    resource_routes: HashMap<String, usize>,
}

impl McpServer {
    /// Serve a single app under its own name and version
    pub fn single(app: Arc<dyn McpApp>) -> Self {
        let info = ServerInfo {
            name: app.name().to_string(),
            version: app.version().to_string(),
        };
        Self::new(info, vec![app])
    }

    /// Serve several apps on one endpoint
    pub fn multi(apps: Vec<Arc<dyn McpApp>>) -> Self {
        let info = ServerInfo {
            name: "mcp-apps".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        };
        Self::new(info, apps)
    }

    pub fn new(info: ServerInfo, apps: Vec<Arc<dyn McpApp>>) -> Self {
        let mut tool_routes = HashMap::new();
        let mut resource_routes = HashMap::new();

        for (index, app) in apps.iter().enumerate() {
            for tool in app.tools() {
                if tool_routes.contains_key(&tool.name) {
                    tracing::warn!(tool = %tool.name, app = app.id(), "duplicate tool name ignored");
                    continue;
                }
                tool_routes.insert(tool.name, index);
            }
            for resource in app.resources() {
                resource_routes.entry(resource.uri).or_insert(index);
            }
            tracing::info!(app = app.id(), name = app.name(), "registered app");
        }

        Self {
            info,
            apps,
            tool_routes,
            resource_routes,
        }
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// Run the server, reading newline-delimited JSON-RPC from stdin and
    /// writing responses to stdout
    pub async fn run_stdio(&self) -> anyhow::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        tracing::info!(server = %self.info.name, "stdio server started, waiting for messages");

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            tracing::debug!("<- {}", preview(&line));

            let Some(response) = self.handle(&line).await else {
                continue;
            };
            let out = serde_json::to_string(&response)?;
            tracing::debug!("-> {}", preview(&out));

            stdout.write_all(out.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }

        tracing::info!("stdio closed, server shutting down");
        Ok(())
    }

    /// Handle a single JSON-RPC message; `None` for notifications
    pub async fn handle(&self, msg: &str) -> Option<JsonRpcResponse> {
        let req: JsonRpcRequest = match serde_json::from_str(msg) {
            Ok(r) => r,
            Err(e) => return Some(JsonRpcResponse::error(None, PARSE_ERROR, e.to_string())),
        };
        self.handle_request(req).await
    }

    pub async fn handle_request(&self, req: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if req.is_notification() {
            tracing::debug!(method = %req.method, "notification received");
            return None;
        }

        let id = req.id.clone();
        if req.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                id,
                INVALID_REQUEST,
                format!("Unsupported jsonrpc version: {}", req.jsonrpc),
            ));
        }

        let response = match req.method.as_str() {
            "initialize" => respond(id, &self.initialize_result()),

            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),

            "tools/list" => respond(
                id,
                &ToolsListResult {
                    tools: self.apps.iter().flat_map(|app| app.tools()).collect(),
                },
            ),

            "tools/call" => {
                let params: ToolCallParams = match serde_json::from_value(req.params) {
                    Ok(p) => p,
                    Err(e) => return Some(JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string())),
                };
                let result = self.call_tool(&params.name, params.arguments).await;
                respond(id, &result)
            }

            "resources/list" => respond(
                id,
                &ResourcesListResult {
                    resources: self.apps.iter().flat_map(|app| app.resources()).collect(),
                },
            ),

            "resources/read" => {
                let params: ReadResourceParams = match serde_json::from_value(req.params) {
                    Ok(p) => p,
                    Err(e) => return Some(JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string())),
                };
                match self.read_resource(&params.uri).await {
                    Ok(result) => respond(id, &result),
                    Err(ResourceError::NotFound(uri)) => JsonRpcResponse::error(
                        id,
                        RESOURCE_NOT_FOUND,
                        format!("Resource not found: {}", uri),
                    ),
                    Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
                }
            }

            _ => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Unknown method: {}", req.method),
            ),
        };

        Some(response)
    }

    fn initialize_result(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: PROTOCOL_VERSION.into(),
            capabilities: ServerCapabilities {
                tools: ListChangedCapability {
                    list_changed: false,
                },
                resources: ListChangedCapability {
                    list_changed: false,
                },
            },
            server_info: self.info.clone(),
        }
    }

    /// Call a tool by name. Failures become error results, never panics.
    pub async fn call_tool(&self, name: &str, args: Value) -> ToolCallResult {
        tracing::info!(tool = name, "calling tool");

        let outcome = match self.tool_routes.get(name) {
            Some(&index) => self.apps[index].call_tool(name, args).await,
            None => Err(ToolError::UnknownTool(name.to_string())),
        };

        match outcome {
            Ok(output) => output.into(),
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "tool call failed");
                ToolCallResult::error(e.to_string())
            }
        }
    }

    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let index = self
            .resource_routes
            .get(uri)
            .copied()
            .ok_or_else(|| ResourceError::NotFound(uri.to_string()))?;
        let contents = self.apps[index].read_resource(uri).await?;
        Ok(ReadResourceResult {
            contents: vec![contents],
        })
    }
}

fn respond<T: Serialize>(id: Option<Value>, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(v) => JsonRpcResponse::success(id, v),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, format!("Serialization error: {}", e)),
    }
}

fn preview(s: &str) -> String {
    match s.char_indices().nth(LOG_PREVIEW_LEN) {
        Some((end, _)) => format!("{}...", &s[..end]),
        None => s.to_string(),
    }
}
