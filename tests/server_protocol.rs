//! JSON-RPC behaviour of the MCP server over the in-process entry point.

use mcp_apps::apps::{create_server, AppSelection};
use mcp_apps::mcp::protocol::{
    JsonRpcResponse, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR,
    PROTOCOL_VERSION, RESOURCE_MIME_TYPE, RESOURCE_NOT_FOUND,
};
use mcp_apps::mcp::{AppContext, McpServer, Transport};
use serde_json::{json, Value};
use tempfile::TempDir;

fn server_with(selection: AppSelection, widget_dir: &std::path::Path) -> McpServer {
    create_server(selection, &AppContext::new(Transport::Stdio, widget_dir))
}

fn all_apps() -> McpServer {
    server_with(AppSelection::All, std::path::Path::new("widgets"))
}

async fn rpc(server: &McpServer, msg: Value) -> JsonRpcResponse {
    server
        .handle(&msg.to_string())
        .await
        .expect("request should get a response")
}

fn result(resp: JsonRpcResponse) -> Value {
    assert!(resp.error.is_none(), "unexpected error: {:?}", resp.error);
    resp.result.unwrap()
}

fn error_code(resp: &JsonRpcResponse) -> i32 {
    resp.error.as_ref().expect("expected an error").code
}

#[tokio::test]
async fn test_initialize_single_app() {
    let server = server_with(AppSelection::HospiCopilot, std::path::Path::new("widgets"));
    let resp = rpc(&server, json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}})).await;
    assert_eq!(resp.id, Some(json!(1)));

    let init = result(resp);
    assert_eq!(init["protocolVersion"], json!(PROTOCOL_VERSION));
    assert_eq!(init["serverInfo"]["name"], json!("Hospitalisation & Care Journey Copilot"));
    assert_eq!(init["serverInfo"]["version"], json!("1.0.0"));
    assert!(init["capabilities"]["tools"].is_object());
    assert!(init["capabilities"]["resources"].is_object());
}

#[tokio::test]
async fn test_tools_list_covers_every_app() {
    let resp = rpc(&all_apps(), json!({"jsonrpc": "2.0", "id": "t", "method": "tools/list"})).await;
    let tools = result(resp)["tools"].as_array().unwrap().clone();

    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec!["hospital_journey", "add", "subtract", "multiply", "divide", "generate_pdf"]
    );
    for tool in &tools {
        assert!(tool["inputSchema"].is_object());
        assert!(tool["_meta"]["ui"]["resourceUri"].as_str().unwrap().starts_with("ui://"));
        assert_eq!(tool["annotations"]["readOnlyHint"], json!(true));
    }
}

#[tokio::test]
async fn test_notifications_get_no_response() {
    let server = all_apps();
    let note = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
    assert!(server.handle(&note.to_string()).await.is_none());

    // even for methods that would fail as requests
    let note = json!({"jsonrpc": "2.0", "method": "no/such/method"});
    assert!(server.handle(&note.to_string()).await.is_none());
}

#[tokio::test]
async fn test_error_codes() {
    let server = all_apps();

    let resp = server.handle("{not json").await.unwrap();
    assert_eq!(error_code(&resp), PARSE_ERROR);
    assert_eq!(resp.id, None);

    let resp = rpc(&server, json!({"jsonrpc": "2.0", "id": 2, "method": "prompts/list"})).await;
    assert_eq!(error_code(&resp), METHOD_NOT_FOUND);

    let resp = rpc(&server, json!({"jsonrpc": "1.0", "id": 3, "method": "ping"})).await;
    assert_eq!(error_code(&resp), INVALID_REQUEST);

    let resp = rpc(&server, json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call", "params": {"arguments": {}}})).await;
    assert_eq!(error_code(&resp), INVALID_PARAMS);

    let resp = rpc(&server, json!({"jsonrpc": "2.0", "id": 5, "method": "resources/read", "params": {"uri": "ui://nope/widget.html"}})).await;
    assert_eq!(error_code(&resp), RESOURCE_NOT_FOUND);
}

#[tokio::test]
async fn test_ping() {
    let resp = rpc(&all_apps(), json!({"jsonrpc": "2.0", "id": 9, "method": "ping"})).await;
    assert_eq!(result(resp), json!({}));
}

#[tokio::test]
async fn test_tool_failures_are_results_not_errors() {
    let server = all_apps();
    let resp = rpc(
        &server,
        json!({"jsonrpc": "2.0", "id": 6, "method": "tools/call", "params": {"name": "teleport", "arguments": {}}}),
    )
    .await;
    let call = result(resp);
    assert_eq!(call["isError"], json!(true));
    assert_eq!(call["content"][0]["text"], json!("Unknown tool: teleport"));

    let resp = rpc(
        &server,
        json!({"jsonrpc": "2.0", "id": 7, "method": "tools/call", "params": {"name": "divide", "arguments": {"a": 5, "b": 0}}}),
    )
    .await;
    let call = result(resp);
    assert!(call.get("isError").is_none());
    assert_eq!(call["structuredContent"]["error"], json!("Division by zero"));
}

fn widget_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for app in ["hospi-copilot", "calculator", "pdf-generator"] {
        std::fs::create_dir_all(dir.path().join(app)).unwrap();
        std::fs::write(
            dir.path().join(app).join("widget.html"),
            format!("<html><body>{}</body></html>", app),
        )
        .unwrap();
    }
    dir
}

#[tokio::test]
async fn test_resources_list_and_read() {
    let dir = widget_dir();
    let server = server_with(AppSelection::All, dir.path());

    let resp = rpc(&server, json!({"jsonrpc": "2.0", "id": 1, "method": "resources/list"})).await;
    let resources = result(resp)["resources"].as_array().unwrap().clone();
    let uris: Vec<&str> = resources.iter().map(|r| r["uri"].as_str().unwrap()).collect();
    assert_eq!(
        uris,
        vec![
            "ui://hospi-copilot/widget-v1.html",
            "ui://calculator/widget.html",
            "ui://pdf-generator/widget.html"
        ]
    );
    assert!(resources.iter().all(|r| r["mimeType"] == json!(RESOURCE_MIME_TYPE)));

    let resp = rpc(
        &server,
        json!({"jsonrpc": "2.0", "id": 2, "method": "resources/read", "params": {"uri": "ui://hospi-copilot/widget-v1.html"}}),
    )
    .await;
    let contents = &result(resp)["contents"][0];
    assert_eq!(contents["text"], json!("<html><body>hospi-copilot</body></html>"));
    assert_eq!(contents["mimeType"], json!(RESOURCE_MIME_TYPE));

    let resp = rpc(
        &server,
        json!({"jsonrpc": "2.0", "id": 3, "method": "resources/read", "params": {"uri": "ui://pdf-generator/widget.html"}}),
    )
    .await;
    let contents = &result(resp)["contents"][0];
    assert_eq!(contents["_meta"]["ui"]["csp"]["resourceDomains"], json!(["https://cdn.jsdelivr.net"]));
    assert!(contents["_meta"]["ui"].get("domain").is_none());
}

#[tokio::test]
async fn test_widget_is_read_on_every_request() {
    let dir = widget_dir();
    let server = server_with(AppSelection::Calculator, dir.path());
    let read = json!({"jsonrpc": "2.0", "id": 1, "method": "resources/read", "params": {"uri": "ui://calculator/widget.html"}});

    let first = result(rpc(&server, read.clone()).await);
    std::fs::write(dir.path().join("calculator/widget.html"), "<html>v2</html>").unwrap();
    let second = result(rpc(&server, read.clone()).await);
    assert_ne!(first["contents"][0]["text"], second["contents"][0]["text"]);

    std::fs::remove_file(dir.path().join("calculator/widget.html")).unwrap();
    let resp = rpc(&server, read).await;
    assert_eq!(error_code(&resp), RESOURCE_NOT_FOUND);
}
