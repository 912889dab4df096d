//! HTTP transport tests, driven through the router without binding a port.

#![cfg(feature = "server")]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use mcp_apps::apps::{create_server, AppSelection};
use mcp_apps::mcp::http::router;
use mcp_apps::mcp::{AppContext, Transport};
use serde_json::{json, Value};
use tower::ServiceExt;

const BODY_LIMIT: usize = 4 * 1024 * 1024;

fn app(selection: AppSelection, widget_dir: &std::path::Path) -> axum::Router {
    let server = create_server(selection, &AppContext::new(Transport::Http, widget_dir));
    router(Arc::new(server))
}

async fn post(router: axum::Router, body: Value) -> (StatusCode, Vec<u8>) {
    let request = Request::post("/mcp")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn test_health() {
    let router = app(AppSelection::All, std::path::Path::new("widgets"));
    let request = Request::get("/health").body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["name"], json!("mcp-apps"));
}

#[tokio::test]
async fn test_initialize_over_http() {
    let router = app(AppSelection::Calculator, std::path::Path::new("widgets"));
    let (status, bytes) = post(
        router,
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["id"], json!(1));
    assert_eq!(body["result"]["serverInfo"]["name"], json!("Calculator"));
}

#[tokio::test]
async fn test_notification_is_accepted_without_body() {
    let router = app(AppSelection::All, std::path::Path::new("widgets"));
    let (status, bytes) = post(
        router,
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_tool_call_over_http() {
    let router = app(AppSelection::HospiCopilot, std::path::Path::new("widgets"));
    let (status, bytes) = post(
        router,
        json!({
            "jsonrpc": "2.0",
            "id": "call-1",
            "method": "tools/call",
            "params": { "name": "hospital_journey", "arguments": { "step": "room_type", "state": { "roomType": "day" } } }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body["result"]["structuredContent"],
        json!({ "step": "review", "state": { "roomType": "day" } })
    );
}

#[tokio::test]
async fn test_pdf_widget_declares_domain_over_http() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("pdf-generator")).unwrap();
    std::fs::write(dir.path().join("pdf-generator/widget.html"), "<html></html>").unwrap();

    let router = app(AppSelection::PdfGenerator, dir.path());
    let (_, bytes) = post(
        router,
        json!({"jsonrpc": "2.0", "id": 1, "method": "resources/read", "params": {"uri": "ui://pdf-generator/widget.html"}}),
    )
    .await;

    let body: Value = serde_json::from_slice(&bytes).unwrap();
    let ui = &body["result"]["contents"][0]["_meta"]["ui"];
    assert_eq!(ui["domain"], json!("pdf-generator"));
    assert_eq!(ui["csp"]["connectDomains"], json!([]));
}

#[tokio::test]
async fn test_malformed_body_is_a_parse_error() {
    let router = app(AppSelection::All, std::path::Path::new("widgets"));
    let request = Request::post("/mcp").body(Body::from("{oops")).unwrap();
    let response = router.oneshot(request).await.unwrap();
    let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], json!(-32700));
}
