//! Calculator tools through the server, including the zero divisor case.

use mcp_apps::apps::{create_server, AppSelection};
use mcp_apps::mcp::{AppContext, McpServer, Transport};
use serde_json::json;

fn server() -> McpServer {
    create_server(
        AppSelection::Calculator,
        &AppContext::new(Transport::Stdio, "widgets"),
    )
}

#[tokio::test]
async fn test_every_operation() {
    let server = server();
    let cases = [
        ("add", 5.0, 3.0, json!(8), "5 + 3 = 8"),
        ("subtract", 5.0, 3.0, json!(2), "5 − 3 = 2"),
        ("multiply", 5.0, 3.0, json!(15), "5 × 3 = 15"),
        ("divide", 6.0, 4.0, json!(1.5), "6 ÷ 4 = 1.5"),
    ];

    for (tool, a, b, expected, equation) in cases {
        let result = server.call_tool(tool, json!({ "a": a, "b": b })).await;
        assert!(!result.is_error(), "{tool} failed: {}", result.text());
        let content = result.structured_content.unwrap();
        assert_eq!(content["result"], expected, "{tool}");
        assert_eq!(content["equation"], json!(equation));
        assert_eq!(content["operation"], json!(tool));
        assert_eq!(result.content[0].text, equation);
    }
}

#[tokio::test]
async fn test_divide_by_zero() {
    let result = server().call_tool("divide", json!({ "a": 5, "b": 0 })).await;
    assert!(!result.is_error());

    let content = result.structured_content.unwrap();
    assert_eq!(content["error"], json!("Division by zero"));
    assert!(content.get("result").is_none());
    assert_eq!(content["operand1"], json!(5));
    assert_eq!(content["operand2"], json!(0));
    assert!(content["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_single_app_server_hides_other_tools() {
    let result = server().call_tool("generate_pdf", json!({})).await;
    assert!(result.is_error());
    assert_eq!(result.text(), "Unknown tool: generate_pdf");
}
