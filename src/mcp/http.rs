//! Streamable HTTP transport
//!
//! A stateless variant: every `POST /mcp` carries one JSON-RPC message and
//! receives one JSON response. Notifications are acknowledged with
//! `202 Accepted` and an empty body.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Instrument;

use super::server::McpServer;

/// Build the HTTP router around a shared server
pub fn router(server: Arc<McpServer>) -> Router {
    // Hosts embed widgets from arbitrary origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/mcp", post(handle_mcp))
        .route("/health", get(health))
        .with_state(server)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Bind and serve until the process is stopped
pub async fn serve(server: Arc<McpServer>, port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let name = server.info().name.clone();
    let app = router(server);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Port {} is already in use. Try: lsof -ti:{} | xargs kill -9",
                    port,
                    port
                );
            }
            return Err(e.into());
        }
    };

    tracing::info!("{} listening on http://{}/mcp", name, addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn handle_mcp(State(server): State<Arc<McpServer>>, body: String) -> Response {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("mcp_request", %request_id);

    match server.handle(&body).instrument(span).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

async fn health(State(server): State<Arc<McpServer>>) -> impl IntoResponse {
    let info = server.info();
    Json(json!({
        "status": "ok",
        "name": info.name,
        "version": info.version,
    }))
}
