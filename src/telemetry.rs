//! Tracing setup shared by the binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "mcp_apps=info,hospi_journey=info,tower_http=debug";

/// Install the global subscriber.
///
/// Logs always go to stderr: in stdio mode stdout carries JSON-RPC frames.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
