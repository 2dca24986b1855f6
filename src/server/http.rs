//! Streamable-HTTP transport
//!
//! Mounts the MCP service at `/mcp` and a plain `/health` probe beside it.
//! Binds to loopback only; failure to bind is fatal and distinct from
//! per-lookup errors.

use std::sync::Arc;

use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::{StreamableHttpServerConfig, StreamableHttpService};
use thiserror::Error;
use tokio::net::TcpListener;

use super::{RelateAccountServer, TOOL_NAME};
use crate::lookup::LookupService;

/// Transport bootstrap errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Bind error: {0}")]
    Bind(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP server hosting the MCP endpoint
pub struct HttpServer {
    service: Arc<LookupService>,
    port: u16,
}

impl HttpServer {
    pub fn new(service: Arc<LookupService>, port: u16) -> Self {
        Self { service, port }
    }

    fn router(service: Arc<LookupService>) -> Router {
        Router::new().route("/health", get(health)).nest_service(
            "/mcp",
            StreamableHttpService::new(
                move || Ok(RelateAccountServer::new(service.clone())),
                Arc::new(LocalSessionManager::default()),
                StreamableHttpServerConfig::default(),
            ),
        )
    }

    /// Bind and serve until the process is stopped
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = format!("127.0.0.1:{}", self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::Bind(format!("{addr}: {e}")))?;

        tracing::info!(addr = %addr, "MCP server listening on http://{addr}/mcp");

        axum::serve(listener, Self::router(self.service))
            .await
            .map_err(ServerError::Io)
    }
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "transport": "streamable-http",
        "tools": [TOOL_NAME],
    }))
}
