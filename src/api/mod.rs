//! REST API server for canvas-zoom.
//!
//! Provides HTTP endpoints for:
//! - Meeting recordings and transcripts
//! - Instructor recordings, optionally filtered by Canvas course
//! - Recording transcripts

pub mod access;
pub mod error;
pub mod routes;

use crate::config::{AccessConfig, ServerConfig};
use crate::recordings::RecordingService;
use anyhow::Result;
use axum::{middleware, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tracing::info;

/// Shared state for all routes.
#[derive(Clone)]
pub struct AppState {
    pub service: RecordingService,
    /// Cancelled when the server shuts down; in-flight scans stop early.
    pub shutdown: CancellationToken,
}

pub struct ApiServer {
    host: String,
    port: u16,
    access: AccessConfig,
    state: AppState,
}

impl ApiServer {
    pub fn new(
        service: RecordingService,
        server: &ServerConfig,
        access: &AccessConfig,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            host: server.host.clone(),
            port: server.port,
            access: access.clone(),
            state: AppState { service, shutdown },
        }
    }

    pub async fn start(self) -> Result<()> {
        let shutdown = self.state.shutdown.clone();
        let app = router(self.state, self.access);

        let addr = format!("{}:{}", self.host, self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("API server listening on http://{}:{}", self.host, self.port);
        info!("Endpoints:");
        info!("  GET  /                              - Service info");
        info!("  GET  /meetings/:id/recordings       - Zoom recordings for a meeting");
        info!("  GET  /meetings/:id/transcript       - Parsed transcript for a meeting");
        info!("  GET  /instructors/:id/recordings    - Instructor recordings (?course_id=)");
        info!("  GET  /recordings/:id/transcript     - Parsed transcript for a recording");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown.cancelled_owned())
            .await?;

        info!("API server stopped");
        Ok(())
    }
}

/// Build the full application router with the access gate applied.
pub fn router(state: AppState, gate: AccessConfig) -> Router {
    Router::new()
        .route("/", get(status))
        .merge(routes::meetings::router())
        .merge(routes::instructors::router())
        .merge(routes::recordings::router())
        .with_state(state)
        .layer(ServiceBuilder::new().layer(middleware::from_fn_with_state(
            gate,
            access::require_access_key,
        )))
}

async fn status() -> Json<Value> {
    Json(json!({
        "service": "canvas-zoom",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}
