use crate::api::ApiServer;
use crate::cli::build_service;
use crate::config::Config;
use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub async fn run_service(config: Config) -> Result<()> {
    info!("Starting canvas-zoom service");

    if config.zoom.credentials().is_none() {
        warn!("Zoom credentials are not configured; API calls will fail until they are set");
    }
    if config.access.require_access_key && config.access.access_key.is_empty() {
        warn!("require_access_key is set but access_key is empty; all requests will be rejected");
    }

    let service = build_service(&config)?;

    let shutdown = CancellationToken::new();
    let on_signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            on_signal.cancel();
        }
    });

    ApiServer::new(service, &config.server, &config.access, shutdown)
        .start()
        .await
}
