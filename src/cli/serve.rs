//! HTTP server command

use std::sync::Arc;

use anyhow::Result;

use crate::config::GapfillConfig;
use crate::server;

/// Start the web server
pub async fn serve(
    mut config: GapfillConfig,
    port: Option<u16>,
    host: Option<String>,
) -> Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(host) = host {
        config.server.host = host;
    }

    // Model is loaded before the listener binds
    tracing::info!("Loading model: {}", config.model.id);
    let predictor = Arc::new(super::load_with_spinner(&config)?);
    tracing::info!("Model loaded successfully");

    tracing::info!("Starting server at http://{}", config.server.addr());
    server::start(predictor, config.server).await?;

    Ok(())
}
