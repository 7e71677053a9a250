//! HTTP server for fill-mask prediction
//!
//! Serves the single-page web form and its JSON API.

mod handlers;
mod routes;

use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::engine::Predictor;

pub use handlers::{
    status_for, AppState, ErrorResponse, HealthResponse, PredictRequest, PredictResponse,
    WordConfidence,
};
pub use routes::api_routes;

/// Build the application router around a loaded predictor
pub fn router(predictor: Arc<Predictor>, config: &ServerConfig) -> Router {
    let state = Arc::new(AppState::new(predictor));

    let mut app = Router::new()
        .merge(api_routes())
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .with_state(state);

    if config.cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }
    if config.request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }
    app
}

/// Start the HTTP server
pub async fn start(predictor: Arc<Predictor>, config: ServerConfig) -> Result<()> {
    let app = router(predictor, &config);

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /        - Web form");
    tracing::info!("  GET  /health  - Health check");
    tracing::info!("  POST /predict - Fill-mask prediction");

    axum::serve(listener, app).await?;

    Ok(())
}
