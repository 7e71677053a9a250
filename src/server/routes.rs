//! Route definitions

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{health, index, predict, AppState};

/// Create the router with the web page and JSON endpoints
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        // Health check
        .route("/health", get(health))
        .route("/predict", post(predict))
}
