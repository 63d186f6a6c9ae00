//! HTTP control API
//!
//! The daemon's stand-in for a preferences pane: read and update settings,
//! flip the reminder timer, and watch its status.

pub mod handlers;
pub mod responses;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/enable", post(enable_handler))
        .route("/disable", post(disable_handler))
        .route("/settings", get(get_settings_handler).put(put_settings_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
