//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{info, warn};

use crate::settings::{Settings, SettingsPatch};
use crate::state::AppState;

use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// Handle POST /enable - Turn the reminder timer on
pub async fn enable_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    info!("enable endpoint called");
    state.settings.set_timer_enabled(true);
    Json(ApiResponse::enabled(
        "Reminder timer enabled".to_string(),
        state.settings.snapshot(),
    ))
}

/// Handle POST /disable - Turn the reminder timer off
pub async fn disable_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    info!("disable endpoint called");
    state.settings.set_timer_enabled(false);
    Json(ApiResponse::disabled(
        "Reminder timer disabled".to_string(),
        state.settings.snapshot(),
    ))
}

/// Handle GET /settings - Return the current settings snapshot
pub async fn get_settings_handler(State(state): State<Arc<AppState>>) -> Json<Settings> {
    Json(state.settings.snapshot())
}

/// Handle PUT /settings - Apply a partial settings update
pub async fn put_settings_handler(
    State(state): State<Arc<AppState>>,
    Json(patch): Json<SettingsPatch>,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)> {
    match state.settings.apply(&patch) {
        Ok(snapshot) => {
            info!("settings updated");
            Ok(Json(ApiResponse::updated(
                "Settings updated".to_string(),
                snapshot,
            )))
        }
        Err(e) => {
            warn!("settings update rejected: {}", e);
            Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::error(e.to_string(), state.settings.snapshot())),
            ))
        }
    }
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let countdown = state.countdown.borrow().clone();

    Json(StatusResponse {
        settings: state.settings.snapshot(),
        timer_active: state.engine.is_running(),
        timer_remaining_seconds: state.engine.remaining_seconds(),
        countdown,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
