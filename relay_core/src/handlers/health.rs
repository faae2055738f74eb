//! Health check handler

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::AppState;

pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().timestamp(),
        "app": state.app_name,
        "version": state.version,
        "email_configured": state.relay.is_configured(),
    }))
}
