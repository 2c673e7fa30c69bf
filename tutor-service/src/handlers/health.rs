use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::startup::AppState;

/// Liveness plus credential visibility. A relay with no API key still
/// reports healthy; callers read `hasApiKey` to know whether content
/// requests can succeed.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "tutor-service",
        "version": env!("CARGO_PKG_VERSION"),
        "hasApiKey": state.completions.is_configured(),
    }))
}
