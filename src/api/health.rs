use crate::api::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// Liveness probe: returns 200 OK as long as the process is running.
pub async fn live() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Readiness probe: requires the webhook secret to be configured and the
/// database to answer within a short timeout.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    if state.config.webhook_secret.is_empty() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "webhook secret not configured" })),
        );
    }

    match state.health_service.check_db().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(e) => {
            tracing::warn!(error = %e, component = "database", "Readiness probe failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "error": "database unavailable" })))
        }
    }
}
