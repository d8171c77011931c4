use crate::api::AppState;
use crate::api::schemas::messaging::WebhookPayload;
use crate::domain::message::NewMessage;
use crate::error::{AppError, Result};
use crate::services::signature;
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
};
use serde_json::json;

const SIGNATURE_HEADER: &str = "x-signature";

/// Ingests a message delivered by webhook. Idempotent on `message_id`.
///
/// The signature gate runs against the raw body bytes strictly before JSON
/// parsing, so malformed-but-unsigned bodies never leak validation detail to
/// unauthenticated callers.
///
/// # Errors
/// Returns `AppError::InvalidSignature` for a missing or mismatched
/// `X-Signature` header, and `AppError::Validation` for a malformed payload.
pub async fn receive_webhook(
    State(state): State<AppState>,

    headers: HeaderMap,

    body: Bytes,
) -> Result<impl IntoResponse> {
    let Some(provided) = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok()) else {
        state.ingest_service.record_invalid_signature();
        return Err(AppError::InvalidSignature);
    };

    if !signature::verify(&body, provided, state.config.webhook_secret.as_bytes()) {
        state.ingest_service.record_invalid_signature();
        return Err(AppError::InvalidSignature);
    }

    let payload: WebhookPayload = serde_json::from_slice(&body).map_err(|e| {
        state.ingest_service.record_validation_error();
        AppError::Validation(format!("invalid payload: {e}"))
    })?;

    let message = NewMessage::new(
        payload.message_id,
        payload.from_address,
        payload.to_address,
        payload.ts,
        payload.text,
    )
    .map_err(|e| {
        state.ingest_service.record_validation_error();
        AppError::Validation(e.to_string())
    })?;

    // Created and Duplicate are deliberately indistinguishable to the caller.
    state.ingest_service.ingest(message).await?;

    Ok(Json(json!({ "status": "ok" })))
}
