use crate::api::AppState;
use crate::api::schemas::stats::StatsResponse;
use crate::error::Result;
use axum::{Json, extract::State};

/// Returns a point-in-time analytics snapshot over the entire message set.
///
/// # Errors
/// Returns `AppError::Database` on query failure.
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let snapshot = state.stats_service.snapshot().await?;
    Ok(Json(snapshot.into()))
}
