use crate::api::AppState;
use crate::api::schemas::messaging::{ListMessagesParams, MessageListResponse};
use crate::domain::message::MessageFilter;
use crate::error::Result;
use crate::services::query_service::PageParams;
use axum::{
    Json,
    extract::{Query, State},
};

/// Lists messages with conjunctive filters, canonical `(ts, message_id)`
/// ordering and offset pagination.
///
/// # Errors
/// Returns `AppError::Validation` for out-of-range `limit`/`offset` values.
pub async fn list_messages(
    State(state): State<AppState>,

    Query(params): Query<ListMessagesParams>,
) -> Result<Json<MessageListResponse>> {
    let page = PageParams::try_new(params.limit, params.offset)?;
    let filter =
        MessageFilter { from_address: params.from_address, since: params.since, q: params.q };

    let page = state.query_service.list(filter, page).await?;

    Ok(Json(MessageListResponse {
        data: page.records.into_iter().map(Into::into).collect(),
        total: page.total,
        limit: page.limit,
        offset: page.offset,
    }))
}
