use sqlx::FromRow;

/// A persisted message row. `received_at` is server-assigned at insert time
/// and never exposed on the list endpoint.
#[derive(Debug, Clone, FromRow)]
pub struct MessageRecord {
    pub message_id: String,
    pub from_address: String,
    pub to_address: String,
    pub ts: String,
    pub text: Option<String>,
    pub received_at: String,
}

/// One row of the top-senders aggregate.
#[derive(Debug, Clone, FromRow)]
pub struct SenderCountRecord {
    pub from_address: String,
    pub message_count: i64,
}
