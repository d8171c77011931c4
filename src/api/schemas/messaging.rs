use crate::storage::records::message::MessageRecord;
use serde::{Deserialize, Serialize};

/// Inbound webhook body. `from`/`to` are the wire names for the internal
/// `from_address`/`to_address` fields. Shape only; format constraints are
/// enforced by `domain::message::NewMessage`.
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    pub message_id: String,
    #[serde(rename = "from")]
    pub from_address: String,
    #[serde(rename = "to")]
    pub to_address: String,
    pub ts: String,
    #[serde(default)]
    pub text: Option<String>,
}

/// Query parameters for `GET /messages`. Range checks happen in
/// `PageParams::try_new`, after deserialization.
#[derive(Debug, Deserialize)]
pub struct ListMessagesParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    #[serde(rename = "from")]
    pub from_address: Option<String>,
    pub since: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message_id: String,
    #[serde(rename = "from")]
    pub from_address: String,
    #[serde(rename = "to")]
    pub to_address: String,
    pub ts: String,
    pub text: Option<String>,
}

impl From<MessageRecord> for MessageResponse {
    fn from(record: MessageRecord) -> Self {
        Self {
            message_id: record.message_id,
            from_address: record.from_address,
            to_address: record.to_address,
            ts: record.ts,
            text: record.text,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageListResponse {
    pub data: Vec<MessageResponse>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}
