use crate::services::stats_service::StatsSnapshot;
use crate::storage::records::message::SenderCountRecord;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SenderCountResponse {
    #[serde(rename = "from")]
    pub from_address: String,
    pub count: i64,
}

impl From<SenderCountRecord> for SenderCountResponse {
    fn from(record: SenderCountRecord) -> Self {
        Self { from_address: record.from_address, count: record.message_count }
    }
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_messages: i64,
    pub senders_count: i64,
    pub messages_per_sender: Vec<SenderCountResponse>,
    pub first_message_ts: Option<String>,
    pub last_message_ts: Option<String>,
}

impl From<StatsSnapshot> for StatsResponse {
    fn from(snapshot: StatsSnapshot) -> Self {
        Self {
            total_messages: snapshot.total_messages,
            senders_count: snapshot.senders_count,
            messages_per_sender: snapshot.messages_per_sender.into_iter().map(Into::into).collect(),
            first_message_ts: snapshot.first_message_ts,
            last_message_ts: snapshot.last_message_ts,
        }
    }
}
