use crate::error::Result;
use crate::storage::message_repo::MessageRepository;
use crate::storage::records::message::SenderCountRecord;

const TOP_SENDERS_LIMIT: i64 = 10;

/// Point-in-time aggregate over the entire message set. An empty store yields
/// zero counts and absent timestamps.
#[derive(Debug)]
pub struct StatsSnapshot {
    pub total_messages: i64,
    pub senders_count: i64,
    pub messages_per_sender: Vec<SenderCountRecord>,
    pub first_message_ts: Option<String>,
    pub last_message_ts: Option<String>,
}

#[derive(Clone, Debug)]
pub struct StatsService {
    repo: MessageRepository,
}

impl StatsService {
    #[must_use]
    pub const fn new(repo: MessageRepository) -> Self {
        Self { repo }
    }

    /// # Errors
    /// Returns `AppError::Database` on query failure.
    pub async fn snapshot(&self) -> Result<StatsSnapshot> {
        let total_messages = self.repo.count_all().await?;
        let senders_count = self.repo.count_distinct_senders().await?;
        let messages_per_sender = self.repo.top_senders(TOP_SENDERS_LIMIT).await?;
        let (first_message_ts, last_message_ts) = self.repo.timestamp_range().await?;

        Ok(StatsSnapshot { total_messages, senders_count, messages_per_sender, first_message_ts, last_message_ts })
    }
}
