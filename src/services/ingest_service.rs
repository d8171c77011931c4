use crate::domain::message::{NewMessage, TS_FORMAT};
use crate::error::{AppError, Result};
use crate::storage::message_repo::{InsertOutcome, MessageRepository};
use opentelemetry::{KeyValue, global, metrics::Counter};
use time::OffsetDateTime;

/// Outcome counters for the webhook path, labelled by result. Increments are
/// atomic adds on the instrument, never a locked section.
#[derive(Clone, Debug)]
pub struct WebhookMetrics {
    requests: Counter<u64>,
}

impl WebhookMetrics {
    #[must_use]
    pub(crate) fn new() -> Self {
        let meter = global::meter("smshook");
        Self {
            requests: meter
                .u64_counter("webhook_requests_total")
                .with_description("Total number of webhook requests by result")
                .build(),
        }
    }

    fn record(&self, result: &'static str) {
        self.requests.add(1, &[KeyValue::new("result", result)]);
    }
}

impl Default for WebhookMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub struct IngestService {
    repo: MessageRepository,
    metrics: WebhookMetrics,
}

impl IngestService {
    #[must_use]
    pub fn new(repo: MessageRepository) -> Self {
        Self { repo, metrics: WebhookMetrics::new() }
    }

    /// Persists a validated message idempotently. Both outcomes are success to
    /// the caller; a retried delivery must never see a different response.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the insert fails for any reason other
    /// than a duplicate `message_id`.
    pub async fn ingest(&self, message: NewMessage) -> Result<InsertOutcome> {
        let received_at =
            OffsetDateTime::now_utc().format(TS_FORMAT).map_err(|_| AppError::Internal)?;

        let outcome = self.repo.insert(&message, &received_at).await?;
        match outcome {
            InsertOutcome::Created => {
                self.metrics.record("created");
                tracing::info!(message_id = %message.message_id, dup = false, result = "created", "webhook ingested");
            }
            InsertOutcome::Duplicate => {
                self.metrics.record("duplicate");
                tracing::warn!(message_id = %message.message_id, dup = true, result = "duplicate", "duplicate webhook received");
            }
        }

        Ok(outcome)
    }

    /// Counts a request rejected at the signature gate, before any store
    /// transaction begins.
    pub fn record_invalid_signature(&self) {
        self.metrics.record("invalid_signature");
    }

    /// Counts a request rejected by payload validation.
    pub fn record_validation_error(&self) {
        self.metrics.record("validation_error");
    }
}
