use crate::domain::message::MessageFilter;
use crate::error::{AppError, Result};
use crate::storage::message_repo::MessageRepository;
use crate::storage::records::message::MessageRecord;

pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 100;

/// Validated pagination bounds. Out-of-range values are rejected at the
/// boundary, never clamped.
#[derive(Debug, Clone, Copy)]
pub struct PageParams {
    pub limit: i64,
    pub offset: i64,
}

impl PageParams {
    /// # Errors
    /// Returns `AppError::Validation` when `limit` is outside 1..=100 or
    /// `offset` is negative.
    pub fn try_new(limit: Option<i64>, offset: Option<i64>) -> Result<Self> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(AppError::Validation(format!("limit: must be between 1 and {MAX_LIMIT}")));
        }

        let offset = offset.unwrap_or(0);
        if offset < 0 {
            return Err(AppError::Validation("offset: must not be negative".to_string()));
        }

        Ok(Self { limit, offset })
    }
}

/// One page of filtered results plus the filter-wide total.
#[derive(Debug)]
pub struct MessagePage {
    pub records: Vec<MessageRecord>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Clone, Debug)]
pub struct QueryService {
    repo: MessageRepository,
}

impl QueryService {
    #[must_use]
    pub const fn new(repo: MessageRepository) -> Self {
        Self { repo }
    }

    /// Runs the count and page queries with identical filters. An empty result
    /// is valid, not an error.
    ///
    /// # Errors
    /// Returns `AppError::Database` on query failure.
    pub async fn list(&self, filter: MessageFilter, page: PageParams) -> Result<MessagePage> {
        let total = self.repo.count(&filter).await?;
        let records = self.repo.list(&filter, page.limit, page.offset).await?;

        Ok(MessagePage { records, total, limit: page.limit, offset: page.offset })
    }
}
