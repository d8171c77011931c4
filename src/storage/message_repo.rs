use crate::domain::message::{MessageFilter, NewMessage};
use crate::error::Result;
use crate::storage::DbPool;
use crate::storage::records::message::{MessageRecord, SenderCountRecord};
use sqlx::{QueryBuilder, Sqlite};

/// Result of an idempotent insert attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Created,
    Duplicate,
}

#[derive(Clone, Debug)]
pub struct MessageRepository {
    pool: DbPool,
}

impl MessageRepository {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Attempts to insert a message row, relying on the PRIMARY KEY constraint
    /// for atomicity under concurrent same-key inserts. A unique violation is
    /// consumed here and reported as `Duplicate`; the existing row is never
    /// touched.
    ///
    /// # Errors
    /// Returns `AppError::Database` for any failure other than a unique
    /// violation on `message_id`.
    pub async fn insert(&self, message: &NewMessage, received_at: &str) -> Result<InsertOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO messages (message_id, from_address, to_address, ts, text, received_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&message.message_id)
        .bind(&message.from_address)
        .bind(&message.to_address)
        .bind(&message.timestamp)
        .bind(&message.text)
        .bind(received_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Created),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(InsertOutcome::Duplicate),
            Err(e) => Err(e.into()),
        }
    }

    /// Counts rows matching the filter, independent of pagination.
    ///
    /// # Errors
    /// Returns `AppError::Database` on query failure.
    pub async fn count(&self, filter: &MessageFilter) -> Result<i64> {
        let mut query = QueryBuilder::new("SELECT COUNT(*) FROM messages");
        push_filters(&mut query, filter);

        let total: i64 = query.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(total)
    }

    /// Fetches one page of rows matching the filter, in the canonical
    /// `(ts, message_id)` ascending order.
    ///
    /// # Errors
    /// Returns `AppError::Database` on query failure.
    pub async fn list(&self, filter: &MessageFilter, limit: i64, offset: i64) -> Result<Vec<MessageRecord>> {
        let mut query = QueryBuilder::new(
            "SELECT message_id, from_address, to_address, ts, text, received_at FROM messages",
        );
        push_filters(&mut query, filter);
        query.push(" ORDER BY ts ASC, message_id ASC LIMIT ").push_bind(limit).push(" OFFSET ").push_bind(offset);

        let records = query.build_query_as::<MessageRecord>().fetch_all(&self.pool).await?;
        Ok(records)
    }

    /// # Errors
    /// Returns `AppError::Database` on query failure.
    pub async fn count_all(&self) -> Result<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages").fetch_one(&self.pool).await?;
        Ok(total)
    }

    /// # Errors
    /// Returns `AppError::Database` on query failure.
    pub async fn count_distinct_senders(&self) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(DISTINCT from_address) FROM messages").fetch_one(&self.pool).await?;
        Ok(count)
    }

    /// Senders ordered by message count descending. Ordering between senders
    /// with equal counts is unspecified.
    ///
    /// # Errors
    /// Returns `AppError::Database` on query failure.
    pub async fn top_senders(&self, limit: i64) -> Result<Vec<SenderCountRecord>> {
        let senders = sqlx::query_as::<_, SenderCountRecord>(
            r#"
            SELECT from_address, COUNT(*) AS message_count
            FROM messages
            GROUP BY from_address
            ORDER BY message_count DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(senders)
    }

    /// Minimum and maximum message timestamp, both `None` when the table is
    /// empty.
    ///
    /// # Errors
    /// Returns `AppError::Database` on query failure.
    pub async fn timestamp_range(&self) -> Result<(Option<String>, Option<String>)> {
        let range: (Option<String>, Option<String>) =
            sqlx::query_as("SELECT MIN(ts), MAX(ts) FROM messages").fetch_one(&self.pool).await?;
        Ok(range)
    }
}

/// Appends the conjunctive WHERE clauses shared by `count` and `list`, so the
/// two queries can never disagree on what matches.
fn push_filters(query: &mut QueryBuilder<'_, Sqlite>, filter: &MessageFilter) {
    query.push(" WHERE 1 = 1");
    if let Some(from_address) = &filter.from_address {
        query.push(" AND from_address = ").push_bind(from_address.clone());
    }
    if let Some(since) = &filter.since {
        query.push(" AND ts >= ").push_bind(since.clone());
    }
    if let Some(q) = &filter.q {
        // SQLite LIKE is case-insensitive for ASCII; NULL text never matches.
        query.push(" AND text LIKE ").push_bind(format!("%{q}%"));
    }
}
