use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;

pub mod message_repo;
pub mod records;

pub type DbPool = Pool<Sqlite>;

/// Initializes the database connection pool.
///
/// WAL journal mode keeps readers from blocking the writer, and the busy
/// timeout makes concurrent same-key inserts wait out lock contention instead
/// of failing spuriously.
///
/// # Errors
/// Returns `sqlx::Error` if the URL is invalid or the connection fails.
pub async fn init_pool(database_url: &str, busy_timeout: Duration) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(busy_timeout);

    SqlitePoolOptions::new().max_connections(5).connect_with(options).await
}

/// Applies the embedded migrations. Create-if-absent only.
///
/// # Errors
/// Returns `MigrateError` if a migration fails to apply.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}
