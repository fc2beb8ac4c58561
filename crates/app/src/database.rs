//! Database connection management

use sqlx::{PgPool, Postgres, Row, Transaction, migrate::MigrateError, postgres::PgRow};

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction.
    ///
    /// Every service operation runs inside exactly one transaction; dropping it without
    /// calling `commit` rolls back everything written through it.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction fails.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Apply the bundled schema migrations.
///
/// # Errors
///
/// Returns an error if any migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Read a non-negative integer column into a `u32`.
pub(crate) fn try_get_count(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let value: i32 = row.try_get(col)?;

    u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Convert a count into the `INTEGER` representation used for binding.
pub(crate) fn count_to_i32(value: u32, col: &str) -> Result<i32, sqlx::Error> {
    i32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
