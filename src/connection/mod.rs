pub(crate) mod builder;
pub(crate) mod database;

pub use builder::Builder;
pub use database::Database;

pub(self) type ConnectionResult<T> = std::result::Result<T, turso::Error>;

/// A single database connection
///
/// Thin wrapper over `turso::Connection`. Explicit driver transactions are not
/// exposed: turso 0.3 panics in its WAL layer when a write transaction is
/// opened without a read transaction, so every statement runs in the driver's
/// autocommit scope.
#[derive(Debug, Clone)]
pub struct Connection {
    inner: turso::Connection,
}

impl Connection {
    fn new(inner: turso::Connection) -> Self {
        Self { inner }
    }

    pub async fn query(&self, sql: &str, params: impl turso::IntoParams) -> turso::Result<turso::Rows> {
        self.inner.query(sql, params).await
    }

    pub async fn execute(&self, sql: &str, params: impl turso::IntoParams) -> turso::Result<u64> {
        self.inner.execute(sql, params).await
    }

    pub async fn execute_batch(&self, sql: &str) -> turso::Result<()> {
        self.inner.execute_batch(sql).await
    }

    pub async fn prepare(&self, sql: &str) -> turso::Result<turso::Statement> {
        self.inner.prepare(sql).await
    }

    pub fn last_insert_rowid(&self) -> i64 {
        self.inner.last_insert_rowid()
    }

    pub fn is_autocommit(&self) -> turso::Result<bool> {
        self.inner.is_autocommit()
    }

    pub fn busy_timeout(&self, duration: std::time::Duration) -> turso::Result<()> {
        self.inner.busy_timeout(duration)
    }
}
