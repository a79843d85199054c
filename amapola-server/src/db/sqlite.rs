//! SQLite backend, used for local development and the test suite

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::{create_sqlite_pool, migrations, DbError, EntityStore};

/// Entity store backed by a SQLite pool
#[derive(Clone)]
pub struct SqliteStore {
    pub(crate) pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fresh in-memory database with the schema applied.
    pub async fn in_memory() -> Result<Self, DbError> {
        let pool = create_sqlite_pool("sqlite::memory:", 1).await?;
        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl EntityStore for SqliteStore {
    async fn migrate(&self) -> Result<(), DbError> {
        migrations::run_sqlite(&self.pool).await
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}
