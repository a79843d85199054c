//! PostgreSQL backend

use async_trait::async_trait;
use sqlx::PgPool;

use super::{migrations, DbError, EntityStore};

/// Entity store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pub(crate) pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl EntityStore for PgStore {
    async fn migrate(&self) -> Result<(), DbError> {
        migrations::run_postgres(&self.pool).await
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
