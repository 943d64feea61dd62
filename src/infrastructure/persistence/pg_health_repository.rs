//! PostgreSQL liveness probe.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::HealthRepository;
use crate::error::AppError;

/// Checks the connection pool with a trivial query.
pub struct PgHealthRepository {
    pool: Arc<PgPool>,
}

impl PgHealthRepository {
    /// Creates a new probe over a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthRepository for PgHealthRepository {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
