//! PostgreSQL implementation of WarningRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use forum_core::entities::Warning;
use forum_core::traits::{RepoResult, WarningRepository};
use forum_core::value_objects::Snowflake;

use crate::models::WarningModel;

use super::error::map_db_error;

/// PostgreSQL implementation of WarningRepository
#[derive(Clone)]
pub struct PgWarningRepository {
    pool: PgPool,
}

impl PgWarningRepository {
    /// Create a new PgWarningRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WarningRepository for PgWarningRepository {
    #[instrument(skip(self, warning), fields(warning_id = %warning.id, user_id = %warning.user_id))]
    async fn create(&self, warning: &Warning) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO warnings (id, user_id, reason, issued_by, issued_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(warning.id.into_inner())
        .bind(warning.user_id.into_inner())
        .bind(&warning.reason)
        .bind(warning.issued_by.into_inner())
        .bind(warning.issued_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Warning>> {
        let rows = sqlx::query_as::<_, WarningModel>(
            r"
            SELECT id, user_id, reason, issued_by, issued_at
            FROM warnings
            WHERE user_id = $1
            ORDER BY issued_at DESC, id DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Warning::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_by_user(&self, user_id: Snowflake) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM warnings WHERE user_id = $1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }
}
