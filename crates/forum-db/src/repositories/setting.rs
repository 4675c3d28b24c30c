//! PostgreSQL implementation of SettingRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use forum_core::entities::SiteSetting;
use forum_core::error::DomainError;
use forum_core::traits::{RepoResult, SettingRepository};

use crate::mappers::setting_from_model;
use crate::models::SiteSettingModel;

use super::error::map_db_error;

/// PostgreSQL implementation of SettingRepository
#[derive(Clone)]
pub struct PgSettingRepository {
    pool: PgPool,
}

impl PgSettingRepository {
    /// Create a new PgSettingRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingRepository for PgSettingRepository {
    #[instrument(skip(self))]
    async fn find_by_key(&self, key: &str) -> RepoResult<Option<SiteSetting>> {
        let result = sqlx::query_as::<_, SiteSettingModel>(
            r"
            SELECT key, value, scope, updated_at
            FROM site_settings
            WHERE key = $1
            ",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(setting_from_model).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, scope: Option<&str>) -> RepoResult<Vec<SiteSetting>> {
        let rows = match scope {
            Some(scope) => {
                sqlx::query_as::<_, SiteSettingModel>(
                    r"
                    SELECT key, value, scope, updated_at
                    FROM site_settings
                    WHERE scope = $1
                    ORDER BY key ASC
                    ",
                )
                .bind(scope)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, SiteSettingModel>(
                    r"
                    SELECT key, value, scope, updated_at
                    FROM site_settings
                    ORDER BY key ASC
                    ",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        rows.into_iter().map(setting_from_model).collect()
    }

    #[instrument(skip(self, setting), fields(key = %setting.key))]
    async fn upsert(&self, setting: &SiteSetting) -> RepoResult<()> {
        let value = serde_json::to_value(&setting.value)
            .map_err(|e| DomainError::InternalError(e.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO site_settings (key, value, scope, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (key) DO UPDATE
            SET value = EXCLUDED.value, scope = EXCLUDED.scope, updated_at = NOW()
            ",
        )
        .bind(&setting.key)
        .bind(value)
        .bind(setting.scope.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM site_settings WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgSettingRepository>();
    }
}
