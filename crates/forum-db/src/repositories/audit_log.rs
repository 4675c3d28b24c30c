//! PostgreSQL implementation of AuditLogRepository
//!
//! Append-only by contract: this file contains the only INSERT against
//! audit_logs and there is no UPDATE or DELETE anywhere.

use async_trait::async_trait;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};
use tracing::instrument;

use forum_core::entities::AuditLogEntry;
use forum_core::traits::{AuditLogFilter, AuditLogRepository, RepoResult};

use crate::mappers::audit_entry_from_model;
use crate::models::AuditLogModel;

use super::error::map_db_error;

/// PostgreSQL implementation of AuditLogRepository
#[derive(Clone)]
pub struct PgAuditLogRepository {
    pool: PgPool,
}

impl PgAuditLogRepository {
    /// Create a new PgAuditLogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build the WHERE clause for a filter; returns the SQL fragment and the
    /// number of bound parameters
    fn filter_sql(filter: &AuditLogFilter) -> (String, usize) {
        let mut clauses = Vec::new();
        let mut n = 0;

        if filter.entity_type.is_some() {
            n += 1;
            clauses.push(format!("entity_type = ${n}"));
        }
        if filter.entity_id.is_some() {
            n += 1;
            clauses.push(format!("entity_id = ${n}"));
        }
        if filter.action.is_some() {
            n += 1;
            clauses.push(format!("action = ${n}"));
        }
        if filter.performed_by.is_some() {
            n += 1;
            clauses.push(format!("performed_by = ${n}"));
        }
        if filter.start.is_some() {
            n += 1;
            clauses.push(format!("performed_at >= ${n}"));
        }
        if filter.end.is_some() {
            n += 1;
            clauses.push(format!("performed_at <= ${n}"));
        }

        if clauses.is_empty() {
            (String::new(), 0)
        } else {
            (format!("WHERE {}", clauses.join(" AND ")), n)
        }
    }

    fn bind_filter<'q, O>(
        query: QueryAs<'q, Postgres, O, PgArguments>,
        filter: &'q AuditLogFilter,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        let mut query = query;
        if let Some(entity_type) = &filter.entity_type {
            query = query.bind(entity_type);
        }
        if let Some(entity_id) = filter.entity_id {
            query = query.bind(entity_id.into_inner());
        }
        if let Some(action) = filter.action {
            query = query.bind(action.as_str());
        }
        if let Some(performed_by) = filter.performed_by {
            query = query.bind(performed_by.into_inner());
        }
        if let Some(start) = filter.start {
            query = query.bind(start);
        }
        if let Some(end) = filter.end {
            query = query.bind(end);
        }
        query
    }
}

#[async_trait]
impl AuditLogRepository for PgAuditLogRepository {
    #[instrument(skip(self, entry), fields(entry_id = %entry.id, action = %entry.action))]
    async fn append(&self, entry: &AuditLogEntry) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO audit_logs (id, action, entity_type, entity_id, details,
                                    performed_by, performed_at, metadata)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(entry.id.into_inner())
        .bind(entry.action.as_str())
        .bind(entry.entity.kind())
        .bind(entry.entity.id().into_inner())
        .bind(&entry.details)
        .bind(entry.performed_by.into_inner())
        .bind(entry.performed_at)
        .bind(&entry.metadata)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, filter))]
    async fn search(
        &self,
        filter: &AuditLogFilter,
        offset: i64,
        limit: i64,
    ) -> RepoResult<Vec<AuditLogEntry>> {
        let (where_clause, n) = Self::filter_sql(filter);
        let sql = format!(
            r"
            SELECT id, action, entity_type, entity_id, details,
                   performed_by, performed_at, metadata
            FROM audit_logs
            {where_clause}
            ORDER BY performed_at DESC, id DESC
            OFFSET ${} LIMIT ${}
            ",
            n + 1,
            n + 2,
        );

        let query = sqlx::query_as::<_, AuditLogModel>(&sql);
        let rows = Self::bind_filter(query, filter)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(audit_entry_from_model).collect()
    }

    #[instrument(skip(self, filter))]
    async fn count(&self, filter: &AuditLogFilter) -> RepoResult<i64> {
        let (where_clause, _) = Self::filter_sql(filter);
        let sql = format!("SELECT COUNT(*) AS count FROM audit_logs {where_clause}");

        let query = sqlx::query_as::<_, (i64,)>(&sql);
        let (count,) = Self::bind_filter(query, filter)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(count)
    }
}
