//! Audit log database model

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// Database model for audit_logs table
///
/// Append-only: there are no UPDATE or DELETE statements against this table
/// anywhere in the codebase.
#[derive(Debug, Clone, FromRow)]
pub struct AuditLogModel {
    pub id: i64,
    /// Action identifier, e.g. "user_banned"
    pub action: String,
    /// Entity discriminator: "user", "thread", "post" or "category"
    pub entity_type: String,
    pub entity_id: i64,
    /// Action-specific structured payload
    pub details: JsonValue,
    pub performed_by: i64,
    pub performed_at: DateTime<Utc>,
    pub metadata: Option<JsonValue>,
}
