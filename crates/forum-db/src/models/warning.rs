//! Warning database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for warnings table
#[derive(Debug, Clone, FromRow)]
pub struct WarningModel {
    pub id: i64,
    pub user_id: i64,
    pub reason: String,
    pub issued_by: i64,
    pub issued_at: DateTime<Utc>,
}
