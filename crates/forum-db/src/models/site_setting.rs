//! Site setting database model

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// Database model for site_settings table
#[derive(Debug, Clone, FromRow)]
pub struct SiteSettingModel {
    pub key: String,
    /// Either a JSON string or a bilingual object
    pub value: JsonValue,
    /// Visibility scope: "public" or "admin"
    pub scope: String,
    pub updated_at: DateTime<Utc>,
}
