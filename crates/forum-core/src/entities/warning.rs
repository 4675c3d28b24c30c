//! Warning entity - a non-blocking moderation note on a user's record

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::Snowflake;

/// A single warning issued against a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub reason: String,
    pub issued_by: Snowflake,
    pub issued_at: DateTime<Utc>,
}

impl Warning {
    /// Create a new Warning
    pub fn new(id: Snowflake, user_id: Snowflake, reason: String, issued_by: Snowflake) -> Self {
        Self {
            id,
            user_id,
            reason,
            issued_by,
            issued_at: Utc::now(),
        }
    }
}
