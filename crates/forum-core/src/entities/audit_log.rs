//! Audit log entity - immutable record of one moderation action
//!
//! Entries are append-only: no update or delete path exists anywhere in the
//! codebase, by contract.

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

use crate::value_objects::{AuditAction, EntityRef, Snowflake};

/// One immutable audit record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogEntry {
    pub id: Snowflake,
    pub action: AuditAction,
    pub entity: EntityRef,
    /// Action-specific structured payload (e.g. ban reason and duration)
    pub details: JsonValue,
    pub performed_by: Snowflake,
    pub performed_at: DateTime<Utc>,
    pub metadata: Option<JsonValue>,
}

impl AuditLogEntry {
    /// Create a new entry stamped with the current time
    pub fn new(
        id: Snowflake,
        action: AuditAction,
        entity: EntityRef,
        details: JsonValue,
        performed_by: Snowflake,
    ) -> Self {
        Self {
            id,
            action,
            entity,
            details,
            performed_by,
            performed_at: Utc::now(),
            metadata: None,
        }
    }

    /// Attach optional free-form metadata
    pub fn with_metadata(mut self, metadata: JsonValue) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
