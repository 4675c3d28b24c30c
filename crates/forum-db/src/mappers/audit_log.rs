//! Audit log entity <-> model mapper

use forum_core::entities::AuditLogEntry;
use forum_core::error::DomainError;
use forum_core::traits::RepoResult;
use forum_core::value_objects::{AuditAction, EntityRef, Snowflake};

use crate::models::AuditLogModel;

/// Convert a stored audit row into the domain entry
///
/// Fails when the stored action or entity discriminator is not one the
/// closed enums know about.
pub fn audit_entry_from_model(model: AuditLogModel) -> RepoResult<AuditLogEntry> {
    let action = AuditAction::parse(&model.action).ok_or_else(|| {
        DomainError::InternalError(format!("unknown audit action in row {}: {}", model.id, model.action))
    })?;

    let entity = EntityRef::from_parts(&model.entity_type, Snowflake::new(model.entity_id))
        .ok_or_else(|| {
            DomainError::InternalError(format!(
                "unknown audit entity type in row {}: {}",
                model.id, model.entity_type
            ))
        })?;

    Ok(AuditLogEntry {
        id: Snowflake::new(model.id),
        action,
        entity,
        details: model.details,
        performed_by: Snowflake::new(model.performed_by),
        performed_at: model.performed_at,
        metadata: model.metadata,
    })
}
