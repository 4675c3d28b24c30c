//! Audit service
//!
//! Writes the immutable moderation audit log and serves the filtered,
//! paginated reader. The write side is monitored rather than transactional:
//! a failed append is logged at WARN and never fails the moderation
//! operation that triggered it.

use std::collections::HashMap;

use serde_json::Value as JsonValue;
use tracing::{instrument, warn};

use forum_core::entities::{AuditLogEntry, User};
use forum_core::traits::AuditLogFilter;
use forum_core::{AuditAction, EntityRef, Snowflake};

use crate::dto::{AuditActorResponse, AuditEntryResponse, AuditLogQuery, AuditPageResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Label shown when the touched entity no longer exists
const UNKNOWN_LABEL: &str = "Unknown";

/// Maximum characters of post content shown as an entity label
const POST_LABEL_LEN: usize = 80;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 100;

/// Audit service
pub struct AuditService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuditService<'a> {
    /// Create a new AuditService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Append one audit entry for a completed moderation action
    ///
    /// `metadata` carries optional context beyond the action details, such
    /// as the value a setting write overwrote.
    ///
    /// Failures are logged and swallowed: the parent operation has already
    /// committed and must not be rolled back or failed by log trouble.
    #[instrument(skip(self, details, metadata))]
    pub async fn record(
        &self,
        action: AuditAction,
        entity: EntityRef,
        details: JsonValue,
        performed_by: Snowflake,
        metadata: Option<JsonValue>,
    ) {
        let mut entry = AuditLogEntry::new(
            self.ctx.generate_id(),
            action,
            entity,
            details,
            performed_by,
        );
        if let Some(metadata) = metadata {
            entry = entry.with_metadata(metadata);
        }

        if let Err(err) = self.ctx.audit_repo().append(&entry).await {
            warn!(
                action = %action,
                entity = %entity,
                performed_by = %performed_by,
                error = %err,
                "failed to append audit entry"
            );
        }
    }

    /// One filtered, enriched page of the audit log
    ///
    /// Restricted to moderators and admins; unauthorized callers receive an
    /// empty page flagged `authorized: false` instead of an error.
    #[instrument(skip(self, query))]
    pub async fn search(
        &self,
        actor_id: Snowflake,
        query: &AuditLogQuery,
        page: i64,
        limit: i64,
    ) -> ServiceResult<AuditPageResponse> {
        let page = page.max(1);
        let limit = if limit <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            limit.min(MAX_PAGE_SIZE)
        };

        let permissions = PermissionService::new(self.ctx);
        match permissions.require_moderator(actor_id).await {
            Ok(_) => {}
            Err(ServiceError::NotAuthenticated | ServiceError::NotAuthorized(_)) => {
                return Ok(AuditPageResponse::unauthorized(page, limit));
            }
            Err(err) => return Err(err),
        }

        let filter = Self::build_filter(query)?;
        let offset = (page - 1) * limit;

        let entries = self.ctx.audit_repo().search(&filter, offset, limit).await?;
        let total = self.ctx.audit_repo().count(&filter).await?;

        let mut actor_cache: HashMap<Snowflake, Option<User>> = HashMap::new();
        let mut enriched = Vec::with_capacity(entries.len());
        for entry in &entries {
            enriched.push(self.enrich(entry, &mut actor_cache).await?);
        }

        let total_pages = (total + limit - 1) / limit;
        Ok(AuditPageResponse {
            authorized: true,
            entries: enriched,
            page,
            limit,
            total,
            total_pages,
        })
    }

    /// Translate the query DTO into a repository filter
    fn build_filter(query: &AuditLogQuery) -> ServiceResult<AuditLogFilter> {
        let entity_id = match &query.entity_id {
            Some(raw) => Some(
                Snowflake::parse(raw)
                    .map_err(|_| ServiceError::validation("Invalid entity_id"))?,
            ),
            None => None,
        };
        let performed_by = match &query.performed_by {
            Some(raw) => Some(
                Snowflake::parse(raw)
                    .map_err(|_| ServiceError::validation("Invalid performed_by"))?,
            ),
            None => None,
        };
        let action = match &query.action {
            Some(raw) => Some(
                AuditAction::parse(raw)
                    .ok_or_else(|| ServiceError::validation(format!("Unknown action: {raw}")))?,
            ),
            None => None,
        };

        Ok(AuditLogFilter {
            entity_type: query.entity_type.clone(),
            entity_id,
            action,
            performed_by,
            start: query.start,
            end: query.end,
        })
    }

    /// Attach the actor projection and a best-effort entity label
    async fn enrich(
        &self,
        entry: &AuditLogEntry,
        actor_cache: &mut HashMap<Snowflake, Option<User>>,
    ) -> ServiceResult<AuditEntryResponse> {
        let performed_by = match actor_cache.get(&entry.performed_by) {
            Some(cached) => cached.as_ref().map(AuditActorResponse::from),
            None => {
                let actor = self.ctx.user_repo().find_by_id(entry.performed_by).await?;
                let projection = actor.as_ref().map(AuditActorResponse::from);
                actor_cache.insert(entry.performed_by, actor);
                projection
            }
        };

        let entity_label = self.entity_label(entry.entity).await;

        Ok(AuditEntryResponse {
            id: entry.id.to_string(),
            action: entry.action.as_str().to_string(),
            entity_type: entry.entity.kind().to_string(),
            entity_id: entry.entity.id().to_string(),
            entity_label,
            details: entry.details.clone(),
            performed_by,
            performed_at: entry.performed_at,
            metadata: entry.metadata.clone(),
        })
    }

    /// Human-readable label for the touched entity
    ///
    /// Lookup failures degrade to "Unknown": the log must stay readable even
    /// when the entity was deleted after the action.
    async fn entity_label(&self, entity: EntityRef) -> String {
        let label = match entity {
            EntityRef::User(id) => self
                .ctx
                .user_repo()
                .find_by_id(id)
                .await
                .ok()
                .flatten()
                .map(|user| user.username),
            EntityRef::Thread(id) => self
                .ctx
                .thread_repo()
                .find_by_id(id)
                .await
                .ok()
                .flatten()
                .map(|thread| thread.title),
            EntityRef::Post(id) => self
                .ctx
                .post_repo()
                .find_by_id(id)
                .await
                .ok()
                .flatten()
                .map(|post| truncate_label(&post.raw_content)),
            EntityRef::Category(id) => self
                .ctx
                .category_repo()
                .find_by_id(id)
                .await
                .ok()
                .flatten()
                .map(|category| category.name.en),
        };
        label.unwrap_or_else(|| UNKNOWN_LABEL.to_string())
    }
}

/// Truncate post content to a short label, on char boundaries
fn truncate_label(content: &str) -> String {
    if content.chars().count() <= POST_LABEL_LEN {
        content.to_string()
    } else {
        let truncated: String = content.chars().take(POST_LABEL_LEN).collect();
        format!("{truncated}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_label_char_boundaries() {
        let short = "Hallo Welt";
        assert_eq!(truncate_label(short), "Hallo Welt");

        let long = "ä".repeat(200);
        let label = truncate_label(&long);
        assert_eq!(label.chars().count(), POST_LABEL_LEN + 1);
        assert!(label.ends_with('…'));
    }

    #[test]
    fn test_build_filter_rejects_unknown_action() {
        let query = AuditLogQuery {
            action: Some("user_promoted".to_string()),
            ..Default::default()
        };
        let err = AuditService::build_filter(&query).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_build_filter_parses_ids() {
        let query = AuditLogQuery {
            entity_type: Some("thread".to_string()),
            entity_id: Some("12345".to_string()),
            action: Some("thread_pinned".to_string()),
            ..Default::default()
        };
        let filter = AuditService::build_filter(&query).unwrap();
        assert_eq!(filter.entity_id, Some(Snowflake::new(12345)));
        assert_eq!(filter.action, Some(AuditAction::ThreadPinned));
    }
}
