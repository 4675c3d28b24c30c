//! Settings service
//!
//! Branding and customization key/value pairs. Anonymous visitors read the
//! public scope; the full list and all writes are admin only.
//!
//! Settings are keyed by string, not by id, so their audit entries reference
//! the acting admin and carry the key in the details payload.

use serde_json::json;
use tracing::{info, instrument};
use validator::Validate;

use forum_core::entities::{SettingScope, SettingValue, SiteSetting};
use forum_core::{AuditAction, EntityRef, Snowflake};

use crate::dto::{SettingResponse, UpsertSettingRequest};

use super::audit::AuditService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Settings service
pub struct SettingsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SettingsService<'a> {
    /// Create a new SettingsService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All public-scope settings; served to anonymous visitors
    #[instrument(skip(self))]
    pub async fn public_settings(&self) -> ServiceResult<Vec<SettingResponse>> {
        let settings = self
            .ctx
            .setting_repo()
            .list(Some(SettingScope::Public.as_str()))
            .await?;
        Ok(settings.iter().map(SettingResponse::from).collect())
    }

    /// All settings regardless of scope; admin only
    #[instrument(skip(self))]
    pub async fn list_all(&self, actor_id: Snowflake) -> ServiceResult<Vec<SettingResponse>> {
        PermissionService::new(self.ctx)
            .require_admin(actor_id)
            .await?;

        let settings = self.ctx.setting_repo().list(None).await?;
        Ok(settings.iter().map(SettingResponse::from).collect())
    }

    /// Insert or replace a setting; admin only
    #[instrument(skip(self, request))]
    pub async fn upsert_setting(
        &self,
        actor_id: Snowflake,
        request: UpsertSettingRequest,
    ) -> ServiceResult<SettingResponse> {
        request
            .validate()
            .map_err(|err| ServiceError::validation(err.to_string()))?;

        let actor = PermissionService::new(self.ctx)
            .require_admin(actor_id)
            .await?;

        let scope = match request.scope.as_deref() {
            None => SettingScope::Public,
            Some(raw) => SettingScope::parse(raw)
                .ok_or_else(|| ServiceError::validation(format!("Unknown scope: {raw}")))?,
        };

        let value: SettingValue = serde_json::from_value(request.value).map_err(|_| {
            ServiceError::validation("Setting value must be a string or an {en, de} object")
        })?;

        // The overwritten value, if any, goes into the audit metadata
        let previous = self.ctx.setting_repo().find_by_key(&request.key).await?;

        let setting = SiteSetting::new(request.key.clone(), value, scope);
        self.ctx.setting_repo().upsert(&setting).await?;

        self.ctx.page_cache().mark_stale("settings").await.ok();

        AuditService::new(self.ctx)
            .record(
                AuditAction::SettingUpdated,
                EntityRef::User(actor.id),
                json!({ "key": setting.key, "scope": scope.as_str() }),
                actor.id,
                previous.map(|p| json!({ "previous_value": p.value })),
            )
            .await;

        info!(key = %setting.key, scope = scope.as_str(), "setting upserted");
        Ok(SettingResponse::from(&setting))
    }

    /// Delete a setting; admin only, 404 when the key does not exist
    #[instrument(skip(self))]
    pub async fn delete_setting(&self, actor_id: Snowflake, key: &str) -> ServiceResult<()> {
        let actor = PermissionService::new(self.ctx)
            .require_admin(actor_id)
            .await?;

        let removed = self.ctx.setting_repo().delete(key).await?;
        if !removed {
            return Err(ServiceError::not_found("Setting", key.to_string()));
        }

        self.ctx.page_cache().mark_stale("settings").await.ok();

        AuditService::new(self.ctx)
            .record(
                AuditAction::SettingDeleted,
                EntityRef::User(actor.id),
                json!({ "key": key }),
                actor.id,
                None,
            )
            .await;

        info!(key = %key, "setting deleted");
        Ok(())
    }
}
