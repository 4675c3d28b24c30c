//! User service
//!
//! Public profiles, the current-user view, the staff-only warning history,
//! and self-service account deletion (anonymization).

use tracing::{info, instrument};

use forum_core::Snowflake;

use crate::dto::{CurrentUserResponse, UserResponse, WarningResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Public profile
    ///
    /// Anonymized accounts are served as-is; they already carry the
    /// placeholder name and no personal data.
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;
        Ok(UserResponse::from(&user))
    }

    /// The authenticated user's own account view
    #[instrument(skip(self))]
    pub async fn get_current_user(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let user = PermissionService::new(self.ctx)
            .resolve_actor(user_id)
            .await?;
        Ok(CurrentUserResponse::from(&user))
    }

    /// A user's warning history, newest first; staff only
    #[instrument(skip(self))]
    pub async fn list_warnings(
        &self,
        actor_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<WarningResponse>> {
        PermissionService::new(self.ctx)
            .require_moderator(actor_id)
            .await?;

        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let warnings = self.ctx.warning_repo().find_by_user(user_id).await?;
        Ok(warnings.iter().map(WarningResponse::from).collect())
    }

    /// Self-service account deletion
    ///
    /// The row is anonymized in place so authored threads and posts keep a
    /// valid author reference; there is no hard delete.
    #[instrument(skip(self))]
    pub async fn delete_own_account(&self, user_id: Snowflake) -> ServiceResult<()> {
        PermissionService::new(self.ctx)
            .resolve_actor(user_id)
            .await?;

        self.ctx.user_repo().anonymize(user_id).await?;

        // Active sessions die with the account; session storage trouble
        // must not fail the deletion
        self.ctx
            .refresh_token_store()
            .revoke_all_for_user(user_id)
            .await
            .ok();

        info!(user_id = %user_id, "account anonymized");
        Ok(())
    }
}
