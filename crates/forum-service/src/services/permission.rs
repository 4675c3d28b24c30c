//! Permission gate
//!
//! Central place for every authorization question. The actor's role is
//! re-read from the database here rather than trusted from the session
//! token, so demotions and bans take effect immediately.

use forum_core::entities::User;
use forum_core::{Role, Snowflake};
use tracing::instrument;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Message returned when a non-admin attempts a role change
pub const ROLE_CHANGE_FORBIDDEN: &str = "Only administrators can change user roles";

/// Permission service
pub struct PermissionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PermissionService<'a> {
    /// Create a new PermissionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load the acting user, failing with `NotAuthenticated` when the
    /// account no longer exists or has been anonymized
    #[instrument(skip(self))]
    pub async fn resolve_actor(&self, actor_id: Snowflake) -> ServiceResult<User> {
        let actor = self
            .ctx
            .user_repo()
            .find_by_id(actor_id)
            .await?
            .ok_or(ServiceError::NotAuthenticated)?;

        if actor.is_deleted() {
            return Err(ServiceError::NotAuthenticated);
        }

        Ok(actor)
    }

    /// Require the actor to be a moderator or admin
    #[instrument(skip(self))]
    pub async fn require_moderator(&self, actor_id: Snowflake) -> ServiceResult<User> {
        let actor = self.resolve_actor(actor_id).await?;
        if !actor.role.is_staff() {
            return Err(ServiceError::not_authorized(
                "Moderator permissions required",
            ));
        }
        Ok(actor)
    }

    /// Require the actor to be an admin
    #[instrument(skip(self))]
    pub async fn require_admin(&self, actor_id: Snowflake) -> ServiceResult<User> {
        let actor = self.resolve_actor(actor_id).await?;
        if actor.role != Role::Admin {
            return Err(ServiceError::not_authorized("Admin permissions required"));
        }
        Ok(actor)
    }

    /// The escalation predicate: an actor may act on a target of strictly
    /// lower rank only
    pub fn can_act_on(actor: &User, target: &User) -> bool {
        actor.role.can_moderate(target.role)
    }

    /// Require that the actor may moderate the target
    pub fn require_can_act_on(actor: &User, target: &User) -> ServiceResult<()> {
        if Self::can_act_on(actor, target) {
            Ok(())
        } else {
            Err(ServiceError::not_authorized(format!(
                "You cannot moderate {}",
                target.username
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use forum_core::Snowflake;

    fn user_with_role(id: i64, role: Role) -> User {
        let now = Utc::now();
        User {
            id: Snowflake::new(id),
            username: format!("user{id}"),
            email: None,
            discord_id: Some(id.to_string()),
            avatar: None,
            role,
            is_banned: false,
            ban_reason: None,
            banned_until: None,
            is_muted: false,
            muted_until: None,
            warning_count: 0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn test_escalation_predicate() {
        let admin = user_with_role(1, Role::Admin);
        let moderator = user_with_role(2, Role::Moderator);
        let other_moderator = user_with_role(3, Role::Moderator);
        let user = user_with_role(4, Role::User);

        // Nobody may act on an admin, not even another admin
        assert!(!PermissionService::can_act_on(&moderator, &admin));
        assert!(!PermissionService::can_act_on(&admin, &admin));

        // Admins may act on moderators; moderators may not act on each other
        assert!(PermissionService::can_act_on(&admin, &moderator));
        assert!(!PermissionService::can_act_on(&moderator, &other_moderator));

        // Staff may act on plain users; plain users act on nobody
        assert!(PermissionService::can_act_on(&moderator, &user));
        assert!(!PermissionService::can_act_on(&user, &user));
    }

    #[test]
    fn test_require_can_act_on_error_is_not_authorized() {
        let moderator = user_with_role(1, Role::Moderator);
        let admin = user_with_role(2, Role::Admin);
        let err = PermissionService::require_can_act_on(&moderator, &admin).unwrap_err();
        assert_eq!(err.error_code(), "NOT_AUTHORIZED");
    }
}
