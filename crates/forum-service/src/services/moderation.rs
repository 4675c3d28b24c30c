//! Moderation service
//!
//! Every operation follows the same sequence: permission check, load the
//! target (404 when missing), escalation check for user targets, mutate,
//! persist, invalidate cached pages, append the audit entry, respond.
//! The audit append runs after the mutation has committed and cannot fail
//! the operation.

use chrono::Utc;
use serde_json::json;
use tracing::{info, instrument};

use forum_core::entities::Warning;
use forum_core::{AuditAction, EntityRef, Role, Snowflake};

use crate::dto::ModerationOutcome;

use super::audit::AuditService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::{PermissionService, ROLE_CHANGE_FORBIDDEN};

/// Moderation service
pub struct ModerationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ModerationService<'a> {
    /// Create a new ModerationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // ========================================================================
    // Thread moderation
    // ========================================================================

    /// Pin or unpin a thread
    ///
    /// Setting the current state again still succeeds and is still logged.
    #[instrument(skip(self))]
    pub async fn set_thread_pinned(
        &self,
        actor_id: Snowflake,
        thread_id: Snowflake,
        pinned: bool,
    ) -> ServiceResult<ModerationOutcome> {
        let actor = PermissionService::new(self.ctx)
            .require_moderator(actor_id)
            .await?;

        let mut thread = self
            .ctx
            .thread_repo()
            .find_by_id(thread_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Thread", thread_id.to_string()))?;

        thread.set_pinned(pinned);
        self.ctx.thread_repo().update(&thread).await?;

        self.invalidate_thread_pages(&thread.category_id, &thread_id)
            .await;

        let action = if pinned {
            AuditAction::ThreadPinned
        } else {
            AuditAction::ThreadUnpinned
        };
        AuditService::new(self.ctx)
            .record(
                action,
                EntityRef::Thread(thread_id),
                json!({ "pinned": pinned }),
                actor.id,
                None,
            )
            .await;

        info!(thread_id = %thread_id, pinned, "thread pin flag set");
        Ok(ModerationOutcome::ok(if pinned {
            "Thread pinned"
        } else {
            "Thread unpinned"
        }))
    }

    /// Lock or unlock a thread
    ///
    /// Locked threads reject new replies but stay readable.
    #[instrument(skip(self))]
    pub async fn set_thread_locked(
        &self,
        actor_id: Snowflake,
        thread_id: Snowflake,
        locked: bool,
    ) -> ServiceResult<ModerationOutcome> {
        let actor = PermissionService::new(self.ctx)
            .require_moderator(actor_id)
            .await?;

        let mut thread = self
            .ctx
            .thread_repo()
            .find_by_id(thread_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Thread", thread_id.to_string()))?;

        thread.set_locked(locked);
        self.ctx.thread_repo().update(&thread).await?;

        self.invalidate_thread_pages(&thread.category_id, &thread_id)
            .await;

        let action = if locked {
            AuditAction::ThreadLocked
        } else {
            AuditAction::ThreadUnlocked
        };
        AuditService::new(self.ctx)
            .record(
                action,
                EntityRef::Thread(thread_id),
                json!({ "locked": locked }),
                actor.id,
                None,
            )
            .await;

        info!(thread_id = %thread_id, locked, "thread lock flag set");
        Ok(ModerationOutcome::ok(if locked {
            "Thread locked"
        } else {
            "Thread unlocked"
        }))
    }

    /// Delete a thread and all of its posts
    #[instrument(skip(self))]
    pub async fn delete_thread(
        &self,
        actor_id: Snowflake,
        thread_id: Snowflake,
    ) -> ServiceResult<ModerationOutcome> {
        let actor = PermissionService::new(self.ctx)
            .require_moderator(actor_id)
            .await?;

        let thread = self
            .ctx
            .thread_repo()
            .find_by_id(thread_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Thread", thread_id.to_string()))?;

        let posts_removed = self.ctx.thread_repo().delete_cascade(thread_id).await?;

        self.invalidate_thread_pages(&thread.category_id, &thread_id)
            .await;

        AuditService::new(self.ctx)
            .record(
                AuditAction::ThreadDeleted,
                EntityRef::Thread(thread_id),
                json!({ "title": thread.title, "posts_removed": posts_removed }),
                actor.id,
                None,
            )
            .await;

        info!(thread_id = %thread_id, posts_removed, "thread deleted");
        Ok(ModerationOutcome::ok(format!(
            "Thread deleted ({posts_removed} posts removed)"
        )))
    }

    /// Delete a single post
    ///
    /// The thread's first post is the thread's content and cannot be deleted
    /// on its own.
    #[instrument(skip(self))]
    pub async fn delete_post(
        &self,
        actor_id: Snowflake,
        post_id: Snowflake,
    ) -> ServiceResult<ModerationOutcome> {
        let actor = PermissionService::new(self.ctx)
            .require_moderator(actor_id)
            .await?;

        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        let first_post = self.ctx.post_repo().first_post_id(post.thread_id).await?;
        if first_post == Some(post_id) {
            return Err(ServiceError::invalid_state(
                "The first post of a thread cannot be deleted; delete the thread instead",
            ));
        }

        self.ctx.post_repo().delete(post_id).await?;

        if let Ok(Some(thread)) = self.ctx.thread_repo().find_by_id(post.thread_id).await {
            self.invalidate_thread_pages(&thread.category_id, &thread.id)
                .await;
        }

        AuditService::new(self.ctx)
            .record(
                AuditAction::PostDeleted,
                EntityRef::Post(post_id),
                json!({ "thread_id": post.thread_id.to_string() }),
                actor.id,
                None,
            )
            .await;

        info!(post_id = %post_id, "post deleted");
        Ok(ModerationOutcome::ok("Post deleted"))
    }

    // ========================================================================
    // User moderation
    // ========================================================================

    /// Ban a user; `duration_secs` of None means permanent
    #[instrument(skip(self, reason))]
    pub async fn ban_user(
        &self,
        actor_id: Snowflake,
        target_id: Snowflake,
        reason: String,
        duration_secs: Option<i64>,
    ) -> ServiceResult<ModerationOutcome> {
        if let Some(secs) = duration_secs {
            if secs <= 0 {
                return Err(ServiceError::validation(
                    "Ban duration must be a positive number of seconds",
                ));
            }
        }

        let (actor, mut target) = self.load_actor_and_target(actor_id, target_id).await?;

        target.ban(reason.clone(), duration_secs);
        self.ctx.user_repo().update(&target).await?;

        // Kill active sessions so the ban takes effect immediately. Session
        // storage trouble must not fail the ban itself.
        self.ctx
            .refresh_token_store()
            .revoke_all_for_user(target_id)
            .await
            .ok();

        AuditService::new(self.ctx)
            .record(
                AuditAction::UserBanned,
                EntityRef::User(target_id),
                json!({
                    "reason": reason,
                    "duration_secs": duration_secs,
                    "banned_until": target.banned_until,
                }),
                actor.id,
                None,
            )
            .await;

        info!(target_id = %target_id, permanent = duration_secs.is_none(), "user banned");
        Ok(ModerationOutcome::ok(format!(
            "{} banned",
            target.username
        )))
    }

    /// Lift a ban; fails when the user is not banned
    #[instrument(skip(self))]
    pub async fn unban_user(
        &self,
        actor_id: Snowflake,
        target_id: Snowflake,
    ) -> ServiceResult<ModerationOutcome> {
        let (actor, mut target) = self.load_actor_and_target(actor_id, target_id).await?;

        if !target.is_banned {
            return Err(ServiceError::invalid_state("User is not banned"));
        }

        target.unban();
        self.ctx.user_repo().update(&target).await?;

        AuditService::new(self.ctx)
            .record(
                AuditAction::UserUnbanned,
                EntityRef::User(target_id),
                json!({}),
                actor.id,
                None,
            )
            .await;

        info!(target_id = %target_id, "user unbanned");
        Ok(ModerationOutcome::ok(format!(
            "{} unbanned",
            target.username
        )))
    }

    /// Mute a user; the duration is mandatory
    ///
    /// The reason is recorded in the audit entry only, not on the user row.
    #[instrument(skip(self, reason))]
    pub async fn mute_user(
        &self,
        actor_id: Snowflake,
        target_id: Snowflake,
        reason: String,
        duration_secs: i64,
    ) -> ServiceResult<ModerationOutcome> {
        if duration_secs <= 0 {
            return Err(ServiceError::validation(
                "Mute duration must be a positive number of seconds",
            ));
        }

        let (actor, mut target) = self.load_actor_and_target(actor_id, target_id).await?;

        target.mute(duration_secs);
        self.ctx.user_repo().update(&target).await?;

        AuditService::new(self.ctx)
            .record(
                AuditAction::UserMuted,
                EntityRef::User(target_id),
                json!({
                    "reason": reason,
                    "duration_secs": duration_secs,
                    "muted_until": target.muted_until,
                }),
                actor.id,
                None,
            )
            .await;

        info!(target_id = %target_id, duration_secs, "user muted");
        Ok(ModerationOutcome::ok(format!("{} muted", target.username)))
    }

    /// Lift a mute; fails when the user is not muted
    #[instrument(skip(self))]
    pub async fn unmute_user(
        &self,
        actor_id: Snowflake,
        target_id: Snowflake,
    ) -> ServiceResult<ModerationOutcome> {
        let (actor, mut target) = self.load_actor_and_target(actor_id, target_id).await?;

        if !target.is_muted {
            return Err(ServiceError::invalid_state("User is not muted"));
        }

        target.unmute();
        self.ctx.user_repo().update(&target).await?;

        AuditService::new(self.ctx)
            .record(
                AuditAction::UserUnmuted,
                EntityRef::User(target_id),
                json!({}),
                actor.id,
                None,
            )
            .await;

        info!(target_id = %target_id, "user unmuted");
        Ok(ModerationOutcome::ok(format!(
            "{} unmuted",
            target.username
        )))
    }

    /// Issue a warning
    ///
    /// The warning count on the user row is recomputed from the stored
    /// warnings, so it always equals the number of warning rows.
    #[instrument(skip(self, reason))]
    pub async fn warn_user(
        &self,
        actor_id: Snowflake,
        target_id: Snowflake,
        reason: String,
    ) -> ServiceResult<ModerationOutcome> {
        let (actor, mut target) = self.load_actor_and_target(actor_id, target_id).await?;

        let warning = Warning::new(self.ctx.generate_id(), target_id, reason.clone(), actor.id);
        self.ctx.warning_repo().create(&warning).await?;

        let warning_count = self.ctx.warning_repo().count_by_user(target_id).await?;
        target.warning_count = warning_count as i32;
        target.updated_at = Utc::now();
        self.ctx.user_repo().update(&target).await?;

        AuditService::new(self.ctx)
            .record(
                AuditAction::UserWarned,
                EntityRef::User(target_id),
                json!({ "reason": reason, "warning_count": warning_count }),
                actor.id,
                None,
            )
            .await;

        info!(target_id = %target_id, warning_count, "user warned");
        Ok(ModerationOutcome::ok(format!(
            "{} warned ({} warnings on record)",
            target.username, warning_count
        )))
    }

    /// Change a user's role; admins only, self-change rejected
    #[instrument(skip(self))]
    pub async fn change_role(
        &self,
        actor_id: Snowflake,
        target_id: Snowflake,
        role: &str,
    ) -> ServiceResult<ModerationOutcome> {
        let permissions = PermissionService::new(self.ctx);
        let actor = permissions.resolve_actor(actor_id).await?;
        if actor.role != Role::Admin {
            return Err(ServiceError::not_authorized(ROLE_CHANGE_FORBIDDEN));
        }

        if actor_id == target_id {
            return Err(ServiceError::invalid_state(
                "You cannot change your own role",
            ));
        }

        let new_role: Role = role
            .parse()
            .map_err(|_| ServiceError::validation(format!("Unknown role: {role}")))?;

        let mut target = self
            .ctx
            .user_repo()
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", target_id.to_string()))?;

        PermissionService::require_can_act_on(&actor, &target)?;

        let previous_role = target.role;
        target.set_role(new_role);
        self.ctx.user_repo().update(&target).await?;

        AuditService::new(self.ctx)
            .record(
                AuditAction::RoleChanged,
                EntityRef::User(target_id),
                json!({
                    "from": previous_role.as_str(),
                    "to": new_role.as_str(),
                }),
                actor.id,
                None,
            )
            .await;

        info!(target_id = %target_id, role = new_role.as_str(), "role changed");
        Ok(ModerationOutcome::ok(format!(
            "{} is now {}",
            target.username,
            new_role.as_str()
        )))
    }

    // ========================================================================
    // Shared steps
    // ========================================================================

    /// Resolve the moderator and the target user, applying the escalation
    /// predicate
    async fn load_actor_and_target(
        &self,
        actor_id: Snowflake,
        target_id: Snowflake,
    ) -> ServiceResult<(forum_core::entities::User, forum_core::entities::User)> {
        let actor = PermissionService::new(self.ctx)
            .require_moderator(actor_id)
            .await?;

        let target = self
            .ctx
            .user_repo()
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", target_id.to_string()))?;

        PermissionService::require_can_act_on(&actor, &target)?;

        Ok((actor, target))
    }

    /// Mark the category listing and the thread page stale
    ///
    /// Cache trouble never fails a moderation action.
    async fn invalidate_thread_pages(&self, category_id: &Snowflake, thread_id: &Snowflake) {
        let category_route = format!("categories/{category_id}");
        let thread_route = format!("threads/{thread_id}");
        self.ctx
            .page_cache()
            .mark_stale_many(&[&category_route, &thread_route])
            .await
            .ok();
    }
}
