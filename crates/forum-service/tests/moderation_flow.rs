//! Moderation workflow tests against in-memory repositories
//!
//! Covers the escalation rules, the idempotent and non-idempotent action
//! families, the first-post guard, and the one-audit-entry-per-success
//! contract.

mod support;

use chrono::Utc;
use forum_core::{AuditAction, EntityRef, Role, Snowflake};
use forum_service::ModerationService;

use support::{seed_category, seed_thread, user_with_role, world};

const MOD_ID: i64 = 10;
const OTHER_MOD_ID: i64 = 11;
const ADMIN_ID: i64 = 12;
const TARGET_ID: i64 = 20;

fn seed_staff(w: &support::TestWorld) {
    w.users.insert(user_with_role(MOD_ID, "mod", Role::Moderator));
    w.users
        .insert(user_with_role(OTHER_MOD_ID, "mod2", Role::Moderator));
    w.users.insert(user_with_role(ADMIN_ID, "admin", Role::Admin));
    w.users.insert(user_with_role(TARGET_ID, "target", Role::User));
}

#[tokio::test]
async fn no_moderation_op_succeeds_against_admin() {
    let w = world();
    seed_staff(&w);

    let service = ModerationService::new(&w.ctx);
    let admin = Snowflake::new(ADMIN_ID);

    // Not even an admin can act on another admin account
    let second_admin = user_with_role(13, "admin2", Role::Admin);
    w.users.insert(second_admin.clone());

    let attempts = [
        service
            .ban_user(Snowflake::new(MOD_ID), admin, "no".to_string(), None)
            .await,
        service
            .mute_user(Snowflake::new(MOD_ID), admin, "no".to_string(), 60)
            .await,
        service
            .warn_user(Snowflake::new(MOD_ID), admin, "no".to_string())
            .await,
        service
            .ban_user(second_admin.id, admin, "no".to_string(), None)
            .await,
    ];
    for outcome in attempts {
        let err = outcome.unwrap_err();
        assert_eq!(err.error_code(), "NOT_AUTHORIZED");
    }

    let untouched = w.users.get(admin).unwrap();
    assert!(!untouched.is_banned);
    assert!(!untouched.is_muted);
    assert_eq!(untouched.warning_count, 0);
    assert!(w.audit.all().is_empty());
}

#[tokio::test]
async fn escalation_moderator_vs_moderator_fails_admin_succeeds() {
    let w = world();
    seed_staff(&w);

    let service = ModerationService::new(&w.ctx);
    let other_mod = Snowflake::new(OTHER_MOD_ID);

    let err = service
        .ban_user(Snowflake::new(MOD_ID), other_mod, "feud".to_string(), None)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "NOT_AUTHORIZED");
    assert!(!w.users.get(other_mod).unwrap().is_banned);

    let outcome = service
        .ban_user(Snowflake::new(ADMIN_ID), other_mod, "valid".to_string(), None)
        .await
        .unwrap();
    assert!(outcome.success);
    assert!(w.users.get(other_mod).unwrap().is_banned);
}

#[tokio::test]
async fn pin_and_lock_are_idempotent_and_always_logged() {
    let w = world();
    seed_staff(&w);
    seed_category(&w, 1, "general");
    let (thread, _) = seed_thread(&w, 100, 1, TARGET_ID, 0);

    let service = ModerationService::new(&w.ctx);
    let actor = Snowflake::new(MOD_ID);

    let first = service.set_thread_pinned(actor, thread.id, true).await.unwrap();
    assert!(first.success);
    // Pinning an already pinned thread still succeeds
    let second = service.set_thread_pinned(actor, thread.id, true).await.unwrap();
    assert!(second.success);
    assert!(w.threads.get(thread.id).unwrap().is_pinned);

    let locked = service.set_thread_locked(actor, thread.id, true).await.unwrap();
    assert!(locked.success);
    let relocked = service.set_thread_locked(actor, thread.id, true).await.unwrap();
    assert!(relocked.success);

    // Every invocation is logged, including the redundant ones
    let entries = w.audit.all();
    assert_eq!(entries.len(), 4);
    assert_eq!(
        entries
            .iter()
            .filter(|e| e.action == AuditAction::ThreadPinned)
            .count(),
        2
    );
    assert_eq!(
        entries
            .iter()
            .filter(|e| e.action == AuditAction::ThreadLocked)
            .count(),
        2
    );
}

#[tokio::test]
async fn unban_and_unmute_fail_on_clean_target() {
    let w = world();
    seed_staff(&w);

    let service = ModerationService::new(&w.ctx);
    let actor = Snowflake::new(MOD_ID);
    let target = Snowflake::new(TARGET_ID);

    let err = service.unban_user(actor, target).await.unwrap_err();
    assert_eq!(err.error_code(), "INVALID_STATE");

    let err = service.unmute_user(actor, target).await.unwrap_err();
    assert_eq!(err.error_code(), "INVALID_STATE");

    assert!(w.audit.all().is_empty());
}

#[tokio::test]
async fn first_post_is_undeletable_others_are_not() {
    let w = world();
    seed_staff(&w);
    seed_category(&w, 1, "general");
    let (_, post_ids) = seed_thread(&w, 100, 1, TARGET_ID, 2);

    let service = ModerationService::new(&w.ctx);
    let actor = Snowflake::new(MOD_ID);

    let err = service.delete_post(actor, post_ids[0]).await.unwrap_err();
    assert_eq!(err.error_code(), "INVALID_STATE");
    assert!(err.to_string().contains("delete the thread instead"));
    assert!(w.posts.get(post_ids[0]).is_some());

    let outcome = service.delete_post(actor, post_ids[1]).await.unwrap();
    assert!(outcome.success);
    assert!(w.posts.get(post_ids[1]).is_none());

    // Only the successful deletion is logged
    let entries = w.audit.all();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, AuditAction::PostDeleted);
    assert_eq!(entries[0].entity, EntityRef::Post(post_ids[1]));
}

#[tokio::test]
async fn thread_deletion_removes_all_posts() {
    let w = world();
    seed_staff(&w);
    seed_category(&w, 1, "general");
    let (thread, post_ids) = seed_thread(&w, 100, 1, TARGET_ID, 4);
    assert_eq!(post_ids.len(), 5);

    let service = ModerationService::new(&w.ctx);
    let outcome = service
        .delete_thread(Snowflake::new(MOD_ID), thread.id)
        .await
        .unwrap();
    assert!(outcome.success);
    assert!(outcome.message.contains("5 posts removed"));

    assert!(w.threads.get(thread.id).is_none());
    for post_id in post_ids {
        assert!(w.posts.get(post_id).is_none());
    }
}

#[tokio::test]
async fn ban_scenario_sets_state_and_writes_one_entry() {
    let w = world();
    seed_staff(&w);

    let service = ModerationService::new(&w.ctx);
    let actor = Snowflake::new(MOD_ID);
    let target = Snowflake::new(TARGET_ID);

    let outcome = service
        .ban_user(actor, target, "spam".to_string(), Some(3600))
        .await
        .unwrap();
    assert!(outcome.success);

    let banned = w.users.get(target).unwrap();
    assert!(banned.is_banned);
    assert_eq!(banned.ban_reason.as_deref(), Some("spam"));
    let until = banned.banned_until.expect("timed ban has expiry");
    let delta = (until - Utc::now()).num_seconds();
    assert!((3590..=3600).contains(&delta));

    let entries = w.audit.all();
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.action, AuditAction::UserBanned);
    assert_eq!(entry.entity, EntityRef::User(target));
    assert_eq!(entry.performed_by, actor);
    assert_eq!(entry.details["reason"], "spam");
    assert_eq!(entry.details["duration_secs"], 3600);
}

#[tokio::test]
async fn permanent_ban_has_no_expiry() {
    let w = world();
    seed_staff(&w);

    ModerationService::new(&w.ctx)
        .ban_user(
            Snowflake::new(ADMIN_ID),
            Snowflake::new(TARGET_ID),
            "repeat offender".to_string(),
            None,
        )
        .await
        .unwrap();

    let banned = w.users.get(Snowflake::new(TARGET_ID)).unwrap();
    assert!(banned.is_banned);
    assert!(banned.banned_until.is_none());
    assert!(banned.ban_in_effect(Utc::now()));
}

#[tokio::test]
async fn mute_requires_positive_duration() {
    let w = world();
    seed_staff(&w);

    let service = ModerationService::new(&w.ctx);
    let err = service
        .mute_user(
            Snowflake::new(MOD_ID),
            Snowflake::new(TARGET_ID),
            "noise".to_string(),
            0,
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
    assert!(w.audit.all().is_empty());

    service
        .mute_user(
            Snowflake::new(MOD_ID),
            Snowflake::new(TARGET_ID),
            "noise".to_string(),
            600,
        )
        .await
        .unwrap();
    let muted = w.users.get(Snowflake::new(TARGET_ID)).unwrap();
    assert!(muted.is_muted);
    assert!(muted.muted_until.is_some());

    // The mute reason lives in the audit details, not on the user row
    let entries = w.audit.all();
    assert_eq!(entries[0].details["reason"], "noise");
}

#[tokio::test]
async fn role_change_by_moderator_fails_with_exact_message() {
    let w = world();
    seed_staff(&w);

    let service = ModerationService::new(&w.ctx);
    let err = service
        .change_role(Snowflake::new(MOD_ID), Snowflake::new(TARGET_ID), "admin")
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Only administrators can change user roles"
    );

    // No mutation, no audit entry
    assert_eq!(w.users.get(Snowflake::new(TARGET_ID)).unwrap().role, Role::User);
    assert!(w.audit.all().is_empty());
}

#[tokio::test]
async fn role_change_by_admin_succeeds_but_not_on_self() {
    let w = world();
    seed_staff(&w);

    let service = ModerationService::new(&w.ctx);
    let admin = Snowflake::new(ADMIN_ID);
    let target = Snowflake::new(TARGET_ID);

    let err = service.change_role(admin, admin, "user").await.unwrap_err();
    assert_eq!(err.error_code(), "INVALID_STATE");

    let outcome = service.change_role(admin, target, "moderator").await.unwrap();
    assert!(outcome.success);
    assert_eq!(w.users.get(target).unwrap().role, Role::Moderator);

    let entries = w.audit.all();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, AuditAction::RoleChanged);
    assert_eq!(entries[0].details["from"], "user");
    assert_eq!(entries[0].details["to"], "moderator");
}

#[tokio::test]
async fn warn_with_zero_priors_yields_count_one() {
    let w = world();
    seed_staff(&w);

    let service = ModerationService::new(&w.ctx);
    let target = Snowflake::new(TARGET_ID);

    let outcome = service
        .warn_user(Snowflake::new(MOD_ID), target, "first strike".to_string())
        .await
        .unwrap();
    assert!(outcome.success);

    let warned = w.users.get(target).unwrap();
    assert_eq!(warned.warning_count, 1);
    assert_eq!(w.warnings.all().len(), 1);
    assert_eq!(w.warnings.all()[0].reason, "first strike");

    let entries = w.audit.all();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, AuditAction::UserWarned);
    assert_eq!(entries[0].details["warning_count"], 1);
}

#[tokio::test]
async fn missing_target_is_not_found() {
    let w = world();
    seed_staff(&w);

    let err = ModerationService::new(&w.ctx)
        .ban_user(
            Snowflake::new(MOD_ID),
            Snowflake::new(9999),
            "ghost".to_string(),
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "NOT_FOUND");
}

#[tokio::test]
async fn plain_user_cannot_moderate() {
    let w = world();
    seed_staff(&w);
    let (thread, _) = {
        seed_category(&w, 1, "general");
        seed_thread(&w, 100, 1, TARGET_ID, 0)
    };

    let err = ModerationService::new(&w.ctx)
        .set_thread_pinned(Snowflake::new(TARGET_ID), thread.id, true)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "NOT_AUTHORIZED");
    assert!(!w.threads.get(thread.id).unwrap().is_pinned);
}
