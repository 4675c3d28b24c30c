//! Forum CRUD, audit reader, and auth tests against in-memory repositories

mod support;

use forum_core::traits::ThreadRepository;
use forum_core::{Role, Snowflake};
use forum_service::{
    AuditService, AuthService, CategoryService, ModerationService, PostService, SettingsService,
    ThreadService, UserService,
};
use serde_json::json;

use forum_service::dto::{
    AuditLogQuery, CreateCategoryRequest, CreatePostRequest, CreateThreadRequest,
    DiscordLoginRequest, RefreshTokenRequest, ReorderCategoriesRequest, UpdatePostRequest,
    UpsertSettingRequest,
};

use support::{seed_category, seed_thread, user_with_role, world};

const ALICE: i64 = 1;
const BOB: i64 = 2;
const MOD_ID: i64 = 10;
const ADMIN_ID: i64 = 12;

fn seed_people(w: &support::TestWorld) {
    w.users.insert(user_with_role(ALICE, "alice", Role::User));
    w.users.insert(user_with_role(BOB, "bob", Role::User));
    w.users.insert(user_with_role(MOD_ID, "mod", Role::Moderator));
    w.users.insert(user_with_role(ADMIN_ID, "admin", Role::Admin));
}

// ============================================================================
// Threads and posts
// ============================================================================

#[tokio::test]
async fn create_thread_creates_first_post() {
    let w = world();
    seed_people(&w);
    seed_category(&w, 1, "general");

    let detail = ThreadService::new(&w.ctx)
        .create_thread(
            Snowflake::new(ALICE),
            CreateThreadRequest {
                title: "Welcome aboard".to_string(),
                category_id: "1".to_string(),
                content: "hello everyone".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(detail.title, "Welcome aboard");
    assert_eq!(detail.posts.data.len(), 1);
    assert_eq!(detail.posts.data[0].raw_content, "hello everyone");

    let thread_id = Snowflake::parse(&detail.id).unwrap();
    assert!(w.threads.get(thread_id).is_some());
    let first = w
        .posts
        .get(Snowflake::parse(&detail.posts.data[0].id).unwrap())
        .unwrap();
    assert_eq!(first.thread_id, thread_id);
}

#[tokio::test]
async fn locked_thread_rejects_replies() {
    let w = world();
    seed_people(&w);
    seed_category(&w, 1, "general");
    let (thread, _) = seed_thread(&w, 100, 1, ALICE, 0);

    ModerationService::new(&w.ctx)
        .set_thread_locked(Snowflake::new(MOD_ID), thread.id, true)
        .await
        .unwrap();

    let err = ThreadService::new(&w.ctx)
        .reply(
            Snowflake::new(BOB),
            thread.id,
            CreatePostRequest {
                content: "too late".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_STATE");
    assert_eq!(err.to_string(), "Thread is locked");
}

#[tokio::test]
async fn banned_and_muted_authors_cannot_post() {
    let w = world();
    seed_people(&w);
    seed_category(&w, 1, "general");
    let (thread, _) = seed_thread(&w, 100, 1, ALICE, 0);

    let moderation = ModerationService::new(&w.ctx);
    moderation
        .ban_user(Snowflake::new(MOD_ID), Snowflake::new(ALICE), "spam".to_string(), None)
        .await
        .unwrap();
    moderation
        .mute_user(Snowflake::new(MOD_ID), Snowflake::new(BOB), "noise".to_string(), 600)
        .await
        .unwrap();

    let threads = ThreadService::new(&w.ctx);
    let err = threads
        .create_thread(
            Snowflake::new(ALICE),
            CreateThreadRequest {
                title: "New thread".to_string(),
                category_id: "1".to_string(),
                content: "hi".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "You are banned");

    let err = threads
        .reply(
            Snowflake::new(BOB),
            thread.id,
            CreatePostRequest {
                content: "hi".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "You are muted");
}

#[tokio::test]
async fn view_counter_deduplicates_per_user() {
    let w = world();
    seed_people(&w);
    seed_category(&w, 1, "general");
    let (thread, _) = seed_thread(&w, 100, 1, ALICE, 0);

    let service = ThreadService::new(&w.ctx);
    let viewer = Some(Snowflake::new(BOB));

    let first = service.get_thread(thread.id, viewer, 1, 20).await.unwrap();
    assert_eq!(first.views, 1);
    let second = service.get_thread(thread.id, viewer, 1, 20).await.unwrap();
    assert_eq!(second.views, 1);

    // A different signed-in viewer increments once more
    let third = service
        .get_thread(thread.id, Some(Snowflake::new(ALICE)), 1, 20)
        .await
        .unwrap();
    assert_eq!(third.views, 2);
}

#[tokio::test]
async fn reply_bumps_last_post_timestamp() {
    let w = world();
    seed_people(&w);
    seed_category(&w, 1, "general");
    let (thread, _) = seed_thread(&w, 100, 1, ALICE, 0);
    let before = w.threads.get(thread.id).unwrap().last_post_at;

    ThreadService::new(&w.ctx)
        .reply(
            Snowflake::new(BOB),
            thread.id,
            CreatePostRequest {
                content: "bump".to_string(),
            },
        )
        .await
        .unwrap();

    assert!(w.threads.get(thread.id).unwrap().last_post_at >= before);
}

#[tokio::test]
async fn listing_orders_pinned_first() {
    let w = world();
    seed_people(&w);
    seed_category(&w, 1, "general");
    let (older, _) = seed_thread(&w, 100, 1, ALICE, 0);
    let (newer, _) = seed_thread(&w, 101, 1, ALICE, 0);

    ModerationService::new(&w.ctx)
        .set_thread_pinned(Snowflake::new(MOD_ID), older.id, true)
        .await
        .unwrap();

    let page = ThreadService::new(&w.ctx)
        .list_by_category(Snowflake::new(1), 1, 20)
        .await
        .unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.data[0].id, older.id.to_string());
    assert!(page.data[0].is_pinned);
    assert_eq!(page.data[1].id, newer.id.to_string());
}

#[tokio::test]
async fn authors_may_only_edit_their_own_posts() {
    let w = world();
    seed_people(&w);
    seed_category(&w, 1, "general");
    let (_, post_ids) = seed_thread(&w, 100, 1, ALICE, 0);

    let service = PostService::new(&w.ctx);

    let err = service
        .update_post(
            Snowflake::new(BOB),
            post_ids[0],
            UpdatePostRequest {
                content: "hijacked".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "NOT_AUTHORIZED");

    let updated = service
        .update_post(
            Snowflake::new(ALICE),
            post_ids[0],
            UpdatePostRequest {
                content: "edited".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.raw_content, "edited");
}

#[tokio::test]
async fn likes_are_deduplicated() {
    let w = world();
    seed_people(&w);
    seed_category(&w, 1, "general");
    let (_, post_ids) = seed_thread(&w, 100, 1, ALICE, 0);

    let service = PostService::new(&w.ctx);
    let bob = Snowflake::new(BOB);

    let first = service.like_post(bob, post_ids[0]).await.unwrap();
    assert!(first.changed);
    assert_eq!(first.like_count, 1);

    let second = service.like_post(bob, post_ids[0]).await.unwrap();
    assert!(!second.changed);
    assert_eq!(second.like_count, 1);

    let removed = service.unlike_post(bob, post_ids[0]).await.unwrap();
    assert!(removed.changed);
    assert_eq!(removed.like_count, 0);
}

// ============================================================================
// Categories
// ============================================================================

#[tokio::test]
async fn category_crud_is_admin_only_and_audited() {
    let w = world();
    seed_people(&w);

    let service = CategoryService::new(&w.ctx);
    let request = CreateCategoryRequest {
        name: forum_core::value_objects::LocalizedText::new("News", "Neuigkeiten"),
        description: forum_core::value_objects::LocalizedText::default(),
        slug: "news".to_string(),
        position: 0,
        color: Some("#ff8800".to_string()),
        icon: None,
    };

    let err = service
        .create_category(Snowflake::new(MOD_ID), request.clone())
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "NOT_AUTHORIZED");

    let created = service
        .create_category(Snowflake::new(ADMIN_ID), request.clone())
        .await
        .unwrap();
    assert_eq!(created.slug, "news");
    assert_eq!(created.name.de, "Neuigkeiten");

    // Duplicate slug is a state conflict, not a validation failure
    let err = service
        .create_category(Snowflake::new(ADMIN_ID), request)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_STATE");

    assert_eq!(w.audit.all().len(), 1);
}

#[tokio::test]
async fn invalid_slugs_are_rejected() {
    let w = world();
    seed_people(&w);

    let err = CategoryService::new(&w.ctx)
        .create_category(
            Snowflake::new(ADMIN_ID),
            CreateCategoryRequest {
                name: forum_core::value_objects::LocalizedText::english("Bad"),
                description: forum_core::value_objects::LocalizedText::default(),
                slug: "Has Space".to_string(),
                position: 0,
                color: None,
                icon: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn reorder_rewrites_positions() {
    let w = world();
    seed_people(&w);
    seed_category(&w, 1, "general");
    seed_category(&w, 2, "news");

    let listed = CategoryService::new(&w.ctx)
        .reorder_categories(
            Snowflake::new(ADMIN_ID),
            ReorderCategoriesRequest {
                positions: vec![
                    forum_service::dto::CategoryPosition {
                        id: "2".to_string(),
                        position: 0,
                    },
                    forum_service::dto::CategoryPosition {
                        id: "1".to_string(),
                        position: 1,
                    },
                ],
            },
        )
        .await
        .unwrap();

    assert_eq!(listed[0].slug, "news");
    assert_eq!(listed[1].slug, "general");
    assert_eq!(w.audit.all().len(), 1);
}

#[tokio::test]
async fn category_with_threads_cannot_be_deleted() {
    let w = world();
    seed_people(&w);
    seed_category(&w, 1, "general");
    seed_thread(&w, 100, 1, ALICE, 0);

    let err = CategoryService::new(&w.ctx)
        .delete_category(Snowflake::new(ADMIN_ID), Snowflake::new(1))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_STATE");
    assert!(w.categories.get(Snowflake::new(1)).is_some());
}

// ============================================================================
// Settings
// ============================================================================

#[tokio::test]
async fn settings_scopes_and_validation() {
    let w = world();
    seed_people(&w);

    let service = SettingsService::new(&w.ctx);
    let admin = Snowflake::new(ADMIN_ID);

    service
        .upsert_setting(
            admin,
            UpsertSettingRequest {
                key: "site_name".to_string(),
                value: json!({"en": "My Forum", "de": "Mein Forum"}),
                scope: None,
            },
        )
        .await
        .unwrap();
    service
        .upsert_setting(
            admin,
            UpsertSettingRequest {
                key: "maintenance_note".to_string(),
                value: json!("backstage only"),
                scope: Some("admin".to_string()),
            },
        )
        .await
        .unwrap();

    // Anonymous read sees only the public scope
    let public = service.public_settings().await.unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].key, "site_name");

    let all = service.list_all(admin).await.unwrap();
    assert_eq!(all.len(), 2);

    let err = service.list_all(Snowflake::new(ALICE)).await.unwrap_err();
    assert_eq!(err.error_code(), "NOT_AUTHORIZED");

    // Values must be a string or an {en, de} object
    let err = service
        .upsert_setting(
            admin,
            UpsertSettingRequest {
                key: "bad".to_string(),
                value: json!(42),
                scope: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");

    let err = service.delete_setting(admin, "missing").await.unwrap_err();
    assert_eq!(err.error_code(), "NOT_FOUND");

    service.delete_setting(admin, "site_name").await.unwrap();
    assert!(service.public_settings().await.unwrap().is_empty());
}

#[tokio::test]
async fn setting_overwrite_keeps_previous_value_in_audit_metadata() {
    let w = world();
    seed_people(&w);

    let service = SettingsService::new(&w.ctx);
    let admin = Snowflake::new(ADMIN_ID);

    service
        .upsert_setting(
            admin,
            UpsertSettingRequest {
                key: "site_name".to_string(),
                value: json!("Old Forum"),
                scope: None,
            },
        )
        .await
        .unwrap();
    service
        .upsert_setting(
            admin,
            UpsertSettingRequest {
                key: "site_name".to_string(),
                value: json!("New Forum"),
                scope: None,
            },
        )
        .await
        .unwrap();

    let entries = w.audit.all();
    assert_eq!(entries.len(), 2);

    // First write of a key has nothing overwritten
    assert!(entries[0].metadata.is_none());
    assert_eq!(
        entries[1].metadata,
        Some(json!({ "previous_value": "Old Forum" }))
    );
}

// ============================================================================
// Audit reader
// ============================================================================

#[tokio::test]
async fn audit_reader_requires_staff_and_enriches() {
    let w = world();
    seed_people(&w);
    seed_category(&w, 1, "general");
    let (thread, _) = seed_thread(&w, 100, 1, ALICE, 0);

    let moderation = ModerationService::new(&w.ctx);
    moderation
        .ban_user(Snowflake::new(MOD_ID), Snowflake::new(ALICE), "spam".to_string(), None)
        .await
        .unwrap();
    moderation
        .set_thread_pinned(Snowflake::new(MOD_ID), thread.id, true)
        .await
        .unwrap();

    let audit = AuditService::new(&w.ctx);

    // Plain users get an empty page with the rejection flag, not an error
    let rejected = audit
        .search(Snowflake::new(BOB), &AuditLogQuery::default(), 1, 20)
        .await
        .unwrap();
    assert!(!rejected.authorized);
    assert!(rejected.entries.is_empty());

    let page = audit
        .search(Snowflake::new(MOD_ID), &AuditLogQuery::default(), 1, 20)
        .await
        .unwrap();
    assert!(page.authorized);
    assert_eq!(page.total, 2);

    let ban_entry = page
        .entries
        .iter()
        .find(|e| e.action == "user_banned")
        .unwrap();
    assert_eq!(ban_entry.entity_label, "alice");
    let actor = ban_entry.performed_by.as_ref().unwrap();
    assert_eq!(actor.username, "mod");
    assert_eq!(actor.role, "moderator");

    // Filtering by action narrows the page
    let filtered = audit
        .search(
            Snowflake::new(MOD_ID),
            &AuditLogQuery {
                action: Some("thread_pinned".to_string()),
                ..Default::default()
            },
            1,
            20,
        )
        .await
        .unwrap();
    assert_eq!(filtered.total, 1);
    assert_eq!(filtered.entries[0].entity_label, "Thread 100");
}

#[tokio::test]
async fn audit_label_falls_back_to_unknown_for_deleted_entities() {
    let w = world();
    seed_people(&w);
    seed_category(&w, 1, "general");
    let (thread, _) = seed_thread(&w, 100, 1, ALICE, 0);

    ModerationService::new(&w.ctx)
        .set_thread_pinned(Snowflake::new(MOD_ID), thread.id, true)
        .await
        .unwrap();

    // The thread disappears after the action was logged
    w.threads.delete_cascade(thread.id).await.unwrap();

    let page = AuditService::new(&w.ctx)
        .search(Snowflake::new(MOD_ID), &AuditLogQuery::default(), 1, 20)
        .await
        .unwrap();
    assert_eq!(page.entries[0].entity_label, "Unknown");
}

// ============================================================================
// Users and auth
// ============================================================================

#[tokio::test]
async fn account_deletion_anonymizes_in_place() {
    let w = world();
    seed_people(&w);

    UserService::new(&w.ctx)
        .delete_own_account(Snowflake::new(ALICE))
        .await
        .unwrap();

    let ghost = w.users.get(Snowflake::new(ALICE)).unwrap();
    assert!(ghost.is_deleted());
    assert_eq!(ghost.username, forum_core::entities::ANONYMIZED_USERNAME);
    assert!(ghost.email.is_none());
    assert!(ghost.discord_id.is_none());

    // The profile stays resolvable for authored content
    let profile = UserService::new(&w.ctx)
        .get_user(Snowflake::new(ALICE))
        .await
        .unwrap();
    assert_eq!(profile.username, forum_core::entities::ANONYMIZED_USERNAME);
}

#[tokio::test]
async fn warning_history_is_staff_only() {
    let w = world();
    seed_people(&w);

    ModerationService::new(&w.ctx)
        .warn_user(Snowflake::new(MOD_ID), Snowflake::new(ALICE), "rude".to_string())
        .await
        .unwrap();

    let service = UserService::new(&w.ctx);
    let err = service
        .list_warnings(Snowflake::new(BOB), Snowflake::new(ALICE))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "NOT_AUTHORIZED");

    let warnings = service
        .list_warnings(Snowflake::new(MOD_ID), Snowflake::new(ALICE))
        .await
        .unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].reason, "rude");
}

#[tokio::test]
async fn banned_user_cannot_log_in() {
    let w = world();
    seed_people(&w);

    ModerationService::new(&w.ctx)
        .ban_user(
            Snowflake::new(MOD_ID),
            Snowflake::new(ALICE),
            "spam".to_string(),
            None,
        )
        .await
        .unwrap();

    let err = AuthService::new(&w.ctx)
        .login_with_discord(
            DiscordLoginRequest {
                discord_id: format!("discord-{ALICE}"),
                username: "alice".to_string(),
                email: Some("alice@example.com".to_string()),
                avatar: None,
            },
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "NOT_AUTHORIZED");
    assert_eq!(err.to_string(), "You are permanently banned: spam");
}

#[tokio::test]
async fn garbage_refresh_token_is_rejected() {
    let w = world();
    seed_people(&w);

    let err = AuthService::new(&w.ctx)
        .refresh(RefreshTokenRequest {
            refresh_token: "not-a-jwt".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "NOT_AUTHENTICATED");
}
