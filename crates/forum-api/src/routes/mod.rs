//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{
    audit, auth, categories, health, moderation, posts, settings, threads, users,
};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(category_routes())
        .merge(thread_routes())
        .merge(post_routes())
        .merge(audit_routes())
        .merge(settings_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login/discord", post(auth::login_discord))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
}

/// User routes (profiles plus user-targeted moderation)
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me", get(users::get_current_user))
        .route("/users/@me", delete(users::delete_current_user))
        .route("/users/:user_id", get(users::get_user))
        .route("/users/:user_id/warnings", get(users::list_warnings))
        // Moderation actions against users
        .route("/users/:user_id/ban", post(moderation::ban_user))
        .route("/users/:user_id/unban", post(moderation::unban_user))
        .route("/users/:user_id/mute", post(moderation::mute_user))
        .route("/users/:user_id/unmute", post(moderation::unmute_user))
        .route("/users/:user_id/warn", post(moderation::warn_user))
        .route("/users/:user_id/role", patch(moderation::change_role))
}

/// Category routes
fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(categories::list_categories))
        .route("/categories", post(categories::create_category))
        .route("/categories/reorder", put(categories::reorder_categories))
        .route("/categories/slug/:slug", get(categories::get_category_by_slug))
        .route("/categories/:category_id", patch(categories::update_category))
        .route("/categories/:category_id", delete(categories::delete_category))
        .route("/categories/:category_id/threads", get(threads::list_threads))
}

/// Thread routes (reading, posting, and thread-targeted moderation)
fn thread_routes() -> Router<AppState> {
    Router::new()
        .route("/threads", post(threads::create_thread))
        .route("/threads/:thread_id", get(threads::get_thread))
        .route("/threads/:thread_id", delete(moderation::delete_thread))
        .route("/threads/:thread_id/posts", post(threads::create_reply))
        .route("/threads/:thread_id/pin", post(moderation::set_thread_pinned))
        .route("/threads/:thread_id/lock", post(moderation::set_thread_locked))
}

/// Post routes (editing, likes, and post-targeted moderation)
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts/:post_id", patch(posts::update_post))
        .route("/posts/:post_id", delete(moderation::delete_post))
        .route("/posts/:post_id/like", put(posts::like_post))
        .route("/posts/:post_id/like", delete(posts::unlike_post))
}

/// Audit log routes
fn audit_routes() -> Router<AppState> {
    Router::new().route("/audit-log", get(audit::search_audit_log))
}

/// Site settings routes
fn settings_routes() -> Router<AppState> {
    Router::new()
        .route("/settings", get(settings::public_settings))
        .route("/settings", put(settings::upsert_setting))
        .route("/settings/all", get(settings::list_all_settings))
        .route("/settings/:key", delete(settings::delete_setting))
}
