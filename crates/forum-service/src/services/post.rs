//! Post service
//!
//! Post editing and likes. Post deletion is a moderation concern and lives
//! in the moderation service.

use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use forum_core::Snowflake;

use crate::dto::{LikeResponse, PostResponse, UpdatePostRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Edit a post; authors may only edit their own
    #[instrument(skip(self, request))]
    pub async fn update_post(
        &self,
        actor_id: Snowflake,
        post_id: Snowflake,
        request: UpdatePostRequest,
    ) -> ServiceResult<PostResponse> {
        request
            .validate()
            .map_err(|err| ServiceError::validation(err.to_string()))?;

        let actor = PermissionService::new(self.ctx)
            .resolve_actor(actor_id)
            .await?;

        let now = Utc::now();
        if actor.ban_in_effect(now) {
            return Err(ServiceError::invalid_state("You are banned"));
        }
        if actor.mute_in_effect(now) {
            return Err(ServiceError::invalid_state("You are muted"));
        }

        let mut post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        if post.author_id != actor.id {
            return Err(ServiceError::not_authorized(
                "You can only edit your own posts",
            ));
        }

        post.set_content(request.content.clone(), request.content);
        self.ctx.post_repo().update(&post).await?;

        let thread_route = format!("threads/{}", post.thread_id);
        self.ctx.page_cache().mark_stale(&thread_route).await.ok();

        info!(post_id = %post_id, "post edited");

        let like_count = self.ctx.post_repo().like_count(post_id).await?;
        Ok(PostResponse::from_parts(&post, Some(&actor), like_count))
    }

    /// Like a post; liking twice is a no-op
    #[instrument(skip(self))]
    pub async fn like_post(
        &self,
        actor_id: Snowflake,
        post_id: Snowflake,
    ) -> ServiceResult<LikeResponse> {
        PermissionService::new(self.ctx)
            .resolve_actor(actor_id)
            .await?;

        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        let changed = self.ctx.post_repo().add_like(post_id, actor_id).await?;
        let like_count = self.ctx.post_repo().like_count(post_id).await?;
        Ok(LikeResponse { changed, like_count })
    }

    /// Remove a like; removing a non-existent like is a no-op
    #[instrument(skip(self))]
    pub async fn unlike_post(
        &self,
        actor_id: Snowflake,
        post_id: Snowflake,
    ) -> ServiceResult<LikeResponse> {
        PermissionService::new(self.ctx)
            .resolve_actor(actor_id)
            .await?;

        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        let changed = self.ctx.post_repo().remove_like(post_id, actor_id).await?;
        let like_count = self.ctx.post_repo().like_count(post_id).await?;
        Ok(LikeResponse { changed, like_count })
    }
}
