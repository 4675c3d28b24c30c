//! Thread service
//!
//! Thread creation, category listings, thread pages with view dedup, and
//! replies. A thread's first post is created together with the thread in
//! one transaction; the thread row itself carries no content.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use forum_core::entities::{Post, Thread, User};
use forum_core::Snowflake;

use crate::dto::{
    CreatePostRequest, CreateThreadRequest, PagedResponse, PostResponse, ThreadDetailResponse,
    ThreadSummaryResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

/// Thread service
pub struct ThreadService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ThreadService<'a> {
    /// Create a new ThreadService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a thread; the submitted content becomes the first post
    #[instrument(skip(self, request))]
    pub async fn create_thread(
        &self,
        author_id: Snowflake,
        request: CreateThreadRequest,
    ) -> ServiceResult<ThreadDetailResponse> {
        request
            .validate()
            .map_err(|err| ServiceError::validation(err.to_string()))?;

        let author = self.resolve_posting_author(author_id).await?;

        let category_id = Snowflake::parse(&request.category_id)
            .map_err(|_| ServiceError::validation("Invalid category_id"))?;
        self.ctx
            .category_repo()
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Category", category_id.to_string()))?;

        let thread = Thread::new(
            self.ctx.generate_id(),
            request.title,
            author.id,
            category_id,
        );
        let first_post = Post::new(
            self.ctx.generate_id(),
            thread.id,
            author.id,
            request.content.clone(),
            request.content,
        );

        self.ctx
            .thread_repo()
            .create_with_first_post(&thread, &first_post)
            .await?;

        let category_route = format!("categories/{category_id}");
        self.ctx.page_cache().mark_stale(&category_route).await.ok();

        info!(thread_id = %thread.id, category_id = %category_id, "thread created");

        let post = PostResponse::from_parts(&first_post, Some(&author), 0);
        let posts = PagedResponse::new(vec![post], 1, DEFAULT_PAGE_SIZE, 1);
        Ok(ThreadDetailResponse::from_parts(
            &thread,
            Some(&author),
            posts,
        ))
    }

    /// One page of a category's threads: pinned first, then most recent
    /// activity
    #[instrument(skip(self))]
    pub async fn list_by_category(
        &self,
        category_id: Snowflake,
        page: i64,
        limit: i64,
    ) -> ServiceResult<PagedResponse<ThreadSummaryResponse>> {
        let (page, limit) = clamp_page(page, limit);

        self.ctx
            .category_repo()
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Category", category_id.to_string()))?;

        let offset = (page - 1) * limit;
        let threads = self
            .ctx
            .thread_repo()
            .find_by_category(category_id, offset, limit)
            .await?;
        let total = self.ctx.thread_repo().count_by_category(category_id).await?;

        let mut author_cache: HashMap<Snowflake, Option<User>> = HashMap::new();
        let mut summaries = Vec::with_capacity(threads.len());
        for thread in &threads {
            let author = self.resolve_cached(thread.author_id, &mut author_cache).await?;
            let post_count = self.ctx.post_repo().count_by_thread(thread.id).await?;
            // The first post is the thread content, not a reply
            let reply_count = (post_count - 1).max(0);
            summaries.push(ThreadSummaryResponse::from_parts(
                thread,
                author.as_ref(),
                reply_count,
            ));
        }

        Ok(PagedResponse::new(summaries, page, limit, total))
    }

    /// Fetch a thread with one page of posts
    ///
    /// A signed-in viewer's visit is recorded; the view counter increments
    /// only on the viewer's first visit.
    #[instrument(skip(self))]
    pub async fn get_thread(
        &self,
        thread_id: Snowflake,
        viewer_id: Option<Snowflake>,
        page: i64,
        limit: i64,
    ) -> ServiceResult<ThreadDetailResponse> {
        let (page, limit) = clamp_page(page, limit);

        let mut thread = self
            .ctx
            .thread_repo()
            .find_by_id(thread_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Thread", thread_id.to_string()))?;

        if let Some(viewer_id) = viewer_id {
            // View bookkeeping is best-effort and never fails the fetch
            if let Ok(true) = self.ctx.thread_repo().record_view(thread_id, viewer_id).await {
                thread.views += 1;
            }
        }

        let offset = (page - 1) * limit;
        let posts = self
            .ctx
            .post_repo()
            .find_by_thread(thread_id, offset, limit)
            .await?;
        let total = self.ctx.post_repo().count_by_thread(thread_id).await?;

        let mut author_cache: HashMap<Snowflake, Option<User>> = HashMap::new();
        let mut responses = Vec::with_capacity(posts.len());
        for post in &posts {
            let author = self.resolve_cached(post.author_id, &mut author_cache).await?;
            let like_count = self.ctx.post_repo().like_count(post.id).await?;
            responses.push(PostResponse::from_parts(post, author.as_ref(), like_count));
        }

        let thread_author = self.resolve_cached(thread.author_id, &mut author_cache).await?;
        let posts_page = PagedResponse::new(responses, page, limit, total);
        Ok(ThreadDetailResponse::from_parts(
            &thread,
            thread_author.as_ref(),
            posts_page,
        ))
    }

    /// Reply to a thread
    ///
    /// Rejected when the thread is locked or the author is banned or muted.
    #[instrument(skip(self, request))]
    pub async fn reply(
        &self,
        author_id: Snowflake,
        thread_id: Snowflake,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        request
            .validate()
            .map_err(|err| ServiceError::validation(err.to_string()))?;

        let author = self.resolve_posting_author(author_id).await?;

        let mut thread = self
            .ctx
            .thread_repo()
            .find_by_id(thread_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Thread", thread_id.to_string()))?;

        if thread.is_locked {
            return Err(ServiceError::invalid_state("Thread is locked"));
        }

        let post = Post::new(
            self.ctx.generate_id(),
            thread_id,
            author.id,
            request.content.clone(),
            request.content,
        );
        self.ctx.post_repo().create(&post).await?;

        thread.touch_last_post();
        self.ctx.thread_repo().update(&thread).await?;

        let category_route = format!("categories/{}", thread.category_id);
        let thread_route = format!("threads/{thread_id}");
        self.ctx
            .page_cache()
            .mark_stale_many(&[&category_route, &thread_route])
            .await
            .ok();

        info!(thread_id = %thread_id, post_id = %post.id, "reply created");
        Ok(PostResponse::from_parts(&post, Some(&author), 0))
    }

    /// Resolve an author who is about to write content
    ///
    /// Banned and muted users cannot post; expired bans and mutes no longer
    /// block even when the flag has not been cleared yet.
    async fn resolve_posting_author(&self, author_id: Snowflake) -> ServiceResult<User> {
        let author = PermissionService::new(self.ctx)
            .resolve_actor(author_id)
            .await?;

        let now = Utc::now();
        if author.ban_in_effect(now) {
            return Err(ServiceError::invalid_state("You are banned"));
        }
        if author.mute_in_effect(now) {
            return Err(ServiceError::invalid_state("You are muted"));
        }

        Ok(author)
    }

    async fn resolve_cached(
        &self,
        user_id: Snowflake,
        cache: &mut HashMap<Snowflake, Option<User>>,
    ) -> ServiceResult<Option<User>> {
        if let Some(cached) = cache.get(&user_id) {
            return Ok(cached.clone());
        }
        let user = self.ctx.user_repo().find_by_id(user_id).await?;
        cache.insert(user_id, user.clone());
        Ok(user)
    }
}

fn clamp_page(page: i64, limit: i64) -> (i64, i64) {
    let page = page.max(1);
    let limit = if limit <= 0 {
        DEFAULT_PAGE_SIZE
    } else {
        limit.min(MAX_PAGE_SIZE)
    };
    (page, limit)
}
