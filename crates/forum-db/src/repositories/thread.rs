//! PostgreSQL implementation of ThreadRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use forum_core::entities::{Post, Thread};
use forum_core::traits::{RepoResult, ThreadRepository};
use forum_core::value_objects::Snowflake;

use crate::models::ThreadModel;

use super::error::{map_db_error, thread_not_found};

/// PostgreSQL implementation of ThreadRepository
#[derive(Clone)]
pub struct PgThreadRepository {
    pool: PgPool,
}

impl PgThreadRepository {
    /// Create a new PgThreadRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ThreadRepository for PgThreadRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Thread>> {
        let result = sqlx::query_as::<_, ThreadModel>(
            r"
            SELECT id, title, author_id, category_id, is_pinned, is_locked,
                   views, last_post_at, created_at, updated_at
            FROM threads
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Thread::from))
    }

    #[instrument(skip(self))]
    async fn find_by_category(
        &self,
        category_id: Snowflake,
        offset: i64,
        limit: i64,
    ) -> RepoResult<Vec<Thread>> {
        let rows = sqlx::query_as::<_, ThreadModel>(
            r"
            SELECT id, title, author_id, category_id, is_pinned, is_locked,
                   views, last_post_at, created_at, updated_at
            FROM threads
            WHERE category_id = $1
            ORDER BY is_pinned DESC, last_post_at DESC
            OFFSET $2 LIMIT $3
            ",
        )
        .bind(category_id.into_inner())
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Thread::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_by_category(&self, category_id: Snowflake) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM threads WHERE category_id = $1
            ",
        )
        .bind(category_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self, thread, first_post), fields(thread_id = %thread.id))]
    async fn create_with_first_post(&self, thread: &Thread, first_post: &Post) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO threads (id, title, author_id, category_id, is_pinned, is_locked,
                                 views, last_post_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(thread.id.into_inner())
        .bind(&thread.title)
        .bind(thread.author_id.into_inner())
        .bind(thread.category_id.into_inner())
        .bind(thread.is_pinned)
        .bind(thread.is_locked)
        .bind(thread.views)
        .bind(thread.last_post_at)
        .bind(thread.created_at)
        .bind(thread.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO posts (id, thread_id, author_id, content, raw_content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(first_post.id.into_inner())
        .bind(first_post.thread_id.into_inner())
        .bind(first_post.author_id.into_inner())
        .bind(&first_post.content)
        .bind(&first_post.raw_content)
        .bind(first_post.created_at)
        .bind(first_post.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, thread), fields(thread_id = %thread.id))]
    async fn update(&self, thread: &Thread) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE threads
            SET title = $2, is_pinned = $3, is_locked = $4, last_post_at = $5, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(thread.id.into_inner())
        .bind(&thread.title)
        .bind(thread.is_pinned)
        .bind(thread.is_locked)
        .bind(thread.last_post_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(thread_not_found(thread.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_cascade(&self, id: Snowflake) -> RepoResult<u64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("DELETE FROM post_likes WHERE post_id IN (SELECT id FROM posts WHERE thread_id = $1)")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let posts = sqlx::query("DELETE FROM posts WHERE thread_id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        sqlx::query("DELETE FROM thread_views WHERE thread_id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let thread = sqlx::query("DELETE FROM threads WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if thread.rows_affected() == 0 {
            tx.rollback().await.map_err(map_db_error)?;
            return Err(thread_not_found(id));
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(posts.rows_affected())
    }

    #[instrument(skip(self))]
    async fn record_view(&self, thread_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let inserted = sqlx::query(
            r"
            INSERT INTO thread_views (thread_id, user_id, viewed_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (thread_id, user_id) DO NOTHING
            ",
        )
        .bind(thread_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let first_view = inserted.rows_affected() > 0;

        // The counter only moves on a user's first visit
        if first_view {
            sqlx::query("UPDATE threads SET views = views + 1 WHERE id = $1")
                .bind(thread_id.into_inner())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(first_view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgThreadRepository>();
    }
}
