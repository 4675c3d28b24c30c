//! Category service
//!
//! Public category listing plus the admin CRUD surface. Every admin write
//! is audited.

use serde_json::json;
use tracing::{info, instrument};
use validator::Validate;

use forum_core::entities::Category;
use forum_core::{AuditAction, EntityRef, Snowflake};

use crate::dto::{
    CategoryResponse, CreateCategoryRequest, ReorderCategoriesRequest, UpdateCategoryRequest,
};

use super::audit::AuditService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Category service
pub struct CategoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CategoryService<'a> {
    /// Create a new CategoryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All categories ordered by display position; public
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<CategoryResponse>> {
        let categories = self.ctx.category_repo().list().await?;
        Ok(categories.iter().map(CategoryResponse::from).collect())
    }

    /// Fetch one category by slug; public
    #[instrument(skip(self))]
    pub async fn get_by_slug(&self, slug: &str) -> ServiceResult<CategoryResponse> {
        let category = self
            .ctx
            .category_repo()
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| ServiceError::not_found("Category", slug.to_string()))?;
        Ok(CategoryResponse::from(&category))
    }

    /// Create a category; admin only
    #[instrument(skip(self, request))]
    pub async fn create_category(
        &self,
        actor_id: Snowflake,
        request: CreateCategoryRequest,
    ) -> ServiceResult<CategoryResponse> {
        request
            .validate()
            .map_err(|err| ServiceError::validation(err.to_string()))?;

        let actor = PermissionService::new(self.ctx)
            .require_admin(actor_id)
            .await?;

        Self::check_slug(&request.slug)?;
        if self.ctx.category_repo().slug_exists(&request.slug).await? {
            return Err(ServiceError::invalid_state(format!(
                "Slug already in use: {}",
                request.slug
            )));
        }
        if request.name.is_empty() {
            return Err(ServiceError::validation("Category name is required"));
        }

        let mut category = Category::new(
            self.ctx.generate_id(),
            request.name,
            request.description,
            request.slug,
            request.position,
        );
        category.color = request.color;
        category.icon = request.icon;

        self.ctx.category_repo().create(&category).await?;

        self.invalidate_index().await;

        AuditService::new(self.ctx)
            .record(
                AuditAction::CategoryCreated,
                EntityRef::Category(category.id),
                json!({ "slug": category.slug, "name": category.name }),
                actor.id,
                None,
            )
            .await;

        info!(category_id = %category.id, slug = %category.slug, "category created");
        Ok(CategoryResponse::from(&category))
    }

    /// Update a category; absent request fields keep their value
    #[instrument(skip(self, request))]
    pub async fn update_category(
        &self,
        actor_id: Snowflake,
        category_id: Snowflake,
        request: UpdateCategoryRequest,
    ) -> ServiceResult<CategoryResponse> {
        request
            .validate()
            .map_err(|err| ServiceError::validation(err.to_string()))?;

        let actor = PermissionService::new(self.ctx)
            .require_admin(actor_id)
            .await?;

        let mut category = self
            .ctx
            .category_repo()
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Category", category_id.to_string()))?;

        if let Some(slug) = request.slug {
            if slug != category.slug {
                Self::check_slug(&slug)?;
                if self.ctx.category_repo().slug_exists(&slug).await? {
                    return Err(ServiceError::invalid_state(format!(
                        "Slug already in use: {slug}"
                    )));
                }
                category.slug = slug;
            }
        }
        if let Some(name) = request.name {
            if name.is_empty() {
                return Err(ServiceError::validation("Category name is required"));
            }
            category.name = name;
        }
        if let Some(description) = request.description {
            category.description = description;
        }
        if let Some(position) = request.position {
            category.position = position;
        }
        if request.color.is_some() {
            category.color = request.color;
        }
        if request.icon.is_some() {
            category.icon = request.icon;
        }
        category.updated_at = chrono::Utc::now();

        self.ctx.category_repo().update(&category).await?;

        self.invalidate_index().await;

        AuditService::new(self.ctx)
            .record(
                AuditAction::CategoryUpdated,
                EntityRef::Category(category_id),
                json!({ "slug": category.slug, "name": category.name }),
                actor.id,
                None,
            )
            .await;

        info!(category_id = %category_id, "category updated");
        Ok(CategoryResponse::from(&category))
    }

    /// Delete a category; admin only
    #[instrument(skip(self))]
    pub async fn delete_category(
        &self,
        actor_id: Snowflake,
        category_id: Snowflake,
    ) -> ServiceResult<()> {
        let actor = PermissionService::new(self.ctx)
            .require_admin(actor_id)
            .await?;

        let category = self
            .ctx
            .category_repo()
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Category", category_id.to_string()))?;

        let thread_count = self
            .ctx
            .thread_repo()
            .count_by_category(category_id)
            .await?;
        if thread_count > 0 {
            return Err(ServiceError::invalid_state(
                "Category still contains threads",
            ));
        }

        self.ctx.category_repo().delete(category_id).await?;

        self.invalidate_index().await;

        AuditService::new(self.ctx)
            .record(
                AuditAction::CategoryDeleted,
                EntityRef::Category(category_id),
                json!({ "slug": category.slug, "name": category.name }),
                actor.id,
                None,
            )
            .await;

        info!(category_id = %category_id, "category deleted");
        Ok(())
    }

    /// Rewrite all display positions in one transaction; admin only
    #[instrument(skip(self, request))]
    pub async fn reorder_categories(
        &self,
        actor_id: Snowflake,
        request: ReorderCategoriesRequest,
    ) -> ServiceResult<Vec<CategoryResponse>> {
        let actor = PermissionService::new(self.ctx)
            .require_admin(actor_id)
            .await?;

        if request.positions.is_empty() {
            return Err(ServiceError::validation("No positions given"));
        }

        let mut positions = Vec::with_capacity(request.positions.len());
        for entry in &request.positions {
            let id = Snowflake::parse(&entry.id)
                .map_err(|_| ServiceError::validation(format!("Invalid category id: {}", entry.id)))?;
            positions.push((id, entry.position));
        }

        self.ctx.category_repo().reorder(&positions).await?;

        self.invalidate_index().await;

        let details: Vec<_> = positions
            .iter()
            .map(|(id, position)| json!({ "id": id.to_string(), "position": position }))
            .collect();
        AuditService::new(self.ctx)
            .record(
                AuditAction::CategoriesReordered,
                // The reorder touches the whole set; the first moved category
                // stands in as the reference entity
                EntityRef::Category(positions[0].0),
                json!({ "positions": details }),
                actor.id,
                None,
            )
            .await;

        info!(count = positions.len(), "categories reordered");
        self.list().await
    }

    fn check_slug(slug: &str) -> ServiceResult<()> {
        if Category::is_valid_slug(slug) {
            Ok(())
        } else {
            Err(ServiceError::validation(format!("Invalid slug: {slug}")))
        }
    }

    async fn invalidate_index(&self) {
        self.ctx.page_cache().mark_stale("categories").await.ok();
    }
}
