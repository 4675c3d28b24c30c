//! Category handlers
//!
//! Public category browsing plus admin-only management.

use axum::{
    extract::{Path, State},
    Json,
};
use forum_service::dto::{
    CategoryResponse, CreateCategoryRequest, ReorderCategoriesRequest, UpdateCategoryRequest,
};
use forum_service::CategoryService;

use crate::extractors::{AuthUser, CategoryIdPath, SlugPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List all categories ordered by position
///
/// GET /categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CategoryResponse>>> {
    let service = CategoryService::new(state.service_context());
    let categories = service.list().await?;
    Ok(Json(categories))
}

/// Get a category by its slug
///
/// GET /categories/slug/{slug}
pub async fn get_category_by_slug(
    State(state): State<AppState>,
    Path(path): Path<SlugPath>,
) -> ApiResult<Json<CategoryResponse>> {
    let service = CategoryService::new(state.service_context());
    let response = service.get_by_slug(path.slug()).await?;
    Ok(Json(response))
}

/// Create a category (admin only)
///
/// POST /categories
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCategoryRequest>,
) -> ApiResult<Created<Json<CategoryResponse>>> {
    let service = CategoryService::new(state.service_context());
    let response = service.create_category(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Update a category (admin only)
///
/// PATCH /categories/{category_id}
pub async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CategoryIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateCategoryRequest>,
) -> ApiResult<Json<CategoryResponse>> {
    let category_id = path.category_id()?;

    let service = CategoryService::new(state.service_context());
    let response = service
        .update_category(auth.user_id, category_id, request)
        .await?;
    Ok(Json(response))
}

/// Delete an empty category (admin only)
///
/// DELETE /categories/{category_id}
pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CategoryIdPath>,
) -> ApiResult<NoContent> {
    let category_id = path.category_id()?;

    let service = CategoryService::new(state.service_context());
    service.delete_category(auth.user_id, category_id).await?;
    Ok(NoContent)
}

/// Reorder categories (admin only)
///
/// PUT /categories/reorder
pub async fn reorder_categories(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<ReorderCategoriesRequest>,
) -> ApiResult<Json<Vec<CategoryResponse>>> {
    let service = CategoryService::new(state.service_context());
    let categories = service.reorder_categories(auth.user_id, request).await?;
    Ok(Json(categories))
}
