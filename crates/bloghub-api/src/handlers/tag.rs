//! Tag CRUD handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use validator::Validate;

use bloghub_core::error::AppError;
use bloghub_core::types::pagination::PageResponse;
use bloghub_entity::post::Post;
use bloghub_entity::tag::Tag;

use crate::dto::request::{TagPatchRequest, TagRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::ListParams;
use crate::state::AppState;

/// GET /api/tags?page&per_page&sort
pub async fn list_tags(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<PageResponse<Tag>>>, ApiError> {
    let page = params.page_request()?;
    let sort = params.sort_field()?;
    let tags = state.tag_service.list_tags(&page, sort.as_ref()).await?;
    Ok(Json(ApiResponse::ok(tags)))
}

/// GET /api/tags/{id}
pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Tag>>, ApiError> {
    let tag = state.tag_service.get_tag(id).await?;
    Ok(Json(ApiResponse::ok(tag)))
}

/// GET /api/tags/{id}/posts
pub async fn list_tag_posts(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<Post>>>, ApiError> {
    let posts = state.post_service.posts_by_tag(id).await?;
    Ok(Json(ApiResponse::ok(posts)))
}

/// POST /api/tags
pub async fn create_tag(
    State(state): State<AppState>,
    Json(req): Json<TagRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Tag>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let tag = state.tag_service.create_tag(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(tag))))
}

/// PUT /api/tags/{id}
pub async fn replace_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<TagRequest>,
) -> Result<Json<ApiResponse<Tag>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let tag = state.tag_service.replace_tag(id, req.into()).await?;
    Ok(Json(ApiResponse::ok(tag)))
}

/// PATCH /api/tags/{id}
pub async fn patch_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<TagPatchRequest>,
) -> Result<Json<ApiResponse<Tag>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let (body_id, patch) = req.into_parts();
    let tag = state.tag_service.patch_tag(id, body_id, patch).await?;
    Ok(Json(ApiResponse::ok(tag)))
}

/// DELETE /api/tags/{id}
pub async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.tag_service.delete_tag(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
