//! Post CRUD handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use validator::Validate;

use bloghub_core::error::AppError;
use bloghub_entity::post::{Post, PostWithTags};

use crate::dto::request::{PostPatchRequest, PostRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::ListParams;
use crate::state::AppState;

/// GET /api/posts?page&per_page&sort&eagerload
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, ApiError> {
    let page = params.page_request()?;
    let sort = params.sort_field()?;

    if params.eagerload {
        let posts = state
            .post_service
            .list_posts_eager(&page, sort.as_ref())
            .await?;
        Ok(Json(ApiResponse::ok(posts)).into_response())
    } else {
        let posts = state.post_service.list_posts(&page, sort.as_ref()).await?;
        Ok(Json(ApiResponse::ok(posts)).into_response())
    }
}

/// GET /api/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PostWithTags>>, ApiError> {
    let post = state.post_service.get_post(id).await?;
    Ok(Json(ApiResponse::ok(post)))
}

/// GET /api/posts/orphans
pub async fn list_orphan_posts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Post>>>, ApiError> {
    let posts = state.post_service.orphan_posts().await?;
    Ok(Json(ApiResponse::ok(posts)))
}

/// POST /api/posts
pub async fn create_post(
    State(state): State<AppState>,
    Json(req): Json<PostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Post>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let post = state.post_service.create_post(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(post))))
}

/// PUT /api/posts/{id}
pub async fn replace_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<PostRequest>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let post = state.post_service.replace_post(id, req.into()).await?;
    Ok(Json(ApiResponse::ok(post)))
}

/// PATCH /api/posts/{id}
pub async fn patch_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<PostPatchRequest>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let (body_id, patch) = req.into_parts();
    let post = state.post_service.patch_post(id, body_id, patch).await?;
    Ok(Json(ApiResponse::ok(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.post_service.delete_post(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
