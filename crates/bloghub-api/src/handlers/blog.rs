//! Blog CRUD handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use validator::Validate;

use bloghub_core::error::AppError;
use bloghub_entity::blog::{Blog, BlogWithPosts};
use bloghub_entity::post::Post;

use crate::dto::request::{BlogPatchRequest, BlogRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::ListParams;
use crate::state::AppState;

/// GET /api/blogs?page&per_page&sort&eagerload
pub async fn list_blogs(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, ApiError> {
    let page = params.page_request()?;
    let sort = params.sort_field()?;

    if params.eagerload {
        let blogs = state
            .blog_service
            .list_blogs_eager(&page, sort.as_ref())
            .await?;
        Ok(Json(ApiResponse::ok(blogs)).into_response())
    } else {
        let blogs = state.blog_service.list_blogs(&page, sort.as_ref()).await?;
        Ok(Json(ApiResponse::ok(blogs)).into_response())
    }
}

/// GET /api/blogs/{id}
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<BlogWithPosts>>, ApiError> {
    let blog = state.blog_service.get_blog(id).await?;
    Ok(Json(ApiResponse::ok(blog)))
}

/// GET /api/blogs/{id}/posts
pub async fn list_blog_posts(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<Post>>>, ApiError> {
    let posts = state.post_service.posts_by_blog(id).await?;
    Ok(Json(ApiResponse::ok(posts)))
}

/// GET /api/blogs/orphans
pub async fn list_orphan_blogs(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Blog>>>, ApiError> {
    let blogs = state.blog_service.orphan_blogs().await?;
    Ok(Json(ApiResponse::ok(blogs)))
}

/// GET /api/users/{id}/blogs
pub async fn list_user_blogs(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<Blog>>>, ApiError> {
    let blogs = state.blog_service.blogs_by_user(id).await?;
    Ok(Json(ApiResponse::ok(blogs)))
}

/// POST /api/blogs
pub async fn create_blog(
    State(state): State<AppState>,
    Json(req): Json<BlogRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Blog>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let blog = state.blog_service.create_blog(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(blog))))
}

/// PUT /api/blogs/{id}
pub async fn replace_blog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<BlogRequest>,
) -> Result<Json<ApiResponse<Blog>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let blog = state.blog_service.replace_blog(id, req.into()).await?;
    Ok(Json(ApiResponse::ok(blog)))
}

/// PATCH /api/blogs/{id}
pub async fn patch_blog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<BlogPatchRequest>,
) -> Result<Json<ApiResponse<Blog>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let (body_id, patch) = req.into_parts();
    let blog = state.blog_service.patch_blog(id, body_id, patch).await?;
    Ok(Json(ApiResponse::ok(blog)))
}

/// DELETE /api/blogs/{id}
pub async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.blog_service.delete_blog(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
