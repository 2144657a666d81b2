//! Route definitions for the BlogHub HTTP API.
//!
//! All routes are organized by entity and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor. PATCH on a bare collection path has no route and is
//! answered with 405 by the router itself.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(blog_routes())
        .merge(post_routes())
        .merge(tag_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(build_compression_layer())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Blog CRUD, owner filter, and orphan view
fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/blogs", get(handlers::blog::list_blogs))
        .route("/blogs", post(handlers::blog::create_blog))
        .route("/blogs/orphans", get(handlers::blog::list_orphan_blogs))
        .route("/blogs/{id}", get(handlers::blog::get_blog))
        .route("/blogs/{id}", put(handlers::blog::replace_blog))
        .route("/blogs/{id}", patch(handlers::blog::patch_blog))
        .route("/blogs/{id}", delete(handlers::blog::delete_blog))
        .route("/blogs/{id}/posts", get(handlers::blog::list_blog_posts))
        .route("/users/{id}/blogs", get(handlers::blog::list_user_blogs))
}

/// Post CRUD and orphan view
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(handlers::post::list_posts))
        .route("/posts", post(handlers::post::create_post))
        .route("/posts/orphans", get(handlers::post::list_orphan_posts))
        .route("/posts/{id}", get(handlers::post::get_post))
        .route("/posts/{id}", put(handlers::post::replace_post))
        .route("/posts/{id}", patch(handlers::post::patch_post))
        .route("/posts/{id}", delete(handlers::post::delete_post))
}

/// Tag CRUD and tagged-post filter
fn tag_routes() -> Router<AppState> {
    Router::new()
        .route("/tags", get(handlers::tag::list_tags))
        .route("/tags", post(handlers::tag::create_tag))
        .route("/tags/{id}", get(handlers::tag::get_tag))
        .route("/tags/{id}", put(handlers::tag::replace_tag))
        .route("/tags/{id}", patch(handlers::tag::patch_tag))
        .route("/tags/{id}", delete(handlers::tag::delete_tag))
        .route("/tags/{id}/posts", get(handlers::tag::list_tag_posts))
}

/// Health check endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
