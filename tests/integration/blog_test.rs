//! Integration tests for the blog endpoints.

mod helpers;

use http::StatusCode;
use serde_json::json;

const DEFAULT_NAME: &str = "AAAAAAAAAA";
const UPDATED_NAME: &str = "BBBBBBBBBB";
const DEFAULT_HANDLE: &str = "aaaaaaaaaa";
const UPDATED_HANDLE: &str = "bbbbbbbbbb";

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_create_blog() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/blogs",
            Some(json!({ "name": DEFAULT_NAME, "handle": DEFAULT_HANDLE })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    let data = response.data();
    assert_eq!(data["name"], DEFAULT_NAME);
    assert_eq!(data["handle"], DEFAULT_HANDLE);
    assert!(data["id"].as_i64().is_some());
    assert!(data["user_id"].is_null());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_create_blog_with_existing_id_fails() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/blogs",
            Some(json!({ "id": 1, "name": DEFAULT_NAME, "handle": DEFAULT_HANDLE })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_create_blog_requires_name_and_handle() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request("POST", "/api/blogs", Some(json!({ "handle": DEFAULT_HANDLE })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request("POST", "/api/blogs", Some(json!({ "name": DEFAULT_NAME })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_create_blog_enforces_min_name_length() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/blogs",
            Some(json!({ "name": "ab", "handle": DEFAULT_HANDLE })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_get_blog_hydrates_posts() {
    let app = helpers::TestApp::new().await;
    let blog_id = app.seed_blog(DEFAULT_NAME, DEFAULT_HANDLE, None).await;
    let date = chrono::DateTime::from_timestamp(0, 0).unwrap();
    app.seed_post("First post", date, Some(blog_id)).await;

    let response = app
        .request("GET", &format!("/api/blogs/{blog_id}"), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = response.data();
    assert_eq!(data["name"], DEFAULT_NAME);
    assert_eq!(data["posts"].as_array().map(Vec::len), Some(1));
    assert_eq!(data["posts"][0]["title"], "First post");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_get_missing_blog_returns_404() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/blogs/999999", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_list_blogs_paginated() {
    let app = helpers::TestApp::new().await;
    for i in 0..3 {
        app.seed_blog(&format!("Blog number {i}"), &format!("blog-{i}"), None)
            .await;
    }

    let response = app
        .request("GET", "/api/blogs?page=1&per_page=2&sort=id,asc", None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = response.data();
    assert_eq!(data["items"].as_array().map(Vec::len), Some(2));
    assert_eq!(data["total_items"], 3);
    assert_eq!(data["total_pages"], 2);
    assert_eq!(data["has_next"], true);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_list_blogs_rejects_bad_pagination() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/blogs?page=0", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.request("GET", "/api/blogs?per_page=101", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.request("GET", "/api/blogs?sort=drop_table", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_replace_blog() {
    let app = helpers::TestApp::new().await;
    let blog_id = app.seed_blog(DEFAULT_NAME, DEFAULT_HANDLE, None).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/blogs/{blog_id}"),
            Some(json!({ "id": blog_id, "name": UPDATED_NAME, "handle": UPDATED_HANDLE })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = response.data();
    assert_eq!(data["name"], UPDATED_NAME);
    assert_eq!(data["handle"], UPDATED_HANDLE);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_replace_blog_id_mismatch_fails() {
    let app = helpers::TestApp::new().await;
    let blog_id = app.seed_blog(DEFAULT_NAME, DEFAULT_HANDLE, None).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/blogs/{blog_id}"),
            Some(json!({ "id": blog_id + 1, "name": UPDATED_NAME, "handle": UPDATED_HANDLE })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_replace_missing_blog_returns_404() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "PUT",
            "/api/blogs/999999",
            Some(json!({ "name": UPDATED_NAME, "handle": UPDATED_HANDLE })),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_patch_blog_merges_supplied_fields() {
    let app = helpers::TestApp::new().await;
    let blog_id = app.seed_blog(DEFAULT_NAME, DEFAULT_HANDLE, None).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/blogs/{blog_id}"),
            Some(json!({ "name": UPDATED_NAME })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = response.data();
    assert_eq!(data["name"], UPDATED_NAME);
    assert_eq!(data["handle"], DEFAULT_HANDLE);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_patch_on_collection_path_is_405() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request("PATCH", "/api/blogs", Some(json!({ "name": UPDATED_NAME })))
        .await;

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_delete_blog_orphans_its_posts() {
    let app = helpers::TestApp::new().await;
    let blog_id = app.seed_blog(DEFAULT_NAME, DEFAULT_HANDLE, None).await;
    let date = chrono::DateTime::from_timestamp(0, 0).unwrap();
    let post_id = app.seed_post("Orphaned post", date, Some(blog_id)).await;

    let response = app
        .request("DELETE", &format!("/api/blogs/{blog_id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app
        .request("GET", &format!("/api/blogs/{blog_id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // The post survives with a nulled blog reference.
    let response = app
        .request("GET", &format!("/api/posts/{post_id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data()["blog_id"].is_null());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_delete_missing_blog_is_still_204() {
    let app = helpers::TestApp::new().await;

    let response = app.request("DELETE", "/api/blogs/999999", None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_orphan_blogs_endpoint() {
    let app = helpers::TestApp::new().await;
    app.seed_blog("Owned blog", "owned", Some(7)).await;
    let orphan_id = app.seed_blog("Orphan blog", "orphan", None).await;

    let response = app.request("GET", "/api/blogs/orphans", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.data().as_array().cloned().unwrap_or_default();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], orphan_id);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_blogs_by_user_endpoint() {
    let app = helpers::TestApp::new().await;
    app.seed_blog("User blog", "user-blog", Some(42)).await;
    app.seed_blog("Other blog", "other-blog", Some(43)).await;

    let response = app.request("GET", "/api/users/42/blogs", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.data().as_array().cloned().unwrap_or_default();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "User blog");
}
