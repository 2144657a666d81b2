//! Integration tests for the tag endpoints.

mod helpers;

use http::StatusCode;
use serde_json::json;

const DEFAULT_NAME: &str = "AAAAAAAAAA";
const UPDATED_NAME: &str = "BBBBBBBBBB";

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_create_tag() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request("POST", "/api/tags", Some(json!({ "name": DEFAULT_NAME })))
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.data()["name"], DEFAULT_NAME);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_create_tag_enforces_min_name_length() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request("POST", "/api/tags", Some(json!({ "name": "x" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.request("POST", "/api/tags", Some(json!({}))).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_get_and_list_tags() {
    let app = helpers::TestApp::new().await;
    let tag_id = app.seed_tag(DEFAULT_NAME).await;

    let response = app.request("GET", &format!("/api/tags/{tag_id}"), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], DEFAULT_NAME);

    let response = app.request("GET", "/api/tags", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["items"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_replace_and_patch_tag() {
    let app = helpers::TestApp::new().await;
    let tag_id = app.seed_tag(DEFAULT_NAME).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/tags/{tag_id}"),
            Some(json!({ "id": tag_id, "name": UPDATED_NAME })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], UPDATED_NAME);

    let response = app
        .request(
            "PATCH",
            &format!("/api/tags/{tag_id}"),
            Some(json!({ "name": DEFAULT_NAME })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], DEFAULT_NAME);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_replace_tag_id_mismatch_fails() {
    let app = helpers::TestApp::new().await;
    let tag_id = app.seed_tag(DEFAULT_NAME).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/tags/{tag_id}"),
            Some(json!({ "id": tag_id + 1, "name": UPDATED_NAME })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_delete_tag_keeps_tagged_posts() {
    let app = helpers::TestApp::new().await;
    let date = chrono::DateTime::from_timestamp(0, 0).unwrap();
    let post_id = app.seed_post("Survivor", date, None).await;
    let tag_id = app.seed_tag(DEFAULT_NAME).await;
    app.seed_post_tag(post_id, tag_id).await;

    let response = app
        .request("DELETE", &format!("/api/tags/{tag_id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(app.count_post_tags(post_id).await, 0);

    let response = app
        .request("GET", &format!("/api/posts/{post_id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_health_endpoint() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["database"], "connected");
}
