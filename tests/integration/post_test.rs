//! Integration tests for the post endpoints, including the tag
//! association lifecycle.

mod helpers;

use http::StatusCode;
use serde_json::json;

const DEFAULT_TITLE: &str = "AAAAAAAAAA";
const UPDATED_TITLE: &str = "BBBBBBBBBB";
const DEFAULT_DATE: &str = "1970-01-01T00:00:00Z";

fn epoch() -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::from_timestamp(0, 0).unwrap()
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_create_post_links_tags() {
    let app = helpers::TestApp::new().await;
    let tag_id = app.seed_tag("rust").await;

    let response = app
        .request(
            "POST",
            "/api/posts",
            Some(json!({
                "title": DEFAULT_TITLE,
                "content": "Hello, world",
                "date": DEFAULT_DATE,
                "tag_ids": [tag_id],
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    let post_id = response.data()["id"].as_i64().unwrap();
    assert_eq!(app.count_post_tags(post_id).await, 1);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_create_post_requires_title_and_date() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request("POST", "/api/posts", Some(json!({ "date": DEFAULT_DATE })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request("POST", "/api/posts", Some(json!({ "title": DEFAULT_TITLE })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_create_post_with_existing_id_fails() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/posts",
            Some(json!({ "id": 1, "title": DEFAULT_TITLE, "date": DEFAULT_DATE })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_get_post_hydrates_tags() {
    let app = helpers::TestApp::new().await;
    let post_id = app.seed_post(DEFAULT_TITLE, epoch(), None).await;
    let tag_id = app.seed_tag("rust").await;
    app.seed_post_tag(post_id, tag_id).await;

    let response = app
        .request("GET", &format!("/api/posts/{post_id}"), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = response.data();
    assert_eq!(data["title"], DEFAULT_TITLE);
    assert_eq!(data["tags"].as_array().map(Vec::len), Some(1));
    assert_eq!(data["tags"][0]["name"], "rust");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_list_posts_eagerload() {
    let app = helpers::TestApp::new().await;
    let post_id = app.seed_post(DEFAULT_TITLE, epoch(), None).await;
    let tag_id = app.seed_tag("async").await;
    app.seed_post_tag(post_id, tag_id).await;
    app.seed_post("No tags here", epoch(), None).await;

    let response = app
        .request("GET", "/api/posts?eagerload=true&sort=id,asc", None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.data()["items"].as_array().cloned().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["tags"].as_array().map(Vec::len), Some(1));
    assert_eq!(items[1]["tags"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_list_posts_lazy_has_no_tags_field() {
    let app = helpers::TestApp::new().await;
    app.seed_post(DEFAULT_TITLE, epoch(), None).await;

    let response = app.request("GET", "/api/posts", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.data()["items"].as_array().cloned().unwrap();
    assert!(items[0].get("tags").is_none());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_replace_post_rewrites_tag_set() {
    let app = helpers::TestApp::new().await;
    let post_id = app.seed_post(DEFAULT_TITLE, epoch(), None).await;
    let old_tag = app.seed_tag("old").await;
    let new_tag = app.seed_tag("new").await;
    app.seed_post_tag(post_id, old_tag).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/posts/{post_id}"),
            Some(json!({
                "id": post_id,
                "title": UPDATED_TITLE,
                "date": DEFAULT_DATE,
                "tag_ids": [new_tag],
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["title"], UPDATED_TITLE);

    let response = app
        .request("GET", &format!("/api/posts/{post_id}"), None)
        .await;
    let tags = response.data()["tags"].as_array().cloned().unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["name"], "new");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_replace_post_without_tags_clears_the_set() {
    let app = helpers::TestApp::new().await;
    let post_id = app.seed_post(DEFAULT_TITLE, epoch(), None).await;
    let tag_id = app.seed_tag("stale").await;
    app.seed_post_tag(post_id, tag_id).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/posts/{post_id}"),
            Some(json!({ "id": post_id, "title": UPDATED_TITLE, "date": DEFAULT_DATE })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.count_post_tags(post_id).await, 0);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_patch_post_keeps_tags_when_omitted() {
    let app = helpers::TestApp::new().await;
    let post_id = app.seed_post(DEFAULT_TITLE, epoch(), None).await;
    let tag_id = app.seed_tag("kept").await;
    app.seed_post_tag(post_id, tag_id).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/posts/{post_id}"),
            Some(json!({ "title": UPDATED_TITLE })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["title"], UPDATED_TITLE);
    assert_eq!(app.count_post_tags(post_id).await, 1);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_patch_post_replaces_tags_when_supplied() {
    let app = helpers::TestApp::new().await;
    let post_id = app.seed_post(DEFAULT_TITLE, epoch(), None).await;
    let old_tag = app.seed_tag("old").await;
    let new_tag = app.seed_tag("new").await;
    app.seed_post_tag(post_id, old_tag).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/posts/{post_id}"),
            Some(json!({ "tag_ids": [new_tag] })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/posts/{post_id}"), None)
        .await;
    let tags = response.data()["tags"].as_array().cloned().unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["name"], "new");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_delete_post_removes_association_rows() {
    let app = helpers::TestApp::new().await;
    let post_id = app.seed_post(DEFAULT_TITLE, epoch(), None).await;
    let tag_id = app.seed_tag("doomed-link").await;
    app.seed_post_tag(post_id, tag_id).await;

    let response = app
        .request("DELETE", &format!("/api/posts/{post_id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(app.count_post_tags(post_id).await, 0);

    // The tag itself survives.
    let response = app.request("GET", &format!("/api/tags/{tag_id}"), None).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_posts_by_blog_and_orphans() {
    let app = helpers::TestApp::new().await;
    let blog_id = app.seed_blog("Parent blog", "parent", None).await;
    app.seed_post("Owned", epoch(), Some(blog_id)).await;
    let orphan_id = app.seed_post("Orphan", epoch(), None).await;

    let response = app
        .request("GET", &format!("/api/blogs/{blog_id}/posts"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.data().as_array().cloned().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Owned");

    let response = app.request("GET", "/api/posts/orphans", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.data().as_array().cloned().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], orphan_id);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_posts_by_tag() {
    let app = helpers::TestApp::new().await;
    let tagged = app.seed_post("Tagged", epoch(), None).await;
    app.seed_post("Untagged", epoch(), None).await;
    let tag_id = app.seed_tag("filter").await;
    app.seed_post_tag(tagged, tag_id).await;

    let response = app
        .request("GET", &format!("/api/tags/{tag_id}/posts"), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.data().as_array().cloned().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Tagged");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_list_posts_sorted_by_date_desc() {
    let app = helpers::TestApp::new().await;
    app.seed_post("Older", epoch(), None).await;
    let newer = chrono::DateTime::from_timestamp(86_400, 0).unwrap();
    app.seed_post("Newer", newer, None).await;

    let response = app.request("GET", "/api/posts?sort=date,desc", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.data()["items"].as_array().cloned().unwrap();
    assert_eq!(items[0]["title"], "Newer");
    assert_eq!(items[1]["title"], "Older");
}
