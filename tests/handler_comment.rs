mod common;

use axum::http::StatusCode;
use pageknock::application::services::CommentSettings;
use serde_json::{Value, json};

#[tokio::test]
async fn test_post_comment_success() {
    let (server, _store) = common::create_test_server();

    let response = server
        .post("/comment")
        .json(&json!({
            "url": "https://example.com/blog/1",
            "comment": "Great read"
        }))
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["message"], "Insert succeeded!");
    assert_eq!(json["siteDomain"], "https://example.com");
    assert!(json["commentId"].is_string());
    assert!(json["unixTime"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_post_comment_records_client_metadata() {
    let (server, store) = common::create_test_server();

    server
        .post("/comment")
        .add_header("X-Forwarded-For", "203.0.113.9, 10.0.0.1")
        .add_header("User-Agent", "widget/1.0")
        .json(&json!({ "url": "https://example.com/a", "comment": "hi" }))
        .await
        .assert_status_ok();

    let logs = store.comment_logs().await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].ip, "203.0.113.9");
    assert_eq!(logs[0].user_agent, "widget/1.0");
}

#[tokio::test]
async fn test_post_comment_missing_fields() {
    let (server, store) = common::create_test_server();

    let response = server
        .post("/comment")
        .json(&json!({ "url": "https://example.com/a" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["message"], "Missing required fields");
    assert_eq!(json["error"]["details"]["fields"], json!(["comment"]));
    assert!(store.comment_logs().await.is_empty());
}

#[tokio::test]
async fn test_post_comment_invalid_json() {
    let (server, _store) = common::create_test_server();

    let response = server
        .post("/comment")
        .text("{\"url\": ")
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["message"], "Invalid JSON");
}

#[tokio::test]
async fn test_post_comment_invalid_url() {
    let (server, _store) = common::create_test_server();

    let response = server
        .post("/comment")
        .json(&json!({ "url": "mailto:someone@example.com", "comment": "hi" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Invalid URL format"
    );
}

#[tokio::test]
async fn test_post_comment_too_long() {
    let (server, _store) = common::create_test_server_with(CommentSettings {
        max_comment_length: 10,
        ..CommentSettings::default()
    });

    let response = server
        .post("/comment")
        .json(&json!({ "url": "https://example.com/a", "comment": "x".repeat(11) }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Comment is too long"
    );
}

#[tokio::test]
async fn test_comment_wrong_method() {
    let (server, _store) = common::create_test_server();

    let response = server.get("/comment").await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_comments_by_url_newest_first() {
    let (server, _store) = common::create_test_server();

    common::post_comment(&server, "https://example.com/a", "first").await;
    common::post_comment(&server, "https://example.com/a", "second").await;
    common::post_comment(&server, "https://example.com/b", "elsewhere").await;

    let response = server
        .get("/getCommentsByUrl")
        .add_query_param("url", "https://example.com/a")
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["comment"], "second");
    assert_eq!(items[1]["comment"], "first");
    assert_eq!(items[0]["userId"], "1");
    assert!(items[0].get("commentId").is_some());
}

#[tokio::test]
async fn test_comments_by_url_requires_url() {
    let (server, _store) = common::create_test_server();

    let response = server.get("/getCommentsByUrl").await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_comments_by_url_rejected_query_is_json() {
    let (server, _store) = common::create_test_server();

    let response = server.get("/getCommentsByUrl?url=a&url=b").await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["message"], "Invalid query string");
    assert!(json["error"]["details"]["reason"].is_string());
}

#[tokio::test]
async fn test_post_comment_schemeless_url_with_port() {
    let (server, _store) = common::create_test_server();

    let response = server
        .post("/comment")
        .json(&json!({ "url": "example.com:8080/page", "comment": "hi" }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["siteDomain"],
        "https://example.com:8080"
    );
}
