mod common;

use chrono::Duration;
use serde_json::{Value, json};
use shortlink::domain::repositories::MappingRepository;

#[tokio::test]
async fn test_shorten_creates_mapping() {
    let app = common::TestApp::new();
    app.codes.push(&["Ab3dEf7h"]);
    let server = app.server();

    let response = server
        .post("/url/shorten")
        .json(&json!({ "originalUrl": "https://example.com/page" }))
        .await;

    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["shortUrl"], "http://localhost:8080/url/Ab3dEf7h");
    assert_eq!(body["originalUrl"], "https://example.com/page");
    assert_eq!(body["message"], "New short URL created successfully");
    assert!(body["expiredAt"].is_null());

    assert_eq!(app.repository.len(), 1);
}

#[tokio::test]
async fn test_shorten_same_url_returns_existing() {
    let app = common::TestApp::new();
    app.codes.push(&["firstOne", "secondOn"]);
    let server = app.server();

    let first: Value = server
        .post("/url/shorten")
        .json(&json!({ "originalUrl": "https://example.com" }))
        .await
        .json();

    let response = server
        .post("/url/shorten")
        .json(&json!({ "originalUrl": "https://example.com" }))
        .await;

    assert_eq!(response.status_code(), 200);
    let second: Value = response.json();
    assert_eq!(second["shortUrl"], first["shortUrl"]);
    assert_eq!(
        second["message"],
        "Short URL already exists and does not have an expiry date."
    );
    assert_eq!(app.repository.len(), 1);
}

#[tokio::test]
async fn test_shorten_with_expiry_reports_valid_until() {
    let app = common::TestApp::new();
    let server = app.server();

    let response = server
        .post("/url/shorten")
        .json(&json!({
            "originalUrl": "https://example.com/sale",
            "expiresAt": "2030-12-31T23:59:59"
        }))
        .await;
    assert_eq!(response.status_code(), 200);
    let created: Value = response.json();
    assert_eq!(created["expiredAt"], "2030-12-31T23:59:59Z");

    let again: Value = server
        .post("/url/shorten")
        .json(&json!({ "originalUrl": "https://example.com/sale" }))
        .await
        .json();

    assert_eq!(again["shortUrl"], created["shortUrl"]);
    assert_eq!(
        again["message"],
        "Short URL already exists and is valid until 2030-12-31 23:59"
    );
}

#[tokio::test]
async fn test_shorten_replaces_expired_mapping() {
    let app = common::TestApp::new();
    app.codes.push(&["oldCode1", "newCode1"]);
    let server = app.server();

    let expires_at = common::start_time() + Duration::hours(1);
    server
        .post("/url/shorten")
        .json(&json!({
            "originalUrl": "https://example.com",
            "expiresAt": expires_at.to_rfc3339()
        }))
        .await;

    app.clock.advance(Duration::hours(2));

    let response = server
        .post("/url/shorten")
        .json(&json!({ "originalUrl": "https://example.com" }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["shortUrl"], "http://localhost:8080/url/newCode1");
    assert_eq!(body["message"], "New short URL created successfully");

    assert!(
        app.repository
            .find_by_short_code("oldCode1")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_shorten_empty_url() {
    let app = common::TestApp::new();
    let server = app.server();

    let response = server
        .post("/url/shorten")
        .json(&json!({ "originalUrl": "" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "URL cannot be empty");
    assert!(app.repository.is_empty());
}

#[tokio::test]
async fn test_shorten_missing_url() {
    let app = common::TestApp::new();
    let server = app.server();

    let response = server.post("/url/shorten").json(&json!({})).await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "URL cannot be empty");
}

#[tokio::test]
async fn test_shorten_null_url() {
    let app = common::TestApp::new();
    let server = app.server();

    let response = server
        .post("/url/shorten")
        .json(&json!({ "originalUrl": null }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "URL cannot be empty");
    assert!(app.repository.is_empty());
}

#[tokio::test]
async fn test_shorten_rejects_line_breaks_in_url() {
    let app = common::TestApp::new();
    let server = app.server();

    let response = server
        .post("/url/shorten")
        .json(&json!({ "originalUrl": "https://a.com/\r\nSet-Cookie: x=1" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "URL must start with http:// or https://");
    assert!(app.repository.is_empty());
}

#[tokio::test]
async fn test_shorten_invalid_scheme() {
    let app = common::TestApp::new();
    let server = app.server();

    let response = server
        .post("/url/shorten")
        .json(&json!({ "originalUrl": "ftp://files.example.com" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "URL must start with http:// or https://");
    assert!(app.repository.is_empty());
}

#[tokio::test]
async fn test_shorten_malformed_json() {
    let app = common::TestApp::new();
    let server = app.server();

    let response = server
        .post("/url/shorten")
        .content_type("application/json")
        .text("{not json")
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_shorten_invalid_expiry_timestamp() {
    let app = common::TestApp::new();
    let server = app.server();

    let response = server
        .post("/url/shorten")
        .json(&json!({ "originalUrl": "https://a.com", "expiresAt": "next tuesday" }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert!(app.repository.is_empty());
}
