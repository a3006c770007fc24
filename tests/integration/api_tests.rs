//! API integration tests against a running server backed by Postgres

use reqwest::Client;
use serde_json::{json, Value};

const SERVER_URL: &str = "http://localhost:3101";
const BASE_URL: &str = "http://localhost:3101/v2.0/BookInformation";

/// Titles must be unique, so every run uses its own
fn unique_title(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{} {}", prefix, nanos)
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", SERVER_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_reaches_database() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", SERVER_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
}

#[tokio::test]
#[ignore]
async fn test_create_get_delete_book() {
    let client = Client::new();
    let title = unique_title("Integration Gatsby");

    let response = client
        .post(BASE_URL)
        .json(&json!({ "title": title, "stock": 4 }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["available"], 4);

    // The display shape has no id, so find the record through search
    let response = client
        .get(format!("{}/search", BASE_URL))
        .query(&[("searchTerm", title.to_lowercase())])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
#[ignore]
async fn test_duplicate_title_rejected() {
    let client = Client::new();
    let title = unique_title("Integration Duplicate");

    let first = client
        .post(BASE_URL)
        .json(&json!({ "title": title, "stock": 1 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(first.status(), 200);

    let second = client
        .post(BASE_URL)
        .json(&json!({ "title": title.to_uppercase(), "stock": 1 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_version_negotiation_by_media_type() {
    let client = Client::new();

    let response = client
        .get(format!("{}/v2/BookInformation", SERVER_URL))
        .header("Accept", "application/json; ver=2.1")
        .send()
        .await
        .expect("Failed to send request");

    // 404 is a valid answer on an empty table; either way the version resolved
    assert!(response.status() == 200 || response.status() == 404);
    assert_eq!(
        response.headers()["api-supported-versions"],
        "2.0, 2.1"
    );
}

#[tokio::test]
#[ignore]
async fn test_delete_missing_book() {
    let client = Client::new();

    let response = client
        .delete(format!("{}/{}", BASE_URL, i32::MAX))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}
