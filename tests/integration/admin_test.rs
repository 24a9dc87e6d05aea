//! Integration tests for the administrative and health endpoints.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_reset_frees_every_seat() {
    let app = helpers::TestApp::new();
    let lease_id = app.lease("A1", "alice").await;
    app.finish("commit", "A1", "alice", &lease_id).await;
    let stale = app.lease("B1", "bob").await;

    let response = app.request("POST", "/api/admin/reset", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["statistics"]["available"], 50);
    assert_eq!(response.body["data"]["statistics"]["leased"], 0);
    assert_eq!(response.body["data"]["statistics"]["committed"], 0);

    // Leases issued before the reset are gone with it.
    let response = app.finish("release", "B1", "bob", &stale).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["details"]["code"], "SEAT_NOT_LEASED");

    let response = app
        .request("POST", "/api/seats/A1/lease", Some(json!({ "actor_id": "carol" })))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["seats"], 50);
    assert!(response.body["data"]["version"].is_string());
}

#[tokio::test]
async fn test_custom_layout() {
    let config = seatlease_core::config::AppConfig::from_toml_str(
        r#"
        [registry]
        rows = ["X", "Y"]
        seats_per_row = 3
        "#,
    )
    .unwrap();
    let app = helpers::TestApp::with_config(config);

    let response = app.request("GET", "/api/stats", None).await;
    assert_eq!(response.body["data"]["total"], 6);

    let response = app.request("GET", "/api/seats/Y3", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/api/seats/A1", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
