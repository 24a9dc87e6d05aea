//! Integration tests for the seat lease lifecycle over HTTP.

mod helpers;

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_lease_commit_flow() {
    let app = helpers::TestApp::new();

    let response = app
        .request("POST", "/api/seats/A5/lease", Some(json!({ "actor_id": "alice" })))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["seat"]["id"], "A5");
    assert_eq!(response.body["data"]["seat"]["state"], "leased");
    assert!(response.body["data"]["lease_expires_at"].is_string());
    let lease_id = response.body["data"]["lease_id"].as_str().unwrap().to_string();

    let response = app
        .request("POST", "/api/seats/A5/lease", Some(json!({ "actor_id": "bob" })))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["details"]["code"], "SEAT_UNAVAILABLE");
    assert_eq!(response.body["details"]["state"], "leased");

    let response = app.finish("commit", "A5", "alice", &lease_id).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["state"], "committed");
    assert_eq!(response.body["data"]["holder"], "alice");

    let response = app.request("GET", "/api/seats/A5", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["state"], "committed");
}

#[tokio::test]
async fn test_lease_token_never_in_snapshots() {
    let app = helpers::TestApp::new();
    app.lease("B2", "carol").await;

    let response = app.request("GET", "/api/seats/B2", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"].get("lease_id").is_none());
    assert_eq!(response.body["data"]["holder"], "carol");

    let response = app.request("GET", "/api/seats", None).await;
    let seats = response.body["data"]["seats"].as_array().unwrap();
    assert!(seats.iter().all(|seat| seat.get("lease_id").is_none()));
}

#[tokio::test]
async fn test_release_makes_seat_available() {
    let app = helpers::TestApp::new();
    let lease_id = app.lease("B3", "carol").await;

    let response = app.finish("release", "B3", "carol", &lease_id).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["state"], "available");
    assert!(response.body["data"].get("holder").is_none());

    let response = app
        .request("POST", "/api/seats/B3/lease", Some(json!({ "actor_id": "dave" })))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_release_mismatch_is_forbidden() {
    let app = helpers::TestApp::new();
    let lease_id = app.lease("C1", "alice").await;

    let response = app.finish("release", "C1", "mallory", &lease_id).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["details"]["code"], "HOLDER_MISMATCH");

    let other = app.lease("C2", "mallory").await;
    let response = app.finish("release", "C1", "alice", &other).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.request("GET", "/api/seats/C1", None).await;
    assert_eq!(response.body["data"]["state"], "leased");
}

#[tokio::test]
async fn test_commit_by_other_actor_is_conflict() {
    let app = helpers::TestApp::new();
    let lease_id = app.lease("C3", "alice").await;

    let response = app.finish("commit", "C3", "bob", &lease_id).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["details"]["code"], "WRONG_HOLDER");

    let other = app.lease("C4", "alice").await;
    let response = app.finish("commit", "C3", "alice", &other).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["details"]["code"], "INVALID_LEASE");
}

#[tokio::test]
async fn test_commit_after_expiry_is_gone() {
    let app = helpers::TestApp::new();
    let lease_id = app.lease("D1", "alice").await;

    app.advance(app.config.registry.lease_ttl() + Duration::from_secs(1));

    let response = app.finish("commit", "D1", "alice", &lease_id).await;
    assert_eq!(response.status, StatusCode::GONE);
    assert_eq!(response.body["details"]["code"], "LEASE_EXPIRED");

    let response = app.request("GET", "/api/seats/D1", None).await;
    assert_eq!(response.body["data"]["state"], "available");

    let response = app.finish("commit", "D1", "alice", &lease_id).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["details"]["code"], "SEAT_NOT_LEASED");
}

#[tokio::test]
async fn test_expired_lease_frees_seat_for_others() {
    let app = helpers::TestApp::new();
    app.lease("D2", "alice").await;

    app.advance(app.config.registry.lease_ttl() + Duration::from_millis(1));

    let response = app
        .request("POST", "/api/seats/D2/lease", Some(json!({ "actor_id": "bob" })))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["seat"]["holder"], "bob");
}

#[tokio::test]
async fn test_lease_at_exact_expiry_is_still_live() {
    let app = helpers::TestApp::new();
    app.lease("D3", "alice").await;

    app.advance(app.config.registry.lease_ttl());

    let response = app.request("GET", "/api/seats/D3", None).await;
    assert_eq!(response.body["data"]["state"], "leased");
}

#[tokio::test]
async fn test_commit_or_release_unleased_seat() {
    let app = helpers::TestApp::new();
    let lease_id = app.lease("E1", "alice").await;

    for action in ["commit", "release"] {
        let response = app.finish(action, "E2", "alice", &lease_id).await;
        assert_eq!(response.status, StatusCode::CONFLICT, "{action}");
        assert_eq!(response.body["details"]["code"], "SEAT_NOT_LEASED");
        assert_eq!(response.body["details"]["state"], "available");
    }
}

#[tokio::test]
async fn test_unknown_seat_is_not_found() {
    let app = helpers::TestApp::new();
    let lease_id = app.lease("A1", "alice").await;

    let response = app
        .request("POST", "/api/seats/Z9/lease", Some(json!({ "actor_id": "alice" })))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["details"]["code"], "SEAT_NOT_FOUND");

    for action in ["commit", "release"] {
        let response = app.finish(action, "A11", "alice", &lease_id).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{action}");
    }

    let response = app.request("GET", "/api/seats/Z9", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_request_bodies() {
    let app = helpers::TestApp::new();

    let response = app
        .request("POST", "/api/seats/A1/lease", Some(json!({ "actor_id": "   " })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let response = app
        .request("POST", "/api/seats/A1/lease", Some(json!({ "actor_id": "" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request("POST", "/api/seats/A1/lease", Some(json!({ "name": "alice" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    app.lease("A1", "alice").await;
    let response = app.finish("commit", "A1", "alice", "not-a-uuid").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.request("GET", "/api/seats/A1", None).await;
    assert_eq!(response.body["data"]["state"], "leased");
}

#[tokio::test]
async fn test_list_and_stats() {
    let app = helpers::TestApp::new();
    let lease_id = app.lease("A1", "alice").await;
    app.finish("commit", "A1", "alice", &lease_id).await;
    app.lease("A2", "bob").await;

    let response = app.request("GET", "/api/seats", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let seats = response.body["data"]["seats"].as_array().unwrap();
    assert_eq!(seats.len(), 50);
    assert_eq!(seats[0]["id"], "A1");
    assert_eq!(seats[9]["id"], "A10");
    assert_eq!(seats[10]["id"], "B1");
    assert_eq!(seats[49]["id"], "E10");

    let statistics = &response.body["data"]["statistics"];
    assert_eq!(statistics["total"], 50);
    assert_eq!(statistics["committed"], 1);
    assert_eq!(statistics["leased"], 1);
    assert_eq!(statistics["available"], 48);

    app.advance(app.config.registry.lease_ttl() * 2);

    let response = app.request("GET", "/api/stats", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["leased"], 0);
    assert_eq!(response.body["data"]["available"], 49);
    assert_eq!(response.body["data"]["committed"], 1);
}
