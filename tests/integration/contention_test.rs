//! Integration tests for concurrent access through the HTTP layer.

mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use futures::future::join_all;
use serde_json::json;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_acquires_have_one_winner() {
    let app = Arc::new(helpers::TestApp::new());

    let attempts = (0..32).map(|n| {
        let app = Arc::clone(&app);
        tokio::spawn(async move {
            app.request(
                "POST",
                "/api/seats/C5/lease",
                Some(json!({ "actor_id": format!("actor-{n}") })),
            )
            .await
        })
    });

    let responses: Vec<_> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let winners = responses
        .iter()
        .filter(|r| r.status == StatusCode::OK)
        .count();
    let conflicts = responses
        .iter()
        .filter(|r| r.status == StatusCode::CONFLICT)
        .count();
    assert_eq!(winners, 1);
    assert_eq!(conflicts, 31);

    let statistics = app.registry.statistics().await;
    assert_eq!(statistics.leased, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_commit_and_release_of_one_lease() {
    let app = Arc::new(helpers::TestApp::new());
    let lease_id = app.lease("D7", "alice").await;

    let commit = {
        let app = Arc::clone(&app);
        let lease_id = lease_id.clone();
        tokio::spawn(async move { app.finish("commit", "D7", "alice", &lease_id).await })
    };
    let release = {
        let app = Arc::clone(&app);
        tokio::spawn(async move { app.finish("release", "D7", "alice", &lease_id).await })
    };

    let commit = commit.await.unwrap();
    let release = release.await.unwrap();

    // Exactly one of the two transitions wins.
    assert_ne!(commit.status == StatusCode::OK, release.status == StatusCode::OK);

    let seat = app.request("GET", "/api/seats/D7", None).await;
    let expected = if commit.status == StatusCode::OK {
        "committed"
    } else {
        "available"
    };
    assert_eq!(seat.body["data"]["state"], expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_every_seat_leased_once() {
    let app = Arc::new(helpers::TestApp::new());
    let seat_ids: Vec<String> = app
        .registry
        .layout()
        .seat_ids()
        .map(|id| id.to_string())
        .collect();

    let attempts = seat_ids.iter().flat_map(|seat_id| {
        let app = Arc::clone(&app);
        (0..3).map(move |n| {
            let app = Arc::clone(&app);
            let seat_id = seat_id.clone();
            tokio::spawn(async move {
                app.request(
                    "POST",
                    &format!("/api/seats/{seat_id}/lease"),
                    Some(json!({ "actor_id": format!("actor-{n}") })),
                )
                .await
                .status
            })
        })
    });

    let statuses: Vec<_> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::OK).count(),
        seat_ids.len()
    );
    assert_eq!(app.registry.statistics().await.available, 0);
}
