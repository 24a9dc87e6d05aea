//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use seatlease_api::AppState;
use seatlease_core::config::AppConfig;
use seatlease_registry::{LeaseRegistry, ManualClock, SeatLayout};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Registry behind the router, for direct inspection
    pub registry: Arc<LeaseRegistry>,
    /// Clock the registry reads; advance it to expire leases
    pub clock: Arc<ManualClock>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application with the default 5x10 layout
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application from an explicit config
    pub fn with_config(config: AppConfig) -> Self {
        let clock = Arc::new(ManualClock::starting_now());
        let registry = Arc::new(LeaseRegistry::new(
            SeatLayout::from_config(&config.registry),
            config.registry.lease_ttl(),
            clock.clone(),
        ));

        let state = AppState::new(Arc::new(config.clone()), Arc::clone(&registry));
        let router = seatlease_api::build_app(state);

        Self {
            router,
            registry,
            clock,
            config,
        }
    }

    /// Move the registry clock forward
    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }

    /// Lease a seat and return the lease id
    pub async fn lease(&self, seat_id: &str, actor_id: &str) -> String {
        let response = self
            .request(
                "POST",
                &format!("/api/seats/{seat_id}/lease"),
                Some(serde_json::json!({ "actor_id": actor_id })),
            )
            .await;

        assert_eq!(response.status, StatusCode::OK, "lease failed: {:?}", response.body);
        response.body["data"]["lease_id"]
            .as_str()
            .expect("No lease_id in lease response")
            .to_string()
    }

    /// Commit or release a seat with the given lease
    pub async fn finish(
        &self,
        action: &str,
        seat_id: &str,
        actor_id: &str,
        lease_id: &str,
    ) -> TestResponse {
        self.request(
            "POST",
            &format!("/api/seats/{seat_id}/{action}"),
            Some(serde_json::json!({ "actor_id": actor_id, "lease_id": lease_id })),
        )
        .await
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
