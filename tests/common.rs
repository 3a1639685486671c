//! Common test utilities for Coinmill integration tests
//!
//! This file contains shared functions for all integration tests: test
//! application setup and helpers for creating users and restraints through
//! the API.

#![allow(dead_code)]

use coinmill::{
    create_app,
    db::init_pool,
    models::{UpgradeSet, User},
};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::Service;

/// Creates a test application backed by a fresh in-memory SQLite database
///
/// Every call gets its own shared-cache database so that all pooled
/// connections see the same data while tests stay isolated from each other.
pub fn create_test_app() -> Router {
    let database_url = format!("file:test_{}?mode=memory&cache=shared", uuid::Uuid::new_v4());
    let pool = Arc::new(init_pool(&database_url).unwrap());

    let conn = &mut pool.get().unwrap();
    coinmill::run_migrations(conn).unwrap();

    create_app(pool)
}

/// Sends a request with an optional JSON body and returns the raw response
pub async fn send(app: &mut Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder()
        .uri(uri)
        .method(method)
        .header("Content-Type", "application/json");

    let request = match body {
        Some(body) => builder.body(Body::from(serde_json::to_string(&body).unwrap())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.call(request).await.unwrap()
}

/// Reads a response body as JSON
pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Reads the `error` message from an error response
pub async fn read_error(response: Response) -> String {
    let body: Value = read_json(response).await;
    body["error"].as_str().unwrap().to_string()
}

/// Creates a user via the API
pub async fn create_user(app: &mut Router, signup_coin: f64, coins_per_minute: f64) -> User {
    let response = send(
        app,
        "POST",
        "/users",
        Some(json!({ "signupCoin": signup_coin, "coinsPerMinute": coins_per_minute })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    read_json(response).await
}

/// Fetches a user via the API
pub async fn get_user(app: &mut Router, id: &str) -> User {
    let response = send(app, "GET", &format!("/users/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    read_json(response).await
}

/// Creates a restraint via the API and returns the upgrade set it was added to
pub async fn create_restraint(
    app: &mut Router,
    user_id: Option<&str>,
    name: &str,
    cost: &str,
    coin_min: f64,
) -> UpgradeSet {
    let response = send(
        app,
        "POST",
        "/restraints",
        Some(json!({
            "userId": user_id,
            "name": name,
            "level": 1,
            "cost": cost,
            "coinMin": coin_min,
            "icon": "chain.png",
            "quote": "Tighter."
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    read_json(response).await
}

/// Lists upgrade sets via the API
pub async fn list_upgrade_sets(app: &mut Router) -> Vec<UpgradeSet> {
    let response = send(app, "GET", "/restraints", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    read_json(response).await
}
