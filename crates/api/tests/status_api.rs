//! Integration tests for the legacy `/api/status` endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, fresh_app, get, post_json};
use serde_json::json;
use tyria_db::MemoryStore;

#[tokio::test]
async fn created_check_is_listed_once() {
    let (_, app) = fresh_app();

    let response = post_json(app.clone(), "/api/status", json!({"client_name": "Alice"})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let created = body_json(response).await;
    assert_eq!(created["client_name"], "Alice");
    assert_eq!(created["id"].as_str().unwrap().len(), 36);
    assert!(created["timestamp"].is_string());

    let listed = body_json(get(app, "/api/status").await).await;
    let alices: Vec<_> = listed
        .as_array()
        .unwrap()
        .iter()
        .filter(|c| c["client_name"] == "Alice")
        .collect();

    assert_eq!(alices.len(), 1);
    assert_eq!(alices[0]["id"], created["id"]);
}

#[tokio::test]
async fn ids_are_unique() {
    let (_, app) = fresh_app();

    let a = body_json(post_json(app.clone(), "/api/status", json!({"client_name": "a"})).await).await;
    let b = body_json(post_json(app, "/api/status", json!({"client_name": "a"})).await).await;

    assert_ne!(a["id"], b["id"]);
}

#[tokio::test]
async fn list_is_capped_by_config() {
    let store = Arc::new(MemoryStore::new());
    let mut config = common::test_config();
    config.status_list_limit = 2;
    let app = common::build_test_app_with_config(store, config);

    for name in ["a", "b", "c"] {
        post_json(app.clone(), "/api/status", json!({"client_name": name})).await;
    }

    let listed = body_json(get(app, "/api/status").await).await;
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["client_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["c", "b"]);
}

#[tokio::test]
async fn missing_client_name_is_rejected() {
    let (_, app) = fresh_app();
    let response = post_json(app, "/api/status", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Missing required field: client_name"
    );
}
