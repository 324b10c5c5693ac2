#![allow(clippy::unwrap_used, clippy::indexing_slicing, reason = "test assertions")]

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::test_helpers::{test_app_state, test_server};

#[tokio::test]
async fn test_cdn_settings_lifecycle() {
    let server = test_server(test_app_state(None));

    server.get("/cdn").await.assert_status(StatusCode::NOT_FOUND);
    server
        .put("/cdn")
        .json(&json!({ "host": "cdn.example.com", "ratio": 5 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let created = server.post("/cdn").json(&json!({ "host": "cdn.example.com", "ratio": 5 })).await;
    created.assert_status(StatusCode::CREATED);
    created.assert_json(&json!({ "host": "cdn.example.com", "ratio": 5 }));

    server
        .post("/cdn")
        .json(&json!({ "host": "other.example.com", "ratio": 2 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .put("/cdn")
        .json(&json!({ "host": "cdn2.example.com", "ratio": 7 }))
        .await
        .assert_status_ok();

    let current: Value = server.get("/cdn").await.json();
    assert_eq!(current, json!({ "host": "cdn2.example.com", "ratio": 7 }));
}

#[tokio::test]
async fn test_cdn_settings_validation() {
    let server = test_server(test_app_state(None));

    server
        .post("/cdn")
        .json(&json!({ "host": "cdn.example.com", "ratio": 0 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .post("/cdn")
        .json(&json!({ "host": "", "ratio": 3 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server.get("/cdn").await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_origin_rejects_duplicates() {
    let server = test_server(test_app_state(None));

    let created = server.post("/origin").json(&json!({ "name": "s1", "ratio": 4 })).await;
    created.assert_status(StatusCode::CREATED);
    assert!(created.json::<Value>()["id"].as_i64().is_some());

    server
        .post("/origin")
        .json(&json!({ "name": "s1" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_origin() {
    let server = test_server(test_app_state(None));

    let s1: Value = server.post("/origin").json(&json!({ "name": "s1" })).await.json();
    server
        .post("/origin")
        .json(&json!({ "name": "s2", "ratio": 3 }))
        .await
        .assert_status(StatusCode::CREATED);
    let id = s1["id"].as_i64().unwrap();

    server
        .put("/origin")
        .add_query_param("id", 9999)
        .json(&json!({ "name": "s9" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    server
        .put("/origin")
        .add_query_param("id", id)
        .json(&json!({ "name": "s2" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let updated = server
        .put("/origin")
        .add_query_param("id", id)
        .json(&json!({ "name": "s1", "ratio": 10 }))
        .await;
    updated.assert_status_ok();
    updated.assert_json(&json!({ "name": "s1", "ratio": 10 }));
}
