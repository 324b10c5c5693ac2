#![allow(clippy::unwrap_used, clippy::indexing_slicing, reason = "test assertions")]

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::{json, Value};
use video_balancer_core::testing::FailingCache;
use video_balancer_types::RoutingSettings;

use crate::test_helpers::{test_app_state, test_app_state_with_cache, test_server};

const VIDEO: &str = "http://s1.origin-cluster/video/1488/xcg2djHckad.m3u8";
const CDN_VIDEO: &str = "http://cdn.example.com/s1/video/1488/xcg2djHckad.m3u8";

fn settings(ratio: u32) -> Option<RoutingSettings> {
    RoutingSettings::new("cdn.example.com", ratio)
}

fn location(response: &axum_test::TestResponse) -> String {
    response.header("location").to_str().unwrap().to_string()
}

#[tokio::test]
async fn test_every_third_request_goes_to_origin() {
    let server = test_server(test_app_state(settings(3)));

    let mut locations = Vec::new();
    for _ in 0..6 {
        let response = server.get("/").add_query_param("video_url", VIDEO).await;
        response.assert_status(StatusCode::TEMPORARY_REDIRECT);
        locations.push(location(&response));
    }

    assert_eq!(locations, [CDN_VIDEO, CDN_VIDEO, VIDEO, CDN_VIDEO, CDN_VIDEO, VIDEO]);
}

#[tokio::test]
async fn test_not_configured_is_bad_request() {
    let server = test_server(test_app_state(None));

    let response = server.get("/").add_query_param("video_url", VIDEO).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["detail"].as_str().unwrap().contains("not configured"));
}

#[tokio::test]
async fn test_unparseable_url_redirects_to_origin() {
    let server = test_server(test_app_state(settings(1000)));

    let raw = "http://origin.example.com/video.mp4";
    let response = server.get("/").add_query_param("video_url", raw).await;
    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), raw);
}

#[tokio::test]
async fn test_missing_query_parameter() {
    let server = test_server(test_app_state(settings(3)));

    let response = server.get("/").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cache_down_still_redirects_to_cdn() {
    let server = test_server(test_app_state_with_cache(settings(2), Arc::new(FailingCache)));

    for _ in 0..4 {
        let response = server.get("/").add_query_param("video_url", VIDEO).await;
        response.assert_status(StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), CDN_VIDEO);
    }
}

#[tokio::test]
async fn test_origin_override_uses_own_ratio() {
    let server = test_server(test_app_state(settings(1000)));

    server
        .post("/origin")
        .json(&json!({ "name": "s1", "ratio": 2 }))
        .await
        .assert_status(StatusCode::CREATED);

    let first = server.get("/").add_query_param("video_url", VIDEO).await;
    let second = server.get("/").add_query_param("video_url", VIDEO).await;
    assert_eq!(location(&first), CDN_VIDEO);
    assert_eq!(location(&second), VIDEO);

    // s2 has no override and follows the global ratio
    let other = "http://s2.origin-cluster/video.mp4";
    let response = server.get("/").add_query_param("video_url", other).await;
    assert_eq!(location(&response), "http://cdn.example.com/s2/video.mp4");
}

#[tokio::test]
async fn test_control_characters_in_unmapped_url_are_rejected() {
    let server = test_server(test_app_state(settings(3)));

    for raw in ["http://weird\u{1}host/video.mp4", "http://weird-host/a\nb.mp4", "\u{7f}"] {
        let response = server.get("/").add_query_param("video_url", raw).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let detail = response.json::<Value>()["detail"].as_str().unwrap().to_string();
        assert!(detail.contains("not allowed in a redirect"), "{detail}");
    }

    // Still serving afterwards
    let response = server.get("/").add_query_param("video_url", VIDEO).await;
    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), CDN_VIDEO);
}

#[tokio::test]
async fn test_control_characters_on_origin_turn_are_rejected() {
    let server = test_server(test_app_state(settings(1)));

    let raw = "http://s1.origin-cluster/vid\u{1}eo.mp4";
    server
        .get("/")
        .add_query_param("video_url", raw)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = server.get("/").add_query_param("video_url", VIDEO).await;
    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), VIDEO);
}

#[tokio::test]
async fn test_rejected_url_does_not_advance_counter() {
    let server = test_server(test_app_state(settings(2)));

    for _ in 0..3 {
        server
            .get("/")
            .add_query_param("video_url", "http://s1.origin-cluster/a\u{0}b.mp4")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    let first = server.get("/").add_query_param("video_url", VIDEO).await;
    let second = server.get("/").add_query_param("video_url", VIDEO).await;
    assert_eq!(location(&first), CDN_VIDEO);
    assert_eq!(location(&second), VIDEO);
}

#[tokio::test]
async fn test_unencodable_cdn_host_is_rejected() {
    let server = test_server(test_app_state(RoutingSettings::new("cdn\u{1}.example.com", 100)));

    server
        .get("/")
        .add_query_param("video_url", VIDEO)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_ascii_path_redirects() {
    let server = test_server(test_app_state(settings(1)));

    let raw = "http://s1.origin-cluster/видео.mp4";
    let response = server.get("/").add_query_param("video_url", raw).await;
    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location").as_bytes(), raw.as_bytes());
}

#[tokio::test]
async fn test_health() {
    let server = test_server(test_app_state(None));
    let body: Value = server.get("/health").await.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["cache"], "ok");
    assert_eq!(body["database"], "memory");

    let server = test_server(test_app_state_with_cache(None, Arc::new(FailingCache)));
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["cache"], "unavailable");
}
