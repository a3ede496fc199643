//! End-to-end dashboard flow
//!
//! Wires the sampling pipeline, shared state, diagnosis client and HTTP
//! router together the way `main` does, then exercises the operator
//! workflow: watch live data, switch modes, pause, and request a diagnosis.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use mechamind::api::{create_app, DashboardState};
use mechamind::diagnosis::DiagnosisClient;
use mechamind::pipeline::{AppState, SamplingDriver, SharedState};
use mechamind::simulator::MotorSimulator;

fn build_state() -> (SharedState, DashboardState) {
    let app_state = AppState::shared();
    let dashboard = DashboardState::new(app_state.clone(), Arc::new(DiagnosisClient::demo()));
    (app_state, dashboard)
}

fn driver(app_state: SharedState) -> SamplingDriver {
    SamplingDriver::new(
        MotorSimulator::seeded(2024),
        app_state,
        Duration::from_secs(1),
        CancellationToken::new(),
    )
}

async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let resp = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(app: &axum::Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn live_reflects_driver_ticks() {
    let (app_state, dashboard) = build_state();
    let app = create_app(dashboard);
    let mut driver = driver(app_state);

    let (status, v) = get_json(&app, "/api/v1/live").await;
    assert_eq!(status, StatusCode::OK);
    assert!(v["data"]["sample"].is_null());

    for _ in 0..3 {
        driver.tick_once().await;
    }

    let (status, v) = get_json(&app, "/api/v1/live").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"]["buffer"]["len"], 3);
    assert!(v["data"]["sample"]["temperature"].is_number());
    assert_eq!(v["data"]["status"], "monitoring");
}

#[tokio::test]
async fn mode_switch_changes_sampling_behavior() {
    let (app_state, dashboard) = build_state();
    let app = create_app(dashboard);
    let mut driver = driver(app_state.clone());

    let (status, _) = post_json(&app, "/api/v1/mode", r#"{"mode":"overheat"}"#).await;
    assert_eq!(status, StatusCode::OK);

    for _ in 0..60 {
        driver.tick_once().await;
    }

    // A minute of overheating must push the latest sample past the warning line
    let (_, v) = get_json(&app, "/api/v1/live").await;
    let temp = v["data"]["sample"]["temperature"].as_f64().unwrap();
    assert!(temp > 65.0, "temperature after sustained overheat: {temp}");
    assert_eq!(v["data"]["mode"], "overheat");
}

#[tokio::test]
async fn pause_stops_sampling_but_keeps_history() {
    let (app_state, dashboard) = build_state();
    let app = create_app(dashboard);
    let mut driver = driver(app_state.clone());

    for _ in 0..5 {
        driver.tick_once().await;
    }

    let (status, v) = post_json(&app, "/api/v1/sampling/pause", "{}").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"]["paused"], true);

    // Paused ticks generate nothing
    for _ in 0..5 {
        driver.tick_once().await;
    }
    let (_, v) = get_json(&app, "/api/v1/history").await;
    assert_eq!(v["data"]["buffer"]["len"], 5);
    assert_eq!(v["data"]["samples"].as_array().unwrap().len(), 5);

    let (_, v) = post_json(&app, "/api/v1/sampling/resume", "{}").await;
    assert_eq!(v["data"]["paused"], false);

    driver.tick_once().await;
    let (_, v) = get_json(&app, "/api/v1/history").await;
    assert_eq!(v["data"]["buffer"]["len"], 6);
}

#[tokio::test]
async fn history_is_bounded_at_thirty() {
    let (app_state, dashboard) = build_state();
    let app = create_app(dashboard);
    let mut driver = driver(app_state);

    for _ in 0..75 {
        driver.tick_once().await;
    }

    let (_, v) = get_json(&app, "/api/v1/history").await;
    assert_eq!(v["data"]["samples"].as_array().unwrap().len(), 30);
    assert_eq!(v["data"]["buffer"]["capacity"], 30);
}

#[tokio::test]
async fn analysis_demo_flow() {
    let (app_state, dashboard) = build_state();
    let app = create_app(dashboard);
    let mut driver = driver(app_state);

    // Too few samples yet
    let (status, v) = post_json(&app, "/api/v1/analysis", "{}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(v["error"]["message"].is_string());

    for _ in 0..12 {
        driver.tick_once().await;
    }

    let (status, v) = post_json(&app, "/api/v1/analysis", "{}").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"]["result"]["status"], "Healthy");
    assert_eq!(v["data"]["live"], false);
    // Diagnosis window is capped at the last ten samples
    assert_eq!(v["data"]["window_len"], 10);

    // The result is now retrievable
    let (status, v) = get_json(&app, "/api/v1/analysis").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"]["result"]["status"], "Healthy");
}

#[tokio::test]
async fn analysis_unavailable_before_first_run() {
    let (_, dashboard) = build_state();
    let app = create_app(dashboard);

    let (status, v) = get_json(&app, "/api/v1/analysis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(v["error"]["message"].is_string());
}
