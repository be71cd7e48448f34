// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP API tests against an in-memory session.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use mapty_tracker::gateways::{FileStorage, Storage};
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_health() {
    let (app, _) = common::create_test_app(true);
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_click_then_submit() {
    let (app, state) = common::create_test_app(true);

    let (status, form) = send(
        &app,
        "POST",
        "/api/map/click",
        Some(json!({"lat": 10.0, "lng": 20.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["mode"], "awaiting_input");

    let (status, workout) = send(
        &app,
        "POST",
        "/api/workouts",
        Some(json!({"type": "running", "distance": "5", "duration": "25", "cadence": "180"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(workout["type"], "running");
    assert_eq!(workout["pace"], 5.0);
    assert_eq!(workout["coords"], json!([10.0, 20.0]));

    let (status, list) = send(&app, "GET", "/api/workouts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["class"], "workout--running");

    let (status, map) = send(&app, "GET", "/api/map", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(map["markers"]["type"], "FeatureCollection");
    assert_eq!(
        map["markers"]["features"][0]["geometry"]["coordinates"],
        json!([20.0, 10.0])
    );

    assert_eq!(state.controller.lock().await.store().len(), 1);
}

#[tokio::test]
async fn test_invalid_submission_is_bad_request() {
    let (app, state) = common::create_test_app(true);
    send(
        &app,
        "POST",
        "/api/map/click",
        Some(json!({"lat": 1.0, "lng": 1.0})),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/workouts",
        Some(json!({"type": "running", "distance": "-5", "duration": "25", "cadence": "180"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_workout");
    assert_eq!(body["details"], "Distance must be greater than zero");
    assert!(state.controller.lock().await.store().is_empty());
}

#[tokio::test]
async fn test_submit_without_click_is_conflict() {
    let (app, _) = common::create_test_app(true);
    let (status, body) = send(
        &app,
        "POST",
        "/api/workouts",
        Some(json!({"type": "cycling", "distance": 20, "duration": 60, "elevation": 100})),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "no_location");
}

#[tokio::test]
async fn test_no_map_is_service_unavailable() {
    let (app, _) = common::create_test_app(false);

    let (status, _) = send(&app, "GET", "/api/map", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, body) = send(
        &app,
        "POST",
        "/api/map/click",
        Some(json!({"lat": 1.0, "lng": 1.0})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "map_unavailable");
}

#[tokio::test]
async fn test_get_unknown_workout_is_not_found() {
    let (app, _) = common::create_test_app(true);
    let (status, _) = send(&app, "GET", "/api/workouts/123", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_select_pans_map() {
    let (app, _) = common::create_test_app(true);
    send(
        &app,
        "POST",
        "/api/map/click",
        Some(json!({"lat": 40.0, "lng": -3.7})),
    )
    .await;
    let (_, workout) = send(
        &app,
        "POST",
        "/api/workouts",
        Some(json!({"type": "cycling", "distance": "20", "duration": "60", "elevation": "-5"})),
    )
    .await;
    let id = workout["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "POST", &format!("/api/workouts/{}/select", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, map) = send(&app, "GET", "/api/map", None).await;
    assert_eq!(map["center"], json!([40.0, -3.7]));
    assert_eq!(map["animate"], true);

    let (_, fetched) = send(&app, "GET", &format!("/api/workouts/{}", id), None).await;
    assert_eq!(fetched["clicks"], 1);

    // Unknown ids are ignored silently
    let (status, _) = send(&app, "POST", "/api/workouts/unknown/select", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_form_variant_and_cancel() {
    let (app, _) = common::create_test_app(true);

    let (_, form) = send(&app, "GET", "/api/form", None).await;
    assert_eq!(form["mode"], "idle");
    assert_eq!(form["variant"], "running");

    let (_, form) = send(&app, "POST", "/api/form/variant", None).await;
    assert_eq!(form["variant"], "cycling");
    assert_eq!(form["popup_class"], "cycling-popup");

    send(
        &app,
        "POST",
        "/api/map/click",
        Some(json!({"lat": 1.0, "lng": 1.0})),
    )
    .await;
    let (_, form) = send(&app, "POST", "/api/form/cancel", None).await;
    assert_eq!(form["mode"], "idle");
}

#[tokio::test]
async fn test_reset_clears_session() {
    let (app, state) = common::create_test_app(true);
    send(
        &app,
        "POST",
        "/api/map/click",
        Some(json!({"lat": 1.0, "lng": 1.0})),
    )
    .await;
    send(
        &app,
        "POST",
        "/api/workouts",
        Some(json!({"type": "running", "distance": "5", "duration": "25", "cadence": "180"})),
    )
    .await;

    let (status, body) = send(&app, "POST", "/api/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Deleted 1 workouts");

    let (_, list) = send(&app, "GET", "/api/workouts", None).await;
    assert_eq!(list, json!([]));
    assert!(state.controller.lock().await.store().is_empty());
}

#[tokio::test]
async fn test_storage_failure_is_server_error() {
    let dir = common::temp_data_dir("api-write-failure");
    let storage = FileStorage::open(&dir).unwrap();
    let (app, state) = common::create_test_app_with_storage(Storage::File(storage), true);

    // Replace the data directory with a plain file so snapshot writes fail
    std::fs::remove_dir_all(&dir).unwrap();
    std::fs::write(&dir, b"").unwrap();

    send(
        &app,
        "POST",
        "/api/map/click",
        Some(json!({"lat": 1.0, "lng": 1.0})),
    )
    .await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/workouts",
        Some(json!({"type": "running", "distance": "5", "duration": "25", "cadence": "180"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "storage_error");

    // The workout is still part of the session
    let (_, list) = send(&app, "GET", "/api/workouts", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(state.controller.lock().await.store().len(), 1);

    std::fs::remove_file(&dir).unwrap();
}
