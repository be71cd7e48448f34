// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session API driven by the map frontend.

use crate::error::{AppError, Result};
use crate::gateways::ListEntry;
use crate::models::{Coordinates, Workout, WorkoutForm};
use crate::services::FormState;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Session API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts", get(list_workouts).post(submit_workout))
        .route("/api/workouts/{id}", get(get_workout))
        .route("/api/workouts/{id}/select", post(select_workout))
        .route("/api/map", get(get_map))
        .route("/api/map/click", post(map_click))
        .route("/api/form", get(get_form))
        .route("/api/form/variant", post(switch_variant))
        .route("/api/form/cancel", post(cancel_form))
        .route("/api/reset", post(reset))
}

// ─── Workouts ────────────────────────────────────────────────

/// Rendered workout list, newest first.
async fn list_workouts(State(state): State<Arc<AppState>>) -> Json<Vec<ListEntry>> {
    let controller = state.controller.lock().await;
    Json(controller.store().list().entries().to_vec())
}

/// Submit the new-workout form for the pending map location.
async fn submit_workout(
    State(state): State<Arc<AppState>>,
    Json(form): Json<WorkoutForm>,
) -> Result<(StatusCode, Json<Workout>)> {
    let mut controller = state.controller.lock().await;
    let workout = controller.submit_new_workout(&form)?.clone();
    Ok((StatusCode::CREATED, Json(workout)))
}

/// Fetch one workout.
async fn get_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Workout>> {
    let controller = state.controller.lock().await;
    controller
        .store()
        .find_by_id(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Workout {}", id)))
}

/// A list entry was clicked. Unknown ids are ignored.
async fn select_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> StatusCode {
    let mut controller = state.controller.lock().await;
    if !controller.select_workout_from_list(&id) {
        tracing::debug!(id = %id, "Selected workout not found");
    }
    StatusCode::NO_CONTENT
}

// ─── Map ─────────────────────────────────────────────────────

/// Current map view and marker layer.
#[derive(Serialize)]
pub struct MapResponse {
    pub center: Coordinates,
    pub zoom: u8,
    pub animate: bool,
    pub markers: FeatureCollection,
}

async fn get_map(State(state): State<Arc<AppState>>) -> Result<Json<MapResponse>> {
    let controller = state.controller.lock().await;
    let map = controller.store().map().ok_or(AppError::MapUnavailable)?;
    Ok(Json(MapResponse {
        center: map.center(),
        zoom: map.zoom(),
        animate: map.last_move_animated(),
        markers: map.to_geojson(),
    }))
}

#[derive(Deserialize)]
pub struct MapClick {
    pub lat: f64,
    pub lng: f64,
}

/// The user clicked the map: open the form at that location.
async fn map_click(
    State(state): State<Arc<AppState>>,
    Json(click): Json<MapClick>,
) -> Result<Json<FormState>> {
    let mut controller = state.controller.lock().await;
    controller.map_clicked(Coordinates::new(click.lat, click.lng))?;
    Ok(Json(controller.form_state()))
}

// ─── Form ────────────────────────────────────────────────────

async fn get_form(State(state): State<Arc<AppState>>) -> Json<FormState> {
    Json(state.controller.lock().await.form_state())
}

async fn switch_variant(State(state): State<Arc<AppState>>) -> Json<FormState> {
    let mut controller = state.controller.lock().await;
    controller.switch_variant();
    Json(controller.form_state())
}

async fn cancel_form(State(state): State<Arc<AppState>>) -> Json<FormState> {
    let mut controller = state.controller.lock().await;
    controller.cancel();
    Json(controller.form_state())
}

// ─── Reset ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ResetResponse {
    pub success: bool,
    pub message: String,
}

/// Delete all saved workouts and start a fresh session.
async fn reset(State(state): State<Arc<AppState>>) -> Result<Json<ResetResponse>> {
    let mut controller = state.controller.lock().await;
    let discarded = controller.store().len();
    controller.reset()?;

    tracing::info!(discarded, "User-initiated reset");
    Ok(Json(ResetResponse {
        success: true,
        message: format!("Deleted {} workouts", discarded),
    }))
}
