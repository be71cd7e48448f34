// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mapty Tracker API Server
//!
//! Hosts one workout session: restores saved workouts, centers the map on
//! the user's position and serves the session API to the map frontend.

use mapty_tracker::{
    config::Config,
    gateways::{FileStorage, Storage, WorkoutList},
    services::{GeolocationService, InteractionController, SessionStore},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Mapty Tracker");

    let storage = Storage::File(FileStorage::open(&config.data_dir)?);
    let store = SessionStore::new(storage, WorkoutList::new(), config.session_options());
    let mut controller = InteractionController::new(store);

    // Saved workouts go into the list right away; their markers are placed
    // once the map exists.
    let restored = controller.restore();
    tracing::info!(restored, "Session restored");

    let geolocation = GeolocationService::from_config(&config).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Geolocation unavailable");
        GeolocationService::Disabled
    });

    let state = Arc::new(AppState::new(config.clone(), controller));

    // Resolve the position in the background; the API is usable meanwhile.
    tokio::spawn({
        let state = state.clone();
        async move {
            let position = geolocation.current_position().await;
            let map_ready = state.controller.lock().await.initialize(position);
            if !map_ready {
                tracing::warn!("Running without a map; new workouts cannot be placed");
            }
        }
    });

    // Build router
    let app = mapty_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mapty_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
