// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Mapty Tracker: log runs and rides on a map
//!
//! This crate holds the workout model, the session store that keeps the
//! workout history in sync with the map, the list and local storage, and a
//! small JSON API that a map frontend drives.

pub mod config;
pub mod error;
pub mod gateways;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use gateways::{MapCanvas, Storage, WorkoutList};
use services::InteractionController;
use tokio::sync::Mutex;

/// The controller type served by the binary.
pub type SessionController = InteractionController<Storage, MapCanvas, WorkoutList>;

/// Shared application state.
///
/// All session operations go through the one mutex, so each runs to
/// completion before the next starts.
pub struct AppState {
    pub config: Config,
    pub controller: Mutex<SessionController>,
}

impl AppState {
    pub fn new(config: Config, controller: SessionController) -> Self {
        Self {
            config,
            controller: Mutex::new(controller),
        }
    }
}
