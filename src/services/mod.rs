// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - workout logic and session orchestration.

pub mod controller;
pub mod factory;
pub mod geolocation;
pub mod session;

pub use controller::{FormMode, FormState, InteractionController};
pub use factory::{NewWorkout, ValidationError, WorkoutFactory};
pub use geolocation::{GeolocationError, GeolocationService};
pub use session::{AppendError, SessionOptions, SessionStore};
