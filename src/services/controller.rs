// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! UI event handling on top of the session store.
//!
//! The controller owns the new-workout form state:
//!
//! ```text
//! Idle --map click--> AwaitingInput(coords) --submit ok / cancel--> Idle
//! ```
//!
//! A second click while awaiting input replaces the pending coordinates.
//! A rejected submit keeps the form open with the same coordinates.

use crate::error::{AppError, Result};
use crate::gateways::{ListView, MapGateway, PersistenceGateway};
use crate::models::{Coordinates, Workout, WorkoutForm, WorkoutKind};
use crate::services::factory::{NewWorkout, ValidationError};
use crate::services::geolocation::GeolocationError;
use crate::services::session::SessionStore;
use serde::Serialize;

/// New-workout form mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FormMode {
    Idle,
    AwaitingInput { coords: Coordinates },
}

/// What the frontend needs to draw the form.
#[derive(Debug, Clone, Serialize)]
pub struct FormState {
    #[serde(flatten)]
    pub mode: FormMode,
    /// Variant currently selected in the form
    pub variant: WorkoutKind,
    /// Popup style for markers placed from this form
    pub popup_class: &'static str,
}

/// Translates UI events into session store calls.
pub struct InteractionController<P, M, L> {
    store: SessionStore<P, M, L>,
    mode: FormMode,
    variant: WorkoutKind,
}

impl<P, M, L> InteractionController<P, M, L>
where
    P: PersistenceGateway,
    M: MapGateway,
    L: ListView,
{
    pub fn new(store: SessionStore<P, M, L>) -> Self {
        Self {
            store,
            mode: FormMode::Idle,
            variant: WorkoutKind::Running,
        }
    }

    /// Load the saved history into the store and the list.
    pub fn restore(&mut self) -> usize {
        self.store.restore()
    }

    /// Hand the geolocation outcome to the store.
    pub fn initialize(
        &mut self,
        position: std::result::Result<Coordinates, GeolocationError>,
    ) -> bool {
        self.store.initialize(position)
    }

    /// A click on the map opens the form for that location.
    pub fn map_clicked(&mut self, coords: Coordinates) -> Result<()> {
        if !self.store.has_map() {
            return Err(AppError::MapUnavailable);
        }
        if !coords.is_valid() {
            return Err(ValidationError::InvalidCoordinates(coords).into());
        }

        if let FormMode::AwaitingInput { coords: previous } = self.mode {
            tracing::debug!(%previous, %coords, "Replacing pending location");
        }
        self.mode = FormMode::AwaitingInput { coords };
        Ok(())
    }

    /// Close the form without creating anything.
    pub fn cancel(&mut self) {
        self.mode = FormMode::Idle;
    }

    /// Toggle the form between running and cycling.
    pub fn switch_variant(&mut self) -> WorkoutKind {
        self.variant = self.variant.toggled();
        self.variant
    }

    /// Validate the form and, if it passes, add the workout at the pending
    /// location. Nothing changes when validation fails.
    pub fn submit_new_workout(&mut self, form: &WorkoutForm) -> Result<&Workout> {
        if !self.store.has_map() {
            return Err(AppError::MapUnavailable);
        }
        let FormMode::AwaitingInput { coords } = self.mode else {
            return Err(AppError::NoPendingLocation);
        };

        let input = NewWorkout {
            kind: form.kind,
            coords,
            distance_km: form.distance.as_number(),
            duration_min: form.duration.as_number(),
            attribute: form.attribute(),
        };

        let workout = self.store.create(input).inspect_err(|e| {
            tracing::info!(reason = %e, "Workout rejected");
        })?;

        self.mode = FormMode::Idle;
        self.store.append(workout)?;

        self.store
            .last()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Appended workout missing")))
    }

    /// A click on a list entry.
    pub fn select_workout_from_list(&mut self, id: &str) -> bool {
        self.store.select(id)
    }

    /// Wipe saved history and start over.
    pub fn reset(&mut self) -> Result<()> {
        self.mode = FormMode::Idle;
        self.variant = WorkoutKind::Running;
        self.store.reset()?;
        Ok(())
    }

    pub fn form_state(&self) -> FormState {
        FormState {
            mode: self.mode,
            variant: self.variant,
            popup_class: self.variant.traits().popup_class,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn store(&self) -> &SessionStore<P, M, L> {
        &self.store
    }
}
