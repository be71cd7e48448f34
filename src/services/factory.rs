// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout construction and validation.
//!
//! Every [`Workout`] in the system comes out of [`WorkoutFactory`]: either
//! freshly built from form input (`create`) or rebuilt from a persisted entry
//! (`reconstruct`). Both paths run the same input checks.

use crate::models::{Coordinates, StoredWorkout, Workout, WorkoutDetails, WorkoutId, WorkoutKind};
use crate::time_utils::format_month_day;
use chrono::{DateTime, Utc};

/// Validated-on-create input for a new workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewWorkout {
    pub kind: WorkoutKind,
    pub coords: Coordinates,
    pub distance_km: f64,
    pub duration_min: f64,
    /// Cadence (running) or elevation gain in meters (cycling)
    pub attribute: f64,
}

/// Rejected workout input. The message is shown to the user as is.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be a number")]
    NotFinite { field: &'static str },

    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("Coordinates {0} are outside the valid latitude/longitude range")]
    InvalidCoordinates(Coordinates),

    #[error("Stored workout is missing its {0}")]
    Incomplete(&'static str),
}

/// Monotonic millisecond id source.
///
/// Ids are 13-digit zero-padded millisecond timestamps. Two workouts created
/// within the same millisecond get consecutive values instead of colliding.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn next(&mut self, now: DateTime<Utc>) -> WorkoutId {
        let millis = now.timestamp_millis().max(self.last + 1);
        self.last = millis;
        WorkoutId::new(format!("{:013}", millis))
    }

    /// Make sure future ids sort after an id that already exists.
    pub fn observe(&mut self, id: &WorkoutId) {
        if let Ok(value) = id.as_str().parse::<i64>() {
            self.last = self.last.max(value);
        }
    }
}

/// Builds workouts and owns the id sequence for one store.
#[derive(Debug, Default)]
pub struct WorkoutFactory {
    ids: IdGenerator,
}

impl WorkoutFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a new workout stamped with the current time.
    pub fn create(&mut self, input: NewWorkout) -> Result<Workout, ValidationError> {
        self.create_at(input, Utc::now())
    }

    /// Build a new workout stamped with `now`.
    pub fn create_at(
        &mut self,
        input: NewWorkout,
        now: DateTime<Utc>,
    ) -> Result<Workout, ValidationError> {
        validate(
            input.kind,
            input.coords,
            input.distance_km,
            input.duration_min,
            input.attribute,
        )?;

        let metric = input
            .kind
            .derived_metric(input.distance_km, input.duration_min);
        let details = match input.kind {
            WorkoutKind::Running => WorkoutDetails::Running {
                cadence: input.attribute,
                pace: metric,
            },
            WorkoutKind::Cycling => WorkoutDetails::Cycling {
                elevation_gain_m: input.attribute,
                speed: metric,
            },
        };

        let record = StoredWorkout {
            id: self.ids.next(now),
            date: now,
            coords: input.coords,
            distance: input.distance_km,
            duration: input.duration_min,
            details,
            description: describe(input.kind, now),
            clicks: 0,
        };

        tracing::debug!(
            id = %record.id,
            kind = input.kind.as_str(),
            metric,
            "Workout created"
        );

        Ok(Workout::from_validated(record))
    }

    /// Rebuild a persisted workout, re-checking its inputs.
    ///
    /// The stored id, timestamp, description and metric are kept as they are;
    /// nothing is recomputed, so re-persisting yields the same bytes.
    pub fn reconstruct(&mut self, stored: StoredWorkout) -> Result<Workout, ValidationError> {
        validate(
            stored.details.kind(),
            stored.coords,
            stored.distance,
            stored.duration,
            stored.details.attribute(),
        )?;

        if stored.id.as_str().trim().is_empty() {
            return Err(ValidationError::Incomplete("id"));
        }
        if stored.description.trim().is_empty() {
            return Err(ValidationError::Incomplete("description"));
        }
        let metric = stored.details.derived_metric();
        if !metric.is_finite() || metric <= 0.0 {
            return Err(ValidationError::Incomplete(
                stored.details.kind().traits().metric_name,
            ));
        }

        self.ids.observe(&stored.id);
        Ok(Workout::from_validated(stored))
    }

    /// Keep future ids clear of a workout built elsewhere.
    pub fn observe(&mut self, id: &WorkoutId) {
        self.ids.observe(id);
    }
}

/// Description shown in the list and popups ("Run on March 7").
pub fn describe(kind: WorkoutKind, date: DateTime<Utc>) -> String {
    format!("{} on {}", kind.traits().description_label, format_month_day(date))
}

fn validate(
    kind: WorkoutKind,
    coords: Coordinates,
    distance_km: f64,
    duration_min: f64,
    attribute: f64,
) -> Result<(), ValidationError> {
    require_positive(distance_km, "Distance")?;
    require_positive(duration_min, "Duration")?;

    match kind {
        WorkoutKind::Running => require_positive(attribute, "Cadence")?,
        // Elevation may be negative (downhill) or zero.
        WorkoutKind::Cycling => require_finite(attribute, "Elevation gain")?,
    }

    if !coords.is_valid() {
        return Err(ValidationError::InvalidCoordinates(coords));
    }
    Ok(())
}

fn require_finite(value: f64, field: &'static str) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite { field })
    }
}

fn require_positive(value: f64, field: &'static str) -> Result<(), ValidationError> {
    require_finite(value, field)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive { field })
    }
}
