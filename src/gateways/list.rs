// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout list view model.

use crate::gateways::ListView;
use crate::models::{Workout, WorkoutId};
use crate::time_utils::format_utc_rfc3339;
use serde::Serialize;

/// One icon/value/unit cell of a list entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListDetail {
    pub icon: String,
    pub value: String,
    pub unit: String,
}

/// A rendered list entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEntry {
    pub id: WorkoutId,
    #[serde(rename = "type")]
    pub kind: String,
    /// CSS class, e.g. `workout--running`
    pub class: String,
    pub title: String,
    pub created_at: String,
    pub details: Vec<ListDetail>,
}

impl ListEntry {
    pub fn from_workout(workout: &Workout) -> Self {
        let traits = workout.kind().traits();
        let detail = |icon: &str, value: String, unit: &str| ListDetail {
            icon: icon.to_string(),
            value,
            unit: unit.to_string(),
        };

        Self {
            id: workout.id().clone(),
            kind: workout.kind().as_str().to_string(),
            class: traits.list_class.to_string(),
            title: workout.description().to_string(),
            created_at: format_utc_rfc3339(workout.created_at()),
            details: vec![
                detail(traits.icon, workout.distance_km().to_string(), "km"),
                detail("⏱", workout.duration_min().to_string(), "min"),
                detail(
                    "⚡️",
                    format!("{:.1}", workout.derived_metric()),
                    traits.metric_unit,
                ),
                detail(
                    traits.attribute_icon,
                    workout.attribute().to_string(),
                    traits.attribute_unit,
                ),
            ],
        }
    }
}

/// Rendered entries, newest first.
#[derive(Debug, Clone, Default)]
pub struct WorkoutList {
    entries: Vec<ListEntry>,
}

impl WorkoutList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ListView for WorkoutList {
    fn render(&mut self, workout: &Workout) {
        self.entries.insert(0, ListEntry::from_workout(workout));
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}
