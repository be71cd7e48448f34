// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout model: the tagged running/cycling record and its stored form.
//!
//! Per-kind behavior (labels, units, icons, popup styling and the derived
//! metric formula) lives in a static table indexed by [`WorkoutKind`], so the
//! record itself stays a plain tagged value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Latitude/longitude pair, stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components finite and inside the WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

impl From<Coordinates> for geo::Point<f64> {
    fn from(c: Coordinates) -> Self {
        // geo uses x = longitude, y = latitude
        geo::Point::new(c.lng, c.lat)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// Workout identifier, unique within one session store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Discriminant for the closed set of workout variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

/// Static per-kind behavior.
#[derive(Debug)]
pub struct KindTraits {
    /// Description prefix ("Run on October 15")
    pub description_label: &'static str,
    /// Name of the derived metric field
    pub metric_name: &'static str,
    pub metric_unit: &'static str,
    /// Name of the variant-specific input
    pub attribute_name: &'static str,
    pub attribute_unit: &'static str,
    pub icon: &'static str,
    pub attribute_icon: &'static str,
    /// CSS class for the marker popup
    pub popup_class: &'static str,
    /// CSS class for the list entry
    pub list_class: &'static str,
    /// Derived metric from (distance km, duration min)
    pub metric: fn(f64, f64) -> f64,
}

fn pace_min_per_km(distance_km: f64, duration_min: f64) -> f64 {
    duration_min / distance_km
}

fn speed_km_per_h(distance_km: f64, duration_min: f64) -> f64 {
    distance_km / (duration_min / 60.0)
}

// Indexed by `WorkoutKind as usize`.
static KIND_TABLE: [KindTraits; 2] = [
    KindTraits {
        description_label: "Run",
        metric_name: "pace",
        metric_unit: "min/km",
        attribute_name: "cadence",
        attribute_unit: "spm",
        icon: "🏃‍♂️",
        attribute_icon: "🦶🏼",
        popup_class: "running-popup",
        list_class: "workout--running",
        metric: pace_min_per_km,
    },
    KindTraits {
        description_label: "Cycling trip",
        metric_name: "speed",
        metric_unit: "km/h",
        attribute_name: "elevation gain",
        attribute_unit: "m",
        icon: "🚴‍♀️",
        attribute_icon: "⛰",
        popup_class: "cycling-popup",
        list_class: "workout--cycling",
        metric: speed_km_per_h,
    },
];

impl WorkoutKind {
    pub fn traits(self) -> &'static KindTraits {
        &KIND_TABLE[self as usize]
    }

    /// Compute this kind's derived metric.
    pub fn derived_metric(self, distance_km: f64, duration_min: f64) -> f64 {
        (self.traits().metric)(distance_km, duration_min)
    }

    /// The other variant (form type switch).
    pub fn toggled(self) -> Self {
        match self {
            WorkoutKind::Running => WorkoutKind::Cycling,
            WorkoutKind::Cycling => WorkoutKind::Running,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }
}

impl std::str::FromStr for WorkoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(format!("unknown workout type: {other}")),
        }
    }
}

/// Variant payload: the type-specific input and its derived metric snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutDetails {
    Running {
        /// Steps per minute
        cadence: f64,
        /// Minutes per kilometer
        pace: f64,
    },
    Cycling {
        /// Meters climbed (may be negative for downhill)
        #[serde(rename = "elevationGain")]
        elevation_gain_m: f64,
        /// Kilometers per hour
        speed: f64,
    },
}

impl WorkoutDetails {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    pub fn attribute(&self) -> f64 {
        match self {
            WorkoutDetails::Running { cadence, .. } => *cadence,
            WorkoutDetails::Cycling {
                elevation_gain_m, ..
            } => *elevation_gain_m,
        }
    }

    pub fn derived_metric(&self) -> f64 {
        match self {
            WorkoutDetails::Running { pace, .. } => *pace,
            WorkoutDetails::Cycling { speed, .. } => *speed,
        }
    }
}

/// Plain persisted shape of a workout.
///
/// This is what the storage blob holds. It carries no guarantees on its own;
/// it becomes a [`Workout`] only through `WorkoutFactory::reconstruct`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredWorkout {
    pub id: WorkoutId,
    /// Construction time
    pub date: DateTime<Utc>,
    pub coords: Coordinates,
    /// Distance in kilometers
    pub distance: f64,
    /// Duration in minutes
    pub duration: f64,
    #[serde(flatten)]
    pub details: WorkoutDetails,
    pub description: String,
    /// Number of times the workout was selected from the list
    #[serde(default)]
    pub clicks: u32,
}

/// A fully formed workout.
///
/// Fields are private: the only ways to obtain one are the factory's
/// `create` and `reconstruct`, both of which validate. The derived metric and
/// description are snapshots taken at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Workout {
    record: StoredWorkout,
}

impl Workout {
    /// Wrap an already validated record.
    pub(crate) fn from_validated(record: StoredWorkout) -> Self {
        Self { record }
    }

    pub fn id(&self) -> &WorkoutId {
        &self.record.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.record.date
    }

    pub fn coords(&self) -> Coordinates {
        self.record.coords
    }

    pub fn distance_km(&self) -> f64 {
        self.record.distance
    }

    pub fn duration_min(&self) -> f64 {
        self.record.duration
    }

    pub fn kind(&self) -> WorkoutKind {
        self.record.details.kind()
    }

    pub fn details(&self) -> &WorkoutDetails {
        &self.record.details
    }

    /// Cadence or elevation gain, depending on the kind.
    pub fn attribute(&self) -> f64 {
        self.record.details.attribute()
    }

    /// Pace or speed, as computed at construction.
    pub fn derived_metric(&self) -> f64 {
        self.record.details.derived_metric()
    }

    pub fn description(&self) -> &str {
        &self.record.description
    }

    pub fn selection_count(&self) -> u32 {
        self.record.clicks
    }

    /// Record an explicit selection.
    pub fn mark_selected(&mut self) {
        self.record.clicks = self.record.clicks.saturating_add(1);
    }

    /// Popup text: kind icon followed by the description.
    pub fn popup_content(&self) -> String {
        format!("{} {}", self.kind().traits().icon, self.record.description)
    }

    pub fn as_stored(&self) -> &StoredWorkout {
        &self.record
    }
}
