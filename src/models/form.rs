// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Raw workout form submission.

use crate::models::WorkoutKind;
use serde::{Deserialize, Serialize};

/// One form input as sent by the frontend: either the raw text of the input
/// element or an already numeric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Number(f64),
    Text(String),
}

impl Default for FormValue {
    fn default() -> Self {
        FormValue::Text(String::new())
    }
}

impl FormValue {
    /// Numeric reading of the input.
    ///
    /// Blank text reads as 0 and unparsable text as NaN, so both reach the
    /// factory's validation instead of being rejected here.
    pub fn as_number(&self) -> f64 {
        match self {
            FormValue::Number(n) => *n,
            FormValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
        }
    }
}

impl From<f64> for FormValue {
    fn from(n: f64) -> Self {
        FormValue::Number(n)
    }
}

impl From<&str> for FormValue {
    fn from(s: &str) -> Self {
        FormValue::Text(s.to_string())
    }
}

/// Values of the new-workout form.
///
/// Only the attribute matching `kind` is read; the other one is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutForm {
    #[serde(rename = "type")]
    pub kind: WorkoutKind,
    #[serde(default)]
    pub distance: FormValue,
    #[serde(default)]
    pub duration: FormValue,
    #[serde(default)]
    pub cadence: FormValue,
    #[serde(default)]
    pub elevation: FormValue,
}

impl WorkoutForm {
    pub fn running(
        distance: impl Into<FormValue>,
        duration: impl Into<FormValue>,
        cadence: impl Into<FormValue>,
    ) -> Self {
        Self {
            kind: WorkoutKind::Running,
            distance: distance.into(),
            duration: duration.into(),
            cadence: cadence.into(),
            elevation: FormValue::default(),
        }
    }

    pub fn cycling(
        distance: impl Into<FormValue>,
        duration: impl Into<FormValue>,
        elevation: impl Into<FormValue>,
    ) -> Self {
        Self {
            kind: WorkoutKind::Cycling,
            distance: distance.into(),
            duration: duration.into(),
            cadence: FormValue::default(),
            elevation: elevation.into(),
        }
    }

    /// The variant attribute selected by `kind`.
    pub fn attribute(&self) -> f64 {
        match self.kind {
            WorkoutKind::Running => self.cadence.as_number(),
            WorkoutKind::Cycling => self.elevation.as_number(),
        }
    }
}
