// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use crate::gateways::StorageError;
use crate::services::factory::ValidationError;
use crate::services::session::AppendError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid workout: {0}")]
    Validation(#[from] ValidationError),

    #[error("Map is not available; workouts cannot be placed")]
    MapUnavailable,

    #[error("Click on the map to choose a location first")]
    NoPendingLocation,

    #[error("Workout {0} already exists")]
    DuplicateWorkout(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether the user can fix this by changing their input.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::NoPendingLocation)
    }
}

impl From<AppendError> for AppError {
    fn from(err: AppendError) -> Self {
        match err {
            AppendError::DuplicateId(id) => AppError::DuplicateWorkout(id.to_string()),
            AppendError::Storage(e) => AppError::Storage(e),
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Validation(e) => {
                (StatusCode::BAD_REQUEST, "invalid_workout", Some(e.to_string()))
            }
            AppError::MapUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "map_unavailable",
                Some(self.to_string()),
            ),
            AppError::NoPendingLocation => {
                (StatusCode::CONFLICT, "no_location", Some(self.to_string()))
            }
            AppError::DuplicateWorkout(_) => (
                StatusCode::CONFLICT,
                "duplicate_workout",
                Some(self.to_string()),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::Storage(err) => {
                tracing::error!(error = %err, "Storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
