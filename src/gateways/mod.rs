// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Boundaries to the outside world: the map, the workout list and storage.
//!
//! The session store only talks to these traits. The concrete types in the
//! submodules are in-memory view models (map, list) and key/value backends
//! (file, memory).

pub mod list;
pub mod map;
pub mod storage;

pub use list::{ListEntry, WorkoutList};
pub use map::{MapCanvas, Marker};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};

use crate::models::{Coordinates, Workout};

/// Default key the workout snapshot is stored under.
pub const WORKOUTS_KEY: &str = "workouts";

/// The map widget.
pub trait MapGateway {
    /// Create the map centered on `center` at `zoom`.
    fn initialize(center: Coordinates, zoom: u8) -> Self
    where
        Self: Sized;

    /// Add a marker with an open popup.
    fn place_marker(&mut self, coords: Coordinates, popup_content: &str, popup_class: &str);

    /// Move the view to `coords`, keeping the zoom level.
    fn pan_to(&mut self, coords: Coordinates, animate: bool);

    /// Drop all markers and return to the initial view.
    fn reload(&mut self);
}

/// The rendered workout list.
pub trait ListView {
    fn render(&mut self, workout: &Workout);

    fn clear(&mut self);
}

/// Durable key/value storage holding JSON text.
pub trait PersistenceGateway {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
