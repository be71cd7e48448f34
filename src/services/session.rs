// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session store: the ordered workout history and its two views.
//!
//! The store is the only writer of the workout sequence. Every mutation is
//! mirrored onto the map (markers) and the list, and every append writes the
//! whole sequence to storage as one JSON snapshot. That write is O(history);
//! histories here are small.

use crate::gateways::{ListView, MapGateway, PersistenceGateway, StorageError, WORKOUTS_KEY};
use crate::models::{Coordinates, StoredWorkout, Workout, WorkoutId};
use crate::services::factory::{NewWorkout, ValidationError, WorkoutFactory};
use crate::services::geolocation::GeolocationError;
use std::collections::HashSet;

/// Why a workout could not be appended.
#[derive(Debug, thiserror::Error)]
pub enum AppendError {
    #[error("Workout {0} is already in the session")]
    DuplicateId(WorkoutId),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Zoom level used when the map is first centered.
pub const DEFAULT_MAP_ZOOM: u8 = 13;

/// Session settings.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Storage key for the workout snapshot
    pub storage_key: String,
    /// Initial map zoom
    pub map_zoom: u8,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            storage_key: WORKOUTS_KEY.to_string(),
            map_zoom: DEFAULT_MAP_ZOOM,
        }
    }
}

/// Owns the workout sequence, the map, the list view and storage.
pub struct SessionStore<P, M, L> {
    workouts: Vec<Workout>,
    factory: WorkoutFactory,
    storage: P,
    map: Option<M>,
    list: L,
    options: SessionOptions,
}

impl<P, M, L> SessionStore<P, M, L>
where
    P: PersistenceGateway,
    M: MapGateway,
    L: ListView,
{
    /// Create an empty store with no map yet.
    pub fn new(storage: P, list: L, options: SessionOptions) -> Self {
        Self {
            workouts: Vec::new(),
            factory: WorkoutFactory::new(),
            storage,
            map: None,
            list,
            options,
        }
    }

    // ─── Map ─────────────────────────────────────────────────────

    /// Finish initialization with the outcome of the geolocation request.
    ///
    /// On success the map is created at the configured zoom and markers for
    /// every known workout are placed. On failure the session continues
    /// without a map. Returns whether a map is now attached.
    pub fn initialize(&mut self, position: Result<Coordinates, GeolocationError>) -> bool {
        match position {
            Ok(center) => {
                let map = M::initialize(center, self.options.map_zoom);
                self.attach_map(map);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not get current position; map unavailable");
                false
            }
        }
    }

    /// Attach a ready map and place markers for every workout already held.
    pub fn attach_map(&mut self, mut map: M) {
        for workout in &self.workouts {
            place_marker(&mut map, workout);
        }
        tracing::info!(markers = self.workouts.len(), "Map attached");
        self.map = Some(map);
    }

    pub fn has_map(&self) -> bool {
        self.map.is_some()
    }

    pub fn map(&self) -> Option<&M> {
        self.map.as_ref()
    }

    // ─── Restore / Persist ───────────────────────────────────────

    /// Replace the in-memory history with the persisted snapshot.
    ///
    /// An absent, unreadable or malformed snapshot restores nothing.
    /// Each entry goes back through the factory; entries that fail validation
    /// or repeat an earlier id are dropped. Returns the number restored.
    pub fn restore(&mut self) -> usize {
        let key = self.options.storage_key.as_str();
        let blob = match self.storage.read(key) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                tracing::debug!(key, "No saved workouts");
                return 0;
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read saved workouts");
                return 0;
            }
        };

        let entries: Vec<serde_json::Value> = match serde_json::from_str(&blob) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(key, error = %e, "Saved workouts are malformed; starting empty");
                return 0;
            }
        };

        let mut restored = Vec::with_capacity(entries.len());
        let mut seen = HashSet::new();
        for (index, entry) in entries.into_iter().enumerate() {
            let stored: StoredWorkout = match serde_json::from_value(entry) {
                Ok(stored) => stored,
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping unreadable saved workout");
                    continue;
                }
            };
            if seen.contains(&stored.id) {
                tracing::warn!(index, id = %stored.id, "Skipping duplicate saved workout");
                continue;
            }
            match self.factory.reconstruct(stored) {
                Ok(workout) => {
                    seen.insert(workout.id().clone());
                    restored.push(workout);
                }
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping invalid saved workout");
                }
            }
        }

        self.workouts = restored;

        self.list.clear();
        for workout in &self.workouts {
            self.list.render(workout);
        }
        if let Some(map) = self.map.as_mut() {
            map.reload();
            for workout in &self.workouts {
                place_marker(map, workout);
            }
        }

        tracing::info!(count = self.workouts.len(), "Restored saved workouts");
        self.workouts.len()
    }

    /// The JSON snapshot of the whole history, as written to storage.
    pub fn snapshot(&self) -> Result<String, StorageError> {
        serde_json::to_string(&self.workouts).map_err(|e| StorageError::Encode(e.to_string()))
    }

    /// Write the whole history to storage.
    pub fn persist(&self) -> Result<(), StorageError> {
        let blob = self.snapshot()?;
        self.storage.write(&self.options.storage_key, &blob)
    }

    // ─── Mutation ────────────────────────────────────────────────

    /// Build a workout through this store's factory. Does not append it.
    pub fn create(&mut self, input: NewWorkout) -> Result<Workout, ValidationError> {
        self.factory.create(input)
    }

    /// Append a validated workout, show it on both views and persist.
    ///
    /// A workout whose id is already held is rejected and nothing changes.
    /// If the storage write fails the workout stays in memory (and will be
    /// included in the next snapshot); the error is returned to the caller.
    pub fn append(&mut self, workout: Workout) -> Result<(), AppendError> {
        if self.find_by_id(workout.id().as_str()).is_some() {
            tracing::warn!(id = %workout.id(), "Rejecting workout with a duplicate id");
            return Err(AppendError::DuplicateId(workout.id().clone()));
        }
        self.factory.observe(workout.id());

        match self.map.as_mut() {
            Some(map) => place_marker(map, &workout),
            None => tracing::debug!(id = %workout.id(), "No map yet; marker deferred"),
        }
        self.list.render(&workout);

        tracing::info!(
            id = %workout.id(),
            kind = workout.kind().as_str(),
            total = self.workouts.len() + 1,
            "Workout added"
        );
        self.workouts.push(workout);

        self.persist().inspect_err(|e| {
            tracing::error!(error = %e, "Failed to persist workouts");
        })?;
        Ok(())
    }

    /// Purge storage and reload the session from scratch.
    ///
    /// History, list and markers are discarded and the map returns to its
    /// initial view. The in-memory state is dropped even if the purge fails.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        let purged = self.storage.remove(&self.options.storage_key);

        let discarded = self.workouts.len();
        self.workouts.clear();
        self.list.clear();
        if let Some(map) = self.map.as_mut() {
            map.reload();
        }

        match &purged {
            Ok(()) => tracing::info!(discarded, "Session reset"),
            Err(e) => tracing::error!(discarded, error = %e, "Failed to purge saved workouts"),
        }
        purged
    }

    // ─── Lookup / Navigation ─────────────────────────────────────

    pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id().as_str() == id)
    }

    /// Animate the map to a workout. Unknown ids and a missing map are
    /// silently ignored. Returns whether the view moved.
    pub fn pan_to(&mut self, id: &str) -> bool {
        let Some(coords) = self.find_by_id(id).map(|w| w.coords()) else {
            tracing::debug!(id, "Pan target not found");
            return false;
        };
        match self.map.as_mut() {
            Some(map) => {
                map.pan_to(coords, true);
                true
            }
            None => false,
        }
    }

    /// Handle a list selection: pan to the workout and count the selection.
    pub fn select(&mut self, id: &str) -> bool {
        let moved = self.pan_to(id);
        match self.workouts.iter_mut().find(|w| w.id().as_str() == id) {
            Some(workout) => {
                workout.mark_selected();
                true
            }
            None => moved,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    /// Most recently appended workout.
    pub fn last(&self) -> Option<&Workout> {
        self.workouts.last()
    }

    pub fn ids(&self) -> impl Iterator<Item = &WorkoutId> {
        self.workouts.iter().map(|w| w.id())
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    pub fn storage(&self) -> &P {
        &self.storage
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }
}

fn place_marker<M: MapGateway>(map: &mut M, workout: &Workout) {
    map.place_marker(
        workout.coords(),
        &workout.popup_content(),
        workout.kind().traits().popup_class,
    );
}
