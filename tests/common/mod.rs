// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use mapty_tracker::config::Config;
use mapty_tracker::gateways::{
    MapCanvas, MemoryStorage, PersistenceGateway, Storage, StorageError, WorkoutList,
};
use mapty_tracker::models::Coordinates;
use mapty_tracker::routes::create_router;
use mapty_tracker::services::{InteractionController, SessionOptions, SessionStore};
use mapty_tracker::AppState;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Store over in-memory storage, as used by most tests.
#[allow(dead_code)]
pub type TestStore = SessionStore<MemoryStorage, MapCanvas, WorkoutList>;

/// Create a store on top of `storage` (clones share their entries).
#[allow(dead_code)]
pub fn test_store(storage: &MemoryStorage) -> TestStore {
    SessionStore::new(
        storage.clone(),
        WorkoutList::new(),
        SessionOptions::default(),
    )
}

/// Create a store that already has a map centered at (0, 0).
#[allow(dead_code)]
pub fn test_store_with_map(storage: &MemoryStorage) -> TestStore {
    let mut store = test_store(storage);
    store.initialize(Ok(Coordinates::new(0.0, 0.0)));
    store
}

/// Create a test app backed by in-memory storage.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(with_map: bool) -> (axum::Router, Arc<AppState>) {
    create_test_app_with_storage(Storage::memory(), with_map)
}

/// Create a test app on top of the given storage backend.
#[allow(dead_code)]
pub fn create_test_app_with_storage(
    storage: Storage,
    with_map: bool,
) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let store = SessionStore::new(storage, WorkoutList::new(), config.session_options());
    let mut controller = InteractionController::new(store);
    controller.restore();
    if with_map {
        controller.initialize(Ok(config.home_position.unwrap_or(Coordinates::new(0.0, 0.0))));
    }

    let state = Arc::new(AppState::new(config, controller));
    (create_router(state.clone()), state)
}

/// Fresh, non-existent directory under the system temp dir.
#[allow(dead_code)]
pub fn temp_data_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mapty-test-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let _ = std::fs::remove_file(&dir);
    dir
}

/// Memory storage whose operations can be switched to fail.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct FlakyStorage {
    inner: MemoryStorage,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    fail_removes: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl FlakyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inner(&self) -> &MemoryStorage {
        &self.inner
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_removes(&self, fail: bool) {
        self.fail_removes.store(fail, Ordering::SeqCst);
    }
}

impl PersistenceGateway for FlakyStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Io("read refused".to_string()));
        }
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io("disk full".to_string()));
        }
        self.inner.write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(StorageError::Io("remove refused".to_string()));
        }
        self.inner.remove(key)
    }
}

/// Store over [`FlakyStorage`] with a map centered at (0, 0).
#[allow(dead_code)]
pub fn flaky_store(storage: &FlakyStorage) -> SessionStore<FlakyStorage, MapCanvas, WorkoutList> {
    let mut store = SessionStore::new(
        storage.clone(),
        WorkoutList::new(),
        SessionOptions::default(),
    );
    store.initialize(Ok(Coordinates::new(0.0, 0.0)));
    store
}
