//! The lazily-connected database handle.
//!
//! A [`Database`] is created from [`Settings`] without touching any backend.
//! The first [`Database::get`] connects and memoises the result; later calls
//! reuse it. A failed connection is not memoised, so every access repeats the
//! attempt and reports the same error (for example the list of missing
//! Firebase variables) until the environment is fixed.

use super::db::Db;
use super::store::{DocumentStore, NewTask, OrderWrite, StoreError, TaskDocument, TaskField};
use super::tasks::LocalStore;
use crate::api::firestore::FirestoreStore;
use crate::libs::config::{Settings, StorageMode};
use crate::libs::messages::Message;
use crate::msg_debug;
use tokio::sync::{watch, OnceCell};

/// A connected document store.
#[derive(Clone)]
pub enum Backend {
    Local(LocalStore),
    Firestore(FirestoreStore),
}

impl Backend {
    pub async fn connect(settings: &Settings) -> Result<Backend, StoreError> {
        let backend = match settings.storage {
            StorageMode::Local => {
                let path = match &settings.db_path {
                    Some(path) => path.clone(),
                    None => Db::default_path().map_err(|e| StoreError::Database(e.to_string()))?,
                };
                let store = tokio::task::spawn_blocking(move || LocalStore::open(path))
                    .await
                    .map_err(|e| StoreError::Database(e.to_string()))??;
                Backend::Local(store)
            }
            StorageMode::Firestore => {
                let config = settings.firebase.validate()?;
                Backend::Firestore(FirestoreStore::new(config, settings.emulator_host.as_deref())?)
            }
        };
        msg_debug!(Message::StorageModeSelected(backend.name().to_string()));

        Ok(backend)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Backend::Local(_) => "local",
            Backend::Firestore(_) => "firestore",
        }
    }
}

impl DocumentStore for Backend {
    async fn list(&self) -> Result<Vec<TaskDocument>, StoreError> {
        match self {
            Backend::Local(store) => store.list().await,
            Backend::Firestore(store) => store.list().await,
        }
    }

    async fn create(&self, task: NewTask) -> Result<String, StoreError> {
        match self {
            Backend::Local(store) => store.create(task).await,
            Backend::Firestore(store) => store.create(task).await,
        }
    }

    async fn update(&self, id: &str, field: TaskField) -> Result<(), StoreError> {
        match self {
            Backend::Local(store) => store.update(id, field).await,
            Backend::Firestore(store) => store.update(id, field).await,
        }
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        match self {
            Backend::Local(store) => store.delete(id).await,
            Backend::Firestore(store) => store.delete(id).await,
        }
    }

    async fn commit_orders(&self, writes: &[OrderWrite]) -> Result<(), StoreError> {
        match self {
            Backend::Local(store) => store.commit_orders(writes).await,
            Backend::Firestore(store) => store.commit_orders(writes).await,
        }
    }

    fn changes(&self) -> watch::Receiver<u64> {
        match self {
            Backend::Local(store) => store.changes(),
            Backend::Firestore(store) => store.changes(),
        }
    }
}

pub struct Database {
    settings: Settings,
    backend: OnceCell<Backend>,
}

impl Database {
    pub fn new(settings: Settings) -> Self {
        Database {
            settings,
            backend: OnceCell::new(),
        }
    }

    /// A handle that is already connected to `backend`.
    pub fn with_backend(backend: Backend) -> Self {
        Database {
            settings: Settings::default(),
            backend: OnceCell::from(backend),
        }
    }

    /// The connected backend, connecting on first use.
    pub async fn get(&self) -> Result<&Backend, StoreError> {
        self.backend.get_or_try_init(|| Backend::connect(&self.settings)).await
    }
}
