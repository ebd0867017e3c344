//! The document-store seam.
//!
//! Everything the application needs from its database fits in four
//! capabilities: CRUD on the user's `tasks` collection, one ordered query,
//! an atomic multi-document batch, and change notification. Both backends
//! implement [`DocumentStore`]; the rest of the crate never names a backend
//! directly.

use crate::libs::config::ConfigError;
use crate::libs::task::TaskStatus;
use crate::libs::timestamp::Timestamp;
use std::future::Future;
use thiserror::Error;
use tokio::sync::watch;

/// The single implicit user every document belongs to.
pub const USER_ID: &str = "user-123";

/// Name of the task collection under the user.
pub const TASKS_COLLECTION: &str = "tasks";

/// A task record as the store holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDocument {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub created_at: Option<Timestamp>,
    pub important: Option<bool>,
    pub order: Option<i64>,
}

/// Fields written when a task is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub status: TaskStatus,
    pub created_at: Timestamp,
    pub important: bool,
}

impl NewTask {
    /// A fresh task: `todo`, not important, created now, no order.
    pub fn titled(title: impl Into<String>) -> Self {
        NewTask {
            title: title.into(),
            status: TaskStatus::Todo,
            created_at: Timestamp::now(),
            important: false,
        }
    }
}

/// One single-field update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskField {
    Status(TaskStatus),
    Title(String),
    Important(bool),
}

impl TaskField {
    /// The document field this update writes.
    pub fn path(&self) -> &'static str {
        match self {
            TaskField::Status(_) => "status",
            TaskField::Title(_) => "title",
            TaskField::Important(_) => "important",
        }
    }
}

/// One entry of the order batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderWrite {
    pub id: String,
    pub order: i64,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("No document to update: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Request to the document store failed: {0}")]
    Transport(String),

    #[error("Document store rejected the request ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Malformed document {id}: {reason}")]
    Malformed { id: String, reason: String },
}

impl From<rusqlite::Error> for StoreError {
    fn from(error: rusqlite::Error) -> Self {
        StoreError::Database(error.to_string())
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(error: reqwest::Error) -> Self {
        StoreError::Transport(error.to_string())
    }
}

/// Collection-scoped access to the user's tasks.
///
/// Every write bumps the revision published by [`DocumentStore::changes`]
/// once it has been applied.
pub trait DocumentStore {
    /// All tasks, newest `created_at` first.
    fn list(&self) -> impl Future<Output = Result<Vec<TaskDocument>, StoreError>> + Send;

    /// Adds a document and returns its generated id.
    fn create(&self, task: NewTask) -> impl Future<Output = Result<String, StoreError>> + Send;

    /// Writes one field. Fails with [`StoreError::NotFound`] for a missing id.
    fn update(&self, id: &str, field: TaskField) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Removes a document. Removing a missing id is not an error.
    fn delete(&self, id: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Writes every `order` in one atomic batch; a missing id fails the whole
    /// batch and nothing is applied.
    fn commit_orders(&self, writes: &[OrderWrite]) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// A receiver of the local write revision.
    fn changes(&self) -> watch::Receiver<u64>;
}
