//! HTTP clients.
//!
//! - [`tasks`]: the typed client the CLI uses to talk to a taskboard server
//! - [`firestore`]: the Cloud Firestore REST backend of the document store

pub mod firestore;
pub mod tasks;

pub use tasks::{ClientError, TasksApi};
