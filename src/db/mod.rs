//! Persistence for taskboard.
//!
//! Tasks are documents in the `tasks` collection of a single implicit user.
//! The [`store::DocumentStore`] trait is the only way the rest of the crate
//! talks to storage, and it has two implementations:
//!
//! - [`tasks::LocalStore`]: a SQLite file (the default), schema managed by
//!   [`migrations`]
//! - [`crate::api::firestore::FirestoreStore`]: Cloud Firestore over REST
//!
//! [`database::Database`] picks one from the settings on first use, and
//! [`subscription::subscribe`] turns any store into a live feed of
//! snapshots.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskboard::db::database::Database;
//! use taskboard::db::store::{DocumentStore, NewTask};
//! use taskboard::libs::config::Settings;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let database = Database::new(Settings::from_env()?);
//! let store = database.get().await?;
//! let id = store.create(NewTask::titled("Buy milk")).await?;
//! println!("created {}", id);
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod db;
pub mod migrations;
pub mod store;
pub mod subscription;
pub mod tasks;
