//! # Taskboard - a personal task manager
//!
//! An HTTP API over a document store, a typed client for it, and a live
//! terminal board.
//!
//! ## Features
//!
//! - **Task API**: create, update, delete and reorder tasks over JSON
//! - **Two stores**: a local SQLite file or Cloud Firestore
//! - **Live board**: filters with counts, drag-style reordering and a
//!   subscription that re-renders on every change
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskboard::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
pub mod server;
