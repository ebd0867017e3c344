//! Core library modules for taskboard.
//!
//! - **Domain**: the task entity, filters and ordering ([`task`])
//! - **Live board**: the subscription-fed view-model ([`live`])
//! - **Presentation**: terminal rendering and date formatting ([`view`], [`formatter`])
//! - **Infrastructure**: configuration, data directory, timestamps, messages

pub mod config;
pub mod data_storage;
pub mod formatter;
pub mod live;
pub mod messages;
pub mod task;
pub mod timestamp;
pub mod view;
