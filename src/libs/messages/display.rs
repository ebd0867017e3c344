//! User-facing text for every [`Message`].
//!
//! All CLI wording lives here so commands only pick a variant.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === BOARD ===
            Message::BoardTitle => "Task Manager".to_string(),
            Message::BoardSubtitle => "Manage your tasks efficiently".to_string(),
            Message::NoTasksYet => "No tasks yet. Add one with `taskboard add`!".to_string(),
            Message::NoActiveTasks => "No active tasks. Great job!".to_string(),
            Message::NoCompletedTasks => "No completed tasks yet.".to_string(),
            Message::LoadingTasks => "Loading tasks...".to_string(),
            Message::DatabaseConnectionFailed => "Failed to connect to database".to_string(),
            Message::TasksProcessingFailed => "Failed to load tasks".to_string(),
            Message::PromptRetry => "Retry".to_string(),
            Message::WatchStopped => "Stopped watching tasks".to_string(),

            // === TASK ACTIONS ===
            Message::TaskCreated(id) => format!("Task created successfully (id: {})", id),
            Message::TaskTitleEmpty => "Task title cannot be empty".to_string(),
            Message::TaskNotFound(id) => format!("Task '{}' not found", id),
            Message::TaskMarkedDone(title) => format!("Marked '{}' as done", title),
            Message::TaskMarkedTodo(title) => format!("Marked '{}' as todo", title),
            Message::TaskMarkedImportant(title) => format!("Marked '{}' as important", title),
            Message::TaskUnmarkedImportant(title) => format!("Removed importance from '{}'", title),
            Message::TaskRenamed(title) => format!("Task renamed to '{}'", title),
            Message::TaskTitleUnchanged => "Title unchanged, nothing to update".to_string(),
            Message::ConfirmDeleteTask(title) => format!("Are you sure you want to delete '{}'?", title),
            Message::TaskDeleted => "Task deleted successfully".to_string(),
            Message::TaskDeleteCancelled => "Delete cancelled".to_string(),
            Message::TasksReordered(count) => format!("Task order updated ({} tasks)", count),
            Message::ReorderNoop => "Nothing to move: both tasks must differ and be visible under the current filter".to_string(),

            // === API CLIENT FALLBACKS ===
            Message::LoadTasksFailed => "Failed to get tasks".to_string(),
            Message::CreateTaskFailed => "Failed to create task".to_string(),
            Message::DeleteTaskFailed => "Failed to delete task".to_string(),
            Message::UpdateStatusFailed => "Failed to update task status".to_string(),
            Message::UpdateTitleFailed => "Failed to update task title".to_string(),
            Message::ToggleImportanceFailed => "Failed to toggle task importance".to_string(),
            Message::UpdateOrderFailed => "Failed to update task order".to_string(),

            // === SERVER ===
            Message::StorageModeSelected(mode) => format!("Using the {} document store", mode),
            Message::ServerListening(address) => format!("Listening on {}", address),
            Message::ServerShuttingDown => "Shutdown signal received, stopping server".to_string(),
            Message::ServerStopped => "Server shutdown complete".to_string(),

            // === MIGRATIONS ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed successfully".to_string(),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
        };

        write!(f, "{}", text)
    }
}
