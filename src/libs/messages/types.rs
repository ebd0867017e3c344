#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // === BOARD ===
    BoardTitle,
    BoardSubtitle,
    NoTasksYet,
    NoActiveTasks,
    NoCompletedTasks,
    LoadingTasks,
    DatabaseConnectionFailed,
    TasksProcessingFailed,
    PromptRetry,
    WatchStopped,

    // === TASK ACTIONS ===
    TaskCreated(String), // id
    TaskTitleEmpty,
    TaskNotFound(String),  // id
    TaskMarkedDone(String), // title
    TaskMarkedTodo(String), // title
    TaskMarkedImportant(String),
    TaskUnmarkedImportant(String),
    TaskRenamed(String), // new title
    TaskTitleUnchanged,
    ConfirmDeleteTask(String), // title or id
    TaskDeleted,
    TaskDeleteCancelled,
    TasksReordered(usize), // number of tasks renumbered
    ReorderNoop,

    // === API CLIENT FALLBACKS ===
    LoadTasksFailed,
    CreateTaskFailed,
    DeleteTaskFailed,
    UpdateStatusFailed,
    UpdateTitleFailed,
    ToggleImportanceFailed,
    UpdateOrderFailed,

    // === SERVER ===
    StorageModeSelected(String),
    ServerListening(String), // address
    ServerShuttingDown,
    ServerStopped,

    // === MIGRATIONS ===
    MigrationsFound(usize),
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),
    MigrationFailed(u32, String), // version, error
    AllMigrationsCompleted,
    DatabaseUpToDate,
}
