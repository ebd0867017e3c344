//! The live task board.
//!
//! [`TaskBoard`] is the view-model: the full task list as of the latest
//! snapshot, the selected filter and a connection state. Every snapshot
//! replaces the whole list; counts and the visible slice are derived on
//! demand. [`LiveTasks`] owns the subscription that feeds a board and
//! unsubscribes when dropped.
//!
//! ```text
//! Loading ──snapshot──▶ Ready ──snapshot──▶ Ready
//!    │                    │
//!    └──────error─────────┴──▶ Failed (terminal, reconnect to recover)
//! ```

use crate::db::database::Database;
use crate::db::store::StoreError;
use crate::db::subscription::{subscribe, Snapshot, Subscription};
use crate::libs::messages::Message;
use crate::libs::task::{plan_reorder, visible_tasks, ReorderPlan, Task, TaskCounts, TaskFilter};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveState {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    state: LiveState,
    filter: TaskFilter,
}

impl TaskBoard {
    /// An empty board waiting for its first snapshot.
    pub fn new(filter: TaskFilter) -> Self {
        TaskBoard {
            tasks: Vec::new(),
            state: LiveState::Loading,
            filter,
        }
    }

    pub fn with_tasks(tasks: Vec<Task>, filter: TaskFilter) -> Self {
        TaskBoard {
            tasks,
            state: LiveState::Ready,
            filter,
        }
    }

    /// A board that could not connect at all.
    pub fn failed(filter: TaskFilter, error: &StoreError) -> Self {
        let mut board = TaskBoard::new(filter);
        board.fail(error);
        board
    }

    pub fn apply(&mut self, snapshot: Snapshot) {
        match snapshot {
            Ok(documents) => {
                self.tasks = documents.into_iter().map(Task::from_document).collect();
                self.state = LiveState::Ready;
            }
            Err(error) => self.fail(&error),
        }
    }

    fn fail(&mut self, error: &StoreError) {
        tracing::error!("task board stopped: {}", error);
        let message = match error {
            StoreError::Malformed { .. } => Message::TasksProcessingFailed,
            _ => Message::DatabaseConnectionFailed,
        };
        self.state = LiveState::Failed(message.to_string());
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn state(&self) -> &LiveState {
        &self.state
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    pub fn counts(&self) -> TaskCounts {
        TaskCounts::of(&self.tasks)
    }

    /// The tasks under the current filter, in display order.
    pub fn visible(&self) -> Vec<Task> {
        visible_tasks(&self.tasks, self.filter)
    }

    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// The reorder batch for dropping `dragged_id` onto `target_id` in the current view.
    pub fn plan_move(&self, dragged_id: &str, target_id: &str) -> Option<ReorderPlan> {
        plan_reorder(&self.tasks, self.filter, dragged_id, target_id)
    }
}

pub struct LiveTasks {
    subscription: Subscription,
    board: TaskBoard,
}

impl LiveTasks {
    /// Connects to the database and starts the subscription.
    pub async fn connect(database: &Database, filter: TaskFilter, poll_interval: Duration) -> Result<LiveTasks, StoreError> {
        let backend = database.get().await?;

        Ok(LiveTasks {
            subscription: subscribe(backend.clone(), poll_interval),
            board: TaskBoard::new(filter),
        })
    }

    /// Waits for the next snapshot and returns the updated board, or `None`
    /// once the subscription has ended.
    pub async fn next(&mut self) -> Option<&TaskBoard> {
        let snapshot = self.subscription.next().await?;
        self.board.apply(snapshot);
        Some(&self.board)
    }

    pub fn board(&self) -> &TaskBoard {
        &self.board
    }
}
