//! The task entity and the derived views the board shows.
//!
//! Filters and ordering are computed on the client from one full list; they
//! never issue their own query.
//!
//! ## Display ordering
//!
//! Two tasks compare by ascending `order` when both carry one, otherwise by
//! `createdAt`, newest first. The fallback is decided per comparison, so a
//! list mixing ordered and unordered tasks has no consistent total order:
//! with `a(order 0, t=100)`, `c(order 1, t=300)` and `b(no order, t=200)` the
//! relation gives `a < c`, `c < b` and `b < a`. [`sort_for_display`] arranges
//! such lists with a stable insertion sort, which only ever compares
//! neighbours and always terminates with the same result for the same input.

use crate::db::store::TaskDocument;
use crate::libs::timestamp::convert_timestamp;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Todo,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::Done => "done",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            TaskStatus::Todo => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::Todo,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "todo" => Ok(TaskStatus::Todo),
            "done" => Ok(TaskStatus::Done),
            other => Err(format!("unknown task status '{}'", other)),
        }
    }
}

/// A task as clients see it: creation time in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub created_at: i64,
    #[serde(default)]
    pub important: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl Task {
    pub fn from_document(document: TaskDocument) -> Self {
        Task {
            id: document.id,
            title: document.title,
            status: document.status,
            created_at: convert_timestamp(document.created_at),
            important: document.important.unwrap_or(false),
            order: document.order,
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }
}

/// Client-side views over the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TaskFilter {
    pub const ALL: [TaskFilter; 3] = [TaskFilter::All, TaskFilter::Active, TaskFilter::Completed];

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Active => task.status == TaskStatus::Todo,
            TaskFilter::Completed => task.status == TaskStatus::Done,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskFilter::All => "All",
            TaskFilter::Active => "Active",
            TaskFilter::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub all: usize,
    pub active: usize,
    pub completed: usize,
}

impl TaskCounts {
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.is_done()).count();
        TaskCounts {
            all: tasks.len(),
            active: tasks.len() - completed,
            completed,
        }
    }

    pub fn get(&self, filter: TaskFilter) -> usize {
        match filter {
            TaskFilter::All => self.all,
            TaskFilter::Active => self.active,
            TaskFilter::Completed => self.completed,
        }
    }
}

/// The pairwise display relation described in the module docs.
pub fn display_cmp(a: &Task, b: &Task) -> Ordering {
    match (a.order, b.order) {
        (Some(left), Some(right)) => left.cmp(&right),
        _ => b.created_at.cmp(&a.created_at),
    }
}

/// Arranges tasks for display without relying on a total order.
pub fn sort_for_display(tasks: &mut [Task]) {
    for i in 1..tasks.len() {
        let mut j = i;
        while j > 0 && display_cmp(&tasks[j - 1], &tasks[j]) == Ordering::Greater {
            tasks.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// The tasks a filter shows, in display order.
pub fn visible_tasks(tasks: &[Task], filter: TaskFilter) -> Vec<Task> {
    let mut visible: Vec<Task> = tasks.iter().filter(|task| filter.matches(task)).cloned().collect();
    sort_for_display(&mut visible);
    visible
}

/// A batched `order` rewrite: `orders[i]` belongs to `task_ids[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderPlan {
    pub task_ids: Vec<String>,
    pub orders: Vec<i64>,
}

impl ReorderPlan {
    fn numbered(tasks: &[Task]) -> Self {
        ReorderPlan {
            task_ids: tasks.iter().map(|task| task.id.clone()).collect(),
            orders: (0..tasks.len() as i64).collect(),
        }
    }
}

/// Computes the order rewrite for dropping `dragged_id` onto `target_id`.
///
/// The drop is a splice on the view `filter` shows: the dragged task is
/// taken out and reinserted at the target's index. The resulting sequence is
/// written back into the slots the visible tasks occupy in the full sorted
/// list, so hidden tasks keep their places, and every task is renumbered
/// `0..n`. Afterwards the view shows exactly the spliced sequence, even when
/// the list mixes ordered and unordered tasks.
///
/// Returns `None` when the drop is a no-op: same task, or either task not in
/// the view.
pub fn plan_reorder(tasks: &[Task], filter: TaskFilter, dragged_id: &str, target_id: &str) -> Option<ReorderPlan> {
    if dragged_id == target_id {
        return None;
    }

    let mut visible = visible_tasks(tasks, filter);
    let from = visible.iter().position(|task| task.id == dragged_id)?;
    let to = visible.iter().position(|task| task.id == target_id)?;
    let dragged = visible.remove(from);
    visible.insert(to, dragged);

    let mut full = tasks.to_vec();
    sort_for_display(&mut full);

    let mut spliced = visible.into_iter();
    for slot in full.iter_mut().filter(|task| filter.matches(task)) {
        if let Some(task) = spliced.next() {
            *slot = task;
        }
    }

    Some(ReorderPlan::numbered(&full))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, status: TaskStatus, created_at: i64, order: Option<i64>) -> Task {
        Task {
            id: id.to_string(),
            title: id.to_uppercase(),
            status,
            created_at,
            important: false,
            order,
        }
    }

    #[test]
    fn status_round_trips_through_its_string_form() {
        assert_eq!("todo".parse::<TaskStatus>(), Ok(TaskStatus::Todo));
        assert_eq!("done".parse::<TaskStatus>(), Ok(TaskStatus::Done));
        assert!("DONE".parse::<TaskStatus>().is_err());
        assert_eq!(TaskStatus::Todo.toggled(), TaskStatus::Done);
    }

    #[test]
    fn order_is_omitted_from_json_when_absent() {
        let json = serde_json::to_value(task("a", TaskStatus::Todo, 5, None)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "a", "title": "A", "status": "todo", "createdAt": 5, "important": false})
        );
    }

    #[test]
    fn counts_split_by_status() {
        let tasks = vec![
            task("a", TaskStatus::Todo, 1, None),
            task("b", TaskStatus::Done, 2, None),
            task("c", TaskStatus::Todo, 3, None),
        ];
        let counts = TaskCounts::of(&tasks);
        assert_eq!(counts, TaskCounts { all: 3, active: 2, completed: 1 });
        assert_eq!(counts.get(TaskFilter::Completed), 1);
    }
}
