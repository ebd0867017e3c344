use super::formatter::{format_date, format_relative_time};
use super::live::{LiveState, TaskBoard};
use super::messages::Message;
use super::task::{Task, TaskCounts, TaskFilter};
use prettytable::{format, row, Table};

/// Bar widths of the loading placeholder rows, in percent.
const SKELETON_WIDTHS: [usize; 6] = [75, 85, 65, 90, 70, 80];
const SKELETON_BAR: usize = 40;
pub const SKELETON_ROWS: usize = 5;

/// How the Created column is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateStyle {
    #[default]
    Absolute,
    Relative,
}

impl DateStyle {
    pub fn format(&self, timestamp: i64) -> String {
        match self {
            DateStyle::Absolute => format_date(timestamp),
            DateStyle::Relative => format_relative_time(timestamp),
        }
    }
}

pub struct View {}

impl View {
    pub fn header() -> String {
        format!("{}\n{}", Message::BoardTitle, Message::BoardSubtitle)
    }

    /// `[All (3)]  Active (2)  Completed (1)` with the current filter bracketed.
    pub fn filter_tabs(counts: &TaskCounts, current: TaskFilter) -> String {
        TaskFilter::ALL
            .iter()
            .map(|filter| {
                let tab = format!("{} ({})", filter.label(), counts.get(*filter));
                if *filter == current {
                    format!("[{}]", tab)
                } else {
                    tab
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    }

    pub fn empty(filter: TaskFilter) -> Message {
        match filter {
            TaskFilter::All => Message::NoTasksYet,
            TaskFilter::Active => Message::NoActiveTasks,
            TaskFilter::Completed => Message::NoCompletedTasks,
        }
    }

    pub fn task_table(tasks: &[Task], dates: DateStyle) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);

        table.set_titles(row!["", "", "TITLE", "CREATED", "ORDER", "ID"]);
        for task in tasks {
            let status = if task.is_done() { "[x]" } else { "[ ]" };
            let star = if task.important { "⭐" } else { "" };
            let order = task.order.map(|order| order.to_string()).unwrap_or_else(|| "-".to_string());
            table.add_row(row![status, star, task.title, dates.format(task.created_at), order, task.id]);
        }

        table
    }

    /// Placeholder rows shown until the first snapshot arrives.
    pub fn skeleton(count: usize) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_CLEAN);

        for index in 0..count {
            let width = SKELETON_BAR * SKELETON_WIDTHS[index % SKELETON_WIDTHS.len()] / 100;
            let bar = "░".repeat(width);
            table.add_row(row!["[ ]", bar, "░".repeat(12)]);
        }

        table
    }

    pub fn error_banner(message: &str) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        let text = format!("❌ {}", message);
        table.add_row(row![text]);

        table
    }

    /// The whole board as text.
    pub fn board(board: &TaskBoard, dates: DateStyle) -> String {
        if let LiveState::Failed(message) = board.state() {
            return View::error_banner(message).to_string();
        }

        let mut out = format!("{}\n\n{}\n\n", View::header(), View::filter_tabs(&board.counts(), board.filter()));
        match board.state() {
            LiveState::Loading => {
                out.push_str(&format!("{}\n", Message::LoadingTasks));
                out.push_str(&View::skeleton(SKELETON_ROWS).to_string());
            }
            _ => {
                let visible = board.visible();
                if visible.is_empty() {
                    out.push_str(&format!("{}\n", View::empty(board.filter())));
                } else {
                    out.push_str(&View::task_table(&visible, dates).to_string());
                }
            }
        }

        out
    }
}
