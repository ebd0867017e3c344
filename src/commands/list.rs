use crate::api::tasks::TasksApi;
use crate::libs::live::TaskBoard;
use crate::libs::task::TaskFilter;
use crate::libs::view::{DateStyle, View};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Which tasks to show
    #[arg(short, long, value_enum, default_value_t)]
    filter: TaskFilter,
    /// Show creation times as "5 minutes ago"
    #[arg(short, long)]
    relative: bool,
}

impl ListArgs {
    pub fn date_style(&self) -> DateStyle {
        if self.relative {
            DateStyle::Relative
        } else {
            DateStyle::Absolute
        }
    }
}

pub async fn cmd(args: ListArgs, api: &TasksApi) -> Result<()> {
    let tasks = api.list_tasks().await?;
    let board = TaskBoard::with_tasks(tasks, args.filter);

    print!("{}", View::board(&board, args.date_style()));

    Ok(())
}
