use crate::api::tasks::TasksApi;
use crate::libs::live::TaskBoard;
use crate::libs::messages::Message;
use crate::libs::task::TaskFilter;
use crate::{msg_success, msg_warning};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Task to move
    id: String,
    /// Task whose position it takes
    target: String,
    /// View the positions refer to
    #[arg(short, long, value_enum, default_value_t)]
    filter: TaskFilter,
}

pub async fn cmd(args: MoveArgs, api: &TasksApi) -> Result<()> {
    let board = TaskBoard::with_tasks(api.list_tasks().await?, args.filter);

    let Some(plan) = board.plan_move(&args.id, &args.target) else {
        msg_warning!(Message::ReorderNoop);
        return Ok(());
    };

    api.update_task_order(&plan).await?;
    msg_success!(Message::TasksReordered(plan.task_ids.len()));

    Ok(())
}
