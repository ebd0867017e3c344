use crate::api::tasks::TasksApi;
use crate::libs::messages::Message;
use crate::libs::live::TaskBoard;
use crate::libs::task::{Task, TaskFilter, TaskStatus};
use crate::{msg_error_anyhow, msg_info, msg_success, msg_warning};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ToggleArgs {
    id: String,
}

#[derive(Debug, Args)]
pub struct RenameArgs {
    id: String,
    title: String,
}

#[derive(Debug, Args)]
pub struct StarArgs {
    id: String,
}

/// The task's current state, needed to know which way to flip it.
async fn current(api: &TasksApi, id: &str) -> Result<Task> {
    let board = TaskBoard::with_tasks(api.list_tasks().await?, TaskFilter::All);
    board
        .find(id)
        .cloned()
        .ok_or_else(|| msg_error_anyhow!(Message::TaskNotFound(id.to_string())))
}

pub async fn toggle(args: ToggleArgs, api: &TasksApi) -> Result<()> {
    let task = current(api, &args.id).await?;
    let status = task.status.toggled();

    api.update_task_status(&task.id, status).await?;
    match status {
        TaskStatus::Done => msg_success!(Message::TaskMarkedDone(task.title)),
        TaskStatus::Todo => msg_success!(Message::TaskMarkedTodo(task.title)),
    }

    Ok(())
}

pub async fn star(args: StarArgs, api: &TasksApi) -> Result<()> {
    let task = current(api, &args.id).await?;
    let important = !task.important;

    api.toggle_task_importance(&task.id, important).await?;
    if important {
        msg_success!(Message::TaskMarkedImportant(task.title));
    } else {
        msg_success!(Message::TaskUnmarkedImportant(task.title));
    }

    Ok(())
}

/// A blank title leaves the task as it was; an unchanged one sends nothing.
pub async fn rename(args: RenameArgs, api: &TasksApi) -> Result<()> {
    let title = args.title.trim();
    if title.is_empty() {
        msg_warning!(Message::TaskTitleEmpty);
        return Ok(());
    }

    let task = current(api, &args.id).await?;
    if title == task.title.trim() {
        msg_info!(Message::TaskTitleUnchanged);
        return Ok(());
    }

    api.update_task_title(&task.id, title).await?;
    msg_success!(Message::TaskRenamed(title.to_string()));

    Ok(())
}
