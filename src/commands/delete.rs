use crate::api::tasks::TasksApi;
use crate::libs::live::TaskBoard;
use crate::libs::messages::Message;
use crate::libs::task::TaskFilter;
use crate::{msg_info, msg_success};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct DeleteArgs {
    id: String,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub async fn cmd(args: DeleteArgs, api: &TasksApi) -> Result<()> {
    if !args.yes {
        let board = TaskBoard::with_tasks(api.list_tasks().await?, TaskFilter::All);
        let label = board
            .find(&args.id)
            .map(|task| task.title.clone())
            .unwrap_or_else(|| args.id.clone());

        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(label).to_string())
            .default(false)
            .interact()?;

        if !confirmed {
            msg_info!(Message::TaskDeleteCancelled);
            return Ok(());
        }
    }

    api.delete_task(&args.id).await?;
    msg_success!(Message::TaskDeleted);

    Ok(())
}
