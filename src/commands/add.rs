use crate::api::tasks::TasksApi;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(required = true)]
    title: String,
}

pub async fn cmd(args: AddArgs, api: &TasksApi) -> Result<()> {
    let title = args.title.trim();
    if title.is_empty() {
        msg_bail_anyhow!(Message::TaskTitleEmpty);
    }

    let id = api.create_task(title).await?;
    msg_success!(Message::TaskCreated(id));

    Ok(())
}
