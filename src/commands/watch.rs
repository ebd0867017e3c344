use crate::db::database::Database;
use crate::libs::config::Settings;
use crate::libs::live::{LiveState, LiveTasks, TaskBoard};
use crate::libs::messages::Message;
use crate::libs::task::TaskFilter;
use crate::libs::view::{DateStyle, View};
use crate::msg_info;
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct WatchArgs {
    #[arg(short, long, value_enum, default_value_t)]
    filter: TaskFilter,
    #[arg(short, long)]
    relative: bool,
}

fn render(board: &TaskBoard, dates: DateStyle) {
    print!("\x1B[2J\x1B[H{}", View::board(board, dates));
}

/// Renders every snapshot until the board fails or the subscription ends.
async fn follow(settings: &Settings, filter: TaskFilter, dates: DateStyle) {
    // A fresh handle per attempt, so a retry reconnects from scratch.
    let database = Database::new(settings.clone());

    let mut live = match LiveTasks::connect(&database, filter, settings.poll_interval).await {
        Ok(live) => live,
        Err(error) => {
            render(&TaskBoard::failed(filter, &error), dates);
            return;
        }
    };
    render(live.board(), dates);

    while let Some(board) = live.next().await {
        render(board, dates);
        if matches!(board.state(), LiveState::Failed(_)) {
            return;
        }
    }
}

pub async fn cmd(args: WatchArgs, settings: &Settings) -> Result<()> {
    let dates = if args.relative { DateStyle::Relative } else { DateStyle::Absolute };

    loop {
        tokio::select! {
            _ = follow(settings, args.filter, dates) => {}
            _ = tokio::signal::ctrl_c() => {
                msg_info!(Message::WatchStopped);
                return Ok(());
            }
        }

        let retry = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptRetry.to_string())
            .default(true)
            .interact()?;

        if !retry {
            return Ok(());
        }
    }
}
