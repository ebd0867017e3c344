//! Command-line interface.
//!
//! `serve` runs the HTTP API. Every other command is a client: writes go
//! through the API at `--api-url` (or `TASKBOARD_API_URL`), while `watch`
//! subscribes to the database directly so it sees changes as they land.
//!
//! ```text
//! taskboard serve --port 3000
//! taskboard add "Buy milk"
//! taskboard list --filter active
//! taskboard move <id> <target-id>
//! taskboard watch --relative
//! ```

pub mod add;
pub mod delete;
pub mod edit;
pub mod list;
pub mod reorder;
pub mod serve;
pub mod watch;

use crate::api::tasks::TasksApi;
use crate::libs::config::Settings;
use crate::libs::messages::macros::is_debug_mode;
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "taskboard=info,tower_http=info";

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Run the task API server")]
    Serve(serve::ServeArgs),
    #[command(about = "Show the task list")]
    List(list::ListArgs),
    #[command(about = "Create a task")]
    Add(add::AddArgs),
    #[command(about = "Mark a task done, or back to todo")]
    Toggle(edit::ToggleArgs),
    #[command(about = "Change a task's title")]
    Rename(edit::RenameArgs),
    #[command(about = "Mark or unmark a task as important")]
    Star(edit::StarArgs),
    #[command(about = "Delete a task")]
    Delete(delete::DeleteArgs),
    #[command(name = "move", about = "Drop a task onto another task's position")]
    Move(reorder::MoveArgs),
    #[command(about = "Follow the task list live")]
    Watch(watch::WatchArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    /// Base URL of the task API
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        let settings = Settings::from_env()?;

        if matches!(cli.command, Commands::Serve(_)) || is_debug_mode() {
            init_tracing();
        }

        let api = TasksApi::new(cli.api_url.as_deref().unwrap_or(&settings.api_url));
        match cli.command {
            Commands::Serve(args) => serve::cmd(args, settings).await,
            Commands::List(args) => list::cmd(args, &api).await,
            Commands::Add(args) => add::cmd(args, &api).await,
            Commands::Toggle(args) => edit::toggle(args, &api).await,
            Commands::Rename(args) => edit::rename(args, &api).await,
            Commands::Star(args) => edit::star(args, &api).await,
            Commands::Delete(args) => delete::cmd(args, &api).await,
            Commands::Move(args) => reorder::cmd(args, &api).await,
            Commands::Watch(args) => watch::cmd(args, &settings).await,
        }
    }
}

/// Installs the global `tracing` subscriber; `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
