use crate::libs::config::Settings;
use crate::server;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,
    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

pub async fn cmd(args: ServeArgs, mut settings: Settings) -> Result<()> {
    if let Some(host) = args.host {
        settings.host = host;
    }
    if let Some(port) = args.port {
        settings.port = port;
    }

    server::serve(settings).await
}
