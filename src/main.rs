mod app;
mod cli;
mod config;
mod domain;
mod fragment;
mod infrastructure;
mod probes;
mod sources;
mod tasks;
mod web_presence;

use anyhow::Result;
use clap::Parser;
use infrastructure::{directories, logging, shutdown};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = cli::Cli::parse();

    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config, &paths, cli.verbose)?;

    let (shutdown, listener) = shutdown::Shutdown::new();
    shutdown::install_signal_handlers(shutdown);

    let app = app::HunterApp::initialize(&config, cli.workers, listener)?;
    if let Err(err) = app.run(&cli.source()).await {
        tracing::error!(error = %err, "run aborted");
        return Err(err);
    }
    Ok(())
}
