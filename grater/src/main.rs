// grater/src/main.rs

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::Cli;

fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug grater -p my_project to see file-level details
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    debug!(?cli, "Parsed command line");
    commands::init::execute(cli)
}
