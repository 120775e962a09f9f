#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
#![warn(clippy::expect_used)]

use crate::app_config::AppConfig;
use args::{CliArgs, Command};
use clap::Parser;
use commands::{
    browse::browse_cmd, completions::completions_cmd, config::config_cmd, profile::profile_cmd,
    search::search_cmd,
};
use profile::{get_profile_path, Profile};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app_config;
mod args;
mod browse;
mod commands;
mod formatters;
mod profile;
mod web_client;

#[cfg(test)]
mod test;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let args = CliArgs::parse();

    let profile_path = get_profile_path(&args.config.profile_path);

    if let Some(command) = args.command {
        let profile = Profile::from_path(&profile_path)?;
        let config = AppConfig::from_args(args.config, &profile_path, profile.as_ref());

        match command {
            Command::Config => config_cmd(&config)?,
            Command::Search(search_args) => search_cmd(&config, search_args).await?,
            Command::Browse(browse_args) => browse_cmd(&config, browse_args).await?,
            Command::Profile { command } => profile_cmd(command)?,
            Command::Completions { shell } => completions_cmd(shell),
        }
    }

    Ok(())
}

/// Logs go to stderr so they never interleave with rendered tables
fn setup_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("RECIPES_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
