mod cli;
mod commands;
mod config;
mod logging;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use config::LoadedConfig;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    logging::init(cli.log_level.as_deref()).context("Failed to initialize logging")?;

    let loaded = LoadedConfig::load(cli.config.as_deref(), cli.no_config)?;
    if let Some(path) = &loaded.path {
        tracing::debug!(path = %path.display(), "loaded config file");
    }

    match &cli.command {
        Commands::Sync {
            source,
            dest,
            flags,
        } => {
            let options = loaded.config.resolve(flags);
            commands::Synchronize::execute(source, dest, options)
        }
        Commands::Verify { source, dest } => commands::Verify::execute(source, dest)
            .context("Failed to execute verify command"),
        Commands::Config => {
            commands::Config::execute(&loaded).context("Failed to execute config command")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
