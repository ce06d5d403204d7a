// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! chime - observe a clock through events

mod commands;
mod completions;
mod config;
mod observers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::clock;
use completions::CompletionsArgs;
use config::Config;
use std::path::PathBuf;

/// Environment variable holding a tracing filter, e.g. `CHIME_LOG=chime_core=trace`
const LOG_ENV: &str = "CHIME_LOG";

#[derive(Parser)]
#[command(name = "chime", version, about = "Chime - a clock that fires events")]
struct Cli {
    /// Path to a chime.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the clock, printing every second change
    Clock(clock::ClockArgs),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Completions need neither config nor logging
    if let Commands::Completions(args) = cli.command {
        completions::generate_completions::<Cli>(args.shell);
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?;
    setup_logging(&config);
    tracing::debug!(?config, "loaded config");

    match cli.command {
        Commands::Clock(args) => clock::clock(args, config)?,
        Commands::Completions(_) => {}
    }

    Ok(())
}

fn setup_logging(config: &Config) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.log.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
