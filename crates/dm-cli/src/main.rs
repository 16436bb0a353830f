//! datman configuration CLI
//!
//! Prints resolved study configuration for shell scripts and operators.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use context::Context;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
        tracing::debug!("Verbose mode enabled");
    }

    let ctx = Context {
        config: cli.config.as_deref(),
        profile: cli.profile.as_deref(),
    };
    execute_command(&ctx, cli.command.clone())
}

fn execute_command(ctx: &Context<'_>, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Resolve { project, json } => commands::run_resolve(ctx, &project, json),
        Commands::Paths { project, require } => commands::run_paths(ctx, &project, &require),
        Commands::Export { project, series } => commands::run_export(ctx, &project, &series),
        Commands::Pipelines {
            project,
            to_run,
            registered,
        } => commands::run_pipelines(ctx, &project, to_run, &registered),
        Commands::Profiles => commands::run_profiles(ctx),
        Commands::Projects => commands::run_projects(ctx),
    }
}
