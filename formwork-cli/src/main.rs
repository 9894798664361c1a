use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod logging;

use config::ConfigLoader;

#[derive(Parser)]
#[command(
    name = "formwork",
    about = "Profile editing, team roster and role permissions in the terminal"
)]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Extra config file, applied after user and project config
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal UI (default)
    Tui(commands::tui::TuiArgs),
    /// Print the effective permission matrix
    Rules(commands::rules::RulesArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Tui(commands::tui::TuiArgs::default()));

    // The TUI owns the terminal, so its logs go to a file.
    let sink = match command {
        Commands::Tui(_) => logging::Sink::File(formwork_paths::log_file()),
        _ => logging::Sink::Stderr,
    };
    logging::init(cli.verbose, sink)?;

    let explicit = cli.config.as_deref();
    let config = ConfigLoader::load(explicit).context("failed to load configuration")?;

    match command {
        Commands::Tui(args) => commands::tui::run(args, &config).await,
        Commands::Rules(args) => commands::rules::run(args, &config),
        Commands::Config(args) => commands::config::run(args, &config, explicit),
    }
}
