mod cli;
mod config;
mod notify;
mod runner;
mod tui;

use anyhow::{Context, Result};
use logger::LogOutput;

use cli::{CommandLine, Commands, ConfigAction};
use config::Config;

/// Log file used by the status board when `--log-file` is not given
const BOARD_LOG_FILE: &str = "netwatch.log";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CommandLine::parse_args();

    // The status board owns the terminal, so its logs go to a file
    let draws_board = matches!(cli.command, Commands::Watch { headless: false });
    let log_output = match cli.log_file {
        Some(path) => LogOutput::File(path),
        None if draws_board => LogOutput::File(std::env::temp_dir().join(BOARD_LOG_FILE)),
        None => LogOutput::Stderr,
    };
    logger::init_with(log_output).context("Failed to open log file")?;

    let config = Config::from_config(cli.config.as_ref()).context("Failed to load configuration")?;
    tracing::debug!("Configuration loaded");

    match cli.command {
        Commands::Watch { headless } => runner::watch(&config, headless).await,
        Commands::Audit { repeat } => runner::audit(&config, repeat).await,
        Commands::Config { action: ConfigAction::Show } => {
            print!("{config}");
            Ok(())
        }
    }
}
