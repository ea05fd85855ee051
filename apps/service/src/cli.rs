use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "netwatch")]
#[command(about = "Watch servers and websites, or audit them and mail a report.")]
#[command(version)]
pub struct CommandLine {
    /// Config file, defaults to $XDG_CONFIG_HOME/netwatch/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Continuously probe every target and show status changes
    Watch {
        /// Log transitions instead of drawing the status board
        #[arg(long)]
        headless: bool,
    },
    /// Probe every target once and send a report if the policy says so
    Audit {
        /// Keep auditing every revision interval until interrupted
        #[arg(long)]
        repeat: bool,
    },
    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
