use std::env::var;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{level_filters::LevelFilter, warn};
use tracing_subscriber::{Layer, filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Where log lines go
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogOutput {
    #[default]
    Stderr,
    /// Append to a file, used while the status board owns the terminal
    File(PathBuf),
}

/// Initialize logging to `output`
///
/// `RUST_LOG` overrides the default `INFO` level and `RUST_LOG_FORMAT=json`
/// switches to JSON lines.
pub fn init_with(output: LogOutput) -> io::Result<()> {
    let file = match &output {
        LogOutput::Stderr => None,
        LogOutput::File(path) => {
            Some(OpenOptions::new().create(true).append(true).open(path)?)
        }
    };

    initialize_tracing(LevelFilter::INFO, file);
    Ok(())
}

fn initialize_tracing(level: LevelFilter, file: Option<File>) {
    let env_filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();

    let log_format = var("RUST_LOG_FORMAT").unwrap_or_default();

    let log_layer = match (log_format.as_str(), file) {
        ("json", Some(file)) => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(Mutex::new(file))
            .with_filter(env_filter)
            .boxed(),
        ("json", None) => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(io::stderr)
            .with_filter(env_filter)
            .boxed(),
        (_, Some(file)) => tracing_subscriber::fmt::layer()
            .compact()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .with_filter(env_filter)
            .boxed(),
        (_, None) => tracing_subscriber::fmt::layer()
            .compact()
            .without_time()
            .with_writer(io::stderr)
            .with_filter(env_filter)
            .boxed(),
    };

    if tracing_subscriber::registry().with(log_layer).try_init().is_err() {
        warn!("Tracing subscriber already initialized, keeping the existing one");
    }
}
