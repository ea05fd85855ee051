//! Report sinks for audit mode

mod email;
mod log;

use std::sync::Arc;

use anyhow::Result;
use netwatch::ReportSink;
use tracing::info;

use crate::config::Config;

pub use email::EmailSink;
pub use log::LogSink;

/// SMTP when configured, otherwise reports only go to the log
pub fn build_sink(config: &Config) -> Result<Arc<dyn ReportSink>> {
    match &config.smtp {
        Some(smtp) => {
            info!(host = %smtp.host, port = smtp.port, recipients = smtp.to.len(), "Mailing audit reports");
            Ok(Arc::new(EmailSink::new(smtp)?))
        }
        None => {
            info!("No [smtp] section, audit reports are only logged");
            Ok(Arc::new(LogSink))
        }
    }
}
