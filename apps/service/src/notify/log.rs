use async_trait::async_trait;
use netwatch::{AuditReport, ReportKind, ReportSink, SinkError};
use tracing::{info, warn};

/// Writes every report line to the log
pub struct LogSink;

#[async_trait]
impl ReportSink for LogSink {
    async fn dispatch(&self, report: &AuditReport, kind: ReportKind) -> Result<(), SinkError> {
        info!(%kind, failures = report.failure_count(), "Audit report");

        for section in &report.sections {
            for line in &section.failures {
                warn!(category = %section.category, "{}", line);
            }
            for line in &section.successes {
                info!(category = %section.category, "{}", line);
            }
        }

        Ok(())
    }
}
