use super::report::{AuditReport, ReportKind};
use crate::error::SinkError;

/// Destination of audit reports (mail, log, ...)
///
/// Errors are returned to the auditor, which logs them; they never abort an
/// audit pass.
#[async_trait::async_trait]
pub trait ReportSink: Send + Sync {
    async fn dispatch(&self, report: &AuditReport, kind: ReportKind) -> Result<(), SinkError>;
}
