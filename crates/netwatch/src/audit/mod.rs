/// Batch audit mode
///
/// An audit pass probes every target exactly once, groups the outcomes into
/// an [`AuditReport`] and lets a [`NotifyPolicy`] decide whether the report
/// goes to the [`ReportSink`] now, as a scheduled clean report, or not at all.
pub mod auditor;
pub mod policy;
pub mod report;
pub mod sink;
pub mod window;

pub use auditor::{AuditOutcome, Auditor};
pub use policy::NotifyPolicy;
pub use report::{AuditReport, CategoryReport, ReportKind};
pub use sink::ReportSink;
pub use window::{TimeWindow, truncated_now};
