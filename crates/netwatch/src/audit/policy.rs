use chrono::NaiveTime;

use super::report::{AuditReport, ReportKind};
use super::window::TimeWindow;
use crate::error::ConfigError;

/// Shortest supported revision interval, in minutes
pub const MIN_REVISION_INTERVAL_MINUTES: u32 = 10;

/// Check the "even number of minutes, at least 10" precondition
pub fn validate_revision_interval(minutes: u32) -> Result<(), ConfigError> {
    if minutes < MIN_REVISION_INTERVAL_MINUTES {
        return Err(ConfigError::RevisionIntervalTooShort {
            got: minutes,
            min: MIN_REVISION_INTERVAL_MINUTES,
        });
    }

    if minutes % 2 != 0 {
        return Err(ConfigError::OddRevisionInterval(minutes));
    }

    Ok(())
}

/// Decides whether an audit report is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyPolicy {
    /// Only send reports with failures, except inside scheduled windows
    pub notify_only_on_error: bool,

    /// Windows in which a clean report is sent anyway
    pub windows: Vec<TimeWindow>,
}

impl NotifyPolicy {
    /// Build windows around each `HH:MM:SS` send time for audits running
    /// every `revision_interval_minutes`
    pub fn from_schedule<S: AsRef<str>>(
        notify_only_on_error: bool,
        send_times: &[S],
        revision_interval_minutes: u32,
    ) -> Result<Self, ConfigError> {
        validate_revision_interval(revision_interval_minutes)?;
        let half_interval = i64::from(revision_interval_minutes / 2);

        let windows = send_times
            .iter()
            .map(|time| TimeWindow::parse(time.as_ref(), half_interval))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { notify_only_on_error, windows })
    }

    /// `Some(kind)` when the report must be sent at time of day `now`
    pub fn decide(&self, report: &AuditReport, now: NaiveTime) -> Option<ReportKind> {
        let failed = report.has_failures();

        if !self.notify_only_on_error || failed {
            return Some(if failed { ReportKind::Error } else { ReportKind::Clean });
        }

        self.windows.iter().any(|window| window.contains(now)).then_some(ReportKind::Clean)
    }
}
