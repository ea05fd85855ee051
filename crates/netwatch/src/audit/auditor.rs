use std::sync::Arc;

use chrono::NaiveTime;
use tracing::{debug, error, info, warn};

use super::policy::NotifyPolicy;
use super::report::{AuditReport, CategoryReport, ReportKind};
use super::sink::ReportSink;
use crate::probe::{Probe, ProbeResult};
use crate::target::Registry;

/// What an audit pass ended up doing with its report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOutcome {
    /// Report delivered to the sink
    Notified(ReportKind),
    /// Policy decided not to send anything this pass
    Skipped,
    /// Sink refused or failed to deliver the report
    DispatchFailed(ReportKind),
}

/// A registry together with the probe used for its targets
struct Suite {
    registry: Registry,
    probe: Arc<dyn Probe>,
}

/// Single-pass auditor over one or more target registries
pub struct Auditor {
    suites: Vec<Suite>,
    policy: NotifyPolicy,
    sink: Arc<dyn ReportSink>,
}

impl Auditor {
    pub fn new(policy: NotifyPolicy, sink: Arc<dyn ReportSink>) -> Self {
        Self { suites: Vec::new(), policy, sink }
    }

    /// Audit `registry` with `probe`; sections keep the order suites are added
    pub fn with_suite(mut self, registry: Registry, probe: Arc<dyn Probe>) -> Self {
        self.suites.push(Suite { registry, probe });
        self
    }

    /// Probe every target once, concurrently, and wait for all of them.
    ///
    /// Every target runs in its own task, so a probe that panics only turns
    /// its own target into a failure.
    pub async fn collect(&self) -> AuditReport {
        let pending = self
            .suites
            .iter()
            .map(|suite| {
                let handles = suite
                    .registry
                    .iter()
                    .map(|target| {
                        let probe = suite.probe.clone();
                        let identifier = target.identifier.clone();
                        let handle = tokio::spawn(async move { probe.probe(&identifier).await });
                        (target, handle)
                    })
                    .collect::<Vec<_>>();
                (suite.registry.category(), handles)
            })
            .collect::<Vec<_>>();

        let mut report = AuditReport::default();
        for (category, handles) in pending {
            let mut section = CategoryReport::new(category);

            for (target, handle) in handles {
                let result = match handle.await {
                    Ok(result) => result,
                    Err(e) => {
                        error!(%category, name = %target.name, "Probe task failed: {}", e);
                        ProbeResult::down(format!("{}: probe aborted ({e})", target.identifier))
                    }
                };

                debug!(
                    %category,
                    name = %target.name,
                    success = result.success,
                    attempts = result.attempts,
                    "Audited target"
                );
                section.record(result.success, format!("{}: {}", target.name, result.detail));
            }

            report.sections.push(section);
        }

        report
    }

    /// Run one audit pass and apply the notification policy at time `now`
    pub async fn run_pass(&self, now: NaiveTime) -> AuditOutcome {
        let report = self.collect().await;
        info!(
            failures = report.failure_count(),
            successes = report.success_count(),
            "Audit pass complete"
        );

        let Some(kind) = self.policy.decide(&report, now) else {
            info!(%now, "No failures and outside every scheduled window, not notifying");
            return AuditOutcome::Skipped;
        };

        match self.sink.dispatch(&report, kind).await {
            Ok(()) => {
                info!(%kind, "Audit report dispatched");
                AuditOutcome::Notified(kind)
            }
            Err(e) => {
                warn!(%kind, "Failed to dispatch audit report: {}", e);
                AuditOutcome::DispatchFailed(kind)
            }
        }
    }
}
