//! Tests for audit passes

use std::sync::Arc;

use chrono::NaiveTime;
use netwatch::{
    AuditOutcome, Auditor, Category, NotifyPolicy, Registry, ReportKind, TargetEntry, TimeWindow,
};

use crate::support::{RecordingSink, ScriptedProbe, Step};

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M:%S").unwrap()
}

fn registry(category: Category, names: &[&str]) -> Registry {
    Registry::new(category, names.iter().map(|n| TargetEntry::new(*n, format!("{n}.lan"))))
}

fn only_on_error() -> NotifyPolicy {
    NotifyPolicy::from_schedule(true, &["08:00:00", "13:00:00", "18:00:00"], 10).unwrap()
}

#[test]
fn test_scheduled_window_example() {
    let window = TimeWindow::parse("13:00:00", 5).unwrap();

    assert_eq!(window.lower(), t("12:54:45"));
    assert_eq!(window.upper(), t("13:04:15"));
    assert!(window.contains(t("13:00:00")));
    assert!(!window.contains(t("12:54:00")));
    assert!(!window.contains(t("13:04:20")));
}

#[tokio::test]
async fn test_report_groups_results_in_target_order() {
    let probe = Arc::new(
        ScriptedProbe::new()
            .script("db.lan", &[Step::Down])
            .script("backup.lan", &[Step::Down]),
    );
    let auditor = Auditor::new(only_on_error(), Arc::new(RecordingSink::default()))
        .with_suite(registry(Category::Server, &["apps", "db", "dns", "backup"]), probe.clone())
        .with_suite(registry(Category::Website, &["shop"]), probe.clone());

    let report = auditor.collect().await;

    assert_eq!(probe.calls(), 5);
    let servers = report.section(Category::Server).unwrap();
    assert_eq!(servers.failures, vec!["db: db.lan is down", "backup: backup.lan is down"]);
    assert_eq!(servers.successes, vec!["apps: apps.lan is up", "dns: dns.lan is up"]);

    let websites = report.section(Category::Website).unwrap();
    assert!(websites.failures.is_empty());
    assert_eq!(websites.successes.len(), 1);
    assert_eq!(report.sections[0].category, Category::Server);
}

#[tokio::test]
async fn test_clean_pass_outside_windows_sends_nothing() {
    let sink = Arc::new(RecordingSink::default());
    let auditor = Auditor::new(only_on_error(), sink.clone())
        .with_suite(registry(Category::Server, &["apps", "db"]), Arc::new(ScriptedProbe::new()));

    let outcome = auditor.run_pass(t("10:30:00")).await;

    assert_eq!(outcome, AuditOutcome::Skipped);
    assert_eq!(sink.count(), 0);
}

#[tokio::test]
async fn test_clean_pass_inside_window_sends_clean_report() {
    let sink = Arc::new(RecordingSink::default());
    let auditor = Auditor::new(only_on_error(), sink.clone())
        .with_suite(registry(Category::Server, &["apps"]), Arc::new(ScriptedProbe::new()));

    let outcome = auditor.run_pass(t("18:00:00")).await;

    assert_eq!(outcome, AuditOutcome::Notified(ReportKind::Clean));
    let dispatched = sink.dispatched.lock().unwrap();
    assert_eq!(dispatched[0].1, ReportKind::Clean);
    assert!(!dispatched[0].0.has_failures());
}

#[tokio::test]
async fn test_failure_sends_error_report_at_any_time() {
    let sink = Arc::new(RecordingSink::default());
    let probe = Arc::new(ScriptedProbe::new().script("db.lan", &[Step::Down]));
    let auditor = Auditor::new(only_on_error(), sink.clone())
        .with_suite(registry(Category::Server, &["apps", "db"]), probe);

    let outcome = auditor.run_pass(t("10:30:00")).await;

    assert_eq!(outcome, AuditOutcome::Notified(ReportKind::Error));
    let dispatched = sink.dispatched.lock().unwrap();
    assert_eq!(dispatched.len(), 1);
    assert_eq!(dispatched[0].0.failure_count(), 1);
}

#[tokio::test]
async fn test_always_notify_marks_clean_reports() {
    let sink = Arc::new(RecordingSink::default());
    let policy = NotifyPolicy::from_schedule(false, &["08:00:00"], 10).unwrap();
    let auditor = Auditor::new(policy, sink.clone())
        .with_suite(registry(Category::Website, &["shop"]), Arc::new(ScriptedProbe::new()));

    let outcome = auditor.run_pass(t("02:00:00")).await;

    assert_eq!(outcome, AuditOutcome::Notified(ReportKind::Clean));
}

#[tokio::test]
async fn test_panicking_probe_only_fails_its_target() {
    let probe = Arc::new(ScriptedProbe::new().script("db.lan", &[Step::Panic]));
    let auditor = Auditor::new(only_on_error(), Arc::new(RecordingSink::default()))
        .with_suite(registry(Category::Server, &["apps", "db", "dns"]), probe);

    let report = auditor.collect().await;
    let servers = report.section(Category::Server).unwrap();

    assert_eq!(servers.successes, vec!["apps: apps.lan is up", "dns: dns.lan is up"]);
    assert_eq!(servers.failures.len(), 1);
    assert!(servers.failures[0].starts_with("db: db.lan: probe aborted"));
}

#[tokio::test]
async fn test_sink_failure_does_not_propagate() {
    let sink = Arc::new(RecordingSink::failing());
    let probe = Arc::new(ScriptedProbe::new().script("db.lan", &[Step::Down]));
    let auditor = Auditor::new(only_on_error(), sink.clone())
        .with_suite(registry(Category::Server, &["db"]), probe);

    assert_eq!(auditor.run_pass(t("10:30:00")).await, AuditOutcome::DispatchFailed(ReportKind::Error));
    // The next pass runs normally
    assert_eq!(auditor.run_pass(t("10:40:00")).await, AuditOutcome::DispatchFailed(ReportKind::Error));
    assert_eq!(sink.count(), 2);
}
