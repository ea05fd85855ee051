//! Test doubles shared by the integration tests

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use netwatch::{AuditReport, Probe, ProbeResult, ReportKind, ReportSink, SinkError};

/// One scripted probe outcome
#[derive(Debug, Clone, Copy)]
pub enum Step {
    Up,
    Down,
    Panic,
}

/// Probe answering from a per-identifier script
///
/// The last step of a script repeats forever; unknown identifiers are up.
#[derive(Default)]
pub struct ScriptedProbe {
    scripts: Mutex<HashMap<String, VecDeque<Step>>>,
    calls: AtomicUsize,
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(self, identifier: &str, steps: &[Step]) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(identifier.to_string(), steps.iter().copied().collect());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_step(&self, identifier: &str) -> Step {
        let mut scripts = self.scripts.lock().unwrap();
        match scripts.get_mut(identifier) {
            Some(steps) if steps.len() > 1 => steps.pop_front().unwrap(),
            Some(steps) => steps.front().copied().unwrap_or(Step::Up),
            None => Step::Up,
        }
    }
}

#[async_trait::async_trait]
impl Probe for ScriptedProbe {
    async fn probe(&self, identifier: &str) -> ProbeResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.next_step(identifier) {
            Step::Up => ProbeResult::up(format!("{identifier} is up")),
            Step::Down => ProbeResult::down(format!("{identifier} is down")),
            Step::Panic => panic!("scripted probe failure for {identifier}"),
        }
    }
}

/// Sink remembering every report it was given
#[derive(Default)]
pub struct RecordingSink {
    pub dispatched: Mutex<Vec<(AuditReport, ReportKind)>>,
    pub fail: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn count(&self) -> usize {
        self.dispatched.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl ReportSink for RecordingSink {
    async fn dispatch(&self, report: &AuditReport, kind: ReportKind) -> Result<(), SinkError> {
        self.dispatched.lock().unwrap().push((report.clone(), kind));
        if self.fail {
            return Err(SinkError::Delivery("recipients refused".into()));
        }
        Ok(())
    }
}
