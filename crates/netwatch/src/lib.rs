//! netwatch - availability monitoring engine
//!
//! This library probes servers (ping) and websites (HTTP) and reports
//! availability in two modes:
//! - `watch`: one poll loop per target, emitting a [`Transition`] whenever a
//!   target goes online or offline
//! - `audit`: a single pass over every target, aggregated into an
//!   [`AuditReport`] and handed to a [`ReportSink`] according to a
//!   [`NotifyPolicy`]

pub mod audit;
pub mod error;
pub mod probe;
pub mod target;
pub mod watch;

// Re-export main types
pub use audit::{
    AuditOutcome, AuditReport, Auditor, CategoryReport, NotifyPolicy, ReportKind, ReportSink,
    TimeWindow,
};
pub use error::{ConfigError, RegistryError, SinkError};
pub use probe::{HttpProbe, PingCommand, PingProbe, Probe, ProbeResult, RetryPolicy};
pub use target::{Category, Registry, Target, TargetEntry};
pub use watch::{Coordinator, LinkStatus, PollLoop, TargetState, Transition};
