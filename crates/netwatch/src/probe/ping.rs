use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use super::Probe;
use super::retry::{Attempt, RetryPolicy};
use super::types::ProbeResult;

/// Extra time granted to the ping process past its own deadline
const DEADLINE_GRACE: Duration = Duration::from_secs(5);

/// How the system ping command is invoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingCommand {
    /// Program to run, `ping` unless overridden
    pub program: String,

    /// Seconds a single ping invocation may wait for a reply
    pub deadline_secs: u64,
}

impl Default for PingCommand {
    fn default() -> Self {
        Self { program: "ping".into(), deadline_secs: 10 }
    }
}

impl PingCommand {
    /// Arguments sending one echo request to `host`
    fn args(&self, host: &str) -> Vec<String> {
        let deadline = self.deadline_secs.max(1);

        #[cfg(windows)]
        let (count_flag, deadline_flag, deadline) = ("-n", "-w", deadline * 1000);
        #[cfg(target_os = "macos")]
        let (count_flag, deadline_flag) = ("-c", "-t");
        #[cfg(not(any(windows, target_os = "macos")))]
        let (count_flag, deadline_flag) = ("-c", "-w");

        vec![
            count_flag.to_string(),
            "1".to_string(),
            deadline_flag.to_string(),
            deadline.to_string(),
            host.to_string(),
        ]
    }

    /// Run once; `Err` carries the diagnostic output
    async fn run(&self, host: &str) -> Result<(), String> {
        let child = Command::new(&self.program)
            .args(self.args(host))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let limit = Duration::from_secs(self.deadline_secs) + DEADLINE_GRACE;
        match timeout(limit, child).await {
            Ok(Ok(output)) if output.status.success() => Ok(()),
            Ok(Ok(output)) => Err(diagnostic(&output)),
            Ok(Err(e)) => Err(format!("failed to run {}: {}", self.program, e)),
            Err(_) => Err(format!("{} did not exit within {:?}", self.program, limit)),
        }
    }
}

/// Combined, trimmed stdout and stderr of a finished command
fn diagnostic(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let text = format!("{}\n{}", stdout.trim(), stderr.trim());
    let text = text.trim();

    if text.is_empty() {
        format!("exit status {}", output.status)
    } else {
        text.to_string()
    }
}

/// ICMP echo probe backed by the system ping command
///
/// Succeeds as soon as one attempt gets a reply. When every attempt fails
/// the output of the last one is attached to the result.
pub struct PingProbe {
    command: PingCommand,
    retry: RetryPolicy,
}

impl PingProbe {
    pub fn new(command: PingCommand, retry: RetryPolicy) -> Self {
        Self { command, retry }
    }
}

impl Default for PingProbe {
    fn default() -> Self {
        Self::new(PingCommand::default(), RetryPolicy::new(3, Duration::from_secs(3)))
    }
}

#[async_trait::async_trait]
impl Probe for PingProbe {
    async fn probe(&self, host: &str) -> ProbeResult {
        let command = &self.command;

        let (outcome, attempts) = self
            .retry
            .run(|attempt| async move {
                match command.run(host).await {
                    Ok(()) => Attempt::Done(Ok(())),
                    Err(diag) => {
                        debug!(host, attempt, "Ping attempt failed");
                        Attempt::Retry(Err(diag))
                    }
                }
            })
            .await;

        let result = match outcome {
            Ok(()) => ProbeResult::up(format!("{host} replied to ping")),
            Err(diag) => ProbeResult::down(format!("{host} did not reply to ping. Output: {diag}")),
        };
        result.with_attempts(attempts)
    }
}
