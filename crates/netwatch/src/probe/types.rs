use serde::{Deserialize, Serialize};

/// Result of a probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// Whether the target is considered reachable
    pub success: bool,

    /// Human-readable status or diagnostic
    pub detail: String,

    /// Attempts consumed by the retry policy
    pub attempts: u32,
}

impl ProbeResult {
    /// Reachable target
    pub fn up(detail: impl Into<String>) -> Self {
        Self { success: true, detail: detail.into(), attempts: 1 }
    }

    /// Unreachable target
    pub fn down(detail: impl Into<String>) -> Self {
        Self { success: false, detail: detail.into(), attempts: 1 }
    }

    /// Record how many attempts produced this result
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }
}
