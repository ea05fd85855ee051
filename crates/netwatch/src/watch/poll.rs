use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::events::Transition;
use super::state::{LinkStatus, TargetState};
use crate::probe::{Probe, ProbeResult};
use crate::target::{Category, Target};

/// Continuous poll loop for a single target
///
/// Each tick probes the target and emits a [`Transition`] when the outcome
/// differs from the last known status. Ticks are separated by a fixed delay
/// measured from the end of the previous probe.
pub struct PollLoop {
    category: Category,
    target: Target,
    probe: Arc<dyn Probe>,
    interval: Duration,
    events: mpsc::Sender<Transition>,
    stop: CancellationToken,
}

impl PollLoop {
    pub fn new(
        category: Category,
        target: Target,
        probe: Arc<dyn Probe>,
        interval: Duration,
        events: mpsc::Sender<Transition>,
        stop: CancellationToken,
    ) -> Self {
        Self { category, target, probe, interval, events, stop }
    }

    /// Run until the stop token is cancelled or the event channel closes.
    ///
    /// The token is only honoured between probes: an in-flight probe always
    /// completes, but its outcome is dropped once stop has been requested.
    /// A probe that panics is reported as a failure for that tick.
    pub async fn run(self) {
        let mut state = TargetState::default();
        debug!(
            category = %self.category,
            index = self.target.index,
            name = %self.target.name,
            "Poll loop started"
        );

        loop {
            if self.stop.is_cancelled() {
                break;
            }

            let result = self.guarded_check().await;

            if self.stop.is_cancelled() {
                break;
            }

            if let Some(status) = state.observe(result.success) {
                if status == LinkStatus::Offline {
                    warn!(name = %self.target.name, detail = %result.detail, "Target went OFFLINE");
                } else {
                    info!(name = %self.target.name, "Target is ONLINE");
                }

                let event = Transition { category: self.category, index: self.target.index, status };

                tokio::select! {
                    biased;
                    _ = self.stop.cancelled() => break,
                    sent = self.events.send(event) => {
                        if let Err(e) = sent {
                            error!("Failed to send transition event: {}", e);
                            break;
                        }
                    }
                }
            }

            tokio::select! {
                _ = self.stop.cancelled() => {}
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        debug!(index = self.target.index, name = %self.target.name, "Poll loop stopped");
    }

    /// Probe in a separate task so a panicking probe counts as a failed
    /// tick instead of ending the loop
    async fn guarded_check(&self) -> ProbeResult {
        let probe = self.probe.clone();
        let identifier = self.target.identifier.clone();

        match tokio::spawn(async move { probe.probe(&identifier).await }).await {
            Ok(result) => result,
            Err(e) => {
                error!(category = %self.category, name = %self.target.name, "Probe task failed: {}", e);
                ProbeResult::down(format!("{}: probe aborted ({e})", self.target.identifier))
            }
        }
    }
}
