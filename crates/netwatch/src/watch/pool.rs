use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::events::Transition;
use super::poll::PollLoop;
use crate::probe::Probe;
use crate::target::{Category, Registry};

/// Owns one poll loop per target of a registry
///
/// Dropping a coordinator cancels its loops without waiting for them; call
/// [`Coordinator::shutdown`] to stop them deterministically.
pub struct Coordinator {
    category: Category,
    stop: CancellationToken,
    handles: Vec<(usize, JoinHandle<()>)>,
    events: Option<mpsc::Sender<Transition>>,
}

impl Coordinator {
    /// Spawn a poll loop for every target in `registry`
    pub fn start(
        registry: &Registry,
        probe: Arc<dyn Probe>,
        interval: Duration,
        events: mpsc::Sender<Transition>,
    ) -> Self {
        let category = registry.category();
        let stop = CancellationToken::new();

        let handles = registry
            .iter()
            .map(|target| {
                let poll = PollLoop::new(
                    category,
                    target.clone(),
                    probe.clone(),
                    interval,
                    events.clone(),
                    stop.clone(),
                );
                (target.index, tokio::spawn(poll.run()))
            })
            .collect::<Vec<_>>();

        info!(%category, loops = handles.len(), ?interval, "Started poll loops");

        Self { category, stop, handles, events: Some(events) }
    }

    /// Number of poll loops still owned by the coordinator
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Stop every loop and wait for all of them to exit.
    ///
    /// The event sender is released only after the last loop has been
    /// joined, so no transition is emitted once this returns.
    pub async fn shutdown(mut self) {
        info!(category = %self.category, loops = self.handles.len(), "Stopping poll loops");
        self.stop.cancel();

        for (index, handle) in self.handles.drain(..) {
            if let Err(e) = handle.await {
                if e.is_panic() {
                    error!(category = %self.category, index, "Poll loop panicked: {}", e);
                } else {
                    warn!(category = %self.category, index, "Poll loop was cancelled: {}", e);
                }
            }
        }

        self.events.take();
        info!(category = %self.category, "All poll loops stopped");
    }

    /// Cancel every coordinator first, then join them one by one, so no pool
    /// keeps probing while another is being joined
    pub async fn shutdown_all(coordinators: impl IntoIterator<Item = Coordinator>) {
        let coordinators: Vec<_> = coordinators.into_iter().collect();
        for coordinator in &coordinators {
            coordinator.stop.cancel();
        }

        for coordinator in coordinators {
            coordinator.shutdown().await;
        }
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        self.stop.cancel();
    }
}
