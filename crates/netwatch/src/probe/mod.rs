/// Probe module - reachability checks against a single target
///
/// Every probe:
/// - Applies its own retry policy before answering
/// - Reports failures as a [`ProbeResult`], never as an error or a panic
/// - Is shared between poll loops and audit passes behind an `Arc<dyn Probe>`
pub mod http;
pub mod ping;
pub mod retry;
pub mod types;

pub use http::HttpProbe;
pub use ping::{PingCommand, PingProbe};
pub use retry::RetryPolicy;
pub use types::ProbeResult;

/// Reachability check for one kind of target
#[async_trait::async_trait]
pub trait Probe: Send + Sync {
    /// Check `identifier` (IP, hostname or URL), retries included
    async fn probe(&self, identifier: &str) -> ProbeResult;
}
