/// Continuous watch mode
///
/// This module is responsible for:
/// - Tracking the last known status of each target
/// - Running one poll loop per target on a fixed tick
/// - Emitting a [`Transition`] whenever a target changes status
/// - Stopping every loop deterministically on shutdown
pub mod events;
pub mod poll;
pub mod pool;
pub mod state;

pub use events::Transition;
pub use poll::PollLoop;
pub use pool::Coordinator;
pub use state::{LinkStatus, TargetState};
