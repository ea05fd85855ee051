//! Shared tracing setup for the netwatch binaries

mod subscriber;

pub use subscriber::{LogOutput, init_with};
