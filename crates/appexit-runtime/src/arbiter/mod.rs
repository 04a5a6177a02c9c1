//! Instance arbiter: keeps one running copy of this executable.
//!
//! Two policies are provided:
//! - `CloneDetector::exit_if_clone`: refuse to start when a peer is running
//! - `SingleInstanceElection`: lock-file election where the newest instance
//!   of a burst wins and later starters displace earlier winners

mod clone;
mod election;
mod monitor;

pub use clone::CloneDetector;
pub use election::{ElectionOutcome, ElectionTimings, SingleInstanceElection};
pub use monitor::{LockMonitor, MonitorHandle};
