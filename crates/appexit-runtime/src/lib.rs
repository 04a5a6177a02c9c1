//! Process lifecycle coordination for appexit.
//!
//! - [`watch_parent`] exits the process when a watched parent pid disappears
//! - [`CloneDetector`] refuses to run next to another instance
//! - [`SingleInstanceElection`] resolves a burst of instances through a
//!   timed lock-file handshake
//!
//! Nothing here calls `std::process::exit` except [`shutdown::enforce`],
//! which the host invokes at its top level with an `ExitDirective`.

#![deny(unsafe_code)]

pub mod arbiter;
mod error;
pub mod lockfile;
pub mod process_table;
pub mod shutdown;
mod terminator;
pub mod watcher;

#[cfg(test)]
mod testing;

pub use arbiter::{
    CloneDetector, ElectionOutcome, ElectionTimings, LockMonitor, MonitorHandle,
    SingleInstanceElection,
};
pub use error::LifecycleError;
pub use lockfile::{LockClaim, LockFile};
pub use process_table::{CurrentExecutableName, SysinfoProcessTable};
pub use shutdown::{begin_shutdown, enforce};
pub use terminator::{TerminationRequests, Terminator, termination_channel};
pub use watcher::{ParentWatcher, watch_parent};
