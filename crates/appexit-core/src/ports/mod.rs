//! Port definitions (trait abstractions) for external collaborators.
//!
//! Ports define the interfaces the coordination logic expects from the host OS.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No sysinfo or nix types in any signature
//! - Per-process failures are distinguishable from table-wide failures
//! - Filesystem access for the lock file is not a port; it is plain path I/O

pub mod executable_name;
pub mod process_table;

use thiserror::Error;

pub use executable_name::{ExecutableNamePort, StaticExecutableName};
pub use process_table::ProcessTablePort;

/// Errors reported by a process table implementation.
#[derive(Debug, Error)]
pub enum ProcessTableError {
    /// The process exited between enumeration and lookup.
    ///
    /// This is the "invalid argument" class of failure: it describes an
    /// evanescent entry, not a fault, and scans skip it.
    #[error("Process {pid} vanished during lookup")]
    Vanished { pid: u32 },

    /// The process table could not be enumerated.
    #[error("Process enumeration failed: {0}")]
    Enumeration(String),

    /// A process's name could not be read.
    #[error("Name lookup failed for process {pid}: {reason}")]
    NameLookup { pid: u32, reason: String },

    /// The liveness check could not be performed.
    #[error("Existence check failed for process {pid}: {reason}")]
    ExistenceCheck { pid: u32, reason: String },
}

impl ProcessTableError {
    /// Whether this error only means the entry disappeared mid-scan.
    pub const fn is_vanished(&self) -> bool {
        matches!(self, Self::Vanished { .. })
    }
}

/// Errors resolving this binary's own display name.
#[derive(Debug, Error)]
pub enum ExecutableNameError {
    /// The running executable could not be located.
    #[error("Cannot determine current executable: {0}")]
    Unavailable(String),

    /// The executable path has no usable file name.
    #[error("Executable path has no file name")]
    Empty,
}
