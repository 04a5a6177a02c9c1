//! Core domain types and port definitions for appexit.
//!
//! appexit coordinates a process's lifetime with the outside world: it exits
//! when a watched parent process disappears, and it keeps a single instance
//! of an executable running when several are launched together.
//!
//! This crate holds the pure parts: exit directives, settings, path
//! resolution, and the ports the runtime adapters implement.

pub mod domain;
pub mod paths;
pub mod ports;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{EXIT_TERMINATED, EXIT_YIELDED, ExitDirective, ExitReason, Lifecycle};
pub use paths::{DATA_DIR_ENV, PathError, data_root, default_lock_path, lock_path_in};
pub use ports::{
    ExecutableNameError, ExecutableNamePort, ProcessTableError, ProcessTablePort,
    StaticExecutableName,
};
pub use settings::{
    DEFAULT_ELECTION_WINDOW_MS, DEFAULT_MONITOR_INTERVAL_MS, DEFAULT_PARENT_POLL_INTERVAL_MS,
    DEFAULT_SHUTDOWN_GRACE_MS, LifecycleSettings, SettingsError, SingleInstanceMode,
    validate_settings,
};
