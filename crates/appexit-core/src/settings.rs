//! Lifecycle settings and validation.
//!
//! These are pure domain types with no infrastructure dependencies. All fields
//! are optional so that flags, environment, and files can be layered.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::paths::{PathError, default_lock_path};

/// How often the watched parent pid is checked.
pub const DEFAULT_PARENT_POLL_INTERVAL_MS: u64 = 2000;

/// How long a new instance holds the lock file before declaring itself the survivor.
pub const DEFAULT_ELECTION_WINDOW_MS: u64 = 2000;

/// How often a surviving instance looks for a newer instance's lock file.
pub const DEFAULT_MONITOR_INTERVAL_MS: u64 = 1000;

/// Delay between cancelling the shared token and forcing process exit.
pub const DEFAULT_SHUTDOWN_GRACE_MS: u64 = 250;

/// Which single-instance policy the host applies at startup.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SingleInstanceMode {
    /// Any number of instances may run.
    #[default]
    None,
    /// Refuse to start if another instance is already running.
    Clone,
    /// Run the lock-file election; the newest instance eventually wins.
    LockFile,
}

/// Lifecycle coordination settings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LifecycleSettings {
    /// Parent process to watch. `None` or `Some(0)` disables the watcher.
    pub watch_pid: Option<u32>,

    /// Single-instance policy.
    pub mode: Option<SingleInstanceMode>,

    /// Lock file used by the lock-file election.
    pub lock_path: Option<String>,

    pub parent_poll_interval_ms: Option<u64>,

    pub election_window_ms: Option<u64>,

    pub monitor_interval_ms: Option<u64>,

    /// Grace period between cancellation and forced exit.
    pub shutdown_grace_ms: Option<u64>,
}

impl LifecycleSettings {
    /// Create settings with the standard timings.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            watch_pid: None,
            mode: Some(SingleInstanceMode::None),
            lock_path: None,
            parent_poll_interval_ms: Some(DEFAULT_PARENT_POLL_INTERVAL_MS),
            election_window_ms: Some(DEFAULT_ELECTION_WINDOW_MS),
            monitor_interval_ms: Some(DEFAULT_MONITOR_INTERVAL_MS),
            shutdown_grace_ms: Some(DEFAULT_SHUTDOWN_GRACE_MS),
        }
    }

    /// The pid to watch, with zero treated as absent.
    pub fn effective_watch_pid(&self) -> Option<u32> {
        self.watch_pid.filter(|pid| *pid != 0)
    }

    pub fn effective_mode(&self) -> SingleInstanceMode {
        self.mode.unwrap_or_default()
    }

    pub fn parent_poll_interval(&self) -> Duration {
        Duration::from_millis(
            self.parent_poll_interval_ms
                .unwrap_or(DEFAULT_PARENT_POLL_INTERVAL_MS),
        )
    }

    pub fn election_window(&self) -> Duration {
        Duration::from_millis(self.election_window_ms.unwrap_or(DEFAULT_ELECTION_WINDOW_MS))
    }

    pub fn monitor_interval(&self) -> Duration {
        Duration::from_millis(
            self.monitor_interval_ms
                .unwrap_or(DEFAULT_MONITOR_INTERVAL_MS),
        )
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms.unwrap_or(DEFAULT_SHUTDOWN_GRACE_MS))
    }

    /// Resolve the lock file path, falling back to `<data_root>/<exe_name>.lock`.
    pub fn effective_lock_path(&self, exe_name: &str) -> Result<PathBuf, PathError> {
        match self.lock_path.as_deref() {
            Some(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
            Some(_) => Err(PathError::EmptyPath),
            None => default_lock_path(exe_name),
        }
    }

    /// Layer `other` on top of `self`, keeping existing values where `other` is unset.
    pub fn merge(&mut self, other: &Self) {
        if other.watch_pid.is_some() {
            self.watch_pid = other.watch_pid;
        }
        if other.mode.is_some() {
            self.mode = other.mode;
        }
        if other.lock_path.is_some() {
            self.lock_path.clone_from(&other.lock_path);
        }
        if other.parent_poll_interval_ms.is_some() {
            self.parent_poll_interval_ms = other.parent_poll_interval_ms;
        }
        if other.election_window_ms.is_some() {
            self.election_window_ms = other.election_window_ms;
        }
        if other.monitor_interval_ms.is_some() {
            self.monitor_interval_ms = other.monitor_interval_ms;
        }
        if other.shutdown_grace_ms.is_some() {
            self.shutdown_grace_ms = other.shutdown_grace_ms;
        }
    }
}

/// Errors from settings validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{field} must be greater than zero")]
    ZeroInterval { field: &'static str },

    #[error("Lock path cannot be empty")]
    EmptyLockPath,
}

/// Validate settings before they reach the watcher or arbiter.
///
/// Zero intervals would turn polling loops into busy loops, so they are rejected.
pub fn validate_settings(settings: &LifecycleSettings) -> Result<(), SettingsError> {
    let intervals = [
        ("parent_poll_interval_ms", settings.parent_poll_interval_ms),
        ("election_window_ms", settings.election_window_ms),
        ("monitor_interval_ms", settings.monitor_interval_ms),
    ];
    for (field, value) in intervals {
        if value == Some(0) {
            return Err(SettingsError::ZeroInterval { field });
        }
    }

    if let Some(path) = &settings.lock_path
        && path.trim().is_empty()
    {
        return Err(SettingsError::EmptyLockPath);
    }

    Ok(())
}
