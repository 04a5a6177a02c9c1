//! Subcommands and their arguments.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};

use appexit_core::{LifecycleSettings, SingleInstanceMode};

use crate::config::load_settings_file;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Apply the lifecycle policies and stay running until told to stop
    Run(RunArgs),

    /// Report whether another instance of this executable is running (exit 1 if so)
    Check,

    /// Show the resolved data root and lock file path
    Paths {
        /// Lock file path override
        #[arg(long, env = "APPEXIT_LOCK_PATH")]
        lock_path: Option<String>,
    },
}

/// Single-instance policy as accepted on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Allow any number of instances
    #[default]
    None,
    /// Exit immediately if another instance is running
    Clone,
    /// Run the lock-file election; the newest instance wins
    LockFile,
}

impl From<ModeArg> for SingleInstanceMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::None => Self::None,
            ModeArg::Clone => Self::Clone,
            ModeArg::LockFile => Self::LockFile,
        }
    }
}

/// Arguments for `appexit run`.
#[derive(Debug, Args, Default)]
pub struct RunArgs {
    /// JSON settings file; flags and environment override its values
    #[arg(long, env = "APPEXIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Exit when the process with this pid exits (0 disables)
    #[arg(long, env = "APPEXIT_WATCH_PID")]
    pub watch_pid: Option<u32>,

    /// Single-instance policy [default: none]
    #[arg(long, value_enum, env = "APPEXIT_MODE")]
    pub mode: Option<ModeArg>,

    /// Lock file used by the lock-file election
    #[arg(long, env = "APPEXIT_LOCK_PATH")]
    pub lock_path: Option<String>,

    /// Parent liveness poll interval in milliseconds
    #[arg(long, env = "APPEXIT_POLL_INTERVAL_MS")]
    pub poll_interval_ms: Option<u64>,

    /// How long a new instance holds the lock file, in milliseconds
    #[arg(long, env = "APPEXIT_ELECTION_WINDOW_MS")]
    pub election_window_ms: Option<u64>,

    /// Lock monitor interval in milliseconds
    #[arg(long, env = "APPEXIT_MONITOR_INTERVAL_MS")]
    pub monitor_interval_ms: Option<u64>,

    /// Delay between cancellation and forced exit, in milliseconds
    #[arg(long, env = "APPEXIT_GRACE_MS")]
    pub grace_ms: Option<u64>,
}

impl RunArgs {
    /// Layer defaults, then the settings file, then these arguments.
    pub fn to_settings(&self) -> Result<LifecycleSettings> {
        let mut settings = LifecycleSettings::with_defaults();
        if let Some(path) = &self.config {
            settings.merge(&load_settings_file(path)?);
        }
        settings.merge(&LifecycleSettings {
            watch_pid: self.watch_pid,
            mode: self.mode.map(Into::into),
            lock_path: self.lock_path.clone(),
            parent_poll_interval_ms: self.poll_interval_ms,
            election_window_ms: self.election_window_ms,
            monitor_interval_ms: self.monitor_interval_ms,
            shutdown_grace_ms: self.grace_ms,
        });
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn unset_args_keep_defaults() {
        let settings = RunArgs::default().to_settings().unwrap();
        assert_eq!(settings.effective_mode(), SingleInstanceMode::None);
        assert_eq!(settings.election_window(), Duration::from_secs(2));
        assert_eq!(settings.effective_watch_pid(), None);
    }

    #[test]
    fn args_override_defaults() {
        let args = RunArgs {
            watch_pid: Some(321),
            mode: Some(ModeArg::LockFile),
            monitor_interval_ms: Some(250),
            ..RunArgs::default()
        };
        let settings = args.to_settings().unwrap();
        assert_eq!(settings.effective_watch_pid(), Some(321));
        assert_eq!(settings.effective_mode(), SingleInstanceMode::LockFile);
        assert_eq!(settings.monitor_interval(), Duration::from_millis(250));
        assert_eq!(settings.parent_poll_interval(), Duration::from_secs(2));
    }

    #[test]
    fn settings_file_sits_under_flags() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("appexit.json");
        fs::write(
            &path,
            r#"{"mode":"lock-file","election_window_ms":3000,"monitor_interval_ms":400}"#,
        )
        .unwrap();

        let args = RunArgs {
            config: Some(path),
            monitor_interval_ms: Some(250),
            ..RunArgs::default()
        };
        let settings = args.to_settings().unwrap();
        assert_eq!(settings.effective_mode(), SingleInstanceMode::LockFile);
        assert_eq!(settings.election_window(), Duration::from_secs(3));
        assert_eq!(settings.monitor_interval(), Duration::from_millis(250));
        assert_eq!(settings.parent_poll_interval(), Duration::from_secs(2));
    }

    #[test]
    fn unreadable_settings_file_is_an_error() {
        let dir = tempdir().unwrap();
        let args = RunArgs {
            config: Some(dir.path().join("missing.json")),
            ..RunArgs::default()
        };
        assert!(args.to_settings().is_err());
    }
}
