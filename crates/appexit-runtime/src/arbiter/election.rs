//! Single-instance election over a shared lock file.
//!
//! # Protocol
//!
//! 1. If no other instance of this executable is running, remove any lock
//!    file left over from a crashed run.
//! 2. If the lock file exists, another instance is inside its election
//!    window: yield with exit status 0.
//! 3. Create the lock file.
//! 4. Hold it for the election window, so instances started in the same
//!    burst find it at step 2.
//! 5. Remove it and start monitoring. A lock file that reappears later
//!    belongs to a newer instance, and this one exits with status 1.
//!
//! The newest instance therefore always displaces an older one. The lock file
//! is anonymous shared state, not an owned lock: any instance may remove a
//! marker it did not create, and nothing is written into it.

use std::time::Duration;

use appexit_core::{DEFAULT_ELECTION_WINDOW_MS, DEFAULT_MONITOR_INTERVAL_MS, ExitDirective};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::clone::CloneDetector;
use super::monitor::{LockMonitor, MonitorHandle};
use crate::error::LifecycleError;
use crate::lockfile::LockFile;
use crate::terminator::Terminator;

/// Timings for the election and the monitor that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElectionTimings {
    pub window: Duration,
    pub monitor_interval: Duration,
}

impl Default for ElectionTimings {
    fn default() -> Self {
        Self {
            window: Duration::from_millis(DEFAULT_ELECTION_WINDOW_MS),
            monitor_interval: Duration::from_millis(DEFAULT_MONITOR_INTERVAL_MS),
        }
    }
}

/// How an election ended for this instance.
#[derive(Debug)]
pub enum ElectionOutcome {
    /// This instance survived the burst; monitoring runs in the background.
    Won(MonitorHandle),
    /// Another instance was already electing; the host should exit with 0.
    Yielded(ExitDirective),
    /// The cancellation token fired before the election finished.
    Cancelled,
}

impl ElectionOutcome {
    pub const fn is_won(&self) -> bool {
        matches!(self, Self::Won(_))
    }

    /// The directive the host should act on, if any.
    pub const fn directive(&self) -> Option<ExitDirective> {
        match self {
            Self::Yielded(directive) => Some(*directive),
            Self::Won(_) | Self::Cancelled => None,
        }
    }
}

/// Runs the lock-file election for one instance.
pub struct SingleInstanceElection {
    detector: CloneDetector,
    lock: LockFile,
    timings: ElectionTimings,
    cancel_token: CancellationToken,
    terminator: Terminator,
}

impl SingleInstanceElection {
    pub const fn new(
        detector: CloneDetector,
        lock: LockFile,
        timings: ElectionTimings,
        cancel_token: CancellationToken,
        terminator: Terminator,
    ) -> Self {
        Self {
            detector,
            lock,
            timings,
            cancel_token,
            terminator,
        }
    }

    pub const fn lock(&self) -> &LockFile {
        &self.lock
    }

    /// Run the election.
    ///
    /// Blocks for up to the election window. Errors are returned only when
    /// clone detection fails or the lock file cannot be created; every other
    /// ending is an [`ElectionOutcome`].
    pub async fn run(&self) -> Result<ElectionOutcome, LifecycleError> {
        if self.cancel_token.is_cancelled() {
            return Ok(ElectionOutcome::Cancelled);
        }

        if !self.detector.check_if_clone().await? {
            self.lock.clear_stale();
        }

        if self.lock.exists() {
            let directive = ExitDirective::yielded();
            warn!(path = %self.lock.path().display(), "{}", directive.reason);
            return Ok(ElectionOutcome::Yielded(directive));
        }

        let claim = self
            .lock
            .claim()
            .map_err(|source| LifecycleError::LockFile {
                path: self.lock.path().to_path_buf(),
                source,
            })?;
        debug!(
            path = %claim.path().display(),
            window_ms = self.timings.window.as_millis(),
            "Lock file created, waiting out election window"
        );

        tokio::select! {
            biased;
            () = self.cancel_token.cancelled() => {
                debug!("Election cancelled during window");
                drop(claim);
                return Ok(ElectionOutcome::Cancelled);
            }
            () = sleep(self.timings.window) => {}
        }

        if let Err(e) = claim.release() {
            warn!(path = %self.lock.path().display(), error = %e, "Failed to release lock file");
        }
        info!(path = %self.lock.path().display(), "Election won, monitoring for newer instances");

        let monitor = LockMonitor::new(self.lock.clone(), self.timings.monitor_interval)
            .spawn(self.cancel_token.clone(), self.terminator.clone());
        Ok(ElectionOutcome::Won(monitor))
    }
}
