//! Post-election lock monitor.
//!
//! After winning, an instance keeps watching the lock path. A marker that
//! reappears means a newer instance has started its own election, and this
//! one must step aside.

use std::time::Duration;

use appexit_core::ExitDirective;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::lockfile::LockFile;
use crate::terminator::Terminator;

/// Continuous check for a newer instance's lock file.
#[derive(Debug, Clone)]
pub struct LockMonitor {
    lock: LockFile,
    check_interval: Duration,
}

impl LockMonitor {
    pub const fn new(lock: LockFile, check_interval: Duration) -> Self {
        Self {
            lock,
            check_interval,
        }
    }

    /// Check immediately, then once per interval, until the marker appears
    /// or `cancel_token` fires.
    pub async fn run(self, cancel_token: CancellationToken) -> Option<ExitDirective> {
        let mut ticker = interval_at(Instant::now() + self.check_interval, self.check_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if self.lock.exists() {
                warn!(path = %self.lock.path().display(), "lock exit");
                return Some(ExitDirective::lost_election());
            }

            tokio::select! {
                biased;
                () = cancel_token.cancelled() => {
                    debug!(path = %self.lock.path().display(), "Lock monitor cancelled");
                    return None;
                }
                _ = ticker.tick() => {}
            }
        }
    }

    /// Run the monitor in the background, forwarding its directive to `terminator`.
    pub fn spawn(self, cancel_token: CancellationToken, terminator: Terminator) -> MonitorHandle {
        let handle = tokio::spawn(async move {
            let directive = self.run(cancel_token).await;
            if let Some(directive) = directive {
                terminator.request(directive);
            }
            directive
        });
        MonitorHandle { handle }
    }
}

/// Handle to a running lock monitor.
#[derive(Debug)]
pub struct MonitorHandle {
    handle: JoinHandle<Option<ExitDirective>>,
}

impl MonitorHandle {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop monitoring without producing a directive.
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Wait for the monitor to stop.
    ///
    /// Returns the directive it produced, or `None` if it was cancelled or aborted.
    pub async fn join(self) -> Option<ExitDirective> {
        self.handle.await.ok().flatten()
    }
}
