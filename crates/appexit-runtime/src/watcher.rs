//! Parent-liveness watcher.
//!
//! Polls a watched pid and asks the host to terminate once it is gone. Any
//! failure of the existence check counts as "gone": a watcher that cannot
//! see its parent shuts down rather than risk running orphaned.

use std::sync::Arc;
use std::time::Duration;

use appexit_core::ExitDirective;
use appexit_core::ports::ProcessTablePort;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::terminator::Terminator;

/// Watches one parent pid for the lifetime of the process.
pub struct ParentWatcher {
    table: Arc<dyn ProcessTablePort>,
    pid: u32,
    poll_interval: Duration,
}

impl ParentWatcher {
    /// Create a watcher, or `None` when there is no pid to watch.
    ///
    /// # Arguments
    ///
    /// * `table` - Process table used for the existence check
    /// * `pid` - Parent pid; `None` and `Some(0)` both disable watching
    /// * `poll_interval` - Delay between checks (2 seconds by default)
    pub fn new(
        table: Arc<dyn ProcessTablePort>,
        pid: Option<u32>,
        poll_interval: Duration,
    ) -> Option<Self> {
        let pid = pid.filter(|pid| *pid != 0)?;
        Some(Self {
            table,
            pid,
            poll_interval,
        })
    }

    pub const fn pid(&self) -> u32 {
        self.pid
    }

    /// Poll until the parent is gone or `cancel_token` fires.
    ///
    /// On parent loss this cancels `cancel_token` and returns the exit
    /// directive. On outside cancellation it returns `None`.
    pub async fn run(self, cancel_token: CancellationToken) -> Option<ExitDirective> {
        let mut ticker = interval_at(Instant::now() + self.poll_interval, self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                () = cancel_token.cancelled() => {
                    debug!(pid = self.pid, "Parent watcher cancelled");
                    return None;
                }
                _ = ticker.tick() => {}
            }

            match self.table.pid_exists(self.pid).await {
                Ok(true) => continue,
                Ok(false) => debug!(pid = self.pid, "Watched parent process exited"),
                Err(e) => debug!(pid = self.pid, error = %e, "Parent liveness check failed"),
            }

            cancel_token.cancel();
            return Some(ExitDirective::parent_gone(self.pid));
        }
    }

    /// Run the watcher in the background, forwarding its directive to `terminator`.
    pub fn spawn(self, cancel_token: CancellationToken, terminator: Terminator) -> JoinHandle<()> {
        info!(
            pid = self.pid,
            "Exit when the following process id (pid) exits"
        );
        tokio::spawn(async move {
            if let Some(directive) = self.run(cancel_token).await {
                terminator.request(directive);
            }
        })
    }
}

/// Start watching `pid` in the background.
///
/// A no-op returning `None` when `pid` is absent or zero.
pub fn watch_parent(
    table: Arc<dyn ProcessTablePort>,
    pid: Option<u32>,
    poll_interval: Duration,
    cancel_token: CancellationToken,
    terminator: Terminator,
) -> Option<JoinHandle<()>> {
    ParentWatcher::new(table, pid, poll_interval)
        .map(|watcher| watcher.spawn(cancel_token, terminator))
}
