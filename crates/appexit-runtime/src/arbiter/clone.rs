//! Clone detection by executable name.

use std::sync::Arc;

use appexit_core::ports::{ExecutableNamePort, ProcessTablePort};
use appexit_core::{ExitDirective, Lifecycle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::LifecycleError;

/// Matching processes needed to call this instance a clone: itself plus one.
const CLONE_THRESHOLD: usize = 2;

/// Detects other running instances of this executable.
///
/// Read-only and safe to call repeatedly; each call takes a fresh snapshot.
#[derive(Clone)]
pub struct CloneDetector {
    table: Arc<dyn ProcessTablePort>,
    names: Arc<dyn ExecutableNamePort>,
    cancel_token: CancellationToken,
}

impl CloneDetector {
    pub fn new(
        table: Arc<dyn ProcessTablePort>,
        names: Arc<dyn ExecutableNamePort>,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            table,
            names,
            cancel_token,
        }
    }

    /// Whether another live process shares this executable's name.
    ///
    /// Processes that vanish between enumeration and name lookup are skipped;
    /// any other lookup failure aborts the scan. Stops as soon as a second
    /// match is found, and reports `false` if cancelled mid-scan.
    pub async fn check_if_clone(&self) -> Result<bool, LifecycleError> {
        let exe_name = self.names.executable_name()?;
        let pids = self.table.list_pids().await?;

        let mut matches = 0;
        for pid in pids {
            if self.cancel_token.is_cancelled() {
                debug!("Clone scan cancelled");
                return Ok(false);
            }

            let name = match self.table.process_name(pid).await {
                Ok(name) => name,
                Err(e) if e.is_vanished() => {
                    debug!(pid, "Skipping process that exited mid-scan");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            if name == exe_name {
                matches += 1;
                if matches >= CLONE_THRESHOLD {
                    debug!(exe_name = %exe_name, pid, "Found another instance");
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }

    /// Direct termination if another instance is already running.
    pub async fn exit_if_clone(&self) -> Result<Lifecycle, LifecycleError> {
        if self.check_if_clone().await? {
            let directive = ExitDirective::duplicate_instance();
            warn!("{}", directive.reason);
            return Ok(Lifecycle::Terminate(directive));
        }
        Ok(Lifecycle::Continue)
    }
}
