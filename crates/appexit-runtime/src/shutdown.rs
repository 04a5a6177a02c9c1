//! Two-tier process shutdown.
//!
//! Only the composition root calls [`enforce`]. Library code hands it an
//! `ExitDirective` instead of exiting on its own.

use std::time::Duration;

use appexit_core::{ExitDirective, ExitReason};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Cancel shared work, wait out the grace period, then exit.
///
/// # Strategy
/// 1. Cancel `cancel_token` so cooperative loops can stop
/// 2. Wait `grace` for them to wind down
/// 3. Exit with the directive's status, whether or not they finished
///
/// Never returns.
pub async fn enforce(directive: ExitDirective, cancel_token: &CancellationToken, grace: Duration) {
    begin_shutdown(&directive, cancel_token);
    if !grace.is_zero() {
        sleep(grace).await;
    }
    std::process::exit(directive.code)
}

/// First tier of [`enforce`]: log the reason and cancel shared work.
pub fn begin_shutdown(directive: &ExitDirective, cancel_token: &CancellationToken) {
    match directive.reason {
        // Parent loss exits quietly
        ExitReason::ParentGone { pid } => {
            debug!(pid, code = directive.code, "Shutting down: parent exited");
        }
        reason if directive.is_failure() => {
            warn!(code = directive.code, "Shutting down: {reason}");
        }
        reason => info!(code = directive.code, "Shutting down: {reason}"),
    }
    cancel_token.cancel();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_shutdown_cancels_shared_token() {
        let cancel = CancellationToken::new();
        let child = cancel.child_token();

        begin_shutdown(&ExitDirective::lost_election(), &cancel);

        assert!(cancel.is_cancelled());
        assert!(child.is_cancelled());
    }

    #[test]
    fn begin_shutdown_is_idempotent() {
        let cancel = CancellationToken::new();
        begin_shutdown(&ExitDirective::parent_gone(4), &cancel);
        begin_shutdown(&ExitDirective::parent_gone(4), &cancel);
        assert!(cancel.is_cancelled());
    }
}
