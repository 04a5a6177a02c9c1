//! Exit directives: how a coordination check asks the host to terminate.
//!
//! Library code never calls `std::process::exit`. When a watcher or arbiter
//! decides the process must end, it produces an [`ExitDirective`] and the
//! composition root performs the actual termination.

use std::fmt;

/// Exit status for a graceful yield or a clean cancellation.
pub const EXIT_YIELDED: i32 = 0;

/// Exit status for a lost election, a detected clone, or a dead parent.
pub const EXIT_TERMINATED: i32 = 1;

/// Why the process is being asked to terminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The watched parent process no longer exists (or its liveness check failed).
    ParentGone { pid: u32 },
    /// Another instance of this executable is already running.
    DuplicateInstance,
    /// The lock file was already present at startup; another instance is electing.
    YieldedToElection,
    /// A newer instance created the lock file while this one was monitoring.
    LostElection,
    /// The shared cancellation token fired.
    Cancelled,
}

impl ExitReason {
    /// Exit status associated with this reason.
    pub const fn code(self) -> i32 {
        match self {
            Self::YieldedToElection | Self::Cancelled => EXIT_YIELDED,
            Self::ParentGone { .. } | Self::DuplicateInstance | Self::LostElection => {
                EXIT_TERMINATED
            }
        }
    }
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParentGone { pid } => write!(f, "parent process {pid} exited"),
            Self::DuplicateInstance => f.write_str("exit - duplicate executable"),
            Self::YieldedToElection => f.write_str("start lock exit"),
            Self::LostElection => f.write_str("lock exit"),
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// A request for the host to terminate the process with a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitDirective {
    pub reason: ExitReason,
    pub code: i32,
}

impl ExitDirective {
    /// Build a directive using the reason's standard exit status.
    pub const fn new(reason: ExitReason) -> Self {
        Self {
            reason,
            code: reason.code(),
        }
    }

    pub const fn parent_gone(pid: u32) -> Self {
        Self::new(ExitReason::ParentGone { pid })
    }

    pub const fn duplicate_instance() -> Self {
        Self::new(ExitReason::DuplicateInstance)
    }

    pub const fn yielded() -> Self {
        Self::new(ExitReason::YieldedToElection)
    }

    pub const fn lost_election() -> Self {
        Self::new(ExitReason::LostElection)
    }

    pub const fn cancelled() -> Self {
        Self::new(ExitReason::Cancelled)
    }

    /// Whether the host should report this exit as a failure.
    pub const fn is_failure(&self) -> bool {
        self.code != EXIT_YIELDED
    }
}

/// Result of a one-shot lifecycle decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Nothing to do; the host keeps running.
    Continue,
    /// The host should terminate as directed.
    Terminate(ExitDirective),
}

impl Lifecycle {
    pub const fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }

    /// The directive to act on, if any.
    pub const fn directive(&self) -> Option<ExitDirective> {
        match self {
            Self::Continue => None,
            Self::Terminate(directive) => Some(*directive),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_reason() {
        assert_eq!(ExitDirective::parent_gone(42).code, 1);
        assert_eq!(ExitDirective::duplicate_instance().code, 1);
        assert_eq!(ExitDirective::lost_election().code, 1);
        assert_eq!(ExitDirective::yielded().code, 0);
        assert_eq!(ExitDirective::cancelled().code, 0);
    }

    #[test]
    fn clean_stops_are_not_failures() {
        assert!(!ExitDirective::yielded().is_failure());
        assert!(!ExitDirective::cancelled().is_failure());
        assert!(ExitDirective::lost_election().is_failure());
        assert!(ExitDirective::parent_gone(3).is_failure());
    }

    #[test]
    fn lifecycle_exposes_directive() {
        assert!(Lifecycle::Continue.is_continue());
        assert_eq!(Lifecycle::Continue.directive(), None);

        let terminate = Lifecycle::Terminate(ExitDirective::duplicate_instance());
        assert!(!terminate.is_continue());
        assert_eq!(
            terminate.directive().map(|d| d.reason),
            Some(ExitReason::DuplicateInstance)
        );
    }

    #[test]
    fn display_uses_short_messages() {
        assert_eq!(
            ExitReason::DuplicateInstance.to_string(),
            "exit - duplicate executable"
        );
        assert_eq!(
            ExitReason::ParentGone { pid: 7 }.to_string(),
            "parent process 7 exited"
        );
    }
}
