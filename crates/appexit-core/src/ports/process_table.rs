//! Process table port for liveness checks and enumeration.
//!
//! This port abstracts the host's live process table. Implementations live in
//! adapters (e.g., appexit-runtime's sysinfo-backed table).
//!
//! # Design Notes
//!
//! - Enumeration and name lookup are separate calls. A process can exit between
//!   the two, and callers must be able to tell that apart from a real fault.
//! - No snapshot is cached by callers; every check asks the table again.

use async_trait::async_trait;

use super::ProcessTableError;

/// Port for querying the live process table.
#[async_trait]
pub trait ProcessTablePort: Send + Sync {
    /// Check whether a process with `pid` currently exists.
    ///
    /// An `Err` means the check itself could not be performed.
    async fn pid_exists(&self, pid: u32) -> Result<bool, ProcessTableError>;

    /// Take a fresh snapshot of all running process ids, in table order.
    async fn list_pids(&self) -> Result<Vec<u32>, ProcessTableError>;

    /// Resolve the display name of a single process.
    ///
    /// Returns [`ProcessTableError::Vanished`] when the process exited after
    /// it was enumerated.
    async fn process_name(&self, pid: u32) -> Result<String, ProcessTableError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    /// Mock implementation for testing.
    struct MockProcessTable {
        processes: BTreeMap<u32, &'static str>,
    }

    #[async_trait]
    impl ProcessTablePort for MockProcessTable {
        async fn pid_exists(&self, pid: u32) -> Result<bool, ProcessTableError> {
            Ok(self.processes.contains_key(&pid))
        }

        async fn list_pids(&self) -> Result<Vec<u32>, ProcessTableError> {
            Ok(self.processes.keys().copied().collect())
        }

        async fn process_name(&self, pid: u32) -> Result<String, ProcessTableError> {
            self.processes
                .get(&pid)
                .map(|name| (*name).to_string())
                .ok_or(ProcessTableError::Vanished { pid })
        }
    }

    #[tokio::test]
    async fn test_mock_table() {
        let table = MockProcessTable {
            processes: BTreeMap::from([(1, "init"), (200, "appexit")]),
        };

        assert!(table.pid_exists(200).await.unwrap());
        assert!(!table.pid_exists(300).await.unwrap());
        assert_eq!(table.list_pids().await.unwrap(), vec![1, 200]);
        assert_eq!(table.process_name(1).await.unwrap(), "init");

        let err = table.process_name(300).await.unwrap_err();
        assert!(err.is_vanished());
    }
}
