//! Resolve this binary's display name the way the process table reports it.

use std::env;

use appexit_core::ports::{ExecutableNameError, ExecutableNamePort};
use sysinfo::{ProcessesToUpdate, System};
use tracing::debug;

/// Name of the running executable.
///
/// Looks up the current pid in the process table first, so the result matches
/// what `ProcessTablePort::process_name` returns for peers (some platforms
/// truncate process names). Falls back to the file name of `current_exe`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CurrentExecutableName;

impl CurrentExecutableName {
    pub const fn new() -> Self {
        Self
    }

    fn from_process_table() -> Option<String> {
        let pid = sysinfo::get_current_pid().ok()?;
        let mut system = System::new();
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        let name = system.process(pid)?.name().to_string_lossy().into_owned();
        (!name.is_empty()).then_some(name)
    }

    fn from_current_exe() -> Result<String, ExecutableNameError> {
        let exe = env::current_exe().map_err(|e| ExecutableNameError::Unavailable(e.to_string()))?;
        exe.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.is_empty())
            .ok_or(ExecutableNameError::Empty)
    }
}

impl ExecutableNamePort for CurrentExecutableName {
    fn executable_name(&self) -> Result<String, ExecutableNameError> {
        if let Some(name) = Self::from_process_table() {
            return Ok(name);
        }
        debug!("Own pid missing from process table, using current_exe file name");
        Self::from_current_exe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process_table::SysinfoProcessTable;
    use appexit_core::ports::ProcessTablePort;

    #[tokio::test]
    async fn name_matches_process_table_entry() {
        let own = CurrentExecutableName::new().executable_name().unwrap();
        let listed = SysinfoProcessTable::new()
            .process_name(std::process::id())
            .await
            .unwrap();
        assert_eq!(own, listed);
    }

    #[test]
    fn current_exe_fallback_is_not_empty() {
        let name = CurrentExecutableName::from_current_exe().unwrap();
        assert!(!name.is_empty());
    }
}
