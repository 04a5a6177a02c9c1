//! `ProcessTablePort` backed by sysinfo, with nix for liveness checks on Unix.

use std::sync::{Mutex, MutexGuard};

use appexit_core::ports::{ProcessTableError, ProcessTablePort};
use async_trait::async_trait;
use sysinfo::{Pid, ProcessesToUpdate, System};
use tracing::debug;

/// Live process table.
///
/// Every call refreshes the underlying `System`, so no answer is older than
/// the call that produced it.
pub struct SysinfoProcessTable {
    system: Mutex<System>,
}

impl SysinfoProcessTable {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
        }
    }

    fn system(&self) -> Result<MutexGuard<'_, System>, ProcessTableError> {
        self.system
            .lock()
            .map_err(|_| ProcessTableError::Enumeration("process table lock poisoned".to_string()))
    }
}

impl Default for SysinfoProcessTable {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessTablePort for SysinfoProcessTable {
    async fn pid_exists(&self, pid: u32) -> Result<bool, ProcessTableError> {
        #[cfg(unix)]
        {
            let _ = self;
            signal_probe(pid)
        }

        #[cfg(not(unix))]
        {
            let mut system = self.system()?;
            let target = Pid::from_u32(pid);
            system.refresh_processes(ProcessesToUpdate::Some(&[target]), true);
            Ok(system.process(target).is_some())
        }
    }

    async fn list_pids(&self) -> Result<Vec<u32>, ProcessTableError> {
        let mut system = self.system()?;
        system.refresh_processes(ProcessesToUpdate::All, true);

        // Linux reports threads as tasks that inherit the process name
        let mut pids: Vec<u32> = system
            .processes()
            .iter()
            .filter(|(_, process)| process.thread_kind().is_none())
            .map(|(pid, _)| pid.as_u32())
            .collect();
        if pids.is_empty() {
            return Err(ProcessTableError::Enumeration(
                "process table is empty".to_string(),
            ));
        }
        pids.sort_unstable();

        debug!(count = pids.len(), "Enumerated processes");
        Ok(pids)
    }

    async fn process_name(&self, pid: u32) -> Result<String, ProcessTableError> {
        let mut system = self.system()?;
        let target = Pid::from_u32(pid);
        system.refresh_processes(ProcessesToUpdate::Some(&[target]), true);

        let process = system
            .process(target)
            .ok_or(ProcessTableError::Vanished { pid })?;
        Ok(process.name().to_string_lossy().into_owned())
    }
}

/// Check existence with the null signal, which delivers nothing.
#[cfg(unix)]
fn signal_probe(pid: u32) -> Result<bool, ProcessTableError> {
    use nix::errno::Errno;
    use nix::sys::signal;
    use nix::unistd::Pid as NixPid;

    let raw = i32::try_from(pid).map_err(|_| ProcessTableError::ExistenceCheck {
        pid,
        reason: "pid out of range".to_string(),
    })?;

    match signal::kill(NixPid::from_raw(raw), None) {
        Ok(()) => Ok(true),
        Err(Errno::ESRCH) => Ok(false),
        // Exists, but owned by someone we cannot signal
        Err(Errno::EPERM) => Ok(true),
        Err(e) => Err(ProcessTableError::ExistenceCheck {
            pid,
            reason: e.to_string(),
        }),
    }
}
