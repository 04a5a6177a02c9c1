//! In-memory process table for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use appexit_core::ports::{ProcessTableError, ProcessTablePort};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy)]
pub(crate) enum FakeEntry {
    Named(&'static str),
    /// Exits between enumeration and name lookup.
    Vanished,
    /// Name lookup fails with a real error.
    Broken,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Liveness {
    Always,
    /// Reports alive for the first N checks, then gone.
    AliveFor(usize),
    Errors,
}

pub(crate) struct FakeProcessTable {
    entries: Vec<(u32, FakeEntry)>,
    liveness: Liveness,
    enumeration_fails: bool,
    existence_checks: AtomicUsize,
    name_lookups: AtomicUsize,
}

impl FakeProcessTable {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
            liveness: Liveness::Always,
            enumeration_fails: false,
            existence_checks: AtomicUsize::new(0),
            name_lookups: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_process(mut self, pid: u32, name: &'static str) -> Self {
        self.entries.push((pid, FakeEntry::Named(name)));
        self
    }

    pub(crate) fn with_entry(mut self, pid: u32, entry: FakeEntry) -> Self {
        self.entries.push((pid, entry));
        self
    }

    pub(crate) fn with_liveness(mut self, liveness: Liveness) -> Self {
        self.liveness = liveness;
        self
    }

    pub(crate) fn failing_enumeration(mut self) -> Self {
        self.enumeration_fails = true;
        self
    }

    pub(crate) fn existence_checks(&self) -> usize {
        self.existence_checks.load(Ordering::SeqCst)
    }

    pub(crate) fn name_lookups(&self) -> usize {
        self.name_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProcessTablePort for FakeProcessTable {
    async fn pid_exists(&self, pid: u32) -> Result<bool, ProcessTableError> {
        let seen = self.existence_checks.fetch_add(1, Ordering::SeqCst);
        match self.liveness {
            Liveness::Always => Ok(true),
            Liveness::AliveFor(checks) => Ok(seen < checks),
            Liveness::Errors => Err(ProcessTableError::ExistenceCheck {
                pid,
                reason: "permission check failed".to_string(),
            }),
        }
    }

    async fn list_pids(&self) -> Result<Vec<u32>, ProcessTableError> {
        if self.enumeration_fails {
            return Err(ProcessTableError::Enumeration("no /proc".to_string()));
        }
        Ok(self.entries.iter().map(|(pid, _)| *pid).collect())
    }

    async fn process_name(&self, pid: u32) -> Result<String, ProcessTableError> {
        self.name_lookups.fetch_add(1, Ordering::SeqCst);
        let entry = self
            .entries
            .iter()
            .find(|(candidate, _)| *candidate == pid)
            .map(|(_, entry)| *entry)
            .ok_or(ProcessTableError::Vanished { pid })?;

        match entry {
            FakeEntry::Named(name) => Ok(name.to_string()),
            FakeEntry::Vanished => Err(ProcessTableError::Vanished { pid }),
            FakeEntry::Broken => Err(ProcessTableError::NameLookup {
                pid,
                reason: "access denied".to_string(),
            }),
        }
    }
}
