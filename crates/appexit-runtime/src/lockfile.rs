//! Lock file primitives for the single-instance election.
//!
//! The lock file is a zero-byte marker. Only its presence carries meaning:
//! nothing is written to it and ownership is not recorded, so any instance
//! may remove a file it did not create.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Advisory lock file at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockFile {
    path: PathBuf,
}

impl LockFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the marker is present right now.
    ///
    /// A path that cannot be inspected counts as absent.
    pub fn exists(&self) -> bool {
        fs::metadata(&self.path).is_ok()
    }

    /// Create (or truncate) the marker, creating parent directories as needed.
    pub fn create(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;
        Ok(())
    }

    /// Remove the marker (idempotent - no error if missing).
    pub fn remove(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Best-effort removal of a marker left behind by a crashed run.
    pub fn clear_stale(&self) {
        if !self.exists() {
            return;
        }
        match self.remove() {
            Ok(()) => debug!(path = %self.path.display(), "Removed stale lock file"),
            Err(e) => debug!(path = %self.path.display(), error = %e, "Could not remove stale lock file"),
        }
    }

    /// Create the marker and return a guard that removes it when dropped.
    pub fn claim(&self) -> io::Result<LockClaim> {
        self.create()?;
        Ok(LockClaim {
            lock: self.clone(),
            released: false,
        })
    }
}

/// A lock file this instance just created.
///
/// Dropping the claim removes the file, so an early return (for example on
/// cancellation) never leaves the marker behind.
#[derive(Debug)]
pub struct LockClaim {
    lock: LockFile,
    released: bool,
}

impl LockClaim {
    pub fn path(&self) -> &Path {
        self.lock.path()
    }

    /// Remove the marker now instead of on drop.
    pub fn release(mut self) -> io::Result<()> {
        self.released = true;
        self.lock.remove()
    }
}

impl Drop for LockClaim {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.lock.remove() {
            warn!(
                path = %self.lock.path().display(),
                error = %e,
                "Failed to remove lock file"
            );
        }
    }
}
