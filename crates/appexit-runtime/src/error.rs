//! Error types for lifecycle coordination.
//!
//! Only failures that leave the caller with an ambiguous decision are errors.
//! "Another instance is running" is not an error; it is an `ExitDirective`.

use std::io;
use std::path::PathBuf;

use appexit_core::{ExecutableNameError, PathError, ProcessTableError, SettingsError};
use thiserror::Error;

/// Errors that can occur while watching, detecting clones, or electing.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Process enumeration or lookup failed.
    #[error(transparent)]
    ProcessTable(#[from] ProcessTableError),

    /// This binary's own name could not be resolved.
    #[error(transparent)]
    ExecutableName(#[from] ExecutableNameError),

    /// The election could not create its lock file.
    #[error("Failed to create lock file {path}: {source}")]
    LockFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Settings were rejected before any coordination started.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Lock path resolution failed.
    #[error(transparent)]
    Path(#[from] PathError),
}

impl LifecycleError {
    /// Whether retrying the same operation could reasonably succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ProcessTable(_) => true,
            Self::LockFile { source, .. } => matches!(
                source.kind(),
                io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
            ),
            Self::ExecutableName(_) | Self::Settings(_) | Self::Path(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_file_error_names_the_path() {
        let err = LifecycleError::LockFile {
            path: PathBuf::from("/tmp/app.lock"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/app.lock"));
        assert!(!err.is_transient());
    }

    #[test]
    fn table_errors_are_transient() {
        let err: LifecycleError = ProcessTableError::Enumeration("busy".to_string()).into();
        assert!(err.is_transient());
    }

    #[test]
    fn configuration_errors_are_permanent() {
        let settings: LifecycleError = SettingsError::EmptyLockPath.into();
        let path: LifecycleError = PathError::EmptyPath.into();

        assert!(matches!(settings, LifecycleError::Settings(_)));
        assert!(matches!(path, LifecycleError::Path(_)));
        assert!(!settings.is_transient());
        assert!(!path.is_transient());
    }
}
