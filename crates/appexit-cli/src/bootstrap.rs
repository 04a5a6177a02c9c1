//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where adapters are wired together:
//! - Process table (sysinfo + nix, via appexit-runtime)
//! - Executable name resolver (via appexit-runtime)
//! - The shared cancellation token
//!
//! Command handlers receive the composed `CliContext`.

use std::sync::Arc;

use appexit_core::ports::{ExecutableNamePort, ProcessTablePort};
use appexit_core::{LifecycleSettings, validate_settings};
use appexit_runtime::{CloneDetector, CurrentExecutableName, LifecycleError, SysinfoProcessTable};
use tokio_util::sync::CancellationToken;

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// Live process table.
    pub table: Arc<dyn ProcessTablePort>,
    /// Resolver for this binary's display name.
    pub names: Arc<dyn ExecutableNamePort>,
    /// Validated lifecycle settings.
    pub settings: LifecycleSettings,
    /// Cancellation shared by every background loop.
    pub cancel: CancellationToken,
}

impl CliContext {
    /// Clone detector bound to this context's collaborators.
    pub fn detector(&self) -> CloneDetector {
        CloneDetector::new(
            self.table.clone(),
            self.names.clone(),
            self.cancel.clone(),
        )
    }
}

/// Bootstrap the CLI with the given settings.
pub fn bootstrap(settings: LifecycleSettings) -> Result<CliContext, LifecycleError> {
    validate_settings(&settings)?;

    Ok(CliContext {
        table: Arc::new(SysinfoProcessTable::new()),
        names: Arc::new(CurrentExecutableName::new()),
        settings,
        cancel: CancellationToken::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_settings_are_rejected() {
        let settings = LifecycleSettings {
            election_window_ms: Some(0),
            ..LifecycleSettings::with_defaults()
        };
        let Err(err) = bootstrap(settings) else {
            panic!("zero election window should be rejected");
        };
        assert!(matches!(err, LifecycleError::Settings(_)));
        assert!(!err.is_transient());
    }

    #[test]
    fn default_settings_bootstrap() {
        let ctx = bootstrap(LifecycleSettings::with_defaults()).expect("bootstrap failed");
        assert!(!ctx.cancel.is_cancelled());
    }
}
