//! Data root resolution.

use std::env;
use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::error::PathError;

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "APPEXIT_DATA_DIR";

/// Get the root directory for runtime state (lock files).
///
/// Resolution order:
/// 1. `APPEXIT_DATA_DIR` environment variable (highest priority)
/// 2. System data directory (e.g., `~/.local/share/appexit`)
pub fn data_root() -> Result<PathBuf, PathError> {
    if let Ok(path) = env::var(DATA_DIR_ENV)
        && !path.is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    let data_dir = dirs::data_local_dir().ok_or(PathError::NoDataDir)?;
    let root = data_dir.join("appexit");

    if !root.exists() {
        debug!(path = %root.display(), "Creating data root");
        fs::create_dir_all(&root).map_err(|e| PathError::CreateFailed {
            path: root.clone(),
            reason: e.to_string(),
        })?;
    }

    Ok(root)
}
