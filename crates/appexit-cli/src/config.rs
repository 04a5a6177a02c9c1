//! Settings file loading.
//!
//! A JSON file supplies the base layer; flags and environment override it.
//! Keys match `LifecycleSettings` fields, and every key is optional:
//!
//! ```json
//! { "mode": "lock-file", "election_window_ms": 3000 }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use appexit_core::LifecycleSettings;

/// Load settings from a JSON file.
pub fn load_settings_file(path: &Path) -> Result<LifecycleSettings> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let settings = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use appexit_core::SingleInstanceMode;
    use tempfile::tempdir;

    #[test]
    fn partial_file_leaves_other_fields_unset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("appexit.json");
        fs::write(&path, r#"{"mode":"lock-file","election_window_ms":3000}"#).unwrap();

        let settings = load_settings_file(&path).unwrap();
        assert_eq!(settings.mode, Some(SingleInstanceMode::LockFile));
        assert_eq!(settings.election_window_ms, Some(3000));
        assert_eq!(settings.monitor_interval_ms, None);
        assert_eq!(settings.watch_pid, None);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = load_settings_file(&path).unwrap_err();
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("appexit.json");
        fs::write(&path, r#"{"mode":"first-wins"}"#).unwrap();

        assert!(load_settings_file(&path).is_err());
    }
}
