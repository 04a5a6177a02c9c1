//! Lock file path resolution.

use std::path::{Path, PathBuf};

use super::PathError;
use super::platform::data_root;

/// Lock file location for `exe_name` under a given root.
///
/// The file is named `<exe_name>.lock` so that different executables sharing
/// a data root never contend on each other's marker.
pub fn lock_path_in(root: &Path, exe_name: &str) -> Result<PathBuf, PathError> {
    let name = exe_name.trim();
    if name.is_empty() {
        return Err(PathError::EmptyPath);
    }
    Ok(root.join(format!("{name}.lock")))
}

/// Default lock file location: `<data_root>/<exe_name>.lock`.
pub fn default_lock_path(exe_name: &str) -> Result<PathBuf, PathError> {
    lock_path_in(&data_root()?, exe_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_path_is_named_after_executable() {
        let root = Path::new("/var/lib/appexit");
        let path = lock_path_in(root, "worker").unwrap();
        assert_eq!(path, PathBuf::from("/var/lib/appexit/worker.lock"));
    }

    #[test]
    fn empty_executable_name_is_rejected() {
        let root = Path::new("/tmp");
        assert!(matches!(
            lock_path_in(root, "  "),
            Err(PathError::EmptyPath)
        ));
    }

    #[test]
    fn default_lock_path_is_under_data_root() {
        let lock = default_lock_path("appexit").expect("default_lock_path failed");
        let data = data_root().expect("data_root failed");
        assert!(lock.starts_with(&data));
        assert!(lock.ends_with("appexit.lock"));
    }
}
