//! Path utilities for appexit runtime state.
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O

mod error;
mod lock;
mod platform;

pub use error::PathError;
pub use lock::{default_lock_path, lock_path_in};
pub use platform::{DATA_DIR_ENV, data_root};
