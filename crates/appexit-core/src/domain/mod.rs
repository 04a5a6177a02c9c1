//! Domain types shared by the watcher, the arbiter, and the host.

mod exit;

pub use exit::{EXIT_TERMINATED, EXIT_YIELDED, ExitDirective, ExitReason, Lifecycle};
