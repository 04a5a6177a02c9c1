//! Command handlers.
//!
//! Handlers may end the process through `appexit_runtime::enforce`; nothing
//! below them does.

pub mod check;
pub mod paths;
pub mod run;
