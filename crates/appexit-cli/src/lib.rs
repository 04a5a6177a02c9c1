//! CLI host for appexit.
//!
//! Exposes the parser, subcommands, and bootstrap so the binary in `main.rs`
//! stays a thin dispatcher.

pub mod bootstrap;
pub mod commands;
pub mod config;
pub mod handlers;
pub mod parser;

pub use bootstrap::{CliContext, bootstrap};
pub use commands::{Commands, ModeArg, RunArgs};
pub use parser::Cli;
