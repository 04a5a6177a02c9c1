//! `appexit check`: one-shot clone detection.

use std::time::Duration;

use anyhow::Result;
use appexit_core::Lifecycle;
use appexit_runtime::enforce;

use crate::bootstrap::CliContext;

pub async fn execute(ctx: &CliContext) -> Result<()> {
    let exe_name = ctx.names.executable_name()?;

    match ctx.detector().exit_if_clone().await? {
        Lifecycle::Continue => {
            println!("No other instance of {exe_name} is running");
            Ok(())
        }
        Lifecycle::Terminate(directive) => {
            println!("Another instance of {exe_name} is running");
            enforce(directive, &ctx.cancel, Duration::ZERO).await;
            Ok(())
        }
    }
}
