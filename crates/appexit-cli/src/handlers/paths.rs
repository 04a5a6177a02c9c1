//! `appexit paths`: show where runtime state lives.

use anyhow::Result;
use appexit_core::{LifecycleSettings, data_root};

use crate::bootstrap::CliContext;

pub fn execute(ctx: &CliContext, lock_path: Option<String>) -> Result<()> {
    let exe_name = ctx.names.executable_name()?;
    let settings = LifecycleSettings {
        lock_path: lock_path.or_else(|| ctx.settings.lock_path.clone()),
        ..ctx.settings.clone()
    };

    println!("Data root:  {}", data_root()?.display());
    println!("Lock file:  {}", settings.effective_lock_path(&exe_name)?.display());
    println!("Executable: {exe_name}");
    Ok(())
}
