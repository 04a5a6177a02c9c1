//! CLI entry point - the composition root.
//!
//! The only place where the process is actually terminated: handlers pass
//! exit directives to `appexit_runtime::enforce`.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use appexit_cli::{Cli, Commands, bootstrap, handlers};
use appexit_core::LifecycleSettings;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Run(args) => {
            let ctx = bootstrap(args.to_settings()?)?;
            handlers::run::execute(&ctx).await?;
        }
        Commands::Check => {
            let ctx = bootstrap(LifecycleSettings::with_defaults())?;
            handlers::check::execute(&ctx).await?;
        }
        Commands::Paths { lock_path } => {
            let ctx = bootstrap(LifecycleSettings::with_defaults())?;
            handlers::paths::execute(&ctx, lock_path)?;
        }
    }

    Ok(())
}
