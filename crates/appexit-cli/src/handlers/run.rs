//! `appexit run`: apply the configured policies, then idle until stopped.
//!
//! # Flow
//! 1. Start the parent watcher (if a pid was given)
//! 2. Apply the single-instance policy; yielding or losing ends the process
//! 3. Wait for a termination request, Ctrl-C, or outside cancellation
//!
//! Every path ends in `enforce`, so the exit status always comes from an
//! `ExitDirective`.

use anyhow::Result;
use appexit_core::{ExitDirective, Lifecycle, SingleInstanceMode};
use appexit_runtime::{
    ElectionOutcome, ElectionTimings, LifecycleError, LockFile, MonitorHandle,
    SingleInstanceElection, TerminationRequests, Terminator, enforce, termination_channel,
    watch_parent,
};
use tokio::signal;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::bootstrap::CliContext;

pub async fn execute(ctx: &CliContext) -> Result<()> {
    let settings = &ctx.settings;
    let (terminator, mut requests) = termination_channel();

    let _watcher = watch_parent(
        ctx.table.clone(),
        settings.effective_watch_pid(),
        settings.parent_poll_interval(),
        ctx.cancel.clone(),
        terminator.clone(),
    );

    let startup = start_instance(ctx, &terminator).await;
    // Only background loops hold senders from here on
    drop(terminator);

    let directive = match startup? {
        Startup::Running(monitor) => {
            info!(pid = std::process::id(), "Running; press Ctrl-C to stop");
            let directive = wait_for_exit(&ctx.cancel, requests).await;
            if let Some(monitor) = monitor {
                monitor.abort();
            }
            directive
        }
        // A dead parent outranks the startup decision
        Startup::Terminate(directive) => watcher_report(&ctx.cancel, &mut requests)
            .await
            .unwrap_or(directive),
        Startup::Cancelled => watcher_report(&ctx.cancel, &mut requests)
            .await
            .unwrap_or_else(ExitDirective::cancelled),
    };

    enforce(directive, &ctx.cancel, settings.shutdown_grace()).await;
    Ok(())
}

enum Startup {
    Running(Option<MonitorHandle>),
    Terminate(ExitDirective),
    Cancelled,
}

/// Apply the instance policy, retrying once when the failure may be transient.
async fn start_instance(
    ctx: &CliContext,
    terminator: &Terminator,
) -> Result<Startup, LifecycleError> {
    match apply_instance_policy(ctx, terminator).await {
        Err(e) if e.is_transient() && !ctx.cancel.is_cancelled() => {
            warn!(error = %e, "Instance policy failed; retrying once");
            sleep(ctx.settings.monitor_interval()).await;
            apply_instance_policy(ctx, terminator).await
        }
        outcome => outcome,
    }
}

async fn apply_instance_policy(
    ctx: &CliContext,
    terminator: &Terminator,
) -> Result<Startup, LifecycleError> {
    match ctx.settings.effective_mode() {
        SingleInstanceMode::None => Ok(Startup::Running(None)),
        SingleInstanceMode::Clone => match ctx.detector().exit_if_clone().await? {
            Lifecycle::Continue => Ok(Startup::Running(None)),
            Lifecycle::Terminate(directive) => Ok(Startup::Terminate(directive)),
        },
        SingleInstanceMode::LockFile => {
            let exe_name = ctx.names.executable_name()?;
            let lock_path = ctx.settings.effective_lock_path(&exe_name)?;
            info!(path = %lock_path.display(), "Starting single-instance election");

            let election = SingleInstanceElection::new(
                ctx.detector(),
                LockFile::new(lock_path),
                ElectionTimings {
                    window: ctx.settings.election_window(),
                    monitor_interval: ctx.settings.monitor_interval(),
                },
                ctx.cancel.clone(),
                terminator.clone(),
            );

            Ok(match election.run().await? {
                ElectionOutcome::Won(monitor) => Startup::Running(Some(monitor)),
                ElectionOutcome::Yielded(directive) => Startup::Terminate(directive),
                ElectionOutcome::Cancelled => Startup::Cancelled,
            })
        }
    }
}

/// A report the watcher filed while startup was still deciding.
///
/// The watcher cancels the token before it reports, so once the token has
/// fired the report is awaited. Returns when it arrives or every sender is gone.
async fn watcher_report(
    cancel: &CancellationToken,
    requests: &mut TerminationRequests,
) -> Option<ExitDirective> {
    if cancel.is_cancelled() {
        requests.recv().await
    } else {
        requests.try_recv()
    }
}

/// Wait until something asks the process to stop.
async fn wait_for_exit(cancel: &CancellationToken, mut requests: TerminationRequests) -> ExitDirective {
    tokio::select! {
        Some(directive) = requests.recv() => directive,
        () = cancel.cancelled() => watcher_report(cancel, &mut requests)
            .await
            .unwrap_or_else(ExitDirective::cancelled),
        _ = signal::ctrl_c() => {
            info!("Interrupted");
            ExitDirective::cancelled()
        }
    }
}
