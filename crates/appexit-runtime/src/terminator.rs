//! Termination requests from background loops to the host.
//!
//! The watcher and the lock monitor run detached. When either decides the
//! process must end, it sends an `ExitDirective` here and the host, which owns
//! the receiver, performs the shutdown.

use appexit_core::ExitDirective;
use tokio::sync::mpsc;
use tracing::debug;

/// Channel capacity for termination requests. Only the first one matters.
const CHANNEL_CAPACITY: usize = 8;

/// Sending half, cloned into every background loop.
#[derive(Debug, Clone)]
pub struct Terminator {
    sender: mpsc::Sender<ExitDirective>,
}

/// Receiving half, held by the host.
#[derive(Debug)]
pub struct TerminationRequests {
    receiver: mpsc::Receiver<ExitDirective>,
}

/// Create a connected terminator and request stream.
pub fn termination_channel() -> (Terminator, TerminationRequests) {
    let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
    (Terminator { sender }, TerminationRequests { receiver })
}

impl Terminator {
    /// Ask the host to terminate. Never blocks.
    pub fn request(&self, directive: ExitDirective) {
        if let Err(e) = self.sender.try_send(directive) {
            debug!(?directive, error = %e, "Termination request dropped");
        }
    }
}

impl TerminationRequests {
    /// Wait for the next termination request.
    ///
    /// Returns `None` once every `Terminator` has been dropped.
    pub async fn recv(&mut self) -> Option<ExitDirective> {
        self.receiver.recv().await
    }

    /// Take a pending request without waiting.
    pub fn try_recv(&mut self) -> Option<ExitDirective> {
        self.receiver.try_recv().ok()
    }
}
