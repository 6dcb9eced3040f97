//! Shutdown coordination for the relay.
//!
//! A single `watch` flag flips from `false` to `true` once. Waiters that
//! subscribe after the flip still observe it, so the server can be started
//! after a signal already arrived and exit immediately.

use tokio::sync::watch;

/// Owner side: fires the shutdown once.
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

/// Waiter side, handed to the HTTP server for its graceful drain.
#[derive(Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// A waiter for this coordinator.
    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Fire the shutdown. Idempotent.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Resolve once shutdown fires, or once the coordinator is dropped.
    pub async fn wait(mut self) {
        let _ = self.rx.wait_for(|fired| *fired).await;
    }
}
