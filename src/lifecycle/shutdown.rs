//! Stop signal for the route server.
//!
//! `serve` subscribes one receiver per `HttpServer`; the CLI and the
//! integration tests trigger it to drain in-flight path lookups and close the
//! listener.

use tokio::sync::broadcast;

/// Broadcast handle that stops every subscribed route server.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver to pass to [`crate::HttpServer::run`].
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every subscribed server to finish its open requests and exit.
    pub fn trigger(&self) {
        let servers = self.tx.send(()).unwrap_or(0);
        tracing::info!(servers, "Route server shutdown requested");
    }

    /// Servers still waiting for the signal.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
