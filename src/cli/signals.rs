//! OS signal handling for daemon mode

use colored::Colorize;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;

/// Events that drive the daemon loop
#[derive(Debug)]
pub enum DaemonSignal {
    /// Request from an IPC client awaiting a reply
    Request(super::ipc::IpcRequest),
    /// Shutdown daemon (SIGINT/SIGTERM or `stop`)
    Shutdown,
}

/// Daemon signal handler
///
/// Handles OS shutdown signals (SIGINT/SIGTERM) and provides a channel
/// for receiving requests from other sources (the socket server).
pub struct DaemonSignalHandler {
    receiver: mpsc::Receiver<DaemonSignal>,
}

impl DaemonSignalHandler {
    /// Create a new daemon signal handler and start listening for shutdown signals.
    ///
    /// Returns the handler and a sender for the socket server.
    pub async fn new() -> Result<(Self, mpsc::Sender<DaemonSignal>), std::io::Error> {
        let (tx, rx) = mpsc::channel(16);

        for (kind, name) in [
            (SignalKind::interrupt(), "SIGINT"),
            (SignalKind::terminate(), "SIGTERM"),
        ] {
            let tx = tx.clone();
            let mut stream = signal(kind)?;
            tokio::spawn(async move {
                stream.recv().await;
                eprintln!("{} Received {} (shutdown)", "↓".cyan(), name);
                let _ = tx.send(DaemonSignal::Shutdown).await;
            });
        }

        Ok((Self { receiver: rx }, tx))
    }

    /// Build a handler around an existing channel, without OS signals
    pub fn from_channel(receiver: mpsc::Receiver<DaemonSignal>) -> Self {
        Self { receiver }
    }

    /// Wait for the next signal
    pub async fn recv(&mut self) -> Option<DaemonSignal> {
        self.receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn channel_delivers_shutdown() {
        let (tx, rx) = mpsc::channel(1);
        let mut handler = DaemonSignalHandler::from_channel(rx);
        tx.send(DaemonSignal::Shutdown).await.unwrap();
        assert!(matches!(handler.recv().await, Some(DaemonSignal::Shutdown)));
        drop(tx);
        assert!(handler.recv().await.is_none());
    }
}
