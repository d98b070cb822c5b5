//! Unix Domain Socket communication for daemon control

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use super::{DaemonCommand, IpcClient, IpcRequest, IpcServer, UNKNOWN_COMMAND};
use crate::cli::signals::DaemonSignal;

const SOCKET_NAME: &str = "cliptrail.sock";

/// Socket path resolver
#[derive(Debug, Clone)]
pub struct SocketPath {
    path: PathBuf,
}

impl SocketPath {
    /// Create socket path, preferring XDG_RUNTIME_DIR
    pub fn new() -> Self {
        let path = std::env::var_os("XDG_RUNTIME_DIR")
            .map(|dir| PathBuf::from(dir).join(SOCKET_NAME))
            .unwrap_or_else(|| std::env::temp_dir().join(SOCKET_NAME));
        Self { path }
    }

    /// Use an explicit socket location
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the socket path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if socket file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Remove socket file if it exists
    pub fn cleanup(&self) -> io::Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

impl Default for SocketPath {
    fn default() -> Self {
        Self::new()
    }
}

/// Unix Domain Socket server for daemon commands
pub struct UnixSocketServer {
    socket_path: SocketPath,
    listener: Option<UnixListener>,
}

impl UnixSocketServer {
    /// Create a new socket server
    pub fn new(socket_path: SocketPath) -> Self {
        Self {
            socket_path,
            listener: None,
        }
    }
}

impl Drop for UnixSocketServer {
    fn drop(&mut self) {
        if self.listener.is_some() {
            self.cleanup();
        }
    }
}

#[async_trait]
impl IpcServer for UnixSocketServer {
    fn bind(&mut self) -> io::Result<()> {
        // Remove stale socket file if it exists
        self.socket_path.cleanup()?;

        let listener = UnixListener::bind(self.socket_path.path())?;
        self.listener = Some(listener);
        Ok(())
    }

    fn path(&self) -> String {
        self.socket_path.path().to_string_lossy().to_string()
    }

    async fn run(&self, tx: mpsc::Sender<DaemonSignal>) -> io::Result<()> {
        let listener = self
            .listener
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "Socket not bound"))?;

        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, tx).await {
                            debug!(error = %e, "socket connection error");
                        }
                    });
                }
                Err(e) => {
                    warn!(error = %e, "socket accept error");
                }
            }
        }
    }

    fn cleanup(&self) {
        let _ = self.socket_path.cleanup();
    }
}

/// Handle a single client connection
async fn handle_connection(stream: UnixStream, tx: mpsc::Sender<DaemonSignal>) -> io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    reader.read_line(&mut line).await?;

    let response = match DaemonCommand::parse(&line) {
        Some(command) => {
            debug!(%command, "ipc request");
            let (reply_tx, reply_rx) = oneshot::channel();
            let request = IpcRequest {
                command,
                reply: reply_tx,
            };
            if tx.send(DaemonSignal::Request(request)).await.is_err() {
                "error: daemon is shutting down".to_string()
            } else {
                reply_rx
                    .await
                    .unwrap_or_else(|_| "error: daemon is shutting down".to_string())
            }
        }
        None => UNKNOWN_COMMAND.to_string(),
    };

    writer.write_all(response.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;

    Ok(())
}

/// Unix Domain Socket client for sending commands to daemon
pub struct UnixSocketClient {
    socket_path: SocketPath,
}

impl UnixSocketClient {
    /// Create a new socket client
    pub fn new(socket_path: SocketPath) -> Self {
        Self { socket_path }
    }

    /// Send a raw request line
    pub async fn send_line(&self, line: &str) -> io::Result<String> {
        let stream = UnixStream::connect(self.socket_path.path()).await?;
        let (reader, mut writer) = stream.into_split();

        writer.write_all(format!("{}\n", line).as_bytes()).await?;
        writer.flush().await?;

        let mut reader = BufReader::new(reader);
        let mut response = String::new();
        reader.read_line(&mut response).await?;

        Ok(response.trim_end_matches(['\r', '\n']).to_string())
    }
}

#[async_trait]
impl IpcClient for UnixSocketClient {
    fn is_daemon_running(&self) -> bool {
        self.socket_path.exists()
    }

    async fn send_command(&self, command: DaemonCommand) -> io::Result<String> {
        self.send_line(&command.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_path_ends_with_socket_name() {
        let socket_path = SocketPath::new();
        assert!(socket_path.path().ends_with(SOCKET_NAME));
    }

    /// Answers every request with its command text
    async fn echo_daemon(mut rx: mpsc::Receiver<DaemonSignal>) {
        while let Some(signal) = rx.recv().await {
            if let DaemonSignal::Request(request) = signal {
                let _ = request.reply.send(format!("got {}", request.command));
            }
        }
    }

    #[tokio::test]
    async fn request_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = SocketPath::at(dir.path().join("test.sock"));

        let mut server = UnixSocketServer::new(path.clone());
        server.bind().unwrap();
        let (tx, rx) = mpsc::channel(4);
        tokio::spawn(echo_daemon(rx));
        tokio::spawn(async move {
            let _ = server.run(tx).await;
        });

        let client = UnixSocketClient::new(path);
        assert!(client.is_daemon_running());
        assert_eq!(
            client.send_command(DaemonCommand::Restore(2)).await.unwrap(),
            "got restore 2"
        );
        assert_eq!(client.send_line("dance").await.unwrap(), UNKNOWN_COMMAND);
    }

    #[tokio::test]
    async fn missing_socket_is_not_running() {
        let dir = tempfile::tempdir().unwrap();
        let client = UnixSocketClient::new(SocketPath::at(dir.path().join("none.sock")));
        assert!(!client.is_daemon_running());
        assert!(client.send_command(DaemonCommand::Status).await.is_err());
    }
}
