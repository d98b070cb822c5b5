//! IPC (Inter-Process Communication) module for daemon control
//!
//! One request line, one response line, over a Unix domain socket.

mod unix_socket;

pub use unix_socket::{SocketPath, UnixSocketClient, UnixSocketServer};

use std::fmt;
use std::io;

use tokio::sync::{mpsc, oneshot};

use super::signals::DaemonSignal;

/// Reply sent for lines that are not a known command
pub const UNKNOWN_COMMAND: &str = "error: unknown command";

/// Commands understood by the daemon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonCommand {
    /// Reply with the history as a JSON array
    List,
    /// Restore the entry at the given index
    Restore(usize),
    /// Restore the second most recent entry
    PasteSecond,
    /// Reply with `<state> <len>`
    Status,
    /// Shut the daemon down
    Stop,
}

impl DaemonCommand {
    /// Parse one request line
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let command = match (parts.next()?, parts.next()) {
            ("list", None) => Self::List,
            ("restore", Some(index)) => Self::Restore(index.parse().ok()?),
            ("paste-second", None) => Self::PasteSecond,
            ("status", None) => Self::Status,
            ("stop", None) => Self::Stop,
            _ => return None,
        };
        match parts.next() {
            Some(_) => None,
            None => Some(command),
        }
    }
}

impl fmt::Display for DaemonCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Restore(index) => write!(f, "restore {}", index),
            Self::PasteSecond => write!(f, "paste-second"),
            Self::Status => write!(f, "status"),
            Self::Stop => write!(f, "stop"),
        }
    }
}

/// A parsed command and the channel its reply line goes back on
#[derive(Debug)]
pub struct IpcRequest {
    pub command: DaemonCommand,
    pub reply: oneshot::Sender<String>,
}

/// Trait for IPC servers that listen for daemon commands
#[async_trait::async_trait]
pub trait IpcServer: Send + Sync {
    /// Bind to the IPC endpoint
    fn bind(&mut self) -> io::Result<()>;

    /// Get the path/name of the IPC endpoint
    fn path(&self) -> String;

    /// Accept connections until the endpoint fails.
    ///
    /// Each request is forwarded to `tx` and its reply written back.
    async fn run(&self, tx: mpsc::Sender<DaemonSignal>) -> io::Result<()>;

    /// Cleanup IPC resources
    fn cleanup(&self);
}

/// Trait for IPC clients that send commands to the daemon
#[async_trait::async_trait]
pub trait IpcClient: Send + Sync {
    /// Check if daemon appears to be running (endpoint exists)
    fn is_daemon_running(&self) -> bool;

    /// Send a command and receive the response line
    async fn send_command(&self, command: DaemonCommand) -> io::Result<String>;
}

/// Create the IPC server at the default endpoint
pub fn create_ipc_server() -> Box<dyn IpcServer> {
    Box::new(UnixSocketServer::new(SocketPath::new()))
}

/// Create the IPC client for the default endpoint
pub fn create_ipc_client() -> Box<dyn IpcClient> {
    Box::new(UnixSocketClient::new(SocketPath::new()))
}
