//! Desktop (window and process) port interface

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::focus::{FocusEvent, FocusRecord};

/// Desktop control errors
#[derive(Debug, Clone, Error)]
pub enum DesktopError {
    #[error("{0} not found")]
    ToolNotFound(String),

    #[error("Failed to query active window: {0}")]
    QueryFailed(String),

    #[error("Failed to activate {target}: {message}")]
    ActivateFailed { target: String, message: String },
}

/// Port for window focus queries and activation
#[async_trait]
pub trait DesktopControl: Send + Sync {
    /// The window that currently has input focus, if any
    async fn active_window(&self) -> Result<Option<FocusRecord>, DesktopError>;

    /// Whether the process behind `target` is still running
    async fn is_running(&self, target: &FocusRecord) -> bool;

    /// Bring `target` to the foreground
    async fn activate(&self, target: &FocusRecord) -> Result<(), DesktopError>;
}

/// Blanket implementation for boxed desktop types
#[async_trait]
impl DesktopControl for Box<dyn DesktopControl> {
    async fn active_window(&self) -> Result<Option<FocusRecord>, DesktopError> {
        self.as_ref().active_window().await
    }

    async fn is_running(&self, target: &FocusRecord) -> bool {
        self.as_ref().is_running(target).await
    }

    async fn activate(&self, target: &FocusRecord) -> Result<(), DesktopError> {
        self.as_ref().activate(target).await
    }
}

/// Port for a stream of OS focus-change notifications
#[async_trait]
pub trait FocusEvents: Send {
    /// Wait for the next event. `None` once the source is closed.
    async fn next_event(&mut self) -> Option<FocusEvent>;
}

#[async_trait]
impl FocusEvents for mpsc::Receiver<FocusEvent> {
    async fn next_event(&mut self) -> Option<FocusEvent> {
        self.recv().await
    }
}
