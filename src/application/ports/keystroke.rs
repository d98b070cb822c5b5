//! Keystroke port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::focus::FocusRecord;

/// Keystroke errors
#[derive(Debug, Clone, Error)]
pub enum KeystrokeError {
    #[error("{0} not found. Please install it or choose another keystroke tool.")]
    ToolNotFound(String),

    #[error("ydotool is not available. Make sure ydotoold is running.")]
    YdotoolNotAvailable,

    #[error("Failed to send paste keystroke: {0}")]
    SendFailed(String),
}

/// Port for synthesizing the platform paste shortcut
#[async_trait]
pub trait PasteKeystroke: Send + Sync {
    /// Send the paste shortcut (Ctrl+V / Cmd+V) to `target`.
    ///
    /// Adapters that cannot address a specific window send it to whatever
    /// window currently has focus.
    async fn send_paste(&self, target: &FocusRecord) -> Result<(), KeystrokeError>;
}

/// Blanket implementation for boxed keystroke types
#[async_trait]
impl PasteKeystroke for Box<dyn PasteKeystroke> {
    async fn send_paste(&self, target: &FocusRecord) -> Result<(), KeystrokeError> {
        self.as_ref().send_paste(target).await
    }
}
