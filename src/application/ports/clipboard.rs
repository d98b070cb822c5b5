//! Clipboard port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::history::ChangeToken;

/// Clipboard errors
#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    #[error("{0} not found. Please install wl-clipboard.")]
    WlClipboardNotFound(&'static str),

    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("Failed to read clipboard: {0}")]
    ReadFailed(String),

    #[error("Failed to copy to clipboard: {0}")]
    CopyFailed(String),
}

/// Port for the shared system clipboard
#[async_trait]
pub trait SystemClipboard: Send + Sync {
    /// Read the current clipboard text.
    ///
    /// # Returns
    /// `Ok(None)` when the clipboard is empty or holds non-text content
    async fn read_text(&self) -> Result<Option<String>, ClipboardError>;

    /// Current change token. Advances whenever clipboard content changes.
    async fn change_token(&self) -> Result<ChangeToken, ClipboardError>;

    /// Replace the clipboard content with `text`.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Blanket implementation for boxed clipboard types
#[async_trait]
impl SystemClipboard for Box<dyn SystemClipboard> {
    async fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        self.as_ref().read_text().await
    }

    async fn change_token(&self) -> Result<ChangeToken, ClipboardError> {
        self.as_ref().change_token().await
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.as_ref().write_text(text).await
    }
}
