//! Notification port interface

use async_trait::async_trait;
use thiserror::Error;

/// Notification errors
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("Failed to show notification: {0}")]
    SendFailed(String),
}

/// Paste-back gave up on a target; the restored entry is still on the clipboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteFailureNotice {
    pub target: String,
    pub attempts: u32,
}

impl PasteFailureNotice {
    pub const SUMMARY: &'static str = "Paste failed";

    /// Notification body telling the user to paste by hand
    pub fn body(&self) -> String {
        format!(
            "Could not paste into {} after {} attempts. The entry is on the clipboard, paste it manually.",
            self.target, self.attempts
        )
    }
}

/// Port for telling the user about paste-back failures
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn paste_failed(&self, notice: &PasteFailureNotice) -> Result<(), NotificationError>;
}

#[async_trait]
impl Notifier for Box<dyn Notifier> {
    async fn paste_failed(&self, notice: &PasteFailureNotice) -> Result<(), NotificationError> {
        self.as_ref().paste_failed(notice).await
    }
}
