//! Desktop notifications through notify-rust

use async_trait::async_trait;

use crate::application::ports::{NotificationError, Notifier, PasteFailureNotice};

const APP_NAME: &str = "Cliptrail";
const WARNING_ICON: &str = "dialog-warning";
const TIMEOUT_MS: u32 = 4000;

/// Shows paste failures as freedesktop / OS notifications
#[derive(Debug, Default)]
pub struct NotifyRustNotifier;

impl NotifyRustNotifier {
    pub fn new() -> Self {
        Self
    }

    fn build(notice: &PasteFailureNotice) -> notify_rust::Notification {
        let mut notification = notify_rust::Notification::new();
        notification
            .appname(APP_NAME)
            .summary(PasteFailureNotice::SUMMARY)
            .body(&notice.body())
            .icon(WARNING_ICON)
            .timeout(notify_rust::Timeout::Milliseconds(TIMEOUT_MS));
        notification
    }
}

#[async_trait]
impl Notifier for NotifyRustNotifier {
    async fn paste_failed(&self, notice: &PasteFailureNotice) -> Result<(), NotificationError> {
        let notification = Self::build(notice);

        // Talking to the notification daemon blocks
        tokio::task::spawn_blocking(move || {
            notification
                .show()
                .map(|_| ())
                .map_err(|e| NotificationError::SendFailed(e.to_string()))
        })
        .await
        .map_err(|e| NotificationError::SendFailed(format!("Task join error: {}", e)))?
    }
}
