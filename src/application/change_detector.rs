//! Edge-triggered clipboard change detection

use tracing::{debug, warn};

use crate::domain::history::ChangeToken;

use super::ports::SystemClipboard;

/// Turns clipboard change tokens into edge-triggered change events.
///
/// Holds `last_seen`, the most recent token processed. A check reports text
/// only when the token moved since the previous check and the clipboard
/// currently holds text. Non-text changes still advance `last_seen`.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    last_seen: Option<ChangeToken>,
}

impl ChangeDetector {
    /// Create a detector that has not seen any token yet.
    ///
    /// The first check therefore reports whatever text is on the clipboard.
    pub fn new() -> Self {
        Self { last_seen: None }
    }

    /// Record a token without reporting a change (used after our own writes)
    pub fn acknowledge(&mut self, token: ChangeToken) {
        self.last_seen = Some(token);
    }

    fn is_new(&self, token: ChangeToken) -> bool {
        self.last_seen != Some(token)
    }

    /// Run one check against `clipboard`.
    ///
    /// Read errors are logged and leave `last_seen` untouched so the change
    /// is picked up again on the next check.
    pub async fn check<C>(&mut self, clipboard: &C) -> Option<String>
    where
        C: SystemClipboard + ?Sized,
    {
        let token = match clipboard.change_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "failed to read clipboard change token");
                return None;
            }
        };

        if !self.is_new(token) {
            return None;
        }

        let text = match clipboard.read_text().await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, %token, "failed to read clipboard text");
                return None;
            }
        };

        self.last_seen = Some(token);
        if text.is_none() {
            debug!(%token, "clipboard changed to non-text content");
        }
        text
    }
}
