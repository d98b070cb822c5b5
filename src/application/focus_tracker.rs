//! Tracks the last external application that held input focus

use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::domain::focus::{AppId, FocusEvent, FocusRecord};

use super::ports::FocusEvents;

/// Remembers the last non-self application that became active.
///
/// "Resigned active" events are ignored. While the clipboard UI
/// is open this application is the active one, and the paste target must
/// stay the app the user came from. Cloning yields another handle to the
/// same record.
#[derive(Debug, Clone)]
pub struct FocusTracker {
    self_id: AppId,
    record: Arc<RwLock<Option<FocusRecord>>>,
}

impl FocusTracker {
    /// Create a tracker ignoring focus events for `self_id`
    pub fn new(self_id: impl Into<AppId>) -> Self {
        Self {
            self_id: self_id.into(),
            record: Arc::new(RwLock::new(None)),
        }
    }

    /// Last external app observed to gain focus
    pub fn current(&self) -> Option<FocusRecord> {
        self.record
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Apply a single focus event. Returns true if the record changed.
    pub fn handle_event(&self, event: FocusEvent) -> bool {
        if !event.became_active || event.record.app_id == self.self_id {
            return false;
        }

        let mut guard = self.record.write().unwrap_or_else(|e| e.into_inner());
        if guard.as_ref() == Some(&event.record) {
            return false;
        }
        debug!(target_app = %event.record, "paste target updated");
        *guard = Some(event.record);
        true
    }

    /// Drain `events` until the source closes
    pub async fn run<E: FocusEvents>(&self, mut events: E) {
        while let Some(event) = events.next_event().await {
            self.handle_event(event);
        }
        debug!("focus event source closed");
    }
}
