//! History manager use case
//!
//! Owns the clipboard history and coordinates change detection, persistence,
//! restore and paste-back.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::domain::error::HistoryError;
use crate::domain::history::{History, InsertOutcome};
use crate::domain::monitor::{MonitorSession, MonitorState};
use crate::domain::timing::Interval;

use super::change_detector::ChangeDetector;
use super::focus_tracker::FocusTracker;
use super::paste_back::{PasteBackAgent, PasteBackError, PasteOutcome};
use super::ports::{ClipboardError, HistoryStore, SystemClipboard};

/// Join handle of a spawned paste-back task
pub type PasteBackHandle = JoinHandle<Result<PasteOutcome, PasteBackError>>;

/// Restore errors
#[derive(Debug, Error)]
pub enum RestoreError {
    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

/// Result of a successful restore
#[derive(Debug)]
pub struct Restored {
    /// Text now on the clipboard and at the front of history
    pub text: String,
    /// Running paste-back task, `None` when paste-back is disabled
    pub paste_back: Option<PasteBackHandle>,
}

struct ManagerState {
    history: History,
    detector: ChangeDetector,
    session: MonitorSession,
    timer: Option<JoinHandle<()>>,
}

struct Shared<C, S> {
    clipboard: C,
    store: S,
    focus: FocusTracker,
    paste_back: Option<Arc<PasteBackAgent>>,
    state: Mutex<ManagerState>,
}

/// Clipboard history service.
///
/// All mutable state sits behind one async mutex. The periodic check and
/// user-triggered restores both take it, and every mutation is persisted
/// before the lock is released. Paste-back runs in its own task.
///
/// Cloning yields another handle to the same manager.
pub struct HistoryManager<C, S>
where
    C: SystemClipboard + 'static,
    S: HistoryStore + 'static,
{
    shared: Arc<Shared<C, S>>,
}

impl<C, S> Clone for HistoryManager<C, S>
where
    C: SystemClipboard + 'static,
    S: HistoryStore + 'static,
{
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<C, S> HistoryManager<C, S>
where
    C: SystemClipboard + 'static,
    S: HistoryStore + 'static,
{
    /// Create a manager with an empty history. Call [`load`](Self::load)
    /// to fill it from the store.
    pub fn new(
        clipboard: C,
        store: S,
        focus: FocusTracker,
        paste_back: Option<PasteBackAgent>,
        capacity: usize,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                clipboard,
                store,
                focus,
                paste_back: paste_back.map(Arc::new),
                state: Mutex::new(ManagerState {
                    history: History::with_capacity(capacity),
                    detector: ChangeDetector::new(),
                    session: MonitorSession::new(),
                    timer: None,
                }),
            }),
        }
    }

    /// Replace the in-memory history with the persisted one
    pub async fn load(&self) {
        let mut state = self.shared.state.lock().await;
        let capacity = state.history.capacity();
        state.history = self.shared.store.load(capacity).await;
        info!(
            entries = state.history.len(),
            path = %self.shared.store.path().display(),
            "history loaded"
        );
    }

    /// Snapshot of the history, most recent first
    pub async fn get_history(&self) -> Vec<String> {
        self.shared.state.lock().await.history.snapshot()
    }

    /// Number of entries
    pub async fn len(&self) -> usize {
        self.shared.state.lock().await.history.len()
    }

    /// Whether history is empty
    pub async fn is_empty(&self) -> bool {
        self.shared.state.lock().await.history.is_empty()
    }

    /// Current monitoring state
    pub async fn state(&self) -> MonitorState {
        self.shared.state.lock().await.session.state()
    }

    /// Focus tracker supplying the paste-back target
    pub fn focus(&self) -> &FocusTracker {
        &self.shared.focus
    }

    /// Run one clipboard check and record any new text.
    ///
    /// Returns the outcome when the clipboard held new text.
    pub async fn check_clipboard(&self) -> Option<InsertOutcome> {
        let mut state = self.shared.state.lock().await;
        let text = state.detector.check(&self.shared.clipboard).await?;
        Some(self.record(&mut state, text).await)
    }

    /// Record text copied by another application.
    ///
    /// Text already in history is ignored and keeps its position.
    pub async fn on_external_change(&self, text: impl Into<String>) -> InsertOutcome {
        let mut state = self.shared.state.lock().await;
        self.record(&mut state, text.into()).await
    }

    async fn record(&self, state: &mut ManagerState, text: String) -> InsertOutcome {
        let chars = text.chars().count();
        let outcome = state.history.insert(text);
        match outcome {
            InsertOutcome::Inserted { evicted } => {
                debug!(chars, evicted, len = state.history.len(), "recorded clipboard text");
                self.persist(&state.history).await;
            }
            InsertOutcome::Duplicate => debug!(chars, "clipboard text already in history"),
        }
        outcome
    }

    /// Put the entry at `index` back on the clipboard and paste it into the
    /// last focused application.
    ///
    /// The entry moves to the front of history. Paste-back runs in a
    /// separate task whose handle is returned.
    pub async fn restore(&self, index: usize) -> Result<Restored, RestoreError> {
        let text = {
            let mut state = self.shared.state.lock().await;
            let text = state
                .history
                .get(index)
                .map(String::from)
                .ok_or(HistoryError::IndexOutOfRange {
                    index,
                    len: state.history.len(),
                })?;

            self.shared.clipboard.write_text(&text).await?;
            self.acknowledge_own_write(&mut state, &text).await;

            state.history.promote(index)?;
            self.persist(&state.history).await;
            text
        };

        info!(index, chars = text.chars().count(), "restored history entry");

        let paste_back = self.shared.paste_back.as_ref().map(|agent| {
            let agent = Arc::clone(agent);
            let target = self.shared.focus.current();
            let text = text.clone();
            tokio::spawn(async move { agent.inject(target, &text).await })
        });

        Ok(Restored { text, paste_back })
    }

    /// Mark the token of our own clipboard write as seen.
    ///
    /// Only acknowledged while the clipboard still holds `written`; a copy
    /// made by another app in between is left for the next check.
    async fn acknowledge_own_write(&self, state: &mut ManagerState, written: &str) {
        let clipboard = &self.shared.clipboard;
        let token = match clipboard.change_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "could not read change token after restore");
                return;
            }
        };
        match clipboard.read_text().await {
            Ok(Some(current)) if current == written => state.detector.acknowledge(token),
            Ok(_) => debug!(%token, "clipboard changed right after restore"),
            Err(e) => warn!(error = %e, "could not read clipboard after restore"),
        }
    }

    /// Restore the second entry, i.e. the one copied before the current one.
    ///
    /// Returns `None` when history has fewer than two entries.
    pub async fn paste_second_most_recent(&self) -> Result<Option<Restored>, RestoreError> {
        if self.len().await <= 1 {
            debug!("nothing to paste: fewer than two history entries");
            return Ok(None);
        }
        self.restore(1).await.map(Some)
    }

    /// Start the periodic clipboard check.
    ///
    /// Returns false when already monitoring.
    pub async fn start_monitoring(&self, interval: Interval) -> bool {
        let mut state = self.shared.state.lock().await;
        if !state.session.start_monitoring() {
            return false;
        }

        let manager = self.clone();
        state.timer = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval.as_std());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                manager.check_clipboard().await;
            }
        }));

        info!(%interval, "clipboard monitoring started");
        true
    }

    /// Stop the periodic check. Used on shutdown.
    ///
    /// Returns false when not monitoring.
    pub async fn stop_monitoring(&self) -> bool {
        let mut state = self.shared.state.lock().await;
        if !state.session.stop_monitoring() {
            return false;
        }
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        info!("clipboard monitoring stopped");
        true
    }

    async fn persist(&self, history: &History) {
        if let Err(e) = self.shared.store.save(history).await {
            warn!(error = %e, "failed to save history, keeping it in memory");
        }
    }
}
