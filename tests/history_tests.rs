//! History integration tests
//!
//! Drive the history manager against the JSON history file and answer
//! daemon requests the way the IPC server would.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use cliptrail::application::ports::{
    ClipboardError, DesktopControl, DesktopError, KeystrokeError, NotificationError, Notifier,
    PasteFailureNotice, PasteKeystroke, SystemClipboard,
};
use cliptrail::application::{FocusTracker, HistoryManager, PasteBackAgent, RetryPolicy};
use cliptrail::cli::daemon_app::{handle_request, SharedNotifier};
use cliptrail::cli::ipc::DaemonCommand;
use cliptrail::domain::focus::{FocusEvent, FocusRecord};
use cliptrail::domain::history::ChangeToken;
use cliptrail::domain::timing::Interval;
use cliptrail::infrastructure::JsonHistoryStore;

/// In-memory clipboard whose token advances on every write
#[derive(Clone, Default)]
struct FakeClipboard {
    token: Arc<AtomicU64>,
    text: Arc<Mutex<Option<String>>>,
}

impl FakeClipboard {
    /// Simulate another application copying `text`
    fn copy(&self, text: &str) {
        *self.text.lock().unwrap() = Some(text.to_string());
        self.token.fetch_add(1, Ordering::SeqCst);
    }

    fn contents(&self) -> Option<String> {
        self.text.lock().unwrap().clone()
    }
}

#[async_trait]
impl SystemClipboard for FakeClipboard {
    async fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        Ok(self.contents())
    }

    async fn change_token(&self) -> Result<ChangeToken, ClipboardError> {
        Ok(ChangeToken::new(self.token.load(Ordering::SeqCst)))
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.copy(text);
        Ok(())
    }
}

struct LiveDesktop;

#[async_trait]
impl DesktopControl for LiveDesktop {
    async fn active_window(&self) -> Result<Option<FocusRecord>, DesktopError> {
        Ok(None)
    }

    async fn is_running(&self, _target: &FocusRecord) -> bool {
        true
    }

    async fn activate(&self, _target: &FocusRecord) -> Result<(), DesktopError> {
        Ok(())
    }
}

struct BrokenKeystroke;

#[async_trait]
impl PasteKeystroke for BrokenKeystroke {
    async fn send_paste(&self, _target: &FocusRecord) -> Result<(), KeystrokeError> {
        Err(KeystrokeError::SendFailed("no input device".to_string()))
    }
}

#[derive(Default)]
struct RecordingNotifier {
    notices: Mutex<Vec<PasteFailureNotice>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn paste_failed(&self, notice: &PasteFailureNotice) -> Result<(), NotificationError> {
        self.notices.lock().unwrap().push(notice.clone());
        Ok(())
    }
}

fn manager(
    clipboard: &FakeClipboard,
    dir: &TempDir,
    paste_back: Option<PasteBackAgent>,
) -> HistoryManager<FakeClipboard, JsonHistoryStore> {
    HistoryManager::new(
        clipboard.clone(),
        JsonHistoryStore::with_path(dir.path().join("history.json")),
        FocusTracker::new("cliptrail"),
        paste_back,
        100,
    )
}

#[tokio::test]
async fn history_survives_restart() {
    let dir = TempDir::new().unwrap();
    let clipboard = FakeClipboard::default();

    let first = manager(&clipboard, &dir, None);
    first.load().await;
    clipboard.copy("alpha");
    first.check_clipboard().await;
    clipboard.copy("beta");
    first.check_clipboard().await;

    let second = manager(&clipboard, &dir, None);
    second.load().await;
    assert_eq!(second.get_history().await, vec!["beta", "alpha"]);
}

#[tokio::test]
async fn restore_over_ipc_moves_entry_to_front() {
    let dir = TempDir::new().unwrap();
    let clipboard = FakeClipboard::default();
    let manager = manager(&clipboard, &dir, None);

    for text in ["one", "two", "three"] {
        clipboard.copy(text);
        manager.check_clipboard().await;
    }

    let reply = handle_request(&manager, DaemonCommand::Restore(2), None).await;
    assert_eq!(reply, "ok");
    assert_eq!(clipboard.contents().as_deref(), Some("one"));

    // Our own write is not picked up again as a new copy
    assert!(manager.check_clipboard().await.is_none());

    let list = handle_request(&manager, DaemonCommand::List, None).await;
    let entries: Vec<String> = serde_json::from_str(&list).unwrap();
    assert_eq!(entries, vec!["one", "three", "two"]);

    let saved = std::fs::read_to_string(dir.path().join("history.json")).unwrap();
    assert!(saved.find("one").unwrap() < saved.find("three").unwrap());
}

#[tokio::test]
async fn restore_out_of_range_is_an_error_reply() {
    let dir = TempDir::new().unwrap();
    let clipboard = FakeClipboard::default();
    let manager = manager(&clipboard, &dir, None);

    clipboard.copy("only");
    manager.check_clipboard().await;

    let reply = handle_request(&manager, DaemonCommand::Restore(5), None).await;
    assert!(reply.starts_with("error: History index 5"), "{reply}");
    assert_eq!(manager.get_history().await, vec!["only"]);
}

#[tokio::test]
async fn paste_second_needs_two_entries() {
    let dir = TempDir::new().unwrap();
    let clipboard = FakeClipboard::default();
    let manager = manager(&clipboard, &dir, None);

    clipboard.copy("first");
    manager.check_clipboard().await;
    assert_eq!(
        handle_request(&manager, DaemonCommand::PasteSecond, None).await,
        "ok: nothing to paste"
    );

    clipboard.copy("second");
    manager.check_clipboard().await;
    assert_eq!(
        handle_request(&manager, DaemonCommand::PasteSecond, None).await,
        "ok"
    );
    assert_eq!(manager.get_history().await, vec!["first", "second"]);
}

#[tokio::test]
async fn status_reports_state_and_size() {
    let dir = TempDir::new().unwrap();
    let clipboard = FakeClipboard::default();
    let manager = manager(&clipboard, &dir, None);

    assert_eq!(
        handle_request(&manager, DaemonCommand::Status, None).await,
        "idle 0"
    );

    clipboard.copy("x");
    manager.start_monitoring(Interval::from_millis(10)).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(
        handle_request(&manager, DaemonCommand::Status, None).await,
        "monitoring 1"
    );
    manager.stop_monitoring().await;
}

#[tokio::test]
async fn failed_paste_back_notifies() {
    let dir = TempDir::new().unwrap();
    let clipboard = FakeClipboard::default();
    let agent = PasteBackAgent::new(
        Box::new(LiveDesktop) as Box<dyn DesktopControl>,
        Box::new(BrokenKeystroke) as Box<dyn PasteKeystroke>,
        RetryPolicy {
            attempts: 2,
            delay: Interval::from_millis(1),
        },
    );
    let manager = manager(&clipboard, &dir, Some(agent));
    manager
        .focus()
        .handle_event(FocusEvent::activated(FocusRecord::new("editor")));

    clipboard.copy("a");
    manager.check_clipboard().await;
    clipboard.copy("b");
    manager.check_clipboard().await;

    let notifier = Arc::new(RecordingNotifier::default());
    let shared: SharedNotifier = notifier.clone();
    let reply = handle_request(&manager, DaemonCommand::Restore(1), Some(shared)).await;
    assert_eq!(reply, "ok");

    // Restore itself succeeded even though the paste did not
    assert_eq!(clipboard.contents().as_deref(), Some("a"));

    for _ in 0..100 {
        if !notifier.notices.lock().unwrap().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(
        *notifier.notices.lock().unwrap(),
        vec![PasteFailureNotice {
            target: "editor".to_string(),
            attempts: 2,
        }]
    );
}
