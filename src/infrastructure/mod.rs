//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces, integrating
//! with the system clipboard, window system, filesystem and notifications.

pub mod clipboard;
pub mod config;
pub mod desktop;
pub mod keystroke;
pub mod notification;
pub mod storage;

// Re-export adapters
pub use clipboard::{create_clipboard, ArboardClipboard, WaylandClipboard};
pub use config::XdgConfigStore;
pub use desktop::{create_desktop, FocusPoller, UnsupportedDesktop, XdotoolDesktop};
pub use keystroke::{create_keystroke, PasteTool, PasteToolChoice};
pub use notification::{create_notifier, NotifyRustNotifier};
pub use storage::JsonHistoryStore;
