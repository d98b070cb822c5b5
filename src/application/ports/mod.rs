//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod clipboard;
pub mod config;
pub mod desktop;
pub mod keystroke;
pub mod notifier;
pub mod store;

// Re-export common types
pub use clipboard::{ClipboardError, SystemClipboard};
pub use config::ConfigStore;
pub use desktop::{DesktopControl, DesktopError, FocusEvents};
pub use keystroke::{KeystrokeError, PasteKeystroke};
pub use notifier::{NotificationError, Notifier, PasteFailureNotice};
pub use store::{HistoryStore, StoreError};
