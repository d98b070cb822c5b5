//! Application layer - Use cases and port interfaces
//!
//! Contains the clipboard history operations and trait definitions
//! for external system interactions.

pub mod change_detector;
pub mod focus_tracker;
pub mod history_manager;
pub mod paste_back;
pub mod ports;

// Re-export use cases
pub use change_detector::ChangeDetector;
pub use focus_tracker::FocusTracker;
pub use history_manager::{HistoryManager, PasteBackHandle, RestoreError, Restored};
pub use paste_back::{PasteBackAgent, PasteBackError, PasteOutcome, RetryPolicy};
