//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod focus;
pub mod history;
pub mod monitor;
pub mod timing;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use focus::{AppId, FocusEvent, FocusRecord, WindowId};
pub use history::{ChangeToken, History, InsertOutcome, MAX_HISTORY};
pub use monitor::{MonitorSession, MonitorState};
pub use timing::Interval;
