//! History store port interface

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::history::History;

/// History persistence errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Failed to read history file: {0}")]
    Read(String),

    #[error("Failed to parse history file: {0}")]
    Parse(String),

    #[error("Unsupported history file version {found} (supported up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Failed to write history file: {0}")]
    Write(String),
}

/// Port for durable history storage
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Load the persisted history, holding at most `capacity` entries.
    ///
    /// Never fails: a missing, unreadable, or malformed file yields an
    /// empty history and is logged by the adapter.
    async fn load(&self, capacity: usize) -> History;

    /// Replace the persisted history with `history`.
    ///
    /// A crash during save leaves either the previous or the new file intact.
    async fn save(&self, history: &History) -> Result<(), StoreError>;

    /// Location of the history file
    fn path(&self) -> PathBuf;
}

/// Blanket implementation for boxed store types
#[async_trait]
impl HistoryStore for Box<dyn HistoryStore> {
    async fn load(&self, capacity: usize) -> History {
        self.as_ref().load(capacity).await
    }

    async fn save(&self, history: &History) -> Result<(), StoreError> {
        self.as_ref().save(history).await
    }

    fn path(&self) -> PathBuf {
        self.as_ref().path()
    }
}
