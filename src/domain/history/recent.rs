//! Clipboard history entity

use crate::domain::error::HistoryError;

/// Default maximum number of entries kept in history
pub const MAX_HISTORY: usize = 100;

/// Result of offering a newly copied text to the history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Text was prepended; `evicted` entries fell off the tail
    Inserted { evicted: usize },
    /// Text was already present somewhere in history
    Duplicate,
}

impl InsertOutcome {
    /// Whether the history changed and needs persisting
    pub fn changed(&self) -> bool {
        matches!(self, Self::Inserted { .. })
    }
}

/// Most-recent-first, deduplicated, bounded list of clipboard texts.
///
/// Invariants held by every operation:
/// - no two entries are equal (exact string comparison)
/// - `len() <= capacity()`; the oldest entries are evicted first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
    capacity: usize,
}

impl History {
    /// Create an empty history with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }

    /// Create an empty history holding at most `capacity` entries.
    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Vec::with_capacity(capacity.min(MAX_HISTORY)),
            capacity,
        }
    }

    /// Build a history from an ordered list (most recent first).
    ///
    /// Later duplicates are dropped and the list is cut to `capacity`, so
    /// arbitrary input always yields a valid history.
    pub fn from_entries<I>(entries: I, capacity: usize) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut history = Self::with_capacity(capacity);
        for entry in entries {
            if history.entries.len() == history.capacity {
                break;
            }
            if !history.contains(&entry) {
                history.entries.push(entry);
            }
        }
        history
    }

    /// Offer a newly copied text.
    ///
    /// Strict dedup: a text already present anywhere is ignored and keeps its
    /// position. New text goes to the front and the tail is trimmed.
    pub fn insert(&mut self, text: impl Into<String>) -> InsertOutcome {
        let text = text.into();
        if self.contains(&text) {
            return InsertOutcome::Duplicate;
        }

        self.entries.insert(0, text);
        let evicted = self.entries.len().saturating_sub(self.capacity);
        self.entries.truncate(self.capacity);
        InsertOutcome::Inserted { evicted }
    }

    /// Move the entry at `index` to the front and return a copy of it.
    pub fn promote(&mut self, index: usize) -> Result<String, HistoryError> {
        if index >= self.entries.len() {
            return Err(HistoryError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }

        let entry = self.entries.remove(index);
        self.entries.insert(0, entry.clone());
        Ok(entry)
    }

    /// Check whether `text` is in history
    pub fn contains(&self, text: &str) -> bool {
        self.entries.iter().any(|e| e == text)
    }

    /// Entry at `index` (0 = most recent)
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// All entries, most recent first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Owned copy of the entries for readers outside the manager
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.clone()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether history is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
