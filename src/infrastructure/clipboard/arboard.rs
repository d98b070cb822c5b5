//! Cross-platform clipboard adapter using arboard
//!
//! Works on Windows, macOS, and Linux (X11/Wayland).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::fingerprint::FingerprintCounter;
use crate::application::ports::{ClipboardError, SystemClipboard};
use crate::domain::history::ChangeToken;

/// What the clipboard currently holds
enum Content {
    Empty,
    Text(String),
    Other(Vec<u8>),
}

/// A handle opened on first use and then kept for the adapter's lifetime.
///
/// On X11 the process owns the selection only while its clipboard handle
/// is alive, so restored text must not be written through a throwaway one.
struct Retained<T> {
    slot: Arc<Mutex<Option<T>>>,
}

impl<T> Retained<T> {
    fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }

    fn with<R, E>(
        slot: &Mutex<Option<T>>,
        open: impl FnOnce() -> Result<T, E>,
        f: impl FnOnce(&mut T) -> Result<R, E>,
    ) -> Result<R, E> {
        let mut guard = slot.lock().unwrap_or_else(|e| e.into_inner());
        let handle = match guard.take() {
            Some(handle) => handle,
            None => open()?,
        };
        f(guard.insert(handle))
    }
}

fn open_clipboard() -> Result<arboard::Clipboard, ClipboardError> {
    arboard::Clipboard::new().map_err(|e| ClipboardError::ClipboardUnavailable(e.to_string()))
}

/// Cross-platform clipboard adapter using arboard
pub struct ArboardClipboard {
    clipboard: Retained<arboard::Clipboard>,
    counter: FingerprintCounter,
}

impl Default for ArboardClipboard {
    fn default() -> Self {
        Self {
            clipboard: Retained::new(),
            counter: FingerprintCounter::default(),
        }
    }
}

impl ArboardClipboard {
    /// Create a new arboard clipboard adapter
    pub fn new() -> Self {
        Self::default()
    }

    async fn read_content(&self) -> Result<Content, ClipboardError> {
        let slot = Arc::clone(&self.clipboard.slot);

        // arboard operations are blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            Retained::with(&slot, open_clipboard, |clipboard| {
                match clipboard.get_text() {
                    Ok(text) => return Ok(Content::Text(text)),
                    Err(arboard::Error::ContentNotAvailable) => {}
                    Err(e) => return Err(ClipboardError::ReadFailed(e.to_string())),
                }

                match clipboard.get_image() {
                    Ok(image) => {
                        let mut bytes = Vec::with_capacity(image.bytes.len() + 16);
                        bytes.extend_from_slice(&(image.width as u64).to_le_bytes());
                        bytes.extend_from_slice(&(image.height as u64).to_le_bytes());
                        bytes.extend_from_slice(&image.bytes);
                        Ok(Content::Other(bytes))
                    }
                    Err(arboard::Error::ContentNotAvailable) => Ok(Content::Empty),
                    Err(e) => Err(ClipboardError::ReadFailed(e.to_string())),
                }
            })
        })
        .await
        .map_err(|e| ClipboardError::ReadFailed(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl SystemClipboard for ArboardClipboard {
    async fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        match self.read_content().await? {
            Content::Text(text) => Ok(Some(text)),
            Content::Empty | Content::Other(_) => Ok(None),
        }
    }

    async fn change_token(&self) -> Result<ChangeToken, ClipboardError> {
        let token = match self.read_content().await? {
            Content::Empty => self.counter.observe(None),
            Content::Text(text) => self.counter.observe(Some(text.as_bytes())),
            Content::Other(bytes) => self.counter.observe(Some(&bytes)),
        };
        Ok(token)
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_owned();
        let slot = Arc::clone(&self.clipboard.slot);

        tokio::task::spawn_blocking(move || {
            Retained::with(&slot, open_clipboard, |clipboard| {
                clipboard
                    .set_text(text)
                    .map_err(|e| ClipboardError::CopyFailed(e.to_string()))
            })
        })
        .await
        .map_err(|e| ClipboardError::CopyFailed(format!("Task join error: {}", e)))?
    }
}
