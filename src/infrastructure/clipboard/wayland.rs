//! Wayland clipboard adapter using wl-paste / wl-copy

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::fingerprint::FingerprintCounter;
use crate::application::ports::{ClipboardError, SystemClipboard};
use crate::domain::history::ChangeToken;

/// Wayland clipboard adapter using the wl-clipboard tools
#[derive(Default)]
pub struct WaylandClipboard {
    counter: FingerprintCounter,
}

impl WaylandClipboard {
    /// Create a new Wayland clipboard adapter
    pub fn new() -> Self {
        Self::default()
    }

    /// Run wl-paste with `args`. `None` when the selection is empty or not
    /// available in the requested type.
    async fn paste(&self, args: &[&str]) -> Result<Option<Vec<u8>>, ClipboardError> {
        let output = Command::new("wl-paste")
            .arg("--no-newline")
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ClipboardError::WlClipboardNotFound("wl-paste")
                } else {
                    ClipboardError::ReadFailed(e.to_string())
                }
            })?;

        if output.status.success() {
            Ok(Some(output.stdout))
        } else {
            // wl-paste exits non-zero for "nothing is copied" and for
            // content with no matching mime type
            Ok(None)
        }
    }
}

#[async_trait]
impl SystemClipboard for WaylandClipboard {
    async fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        let bytes = self.paste(&["--type", "text"]).await?;
        Ok(bytes.and_then(|b| String::from_utf8(b).ok()))
    }

    async fn change_token(&self) -> Result<ChangeToken, ClipboardError> {
        let content = self.paste(&[]).await?;
        Ok(self.counter.observe(content.as_deref()))
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new("wl-copy")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ClipboardError::WlClipboardNotFound("wl-copy")
                } else {
                    ClipboardError::CopyFailed(e.to_string())
                }
            })?;

        // Write text to stdin
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| ClipboardError::CopyFailed(e.to_string()))?;
        }

        let status = child
            .wait()
            .await
            .map_err(|e| ClipboardError::CopyFailed(e.to_string()))?;

        if !status.success() {
            return Err(ClipboardError::CopyFailed(format!(
                "wl-copy exited with status: {}",
                status
            )));
        }

        Ok(())
    }
}
