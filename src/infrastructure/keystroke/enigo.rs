//! Cross-platform keystroke adapter using enigo
//!
//! Works on Windows, macOS, and Linux (X11/Wayland).

use async_trait::async_trait;

use crate::application::ports::{KeystrokeError, PasteKeystroke};
use crate::domain::focus::FocusRecord;

/// Cross-platform keystroke adapter using enigo.
///
/// Sends Cmd+V on macOS and Ctrl+V elsewhere to the focused window.
#[derive(Debug, Default)]
pub struct EnigoKeystroke;

impl EnigoKeystroke {
    /// Create a new enigo keystroke adapter
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PasteKeystroke for EnigoKeystroke {
    async fn send_paste(&self, _target: &FocusRecord) -> Result<(), KeystrokeError> {
        // enigo operations are blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(|| {
            use enigo::{Direction, Enigo, Key, Keyboard, Settings};

            let modifier = if cfg!(target_os = "macos") {
                Key::Meta
            } else {
                Key::Control
            };
            let failed = |e: enigo::InputError| KeystrokeError::SendFailed(e.to_string());

            let mut enigo = Enigo::new(&Settings::default()).map_err(|e| {
                KeystrokeError::SendFailed(format!("Failed to create enigo: {}", e))
            })?;

            enigo.key(modifier, Direction::Press).map_err(failed)?;
            let tapped = enigo.key(Key::Unicode('v'), Direction::Click).map_err(failed);
            // Always release the modifier, even when the tap failed
            enigo.key(modifier, Direction::Release).map_err(failed)?;
            tapped
        })
        .await
        .map_err(|e| KeystrokeError::SendFailed(format!("Task join error: {}", e)))?
    }
}
