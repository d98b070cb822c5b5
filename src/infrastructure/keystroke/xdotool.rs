//! Xdotool keystroke adapter for X11 support

use async_trait::async_trait;

use super::command::run_tool;
use crate::application::ports::{KeystrokeError, PasteKeystroke};
use crate::domain::focus::FocusRecord;

/// Xdotool keystroke adapter.
///
/// Addresses the target window directly when its id is known, so the
/// paste lands even if focus moved again in the meantime.
#[derive(Debug, Default)]
pub struct XdotoolKeystroke;

impl XdotoolKeystroke {
    /// Create a new xdotool keystroke adapter
    pub fn new() -> Self {
        Self
    }

    fn args(target: &FocusRecord) -> Vec<String> {
        let mut args = vec!["key".to_string(), "--clearmodifiers".to_string()];
        if let Some(window) = target.window_id {
            args.push("--window".to_string());
            args.push(window.to_string());
        }
        args.push("ctrl+v".to_string());
        args
    }
}

#[async_trait]
impl PasteKeystroke for XdotoolKeystroke {
    async fn send_paste(&self, target: &FocusRecord) -> Result<(), KeystrokeError> {
        run_tool("xdotool", &Self::args(target), || {
            KeystrokeError::ToolNotFound("xdotool".to_string())
        })
        .await
    }
}
