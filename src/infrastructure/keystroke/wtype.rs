//! Wtype keystroke adapter for Wayland support

use async_trait::async_trait;

use super::command::run_tool;
use crate::application::ports::{KeystrokeError, PasteKeystroke};
use crate::domain::focus::FocusRecord;

/// Press ctrl, tap v, release ctrl
const PASTE_ARGS: [&str; 5] = ["-M", "ctrl", "v", "-m", "ctrl"];

/// Wtype keystroke adapter.
///
/// Wayland has no way to address another client's window, so the paste
/// goes to whichever surface has keyboard focus.
#[derive(Debug, Default)]
pub struct WtypeKeystroke;

impl WtypeKeystroke {
    /// Create a new wtype keystroke adapter
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PasteKeystroke for WtypeKeystroke {
    async fn send_paste(&self, _target: &FocusRecord) -> Result<(), KeystrokeError> {
        let args: Vec<String> = PASTE_ARGS.iter().map(|a| a.to_string()).collect();
        run_tool("wtype", &args, || {
            KeystrokeError::ToolNotFound("wtype".to_string())
        })
        .await
    }
}
