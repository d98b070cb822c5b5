//! Ydotool keystroke adapter for Wayland support

use async_trait::async_trait;

use super::command::run_tool;
use crate::application::ports::{KeystrokeError, PasteKeystroke};
use crate::domain::focus::FocusRecord;

/// Linux input event codes
const KEY_LEFTCTRL: u16 = 29;
const KEY_V: u16 = 47;

/// Ydotool keystroke adapter.
///
/// Requires ydotoold daemon to be running and user to be in the input group.
#[derive(Debug, Default)]
pub struct YdotoolKeystroke;

impl YdotoolKeystroke {
    /// Create a new ydotool keystroke adapter
    pub fn new() -> Self {
        Self
    }

    fn args() -> Vec<String> {
        vec![
            "key".to_string(),
            format!("{}:1", KEY_LEFTCTRL),
            format!("{}:1", KEY_V),
            format!("{}:0", KEY_V),
            format!("{}:0", KEY_LEFTCTRL),
        ]
    }
}

#[async_trait]
impl PasteKeystroke for YdotoolKeystroke {
    async fn send_paste(&self, _target: &FocusRecord) -> Result<(), KeystrokeError> {
        run_tool("ydotool", &Self::args(), || KeystrokeError::YdotoolNotAvailable).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presses_and_releases_ctrl_v() {
        assert_eq!(YdotoolKeystroke::args(), ["key", "29:1", "47:1", "47:0", "29:0"]);
    }
}
