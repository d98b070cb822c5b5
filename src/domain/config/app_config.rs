//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::history::MAX_HISTORY;
use crate::domain::timing::Interval;

/// Upper bound accepted for `max_history`
pub const MAX_HISTORY_LIMIT: usize = 1000;

/// Default number of paste-back attempts
const DEFAULT_PASTE_ATTEMPTS: u32 = 5;

/// Default identifier ignored by the focus tracker.
///
/// The daemon owns no window, so this only matches if the history UI runs
/// under this process name. Users normally set it to their launcher or
/// terminal.
pub const DEFAULT_SELF_APP_ID: &str = "cliptrail";

/// Linux-specific configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinuxConfig {
    pub keystroke_tool: Option<String>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub poll_interval: Option<String>,
    pub max_history: Option<usize>,
    pub history_file: Option<PathBuf>,
    pub paste_back: Option<bool>,
    pub paste_attempts: Option<u32>,
    pub paste_retry_delay: Option<String>,
    pub focus_interval: Option<String>,
    pub self_app_id: Option<String>,
    pub notify: Option<bool>,
    pub linux: Option<LinuxConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            poll_interval: Some(Interval::default_poll().to_string()),
            max_history: Some(MAX_HISTORY),
            history_file: None,
            paste_back: Some(true),
            paste_attempts: Some(DEFAULT_PASTE_ATTEMPTS),
            paste_retry_delay: Some(Interval::default_paste_retry_delay().to_string()),
            focus_interval: Some(Interval::default_focus().to_string()),
            self_app_id: Some(DEFAULT_SELF_APP_ID.to_string()),
            notify: Some(false),
            linux: Some(LinuxConfig {
                keystroke_tool: Some("enigo".to_string()),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            poll_interval: other.poll_interval.or(self.poll_interval),
            max_history: other.max_history.or(self.max_history),
            history_file: other.history_file.or(self.history_file),
            paste_back: other.paste_back.or(self.paste_back),
            paste_attempts: other.paste_attempts.or(self.paste_attempts),
            paste_retry_delay: other.paste_retry_delay.or(self.paste_retry_delay),
            focus_interval: other.focus_interval.or(self.focus_interval),
            self_app_id: other.self_app_id.or(self.self_app_id),
            notify: other.notify.or(self.notify),
            linux: Self::merge_linux_config(self.linux, other.linux),
        }
    }

    /// Merge Linux config sections
    fn merge_linux_config(
        base: Option<LinuxConfig>,
        other: Option<LinuxConfig>,
    ) -> Option<LinuxConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(LinuxConfig {
                keystroke_tool: o.keystroke_tool.or(b.keystroke_tool),
            }),
        }
    }

    /// Get history capacity, clamped to 1..=MAX_HISTORY_LIMIT
    pub fn max_history_or_default(&self) -> usize {
        self.max_history
            .unwrap_or(MAX_HISTORY)
            .clamp(1, MAX_HISTORY_LIMIT)
    }

    /// Get paste-back setting, or true if not set
    pub fn paste_back_or_default(&self) -> bool {
        self.paste_back.unwrap_or(true)
    }

    /// Get paste attempts, at least one
    pub fn paste_attempts_or_default(&self) -> u32 {
        self.paste_attempts.unwrap_or(DEFAULT_PASTE_ATTEMPTS).max(1)
    }

    /// Get own application identifier
    pub fn self_app_id_or_default(&self) -> &str {
        self.self_app_id.as_deref().unwrap_or(DEFAULT_SELF_APP_ID)
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }

    /// Get keystroke tool preference, or "enigo" if not set
    pub fn keystroke_tool_or_default(&self) -> &str {
        self.linux
            .as_ref()
            .and_then(|l| l.keystroke_tool.as_deref())
            .unwrap_or("enigo")
    }
}
