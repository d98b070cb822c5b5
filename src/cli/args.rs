//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::RetryPolicy;
use crate::domain::timing::Interval;

/// Cliptrail - clipboard history with paste-back
#[derive(Parser, Debug)]
#[command(name = "cliptrail")]
#[command(version)]
#[command(about = "Deduplicated, persistent clipboard history with paste-back")]
#[command(long_about = None)]
pub struct Cli {
    /// Run the clipboard monitoring daemon (control via: cliptrail history/daemon)
    #[arg(long)]
    pub daemon: bool,

    /// Clipboard check interval for daemon mode (e.g., 500ms, 1s)
    #[arg(short = 'i', long, value_name = "TIME", requires = "daemon")]
    pub interval: Option<String>,

    /// Do not paste restored entries into the previous application
    #[arg(long, requires = "daemon")]
    pub no_paste_back: bool,

    /// Show a desktop notification when paste-back fails
    #[arg(short = 'n', long)]
    pub notify: bool,

    /// Keystroke tool for paste-back (Linux: enigo, auto, ydotool, xdotool, wtype)
    #[arg(long, value_name = "TOOL")]
    pub keystroke_tool: Option<String>,

    /// Process name of the launcher or terminal you run `cliptrail history` from
    /// (e.g. rofi, alacritty). Focus on it is ignored so restores paste into the
    /// app you were using before
    #[arg(long, value_name = "NAME", requires = "daemon")]
    pub self_app_id: Option<String>,

    /// History file location
    #[arg(long, value_name = "PATH", env = "CLIPTRAIL_HISTORY_FILE")]
    pub history_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Send commands to running daemon
    Daemon {
        #[command(subcommand)]
        action: DaemonAction,
    },
    /// Browse and restore clipboard history through the daemon
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

/// Daemon control actions
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum DaemonAction {
    /// Show daemon status
    Status,
    /// Stop the daemon
    Stop,
}

/// History actions
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum HistoryAction {
    /// List entries, most recent first
    List {
        /// Print the raw JSON array
        #[arg(long)]
        json: bool,
    },
    /// Put entry N back on the clipboard and paste it
    Restore {
        /// Entry index as shown by `history list` (0 = most recent)
        index: usize,
    },
    /// Restore the entry copied before the current one
    PasteSecond,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    ///
    /// Set self_app_id to the process name of the launcher or terminal that
    /// runs `cliptrail history`, otherwise restores paste back into it.
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed daemon options
#[derive(Debug, Clone)]
pub struct DaemonOptions {
    pub poll_interval: Interval,
    pub max_history: usize,
    pub history_file: PathBuf,
    pub paste_back: bool,
    pub retry: RetryPolicy,
    pub focus_interval: Interval,
    pub self_app_id: String,
    pub keystroke_tool: String,
    pub notify: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "poll_interval",
    "max_history",
    "history_file",
    "paste_back",
    "paste_attempts",
    "paste_retry_delay",
    "focus_interval",
    "self_app_id",
    "notify",
    "linux.keystroke_tool",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["cliptrail"]);
        assert!(!cli.daemon);
        assert!(cli.interval.is_none());
        assert!(!cli.no_paste_back);
        assert!(!cli.notify);
        assert!(cli.keystroke_tool.is_none());
        assert!(cli.self_app_id.is_none());
        assert!(!cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_daemon_flags() {
        let cli = Cli::parse_from([
            "cliptrail",
            "--daemon",
            "-i",
            "500ms",
            "--no-paste-back",
            "--keystroke-tool",
            "xdotool",
        ]);
        assert!(cli.daemon);
        assert_eq!(cli.interval, Some("500ms".to_string()));
        assert!(cli.no_paste_back);
        assert_eq!(cli.keystroke_tool, Some("xdotool".to_string()));
    }

    #[test]
    fn interval_requires_daemon() {
        assert!(Cli::try_parse_from(["cliptrail", "--interval", "1s"]).is_err());
    }

    #[test]
    fn cli_parses_self_app_id() {
        let cli = Cli::parse_from(["cliptrail", "--daemon", "--self-app-id", "rofi"]);
        assert_eq!(cli.self_app_id, Some("rofi".to_string()));
        assert!(Cli::try_parse_from(["cliptrail", "--self-app-id", "rofi"]).is_err());
    }

    #[test]
    fn cli_parses_history_restore() {
        let cli = Cli::parse_from(["cliptrail", "history", "restore", "3"]);
        assert!(matches!(
            cli.command,
            Some(Commands::History {
                action: HistoryAction::Restore { index: 3 }
            })
        ));
    }

    #[test]
    fn cli_parses_history_list_json() {
        let cli = Cli::parse_from(["cliptrail", "history", "list", "--json"]);
        assert!(matches!(
            cli.command,
            Some(Commands::History {
                action: HistoryAction::List { json: true }
            })
        ));
    }

    #[test]
    fn restore_rejects_negative_index() {
        assert!(Cli::try_parse_from(["cliptrail", "history", "restore", "-1"]).is_err());
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::parse_from(["cliptrail", "daemon", "status", "-v"]);
        assert!(cli.verbose);
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["cliptrail", "config", "set", "max_history", "50"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "max_history");
            assert_eq!(value, "50");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("poll_interval"));
        assert!(is_valid_config_key("linux.keystroke_tool"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
