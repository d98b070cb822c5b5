//! App runners shared by the binary entry point

use std::path::PathBuf;
use std::process::ExitCode;

use crate::application::ports::{ConfigStore, HistoryStore};
use crate::application::RetryPolicy;
use crate::domain::config::AppConfig;
use crate::domain::timing::Interval;
use crate::infrastructure::{JsonHistoryStore, XdgConfigStore};

use super::args::DaemonOptions;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Load and merge configuration: defaults < file < CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %store.path().display(), error = %e, "ignoring config file");
            AppConfig::empty()
        }
    };

    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// History file location: configured path or the default data dir path
pub fn history_path(config: &AppConfig) -> PathBuf {
    config
        .history_file
        .clone()
        .unwrap_or_else(JsonHistoryStore::default_path)
}

/// Parse an interval setting, naming the setting on failure
fn parse_interval(name: &str, value: Option<&str>, default: Interval) -> Result<Interval, String> {
    match value {
        Some(s) => s
            .parse::<Interval>()
            .map_err(|e| format!("Invalid {}: {}", name, e)),
        None => Ok(default),
    }
}

/// Resolve daemon options from the merged config.
///
/// Unparsable intervals are usage errors rather than silently defaulted.
pub fn daemon_options(config: &AppConfig) -> Result<DaemonOptions, String> {
    let poll_interval = parse_interval(
        "interval",
        config.poll_interval.as_deref(),
        Interval::default_poll(),
    )?;
    let paste_retry_delay = parse_interval(
        "paste_retry_delay",
        config.paste_retry_delay.as_deref(),
        Interval::default_paste_retry_delay(),
    )?;
    let focus_interval = parse_interval(
        "focus_interval",
        config.focus_interval.as_deref(),
        Interval::default_focus(),
    )?;

    Ok(DaemonOptions {
        poll_interval,
        max_history: config.max_history_or_default(),
        history_file: history_path(config),
        paste_back: config.paste_back_or_default(),
        retry: RetryPolicy {
            attempts: config.paste_attempts_or_default(),
            delay: paste_retry_delay,
        },
        focus_interval,
        self_app_id: config.self_app_id_or_default().to_string(),
        keystroke_tool: config.keystroke_tool_or_default().to_string(),
        notify: config.notify_or_default(),
    })
}

/// Print the persisted history without contacting the daemon
pub async fn run_offline_list(config: &AppConfig) -> ExitCode {
    let presenter = Presenter::new();
    let store = JsonHistoryStore::with_path(history_path(config));

    match store.try_load(config.max_history_or_default()).await {
        Ok(history) => {
            presenter.history(history.entries());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&format!("{} ({})", e, store.path().display()));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_to_daemon_options() {
        let options = daemon_options(&AppConfig::defaults()).unwrap();
        assert_eq!(options.poll_interval, Interval::default_poll());
        assert_eq!(options.max_history, 100);
        assert!(options.paste_back);
        assert_eq!(options.retry, RetryPolicy::default());
        assert_eq!(options.focus_interval.as_millis(), 250);
        assert_eq!(options.self_app_id, "cliptrail");
        assert_eq!(options.keystroke_tool, "enigo");
        assert!(!options.notify);
        assert_eq!(options.history_file, JsonHistoryStore::default_path());
    }

    #[test]
    fn cli_values_override_defaults() {
        let cli = AppConfig {
            poll_interval: Some("250ms".to_string()),
            paste_back: Some(false),
            history_file: Some(PathBuf::from("/tmp/h.json")),
            ..Default::default()
        };
        let options = daemon_options(&AppConfig::defaults().merge(cli)).unwrap();
        assert_eq!(options.poll_interval.as_millis(), 250);
        assert!(!options.paste_back);
        assert_eq!(options.history_file, PathBuf::from("/tmp/h.json"));
    }

    #[test]
    fn invalid_interval_is_reported() {
        let config = AppConfig {
            poll_interval: Some("often".to_string()),
            ..Default::default()
        };
        let err = daemon_options(&config).unwrap_err();
        assert!(err.contains("Invalid interval"));
        assert!(err.contains("often"));
    }

    #[test]
    fn every_interval_setting_is_validated() {
        for (config, name) in [
            (
                AppConfig {
                    paste_retry_delay: Some("-1s".to_string()),
                    ..AppConfig::defaults()
                },
                "paste_retry_delay",
            ),
            (
                AppConfig {
                    focus_interval: Some("fast".to_string()),
                    ..AppConfig::defaults()
                },
                "focus_interval",
            ),
        ] {
            let err = daemon_options(&config).unwrap_err();
            assert!(err.starts_with(&format!("Invalid {}", name)), "{err}");
        }
    }
}
