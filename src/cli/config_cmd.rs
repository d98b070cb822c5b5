//! Config command handler

use std::path::PathBuf;

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, LinuxConfig, MAX_HISTORY_LIMIT};
use crate::domain::error::ConfigError;
use crate::domain::timing::Interval;

use crate::infrastructure::keystroke::PasteToolChoice;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;
    set_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    presenter.output(&get_value(&config, key).unwrap_or_else(|| NOT_SET.to_string()));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = get_value(&config, key).unwrap_or_else(|| NOT_SET.to_string());
        presenter.key_value(key, &value);
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

/// Read `key` from `config` in its display form
fn get_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "poll_interval" => config.poll_interval.clone(),
        "max_history" => config.max_history.map(|n| n.to_string()),
        "history_file" => config
            .history_file
            .as_ref()
            .map(|p| p.to_string_lossy().to_string()),
        "paste_back" => config.paste_back.map(|b| b.to_string()),
        "paste_attempts" => config.paste_attempts.map(|n| n.to_string()),
        "paste_retry_delay" => config.paste_retry_delay.clone(),
        "focus_interval" => config.focus_interval.clone(),
        "self_app_id" => config.self_app_id.clone(),
        "notify" => config.notify.map(|b| b.to_string()),
        "linux.keystroke_tool" => config.linux.as_ref().and_then(|l| l.keystroke_tool.clone()),
        _ => None,
    }
}

/// Validate `value` for `key` and store it in `config`
fn set_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "poll_interval" | "paste_retry_delay" | "focus_interval" => {
            let interval: Interval = value.parse().map_err(|e| invalid(format!("{e}")))?;
            let normalized = Some(interval.to_string());
            match key {
                "poll_interval" => config.poll_interval = normalized,
                "paste_retry_delay" => config.paste_retry_delay = normalized,
                _ => config.focus_interval = normalized,
            }
        }
        "max_history" => {
            let n = value
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=MAX_HISTORY_LIMIT).contains(n))
                .ok_or_else(|| {
                    invalid(format!("Value must be a number from 1 to {}", MAX_HISTORY_LIMIT))
                })?;
            config.max_history = Some(n);
        }
        "paste_attempts" => {
            let n = value
                .parse::<u32>()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or_else(|| invalid("Value must be a positive number".to_string()))?;
            config.paste_attempts = Some(n);
        }
        "history_file" => {
            if value.trim().is_empty() {
                return Err(invalid("Path must not be empty".to_string()));
            }
            config.history_file = Some(PathBuf::from(value));
        }
        "paste_back" | "notify" => {
            let flag = parse_bool(value)
                .map_err(|_| invalid("Value must be 'true' or 'false'".to_string()))?;
            if key == "paste_back" {
                config.paste_back = Some(flag);
            } else {
                config.notify = Some(flag);
            }
        }
        "self_app_id" => {
            if value.trim().is_empty() {
                return Err(invalid("Identifier must not be empty".to_string()));
            }
            config.self_app_id = Some(value.trim().to_string());
        }
        "linux.keystroke_tool" => {
            let choice: PasteToolChoice = value.parse().map_err(|e| invalid(format!("{e}")))?;
            config
                .linux
                .get_or_insert_with(LinuxConfig::default)
                .keystroke_tool = Some(choice.to_string());
        }
        _ => return Err(invalid("Unknown key".to_string())),
    }
    Ok(())
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}
