//! X11 desktop adapter using xdotool

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::process::{is_pid_alive, is_process_running};
use crate::application::ports::{DesktopControl, DesktopError};
use crate::domain::focus::{AppId, FocusRecord, WindowId};

/// X11 window queries and activation through xdotool
#[derive(Debug, Default)]
pub struct XdotoolDesktop;

impl XdotoolDesktop {
    pub fn new() -> Self {
        Self
    }

    /// Run xdotool and return trimmed stdout, `None` on non-zero exit
    async fn query(args: &[&str]) -> Result<Option<String>, DesktopError> {
        let output = Command::new("xdotool")
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    DesktopError::ToolNotFound("xdotool".to_string())
                } else {
                    DesktopError::QueryFailed(e.to_string())
                }
            })?;

        if !output.status.success() {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&output.stdout).trim().to_string()))
    }
}

/// Executable name of `pid`, as the kernel reports it
async fn process_name(pid: u32) -> Option<String> {
    tokio::fs::read_to_string(format!("/proc/{}/comm", pid))
        .await
        .ok()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

#[async_trait]
impl DesktopControl for XdotoolDesktop {
    async fn active_window(&self) -> Result<Option<FocusRecord>, DesktopError> {
        let Some(raw) = Self::query(&["getactivewindow"]).await? else {
            return Ok(None);
        };
        let window = raw
            .parse::<u64>()
            .map(WindowId::new)
            .map_err(|_| DesktopError::QueryFailed(format!("unexpected window id: {raw}")))?;

        let window_arg = window.to_string();
        let pid = Self::query(&["getwindowpid", &window_arg])
            .await?
            .and_then(|p| p.parse::<u32>().ok());

        let app_id = match pid {
            Some(pid) => process_name(pid).await,
            None => None,
        }
        .map(AppId::from)
        .unwrap_or_else(|| AppId::new(format!("window-{}", window)));

        let mut record = FocusRecord::new(app_id).with_window(window);
        if let Some(pid) = pid {
            record = record.with_pid(pid);
        }
        Ok(Some(record))
    }

    async fn is_running(&self, target: &FocusRecord) -> bool {
        match target.pid {
            Some(pid) => is_pid_alive(pid),
            None => is_process_running(target.app_id.as_str()).await,
        }
    }

    async fn activate(&self, target: &FocusRecord) -> Result<(), DesktopError> {
        let Some(window) = target.window_id else {
            debug!(target_app = %target, "no window id, leaving focus as is");
            return Ok(());
        };

        let window_arg = window.to_string();
        match Self::query(&["windowactivate", "--sync", &window_arg]).await? {
            Some(_) => Ok(()),
            None => Err(DesktopError::ActivateFailed {
                target: target.to_string(),
                message: "xdotool windowactivate failed".to_string(),
            }),
        }
    }
}
