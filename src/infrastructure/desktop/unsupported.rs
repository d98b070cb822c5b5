//! Desktop adapter for sessions without window control

use async_trait::async_trait;

use super::process::{is_pid_alive, is_process_running};
use crate::application::ports::{DesktopControl, DesktopError};
use crate::domain::focus::FocusRecord;

/// Reports no active window and leaves focus alone.
///
/// Used on Wayland and on platforms without an X server, where other
/// clients' windows cannot be queried. Paste-back then has no target.
#[derive(Debug, Default)]
pub struct UnsupportedDesktop;

impl UnsupportedDesktop {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DesktopControl for UnsupportedDesktop {
    async fn active_window(&self) -> Result<Option<FocusRecord>, DesktopError> {
        Ok(None)
    }

    async fn is_running(&self, target: &FocusRecord) -> bool {
        match target.pid {
            Some(pid) => is_pid_alive(pid),
            None => is_process_running(target.app_id.as_str()).await,
        }
    }

    async fn activate(&self, _target: &FocusRecord) -> Result<(), DesktopError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn never_reports_a_window() {
        let desktop = UnsupportedDesktop::new();
        assert!(desktop.active_window().await.unwrap().is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn own_pid_is_running() {
        let desktop = UnsupportedDesktop::new();
        let me = FocusRecord::new("cliptrail").with_pid(std::process::id());
        assert!(desktop.is_running(&me).await);
    }
}
