//! Focus record value objects

use std::fmt;

/// Identifier of a desktop application (process name or bundle id)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppId(String);

impl AppId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AppId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Platform window handle (X11 window id, HWND, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(u64);

impl WindowId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Last external application observed to gain focus.
///
/// This is the paste-back target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusRecord {
    pub app_id: AppId,
    pub window_id: Option<WindowId>,
    /// Process id, when the platform reports one
    pub pid: Option<u32>,
}

impl FocusRecord {
    /// Create a record for an application without window or process details
    pub fn new(app_id: impl Into<AppId>) -> Self {
        Self {
            app_id: app_id.into(),
            window_id: None,
            pid: None,
        }
    }

    /// Attach a window id
    pub fn with_window(mut self, window_id: WindowId) -> Self {
        self.window_id = Some(window_id);
        self
    }

    /// Attach a process id
    pub fn with_pid(mut self, pid: u32) -> Self {
        self.pid = Some(pid);
        self
    }
}

impl From<String> for AppId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for FocusRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.app_id)?;
        if let Some(window) = self.window_id {
            write!(f, " (window {})", window)?;
        }
        Ok(())
    }
}

/// A focus change reported by the desktop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusEvent {
    pub record: FocusRecord,
    /// true when the app became active, false when it resigned
    pub became_active: bool,
}

impl FocusEvent {
    pub fn activated(record: FocusRecord) -> Self {
        Self {
            record,
            became_active: true,
        }
    }

    pub fn resigned(record: FocusRecord) -> Self {
        Self {
            record,
            became_active: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_builder() {
        let record = FocusRecord::new("firefox")
            .with_window(WindowId::new(0x3a00007))
            .with_pid(4242);
        assert_eq!(record.app_id.as_str(), "firefox");
        assert_eq!(record.window_id, Some(WindowId::new(0x3a00007)));
        assert_eq!(record.pid, Some(4242));
    }

    #[test]
    fn record_display_includes_window() {
        let record = FocusRecord::new("kitty").with_window(WindowId::new(12));
        assert_eq!(record.to_string(), "kitty (window 12)");
        assert_eq!(FocusRecord::new("kitty").to_string(), "kitty");
    }

    #[test]
    fn event_constructors() {
        let record = FocusRecord::new("code");
        assert!(FocusEvent::activated(record.clone()).became_active);
        assert!(!FocusEvent::resigned(record).became_active);
    }
}
