//! Monitoring session state machine

use std::fmt;

/// Monitoring states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MonitorState {
    /// Clipboard timer not running
    #[default]
    Idle,
    /// Clipboard timer active
    Monitoring,
}

impl MonitorState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Monitoring => "monitoring",
        }
    }
}

impl fmt::Display for MonitorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Monitoring session entity.
///
/// State machine:
///   IDLE -> MONITORING (start_monitoring)
///   MONITORING -> MONITORING (start_monitoring, no-op)
///   MONITORING -> IDLE (stop_monitoring, shutdown only)
///
/// Transitions never fail; each returns whether the state actually changed
/// so the caller knows whether to spawn or tear down the timer.
#[derive(Debug, Default)]
pub struct MonitorSession {
    state: MonitorState,
}

impl MonitorSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self {
            state: MonitorState::Idle,
        }
    }

    /// Get the current state
    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Check if monitoring is active
    pub fn is_monitoring(&self) -> bool {
        self.state == MonitorState::Monitoring
    }

    /// Transition to MONITORING. Returns false if already monitoring.
    pub fn start_monitoring(&mut self) -> bool {
        if self.is_monitoring() {
            return false;
        }
        self.state = MonitorState::Monitoring;
        true
    }

    /// Transition back to IDLE. Returns false if already idle.
    pub fn stop_monitoring(&mut self) -> bool {
        if !self.is_monitoring() {
            return false;
        }
        self.state = MonitorState::Idle;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle() {
        let session = MonitorSession::new();
        assert_eq!(session.state(), MonitorState::Idle);
        assert!(!session.is_monitoring());
    }

    #[test]
    fn start_from_idle_transitions() {
        let mut session = MonitorSession::new();
        assert!(session.start_monitoring());
        assert!(session.is_monitoring());
    }

    #[test]
    fn start_is_idempotent() {
        let mut session = MonitorSession::new();
        assert!(session.start_monitoring());
        assert!(!session.start_monitoring());
        assert_eq!(session.state(), MonitorState::Monitoring);
    }

    #[test]
    fn stop_returns_to_idle() {
        let mut session = MonitorSession::new();
        session.start_monitoring();
        assert!(session.stop_monitoring());
        assert_eq!(session.state(), MonitorState::Idle);
        assert!(!session.stop_monitoring());
    }

    #[test]
    fn can_restart_after_stop() {
        let mut session = MonitorSession::new();
        session.start_monitoring();
        session.stop_monitoring();
        assert!(session.start_monitoring());
    }

    #[test]
    fn state_display() {
        assert_eq!(MonitorState::Idle.to_string(), "idle");
        assert_eq!(MonitorState::Monitoring.to_string(), "monitoring");
    }
}
