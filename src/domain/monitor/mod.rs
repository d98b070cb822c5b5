//! Monitoring lifecycle domain module

mod session;

pub use session::{MonitorSession, MonitorState};
