//! Desktop infrastructure module
//!
//! Window focus queries, activation and process liveness.

mod focus_poller;
mod process;
mod unsupported;
mod xdotool;

pub use focus_poller::FocusPoller;
pub use process::{is_pid_alive, is_process_running};
pub use unsupported::UnsupportedDesktop;
pub use xdotool::XdotoolDesktop;

use tracing::debug;

use crate::application::ports::DesktopControl;

/// Create the desktop adapter for the current session.
///
/// X11 sessions with xdotool installed get full window control; anything
/// else gets [`UnsupportedDesktop`].
pub async fn create_desktop() -> Box<dyn DesktopControl> {
    #[cfg(target_os = "linux")]
    {
        let x11 = std::env::var_os("DISPLAY").is_some()
            && std::env::var_os("WAYLAND_DISPLAY").is_none();
        if x11 && crate::infrastructure::keystroke::is_tool_available("xdotool").await {
            debug!("using xdotool desktop adapter");
            return Box::new(XdotoolDesktop::new());
        }
    }

    debug!("window control unavailable in this session");
    Box::new(UnsupportedDesktop::new())
}
