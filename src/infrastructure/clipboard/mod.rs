//! Clipboard infrastructure module
//!
//! Provides cross-platform clipboard support using arboard (primary)
//! or the wl-clipboard tools on Wayland.

mod arboard;
mod fingerprint;
mod wayland;

pub use arboard::ArboardClipboard;
pub use fingerprint::FingerprintCounter;
pub use wayland::WaylandClipboard;

use tracing::debug;

use crate::application::ports::SystemClipboard;

/// Create the clipboard adapter for the current session.
///
/// Wayland sessions use wl-clipboard when it is installed, since arboard
/// cannot read the selection without a focused surface there. Everything
/// else uses arboard.
pub fn create_clipboard() -> Box<dyn SystemClipboard> {
    if cfg!(target_os = "linux") && is_wayland_session() && command_exists("wl-paste") {
        debug!("using wl-clipboard adapter");
        return Box::new(WaylandClipboard::new());
    }
    debug!("using arboard clipboard adapter");
    Box::new(ArboardClipboard::new())
}

fn is_wayland_session() -> bool {
    std::env::var_os("WAYLAND_DISPLAY").is_some()
}

fn command_exists(cmd: &str) -> bool {
    std::process::Command::new("which")
        .arg(cmd)
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
