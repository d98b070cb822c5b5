//! Paste tool selection

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use std::str::FromStr;

use thiserror::Error;
use tokio::process::Command;

use crate::application::ports::{KeystrokeError, PasteKeystroke};

use super::enigo::EnigoKeystroke;
use super::wtype::WtypeKeystroke;
use super::xdotool::XdotoolKeystroke;
use super::ydotool::YdotoolKeystroke;

/// A program or library that can deliver the paste shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteTool {
    Enigo,
    Ydotool,
    Xdotool,
    Wtype,
}

impl PasteTool {
    /// Tools selectable on this platform
    #[cfg(target_os = "linux")]
    const SELECTABLE: &'static [PasteTool] = &[
        PasteTool::Enigo,
        PasteTool::Ydotool,
        PasteTool::Xdotool,
        PasteTool::Wtype,
    ];
    #[cfg(not(target_os = "linux"))]
    const SELECTABLE: &'static [PasteTool] = &[PasteTool::Enigo];

    pub fn name(self) -> &'static str {
        match self {
            PasteTool::Enigo => "enigo",
            PasteTool::Ydotool => "ydotool",
            PasteTool::Xdotool => "xdotool",
            PasteTool::Wtype => "wtype",
        }
    }

    /// Whether the tool can be used right now. ydotool also needs its daemon.
    async fn is_usable(self) -> bool {
        match self {
            PasteTool::Enigo => true,
            PasteTool::Ydotool => {
                ydotool_socket().is_some() && is_tool_available("ydotool").await
            }
            PasteTool::Xdotool | PasteTool::Wtype => is_tool_available(self.name()).await,
        }
    }

    fn adapter(self) -> Box<dyn PasteKeystroke> {
        match self {
            PasteTool::Enigo => Box::new(EnigoKeystroke::new()),
            PasteTool::Ydotool => Box::new(YdotoolKeystroke::new()),
            PasteTool::Xdotool => Box::new(XdotoolKeystroke::new()),
            PasteTool::Wtype => Box::new(WtypeKeystroke::new()),
        }
    }
}

impl fmt::Display for PasteTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The `linux.keystroke_tool` setting: a fixed tool or the best one installed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteToolChoice {
    Auto,
    Fixed(PasteTool),
}

impl Default for PasteToolChoice {
    fn default() -> Self {
        PasteToolChoice::Fixed(PasteTool::Enigo)
    }
}

impl fmt::Display for PasteToolChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasteToolChoice::Auto => f.write_str("auto"),
            PasteToolChoice::Fixed(tool) => f.write_str(tool.name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid keystroke tool '{0}'. Valid options: {choices}", choices = valid_choices())]
pub struct UnknownPasteTool(pub String);

fn valid_choices() -> String {
    std::iter::once("auto")
        .chain(PasteTool::SELECTABLE.iter().map(|tool| tool.name()))
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for PasteToolChoice {
    type Err = UnknownPasteTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted == "auto" {
            return Ok(PasteToolChoice::Auto);
        }
        PasteTool::SELECTABLE
            .iter()
            .find(|tool| tool.name() == wanted)
            .map(|&tool| PasteToolChoice::Fixed(tool))
            .ok_or_else(|| UnknownPasteTool(s.to_string()))
    }
}

/// Check if a tool binary is on `PATH` using `which`
pub async fn is_tool_available(tool: &str) -> bool {
    Command::new("which")
        .arg(tool)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Location of a running ydotoold socket, if any
fn ydotool_socket() -> Option<PathBuf> {
    let runtime =
        env::var_os("XDG_RUNTIME_DIR").map(|dir| PathBuf::from(dir).join(".ydotool_socket"));
    env::var_os("YDOTOOL_SOCKET")
        .map(PathBuf::from)
        .into_iter()
        .chain(runtime)
        .chain(Some(PathBuf::from("/tmp/.ydotool_socket")))
        .find(|path| path.exists())
}

/// Pick the best installed tool for this session.
///
/// X11 prefers xdotool since it can address the target window. Wayland
/// tries ydotool then wtype. Everything falls back to enigo.
async fn detect() -> PasteTool {
    if cfg!(not(target_os = "linux")) {
        return PasteTool::Enigo;
    }
    let candidates: &[PasteTool] = if env::var_os("WAYLAND_DISPLAY").is_some() {
        &[PasteTool::Ydotool, PasteTool::Wtype]
    } else {
        &[PasteTool::Xdotool]
    };
    for &tool in candidates {
        if tool.is_usable().await {
            return tool;
        }
    }
    PasteTool::Enigo
}

/// Create the paste keystroke adapter for `choice`, returning the tool used
pub async fn create_keystroke(
    choice: PasteToolChoice,
) -> Result<(Box<dyn PasteKeystroke>, PasteTool), KeystrokeError> {
    let tool = match choice {
        PasteToolChoice::Auto => detect().await,
        PasteToolChoice::Fixed(tool) => {
            if !tool.is_usable().await {
                return Err(match tool {
                    PasteTool::Ydotool => KeystrokeError::YdotoolNotAvailable,
                    _ => KeystrokeError::ToolNotFound(tool.to_string()),
                });
            }
            tool
        }
    };
    Ok((tool.adapter(), tool))
}
