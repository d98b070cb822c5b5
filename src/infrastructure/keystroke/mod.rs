//! Keystroke infrastructure module
//!
//! Sends the paste shortcut using enigo (default) or platform-specific
//! tools on Linux.

mod command;
mod enigo;
mod factory;
mod wtype;
mod xdotool;
mod ydotool;

pub use enigo::EnigoKeystroke;
pub use factory::{
    create_keystroke, is_tool_available, PasteTool, PasteToolChoice, UnknownPasteTool,
};
pub use wtype::WtypeKeystroke;
pub use xdotool::XdotoolKeystroke;
pub use ydotool::YdotoolKeystroke;
