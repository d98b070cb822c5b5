//! Cliptrail - clipboard history daemon
//!
//! Keeps a deduplicated, most-recent-first history of clipboard text,
//! persists it across restarts, and restores entries on request, pasting
//! them back into the application that was focused before the picker.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: History, change tokens, focus records, intervals, config and errors
//! - **Application**: Use cases (history manager, change detector, focus tracker,
//!   paste-back agent) and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (arboard, wl-clipboard, xdotool,
//!   JSON history file, XDG config, notifications)
//! - **CLI**: Command-line interface, daemon runner, IPC and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
