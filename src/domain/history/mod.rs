//! Clipboard history domain module

mod change_token;
mod recent;

pub use change_token::ChangeToken;
pub use recent::{History, InsertOutcome, MAX_HISTORY};
