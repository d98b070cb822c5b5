//! Focus tracking domain module

mod record;

pub use record::{AppId, FocusEvent, FocusRecord, WindowId};
