//! Timing domain module

mod interval;

pub use interval::{
    Interval, DEFAULT_FOCUS_INTERVAL_MS, DEFAULT_PASTE_RETRY_DELAY_MS, DEFAULT_POLL_INTERVAL_MS,
};
