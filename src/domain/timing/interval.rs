//! Interval value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::IntervalParseError;

/// Default clipboard check interval (1 second)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Default delay between paste-back attempts (500 ms)
pub const DEFAULT_PASTE_RETRY_DELAY_MS: u64 = 500;

/// Default focus sampling interval (250 ms)
pub const DEFAULT_FOCUS_INTERVAL_MS: u64 = 250;

/// Value object representing a non-zero time interval.
/// Immutable and validated on parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Interval {
    milliseconds: u64,
}

impl Interval {
    /// Create an Interval from milliseconds
    pub const fn from_millis(ms: u64) -> Self {
        Self { milliseconds: ms }
    }

    /// Create an Interval from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            milliseconds: secs * 1000,
        }
    }

    /// Default clipboard poll interval
    pub const fn default_poll() -> Self {
        Self::from_millis(DEFAULT_POLL_INTERVAL_MS)
    }

    /// Default delay between paste-back attempts
    pub const fn default_paste_retry_delay() -> Self {
        Self::from_millis(DEFAULT_PASTE_RETRY_DELAY_MS)
    }

    /// Default focus sampling interval
    pub const fn default_focus() -> Self {
        Self::from_millis(DEFAULT_FOCUS_INTERVAL_MS)
    }

    /// Get interval in milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }
}

impl FromStr for Interval {
    type Err = IntervalParseError;

    /// Parse an interval string.
    /// Supported formats: "500ms", "1s", "2m", "1m30s"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        let err = || IntervalParseError {
            input: s.to_string(),
        };

        let mut total_ms: u64 = 0;
        let mut current_num = String::new();
        let mut found_any = false;
        let mut chars = input.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch.is_ascii_digit() {
                current_num.push(ch);
                continue;
            }
            if current_num.is_empty() {
                return Err(err());
            }

            let value: u64 = current_num.parse().map_err(|_| err())?;
            let unit_ms = match ch {
                'm' if chars.peek() == Some(&'s') => {
                    chars.next();
                    1
                }
                'm' => 60_000,
                's' => 1000,
                _ => return Err(err()),
            };

            total_ms = value
                .checked_mul(unit_ms)
                .and_then(|ms| total_ms.checked_add(ms))
                .ok_or_else(err)?;
            current_num.clear();
            found_any = true;
        }

        // Trailing digits without a unit
        if !current_num.is_empty() || !found_any || total_ms == 0 {
            return Err(err());
        }

        Ok(Self {
            milliseconds: total_ms,
        })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.milliseconds % 1000;
        let total_secs = self.milliseconds / 1000;
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;

        if ms != 0 {
            return write!(f, "{}ms", self.milliseconds);
        }

        if minutes == 0 {
            write!(f, "{}s", seconds)
        } else if seconds == 0 {
            write!(f, "{}m", minutes)
        } else {
            write!(f, "{}m{}s", minutes, seconds)
        }
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::default_poll()
    }
}
