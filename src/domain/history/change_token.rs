//! Clipboard change token value object

use std::fmt;

/// Opaque generation counter reported by the clipboard.
///
/// The value itself carries no meaning; two tokens are only ever compared
/// for equality to decide whether the clipboard changed in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ChangeToken(u64);

impl ChangeToken {
    /// Wrap a raw generation value
    pub const fn new(generation: u64) -> Self {
        Self(generation)
    }

    /// Raw generation value
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// The token following this one
    pub const fn next(&self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl From<u64> for ChangeToken {
    fn from(generation: u64) -> Self {
        Self(generation)
    }
}

impl fmt::Display for ChangeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
