//! Change tokens for clipboards without an OS change counter

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

use crate::domain::history::ChangeToken;

#[derive(Debug, Default)]
struct Generation {
    fingerprint: Option<u64>,
    token: ChangeToken,
}

/// Derives a change token from clipboard content.
///
/// The token advances every time the observed content differs from the
/// previous observation. Copying identical content twice therefore does
/// not advance it.
#[derive(Debug, Default)]
pub struct FingerprintCounter {
    generation: Mutex<Generation>,
}

impl FingerprintCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current content (`None` for an empty clipboard) and
    /// return the resulting token.
    pub fn observe(&self, content: Option<&[u8]>) -> ChangeToken {
        let fingerprint = content.map(fingerprint);
        let mut generation = self.generation.lock().unwrap_or_else(|e| e.into_inner());
        if generation.fingerprint != fingerprint {
            generation.fingerprint = fingerprint;
            generation.token = generation.token.next();
        }
        generation.token
    }
}

fn fingerprint(content: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_clipboard_keeps_initial_token() {
        let counter = FingerprintCounter::new();
        assert_eq!(counter.observe(None), ChangeToken::default());
        assert_eq!(counter.observe(None), ChangeToken::default());
    }

    #[test]
    fn new_content_advances_token() {
        let counter = FingerprintCounter::new();
        let first = counter.observe(Some(b"one".as_slice()));
        let second = counter.observe(Some(b"two".as_slice()));
        assert_ne!(first, second);
        assert_eq!(second, first.next());
    }

    #[test]
    fn same_content_keeps_token() {
        let counter = FingerprintCounter::new();
        let first = counter.observe(Some(b"same".as_slice()));
        assert_eq!(counter.observe(Some(b"same".as_slice())), first);
    }

    #[test]
    fn clearing_the_clipboard_is_a_change() {
        let counter = FingerprintCounter::new();
        let copied = counter.observe(Some(b"text".as_slice()));
        assert_ne!(counter.observe(None), copied);
    }
}
