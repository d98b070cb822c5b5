//! CLI presenter for output formatting

use colored::*;

/// Longest preview shown per history entry, in characters
const PREVIEW_CHARS: usize = 72;

/// Presenter for CLI output formatting.
///
/// Status goes to stderr, data to stdout.
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print daemon status
    pub fn daemon_status(&self, state: &str) {
        eprintln!("{} Daemon: {}", "●".cyan(), state);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print one history entry as `index  preview`
    pub fn history_entry(&self, index: usize, text: &str) {
        println!("{:>3}  {}", index.to_string().cyan(), format_preview(text));
    }

    /// Print a whole history listing
    pub fn history(&self, entries: &[String]) {
        if entries.is_empty() {
            self.info("History is empty");
            return;
        }
        for (index, text) in entries.iter().enumerate() {
            self.history_entry(index, text);
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-line preview of a clipboard entry.
///
/// Line breaks and tabs are shown as `⏎` and `→`; long entries are cut
/// and end with `…`.
pub fn format_preview(text: &str) -> String {
    let mut preview = String::new();
    for (count, ch) in text.chars().enumerate() {
        if count == PREVIEW_CHARS {
            preview.push('…');
            return preview;
        }
        match ch {
            '\n' => preview.push('⏎'),
            '\r' => {}
            '\t' => preview.push('→'),
            c => preview.push(c),
        }
    }
    if preview.is_empty() {
        preview.push_str("(empty)");
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_keeps_short_text() {
        assert_eq!(format_preview("hello"), "hello");
    }

    #[test]
    fn preview_flattens_line_breaks() {
        assert_eq!(format_preview("a\r\nb\tc"), "a⏎b→c");
    }

    #[test]
    fn preview_truncates_long_text() {
        let long = "x".repeat(200);
        let preview = format_preview(&long);
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 1);
        assert!(preview.ends_with('…'));
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        let text = "é".repeat(PREVIEW_CHARS);
        assert_eq!(format_preview(&text), text);
    }

    #[test]
    fn preview_marks_empty_entry() {
        assert_eq!(format_preview(""), "(empty)");
    }
}
