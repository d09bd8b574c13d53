//! Lexical scanning: character classes, recognizers and the line splitter

pub mod analyzer;
pub mod classifier;
pub mod metrics;
pub mod recognizers;

use crate::config::runtime::ScannerPreferences;
use crate::tokens::TokenStore;

pub use analyzer::{Scanner, ScannerError};
pub use metrics::ScanMetrics;

/// Scan a block of text with default preferences
pub fn scan_str(text: &str) -> TokenStore {
    let mut scanner = Scanner::new();
    scanner.cut_str(text);
    scanner.into_store()
}

pub fn create_scanner_with_preferences(preferences: ScannerPreferences) -> Scanner {
    Scanner::with_preferences(preferences)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_str_returns_store_at_first_token() {
        let mut store = scan_str("a = 1\n\nb");
        assert_eq!(store.line_count(), 2);
        assert_eq!(store.next_token().map(|t| t.lexeme), Some("a".to_string()));
    }
}
