//! Character classification used to pick a recognizer

/// Punctuation handled by the delimiter table
const DELIMITER_CHARS: &str = "!#$%&()*+,-./:;<=>?@[\\]^`{|}~";

pub fn is_white(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

pub fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

pub fn is_delimiter_char(ch: char) -> bool {
    DELIMITER_CHARS.contains(ch)
}

/// Characters that continue an identifier after its first character
pub fn is_identifier_char(ch: char) -> bool {
    ch == '_' || is_letter(ch) || is_digit(ch)
}

/// Which recognizer a leading character dispatches to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    White,
    IdentifierStart,
    Digit,
    DoubleQuote,
    SingleQuote,
    /// Listed punctuation
    Delimiter,
    /// Anything else; still scanned by the delimiter table as a single character
    Stray,
}

/// Classify in dispatch priority order
pub fn classify(ch: char) -> CharClass {
    if is_white(ch) {
        CharClass::White
    } else if ch == '_' || is_letter(ch) {
        CharClass::IdentifierStart
    } else if is_digit(ch) {
        CharClass::Digit
    } else if ch == '"' {
        CharClass::DoubleQuote
    } else if ch == '\'' {
        CharClass::SingleQuote
    } else if is_delimiter_char(ch) {
        CharClass::Delimiter
    } else {
        CharClass::Stray
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_set_is_exact() {
        for ch in [' ', '\t', '\n', '\r'] {
            assert!(is_white(ch));
        }
        assert!(!is_white('\u{0b}'));
        assert!(!is_white('\u{a0}'));
    }

    #[test]
    fn letters_are_ascii_only() {
        assert!(is_letter('a') && is_letter('Z'));
        assert!(!is_letter('é'));
        assert!(!is_letter('_'));
    }

    #[test]
    fn delimiter_set_excludes_quotes_and_underscore() {
        for ch in "!#$%&()*+,-./:;<=>?@[\\]^`{|}~".chars() {
            assert!(is_delimiter_char(ch), "{ch:?} should be a delimiter");
        }
        for ch in ['_', '"', '\'', 'a', '0', ' '] {
            assert!(!is_delimiter_char(ch), "{ch:?} should not be a delimiter");
        }
    }

    #[test]
    fn dispatch_priority() {
        assert_eq!(classify('_'), CharClass::IdentifierStart);
        assert_eq!(classify('q'), CharClass::IdentifierStart);
        assert_eq!(classify('7'), CharClass::Digit);
        assert_eq!(classify('"'), CharClass::DoubleQuote);
        assert_eq!(classify('\''), CharClass::SingleQuote);
        assert_eq!(classify('.'), CharClass::Delimiter);
        assert_eq!(classify('\t'), CharClass::White);
        assert_eq!(classify('é'), CharClass::Stray);
    }
}
