//! Token representation produced by the scanner
//!
//! A token keeps the raw lexeme exactly as written. Which of the value fields
//! carries data is decided by the category; the others stay at their zero or
//! empty defaults.
use crate::utils::{Position, Span};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lexical class of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TokenCategory {
    /// Default state; never produced by a recognizer
    #[default]
    Unknown,
    Identifier,
    Integer,
    Double,
    Delimiter,
    String,
    Char,
}

impl TokenCategory {
    /// Every category a recognizer can produce, in display order
    pub const PRODUCED: [TokenCategory; 6] = [
        TokenCategory::Identifier,
        TokenCategory::Integer,
        TokenCategory::Double,
        TokenCategory::Delimiter,
        TokenCategory::String,
        TokenCategory::Char,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenCategory::Unknown => "unknown",
            TokenCategory::Identifier => "identifier",
            TokenCategory::Integer => "integer",
            TokenCategory::Double => "double",
            TokenCategory::Delimiter => "delimiter",
            TokenCategory::String => "string",
            TokenCategory::Char => "char",
        }
    }

    /// String and Char literals carry decoded contents
    pub fn is_quoted(&self) -> bool {
        matches!(self, TokenCategory::String | TokenCategory::Char)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, TokenCategory::Integer | TokenCategory::Double)
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One classified token
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Token {
    /// Exact source text consumed, boundaries and escape backslashes included
    pub lexeme: String,
    pub category: TokenCategory,
    /// Meaningful only for `Integer`
    pub int_value: i32,
    /// Meaningful only for `Double`
    pub double_value: f64,
    /// Escape-resolved payload; meaningful only for `String` and `Char`
    pub contents: String,
    /// Source line and column of the first character
    pub position: Position,
}

impl Token {
    fn bare(lexeme: String, category: TokenCategory, position: Position) -> Self {
        Self {
            lexeme,
            category,
            position,
            ..Self::default()
        }
    }

    pub fn identifier(lexeme: impl Into<String>, position: Position) -> Self {
        Self::bare(lexeme.into(), TokenCategory::Identifier, position)
    }

    pub fn delimiter(lexeme: impl Into<String>, position: Position) -> Self {
        Self::bare(lexeme.into(), TokenCategory::Delimiter, position)
    }

    pub fn integer(lexeme: impl Into<String>, value: i32, position: Position) -> Self {
        Self {
            int_value: value,
            ..Self::bare(lexeme.into(), TokenCategory::Integer, position)
        }
    }

    pub fn double(lexeme: impl Into<String>, value: f64, position: Position) -> Self {
        Self {
            double_value: value,
            ..Self::bare(lexeme.into(), TokenCategory::Double, position)
        }
    }

    /// Quoted literal of category `String` or `Char`
    pub fn quoted(
        lexeme: impl Into<String>,
        contents: impl Into<String>,
        category: TokenCategory,
        position: Position,
    ) -> Self {
        debug_assert!(category.is_quoted());
        Self {
            contents: contents.into(),
            ..Self::bare(lexeme.into(), category, position)
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.category == TokenCategory::Unknown
    }

    /// Check whether this is the delimiter with the given spelling
    pub fn is_delimiter(&self, spelling: &str) -> bool {
        self.category == TokenCategory::Delimiter && self.lexeme == spelling
    }

    /// Length of the lexeme in characters
    pub fn char_len(&self) -> usize {
        self.lexeme.chars().count()
    }

    pub fn span(&self) -> Span {
        Span::with_len(self.position, self.char_len())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_token_is_unknown() {
        let token = Token::default();
        assert!(token.is_unknown());
        assert!(token.lexeme.is_empty());
        assert_eq!(token.int_value, 0);
        assert_eq!(token.double_value, 0.0);
        assert!(token.contents.is_empty());
    }

    #[test]
    fn only_category_field_carries_data() {
        let int = Token::integer("42", 42, Position::new(1, 1));
        assert_eq!(int.int_value, 42);
        assert_eq!(int.double_value, 0.0);
        assert!(int.contents.is_empty());

        let quoted = Token::quoted("'x'", "x", TokenCategory::Char, Position::new(2, 3));
        assert_eq!(quoted.contents, "x");
        assert_eq!(quoted.int_value, 0);
    }

    #[test]
    fn span_covers_lexeme_characters() {
        let token = Token::delimiter(">>=", Position::new(4, 7));
        let span = token.span();
        assert_eq!(span.start(), Position::new(4, 7));
        assert_eq!(span.end(), Position::new(4, 10));
        assert!(token.is_delimiter(">>="));
        assert!(!token.is_delimiter(">>"));
    }
}
