//! Two-level token storage with a retrieval cursor
//!
//! Lines are appended whole and never edited afterwards. The cursor names the
//! next token to hand out; `line == line_count()` means the store is
//! exhausted, and then `token` is always 0.
use super::token::Token;
use crate::log_debug;
use serde::Serialize;

/// Tokens scanned from one non-empty input line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenLine {
    source_line: u32,
    tokens: Box<[Token]>,
}

impl TokenLine {
    /// Returns `None` when `tokens` is empty; empty lines are never stored
    pub fn new(source_line: u32, tokens: Vec<Token>) -> Option<Self> {
        if tokens.is_empty() {
            return None;
        }
        Some(Self {
            source_line,
            tokens: tokens.into_boxed_slice(),
        })
    }

    /// 1-based number of the input line these tokens came from
    pub fn source_line(&self) -> u32 {
        self.source_line
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false for a stored line
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Retrieval cursor: index of the stored line and of the token within it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Cursor {
    pub line: usize,
    pub token: usize,
}

/// Owns original input lines, stored token lines and the cursor
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    original_lines: Vec<String>,
    lines: Vec<TokenLine>,
    cursor: Cursor,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep an input line verbatim for replay
    pub fn record_original(&mut self, line: impl Into<String>) {
        self.original_lines.push(line.into());
    }

    /// Append a scanned line
    pub fn push_line(&mut self, line: TokenLine) {
        self.lines.push(line);
    }

    // ------------------------------------------------------------------
    // Retrieval
    // ------------------------------------------------------------------

    /// Token at the cursor without advancing
    pub fn peek(&self) -> Option<&Token> {
        self.lines
            .get(self.cursor.line)
            .and_then(|line| line.tokens.get(self.cursor.token))
    }

    /// Take the token at the cursor and advance, rolling over to the next line
    pub fn next_token(&mut self) -> Option<Token> {
        let line = self.lines.get(self.cursor.line)?;
        let token = line.tokens.get(self.cursor.token)?.clone();

        self.cursor.token += 1;
        if self.cursor.token >= line.len() {
            self.cursor.line += 1;
            self.cursor.token = 0;
        }

        Some(token)
    }

    /// Call `next_token` `times` times and return the last token taken.
    ///
    /// Fails without touching the cursor when `times <= 0`. Running out part
    /// way through fails too, but the tokens already taken stay consumed.
    pub fn next_nth(&mut self, times: i32) -> Option<Token> {
        if times <= 0 {
            return None;
        }

        let mut last = None;
        for _ in 0..times {
            last = Some(self.next_token()?);
        }
        last
    }

    /// Out-parameter form of `next_token`; `token` becomes the Unknown token on failure
    pub fn get_token(&mut self, token: &mut Token) -> bool {
        Self::fill(token, self.next_token())
    }

    /// Out-parameter form of `next_nth`
    pub fn get_tokens(&mut self, token: &mut Token, times: i32) -> bool {
        Self::fill(token, self.next_nth(times))
    }

    /// Out-parameter form of `peek`
    pub fn peek_token(&self, token: &mut Token) -> bool {
        Self::fill(token, self.peek().cloned())
    }

    fn fill(slot: &mut Token, found: Option<Token>) -> bool {
        let ok = found.is_some();
        *slot = found.unwrap_or_default();
        ok
    }

    /// Rewind the cursor to the first token; content is untouched
    pub fn back_to_beginning(&mut self) {
        self.cursor = Cursor::default();
        log_debug!("Token cursor rewound", "lines" => self.lines.len());
    }

    /// Drop every original line and stored token line
    pub fn clear(&mut self) {
        let dropped = self.lines.len();
        self.original_lines.clear();
        self.lines.clear();
        self.cursor = Cursor::default();
        log_debug!("Token store cleared", "dropped_lines" => dropped);
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn lines(&self) -> &[TokenLine] {
        &self.lines
    }

    pub fn original_lines(&self) -> &[String] {
        &self.original_lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn token_count(&self) -> usize {
        self.lines.iter().map(TokenLine::len).sum()
    }

    /// Tokens still available to `next_token`
    pub fn remaining(&self) -> usize {
        let Some(current) = self.lines.get(self.cursor.line) else {
            return 0;
        };
        let rest: usize = self.lines[self.cursor.line + 1..]
            .iter()
            .map(TokenLine::len)
            .sum();
        current.len() - self.cursor.token + rest
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor.line >= self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.original_lines.is_empty()
    }

    /// Every stored token in order, independent of the cursor
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.lines.iter().flat_map(|line| line.tokens.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    fn ident(name: &str, line: u32) -> Token {
        Token::identifier(name, Position::new(line, 1))
    }

    fn store_with(lines: &[&[&str]]) -> TokenStore {
        let mut store = TokenStore::new();
        for (i, names) in lines.iter().enumerate() {
            let line_no = i as u32 + 1;
            let tokens = names.iter().map(|n| ident(n, line_no)).collect();
            if let Some(line) = TokenLine::new(line_no, tokens) {
                store.push_line(line);
            }
        }
        store
    }

    #[test]
    fn empty_token_line_is_rejected() {
        assert!(TokenLine::new(1, Vec::new()).is_none());
    }

    #[test]
    fn next_rolls_over_lines_then_fails() {
        let mut store = store_with(&[&["a", "b"], &["c"]]);

        let lexemes: Vec<String> = std::iter::from_fn(|| store.next_token())
            .map(|t| t.lexeme)
            .collect();
        assert_eq!(lexemes, ["a", "b", "c"]);

        assert!(store.is_exhausted());
        assert_eq!(store.cursor(), Cursor { line: 2, token: 0 });
        assert!(store.next_token().is_none());
        assert_eq!(store.cursor(), Cursor { line: 2, token: 0 });
    }

    #[test]
    fn peek_does_not_advance() {
        let mut store = store_with(&[&["a", "b"]]);

        let peeked = store.peek().cloned();
        let taken = store.next_token();
        assert_eq!(peeked, taken);
        assert_eq!(store.cursor(), Cursor { line: 0, token: 1 });
    }

    #[test]
    fn next_nth_keeps_partial_progress() {
        let mut store = store_with(&[&["a", "b", "c"], &["d"]]);
        store.next_token();
        store.next_token();
        assert_eq!(store.remaining(), 2);

        assert!(store.next_nth(3).is_none());
        assert!(store.is_exhausted());
        assert_eq!(store.remaining(), 0);
    }

    #[test]
    fn next_nth_rejects_non_positive_counts() {
        let mut store = store_with(&[&["a"]]);
        assert!(store.next_nth(0).is_none());
        assert!(store.next_nth(-2).is_none());
        assert_eq!(store.cursor(), Cursor::default());
        assert_eq!(store.next_nth(1).map(|t| t.lexeme), Some("a".to_string()));
    }

    #[test]
    fn out_parameter_api_resets_token_on_failure() {
        let mut store = store_with(&[&["only"]]);
        let mut token = Token::default();

        assert!(store.peek_token(&mut token));
        assert_eq!(token.lexeme, "only");
        assert!(store.get_token(&mut token));
        assert_eq!(token.lexeme, "only");

        assert!(!store.get_token(&mut token));
        assert!(token.is_unknown());

        token = ident("stale", 1);
        assert!(!store.peek_token(&mut token));
        assert!(token.is_unknown());
    }

    #[test]
    fn back_to_beginning_keeps_content() {
        let mut store = store_with(&[&["a"], &["b"]]);
        store.next_token();
        store.next_token();
        store.back_to_beginning();

        assert_eq!(store.next_token().map(|t| t.lexeme), Some("a".to_string()));
        assert_eq!(store.line_count(), 2);
    }

    #[test]
    fn clear_empties_everything() {
        let mut store = store_with(&[&["a"]]);
        store.record_original("a");
        store.clear();

        assert!(store.is_empty());
        assert!(store.next_token().is_none());
        assert!(store.peek().is_none());
        assert_eq!(store.token_count(), 0);
    }
}
