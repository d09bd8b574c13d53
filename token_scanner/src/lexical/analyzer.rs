//! Line splitter and scanner driver
//!
//! The scanner owns a `TokenStore`, feeds it one line at a time and exposes
//! the store's retrieval cursor. Malformed input never fails: unterminated
//! literals and unlisted characters still become tokens and are only noted in
//! the metrics and the debug log.

use super::classifier::{classify, CharClass};
use super::metrics::ScanMetrics;
use super::recognizers::{
    recognize_delimiter, recognize_identifier, recognize_number, recognize_quoted, Recognized,
};
use crate::config::runtime::ScannerPreferences;
use crate::file_processor::{decode_line, FileMetadata, FileProcessor, FileProcessorError};
use crate::logging::codes;
use crate::tokens::{Token, TokenCategory, TokenLine, TokenStore};
use crate::{log_debug, log_error, log_success, log_warning};
use std::borrow::Cow;
use std::io::BufRead;
use std::path::Path;
use std::time::Instant;

/// Errors from the line-supply side of scanning
#[derive(Debug, thiserror::Error)]
pub enum ScannerError {
    #[error("Failed to read line {line}: {source}")]
    LineRead {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    FileProcessing(#[from] FileProcessorError),
}

impl ScannerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ScannerError::LineRead { .. } => codes::lexical::LINE_READ_FAILURE,
            ScannerError::FileProcessing(e) => e.error_code(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Scanner {
    store: TokenStore,
    preferences: ScannerPreferences,
    metrics: ScanMetrics,
    /// Input lines seen since the last clear; numbers the next line
    lines_seen: u32,
}

impl Scanner {
    pub fn new() -> Self {
        Self::with_preferences(ScannerPreferences::default())
    }

    pub fn with_preferences(preferences: ScannerPreferences) -> Self {
        Self {
            store: TokenStore::new(),
            preferences,
            metrics: ScanMetrics::default(),
            lines_seen: 0,
        }
    }

    pub fn preferences(&self) -> &ScannerPreferences {
        &self.preferences
    }

    pub fn metrics(&self) -> &ScanMetrics {
        &self.metrics
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    pub fn into_store(self) -> TokenStore {
        self.store
    }

    // ------------------------------------------------------------------
    // Ingestion
    // ------------------------------------------------------------------

    /// Split one line into tokens and store them. Returns the number of
    /// tokens produced; a line with none is not stored.
    pub fn cut_line(&mut self, line: &str) -> usize {
        self.lines_seen += 1;
        let line_no = self.lines_seen;

        if self.preferences.record_original_lines {
            self.store.record_original(line);
        }

        let chars: Vec<char> = line.chars().collect();
        let mut tokens = Vec::new();
        let mut index = 0;

        while index < chars.len() {
            let recognized = match classify(chars[index]) {
                CharClass::White => {
                    index += 1;
                    continue;
                }
                CharClass::IdentifierStart => recognize_identifier(&chars, index, line_no),
                CharClass::Digit => recognize_number(&chars, index, true, line_no),
                CharClass::DoubleQuote => {
                    self.quoted(&chars, index, TokenCategory::String, line_no)
                }
                CharClass::SingleQuote => {
                    self.quoted(&chars, index, TokenCategory::Char, line_no)
                }
                CharClass::Delimiter => recognize_delimiter(&chars, index, line_no),
                CharClass::Stray => {
                    self.metrics.record_stray(&self.preferences);
                    log_debug!("Unlisted character scanned as delimiter",
                        "line" => line_no,
                        "column" => index + 1,
                        "char" => chars[index].escape_default());
                    recognize_delimiter(&chars, index, line_no)
                }
            };

            index = recognized.end;
            self.metrics.record_token(&recognized.token, &self.preferences);
            tokens.push(recognized.token);
        }

        let count = tokens.len();
        let stored = match TokenLine::new(line_no, tokens) {
            Some(token_line) => {
                self.store.push_line(token_line);
                true
            }
            None => false,
        };
        self.metrics.record_line(stored, &self.preferences);

        if self.preferences.log_each_line {
            log_debug!("Line scanned", "line" => line_no, "tokens" => count);
        }

        count
    }

    fn quoted(
        &mut self,
        chars: &[char],
        index: usize,
        category: TokenCategory,
        line_no: u32,
    ) -> Recognized {
        let (recognized, terminated) = recognize_quoted(chars, index, category, line_no);
        if !terminated {
            self.metrics.record_unterminated(&self.preferences);
            log_debug!("Quoted literal runs to end of line",
                "code" => codes::lexical::UNTERMINATED_LITERAL,
                "line" => line_no,
                "column" => index + 1);
        }
        recognized
    }

    /// Scan every line of a reader. Invalid UTF-8 is replaced rather than
    /// rejected; lines already scanned stay stored when a later read fails.
    pub fn cut_reader<R: BufRead>(&mut self, mut reader: R) -> Result<usize, ScannerError> {
        let start = Instant::now();
        let mut buffer = Vec::new();
        let mut lines = 0;
        let mut lossy_lines = 0;

        loop {
            buffer.clear();
            let read = reader.read_until(b'\n', &mut buffer).map_err(|source| {
                let line = self.lines_seen as usize + 1;
                let error = ScannerError::LineRead { line, source };
                log_error!(error.error_code(), "Line stream failed",
                    "line" => line,
                    "error" => &error);
                error
            })?;
            if read == 0 {
                break;
            }

            let line = decode_line(&buffer);
            if let Cow::Owned(_) = line {
                lossy_lines += 1;
            }
            self.cut_line(&line);
            lines += 1;
        }

        if lossy_lines > 0 {
            log_warning!(code = codes::file_processing::INVALID_ENCODING,
                "Invalid UTF-8 replaced while reading line stream",
                "lines" => lossy_lines);
        }
        self.log_completion(lines, start);
        Ok(lines)
    }

    /// Scan text split on `\n` / `\r\n`
    pub fn cut_str(&mut self, text: &str) -> usize {
        let start = Instant::now();
        let mut lines = 0;
        for line in text.lines() {
            self.cut_line(line);
            lines += 1;
        }
        self.log_completion(lines, start);
        lines
    }

    /// Read a file through the file processor and scan its lines. Returns
    /// the metadata of the file that was read.
    pub fn cut_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        processor: &FileProcessor,
    ) -> Result<FileMetadata, ScannerError> {
        let path = path.as_ref();
        crate::logging::with_source_context(path.display().to_string(), || {
            let source = processor.process_file(path)?;
            let start = Instant::now();
            for line in &source.lines {
                self.cut_line(line);
            }
            self.log_completion(source.lines.len(), start);
            Ok(source.metadata)
        })
    }

    fn log_completion(&self, lines: usize, start: Instant) {
        log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenization complete",
            "lines" => lines,
            "stored_lines" => self.store.line_count(),
            "tokens" => self.store.token_count(),
            "unterminated_literals" => self.metrics.unterminated_literals,
            "duration_ms" => start.elapsed().as_secs_f64() * 1000.0);
    }

    // ------------------------------------------------------------------
    // Retrieval, delegated to the store
    // ------------------------------------------------------------------

    pub fn next_token(&mut self) -> Option<Token> {
        self.store.next_token()
    }

    pub fn next_nth(&mut self, times: i32) -> Option<Token> {
        self.store.next_nth(times)
    }

    pub fn peek(&self) -> Option<&Token> {
        self.store.peek()
    }

    pub fn get_token(&mut self, token: &mut Token) -> bool {
        self.store.get_token(token)
    }

    pub fn get_tokens(&mut self, token: &mut Token, times: i32) -> bool {
        self.store.get_tokens(token, times)
    }

    pub fn peek_token(&self, token: &mut Token) -> bool {
        self.store.peek_token(token)
    }

    pub fn back_to_beginning(&mut self) {
        self.store.back_to_beginning();
    }

    /// Drop all content and start line numbering over
    pub fn clear(&mut self) {
        self.store.clear();
        self.metrics = ScanMetrics::default();
        self.lines_seen = 0;
    }
}
