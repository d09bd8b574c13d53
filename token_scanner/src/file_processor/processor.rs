//! File processor: reads a source file into lines under compile-time limits

use crate::config::compile_time::file_processing::{
    MAX_FILE_SIZE, MAX_LINE_COUNT, MAX_LINE_LENGTH,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success, log_warning};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// File processor specific errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("File is empty: {path}")]
    EmptyFile { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },

    #[error("Line {line} is {length} characters long (max: {max_length})")]
    LineTooLong {
        line: usize,
        length: usize,
        max_length: usize,
    },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::EmptyFile { .. } => codes::file_processing::EMPTY_FILE,
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
            FileProcessorError::TooManyLines { .. } => codes::file_processing::TOO_MANY_LINES,
            FileProcessorError::LineTooLong { .. } => codes::file_processing::LINE_TOO_LONG,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    fn from_io(path: &Path, e: &std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => FileProcessorError::FileNotFound {
                path: path.display().to_string(),
            },
            std::io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                path: path.display().to_string(),
            },
            std::io::ErrorKind::InvalidData => FileProcessorError::InvalidEncoding {
                path: path.display().to_string(),
            },
            _ => FileProcessorError::IoError {
                message: format!("'{}': {}", path.display(), e),
            },
        }
    }
}

/// File metadata collected during processing
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Number of lines read
    pub line_count: usize,
    /// Lines where invalid UTF-8 was replaced
    pub lossy_lines: usize,
    pub modified: Option<std::time::SystemTime>,
}

impl FileMetadata {
    /// Get file size in human-readable format
    pub fn human_readable_size(&self) -> String {
        human_readable_size(self.size)
    }
}

fn human_readable_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

/// Decode one raw line, dropping a trailing `\n` or `\r\n`. Bytes that are
/// not UTF-8 become U+FFFD.
pub fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let raw = match raw.strip_suffix(b"\n") {
        Some(body) => body.strip_suffix(b"\r").unwrap_or(body),
        None => raw,
    };
    String::from_utf8_lossy(raw)
}

/// Split file bytes into decoded lines, the same way `str::lines` splits text.
/// Returns the lines and how many of them held invalid UTF-8.
pub fn decode_lines(bytes: &[u8]) -> (Vec<String>, usize) {
    let mut lossy = 0;
    let lines = bytes
        .split_inclusive(|b| *b == b'\n')
        .map(|piece| {
            let line = decode_line(piece);
            if let Cow::Owned(_) = line {
                lossy += 1;
            }
            line.into_owned()
        })
        .collect();
    (lines, lossy)
}

/// Lines of a file ready to feed the scanner
#[derive(Debug, Clone)]
pub struct SourceLines {
    /// Lines without their `\n` / `\r\n` terminators
    pub lines: Vec<String>,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl SourceLines {
    pub fn char_count(&self) -> usize {
        self.lines.iter().map(|line| line.chars().count()).sum()
    }

    /// True when every line is blank
    pub fn is_effectively_empty(&self) -> bool {
        self.lines.iter().all(|line| line.trim().is_empty())
    }
}

/// Reads files into lines; size limits are compile-time, the rest runtime preferences
#[derive(Debug, Clone)]
pub struct FileProcessor {
    pub enable_performance_logging: bool,
    pub allow_empty_files: bool,
    pub strict_encoding: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            enable_performance_logging: true,
            allow_empty_files: true,
            strict_encoding: false,
        }
    }

    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            enable_performance_logging: prefs.enable_performance_logging,
            allow_empty_files: prefs.allow_empty_files,
            strict_encoding: prefs.strict_encoding,
        }
    }

    pub fn with_performance_logging(mut self, enabled: bool) -> Self {
        self.enable_performance_logging = enabled;
        self
    }

    pub fn with_empty_files_allowed(mut self, allowed: bool) -> Self {
        self.allow_empty_files = allowed;
        self
    }

    pub fn with_strict_encoding(mut self, strict: bool) -> Self {
        self.strict_encoding = strict;
        self
    }

    /// Get the compile-time maximum file size
    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    /// Read a file and split it into lines
    pub fn process_file<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> Result<SourceLines, FileProcessorError> {
        let start_time = Instant::now();
        let file_path = file_path.as_ref();
        let display_path = file_path.display().to_string();

        log_debug!("Starting file processing", "file" => display_path);

        let path = self.validate_path(file_path)?;
        let mut metadata = self.get_metadata(&path)?;
        self.validate_size(&metadata)?;

        let bytes = fs::read(&path).map_err(|e| {
            let error = FileProcessorError::from_io(&path, &e);
            log_error!(error.error_code(), "Failed to read file",
                "file" => display_path,
                "io_error" => e);
            error
        })?;

        if self.strict_encoding {
            if let Err(e) = std::str::from_utf8(&bytes) {
                let error = FileProcessorError::InvalidEncoding {
                    path: display_path.clone(),
                };
                log_error!(error.error_code(), "File is not valid UTF-8",
                    "file" => display_path,
                    "byte_offset" => e.valid_up_to());
                return Err(error);
            }
        }

        let (lines, lossy_lines) = decode_lines(&bytes);
        if lossy_lines > 0 {
            log_warning!(code = codes::file_processing::INVALID_ENCODING,
                "Invalid UTF-8 replaced while reading file",
                "file" => display_path,
                "lines" => lossy_lines);
        }

        Self::validate_lines(&lines, &display_path)?;
        metadata.line_count = lines.len();
        metadata.lossy_lines = lossy_lines;

        let result = SourceLines {
            lines,
            metadata,
            processing_duration: start_time.elapsed(),
        };
        self.log_processing_success(&result, &display_path);

        Ok(result)
    }

    fn validate_path(&self, file_path: &Path) -> Result<PathBuf, FileProcessorError> {
        if file_path.as_os_str().is_empty() {
            let error = FileProcessorError::InvalidPath {
                path: String::new(),
            };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        if !file_path.exists() {
            let error = FileProcessorError::FileNotFound {
                path: file_path.display().to_string(),
            };
            log_error!(error.error_code(), "File not found", "path" => file_path.display());
            return Err(error);
        }

        if !file_path.is_file() {
            let error = FileProcessorError::InvalidPath {
                path: file_path.display().to_string(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => file_path.display());
            return Err(error);
        }

        file_path.canonicalize().map_err(|e| {
            let error = FileProcessorError::from_io(file_path, &e);
            log_error!(error.error_code(), "Failed to canonicalize path",
                "path" => file_path.display(),
                "io_error" => e);
            error
        })
    }

    fn get_metadata(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| {
            let error = FileProcessorError::from_io(path, &e);
            log_error!(error.error_code(), "Failed to read file metadata",
                "path" => path.display(),
                "io_error" => e);
            error
        })?;

        Ok(FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            line_count: 0,
            lossy_lines: 0,
            modified: metadata.modified().ok(),
        })
    }

    fn validate_size(&self, metadata: &FileMetadata) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds compile-time maximum size limit",
                "file" => metadata.path.display(),
                "size_human" => metadata.human_readable_size(),
                "limit_human" => human_readable_size(MAX_FILE_SIZE));
            return Err(error);
        }

        if metadata.size == 0 && !self.allow_empty_files {
            let error = FileProcessorError::EmptyFile {
                path: metadata.path.display().to_string(),
            };
            log_error!(error.error_code(), "File is empty", "file" => metadata.path.display());
            return Err(error);
        }

        Ok(())
    }

    fn validate_lines(lines: &[String], display_path: &str) -> Result<(), FileProcessorError> {
        if lines.len() > MAX_LINE_COUNT {
            let error = FileProcessorError::TooManyLines {
                lines: lines.len(),
                max_lines: MAX_LINE_COUNT,
            };
            log_error!(error.error_code(), "File exceeds maximum line count",
                "file" => display_path,
                "lines" => lines.len(),
                "max_lines" => MAX_LINE_COUNT);
            return Err(error);
        }

        for (index, line) in lines.iter().enumerate() {
            let length = line.chars().count();
            if length > MAX_LINE_LENGTH {
                let error = FileProcessorError::LineTooLong {
                    line: index + 1,
                    length,
                    max_length: MAX_LINE_LENGTH,
                };
                log_error!(error.error_code(), "Line exceeds maximum length",
                    "file" => display_path,
                    "line" => index + 1,
                    "length" => length);
                return Err(error);
            }
        }

        Ok(())
    }

    fn log_processing_success(&self, result: &SourceLines, display_path: &str) {
        if self.enable_performance_logging {
            crate::log_performance!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully with performance metrics",
                duration = result.processing_duration,
                "file" => display_path,
                "size_human" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "chars" => result.char_count()
            );
        } else {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully",
                "file" => display_path,
                "lines" => result.metadata.line_count
            );
        }
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_process_valid_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("input.c");
        fs::write(&file_path, "int x = 1;\r\n\nx += 2;\n").unwrap();

        let result = FileProcessor::new().process_file(&file_path).unwrap();

        assert_eq!(result.lines, ["int x = 1;", "", "x += 2;"]);
        assert_eq!(result.metadata.line_count, 3);
        assert!(!result.is_effectively_empty());
        assert_eq!(result.char_count(), 17);
    }

    #[test]
    fn test_file_not_found() {
        let dir = tempdir().unwrap();
        let result = FileProcessor::new().process_file(dir.path().join("missing.c"));
        assert_matches!(result, Err(FileProcessorError::FileNotFound { .. }));
    }

    #[test]
    fn test_directory_is_invalid_path() {
        let dir = tempdir().unwrap();
        let result = FileProcessor::new().process_file(dir.path());
        assert_matches!(result, Err(FileProcessorError::InvalidPath { .. }));
    }

    #[test]
    fn test_empty_file_respects_preference() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("empty.c");
        fs::write(&file_path, "").unwrap();

        let allowed = FileProcessor::new().process_file(&file_path).unwrap();
        assert!(allowed.lines.is_empty());

        let rejected = FileProcessor::new()
            .with_empty_files_allowed(false)
            .process_file(&file_path);
        assert_matches!(rejected, Err(FileProcessorError::EmptyFile { .. }));
    }

    #[test]
    fn test_latin1_line_is_decoded_lossily() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("latin1.c");
        fs::write(&file_path, b"s = \"caf\xe9\";\nx = 1;\n").unwrap();

        let result = FileProcessor::new().process_file(&file_path).unwrap();
        assert_eq!(result.lines, ["s = \"caf\u{fffd}\";", "x = 1;"]);
        assert_eq!(result.metadata.lossy_lines, 1);
    }

    #[test]
    fn test_strict_encoding_rejects_invalid_utf8() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("binary.c");
        fs::write(&file_path, [0x66u8, 0xff, 0xfe, 0x0a]).unwrap();

        let result = FileProcessor::new()
            .with_strict_encoding(true)
            .process_file(&file_path);
        assert_matches!(result, Err(FileProcessorError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_decode_lines_matches_str_lines() {
        for text in ["", "a", "a\n", "a\n\n", "\n", "a\r\nb", "a\rb\r\n"] {
            let expected: Vec<&str> = text.lines().collect();
            let (lines, lossy) = decode_lines(text.as_bytes());
            assert_eq!(lines, expected, "input {:?}", text);
            assert_eq!(lossy, 0);
        }
    }

    #[test]
    fn test_line_too_long() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("wide.c");
        let content = format!("ok\n{}\n", "a".repeat(MAX_LINE_LENGTH + 1));
        fs::write(&file_path, content).unwrap();

        let result = FileProcessor::new().process_file(&file_path);
        assert_matches!(
            result,
            Err(FileProcessorError::LineTooLong { line: 2, max_length, .. })
                if max_length == MAX_LINE_LENGTH
        );
    }

    #[test]
    fn test_error_methods() {
        let error = FileProcessorError::FileNotFound {
            path: "input.c".to_string(),
        };

        assert_eq!(error.error_code().as_str(), "E005");
        assert_eq!(error.category(), "FileProcessing");
        assert_eq!(error.severity(), "Medium");
        assert!(!error.is_recoverable());
        assert!(error.requires_halt());
    }

    #[test]
    fn test_human_readable_size() {
        assert_eq!(human_readable_size(512), "512 B");
        assert_eq!(human_readable_size(2048), "2.00 KB");
    }

    #[test]
    fn test_from_preferences() {
        let prefs = FileProcessorPreferences {
            enable_performance_logging: false,
            allow_empty_files: false,
            strict_encoding: true,
        };

        let processor = FileProcessor::from_preferences(&prefs);
        assert!(!processor.enable_performance_logging);
        assert!(!processor.allow_empty_files);
        assert!(processor.strict_encoding);
    }
}
