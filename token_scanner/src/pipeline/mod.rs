//! File to token store, with configuration and error aggregation

mod error;
pub mod output;
mod result;
mod validation;

pub use error::PipelineError;
pub use output::{write_result, OutputFormat};
pub use result::{ScanOutput, ScanResult};
pub use validation::validate_pipeline;

use crate::config::RuntimeConfig;
use crate::file_processor::FileProcessor;
use crate::lexical::Scanner;
use crate::logging;
use std::path::Path;
use std::time::Instant;

/// Load runtime configuration from `path`, or defaults when none is given
pub fn load_config(path: Option<&Path>) -> Result<RuntimeConfig, PipelineError> {
    match path {
        Some(path) => {
            let config = RuntimeConfig::from_file(path).map_err(|e| {
                crate::log_error!(e.error_code(), "Failed to load configuration",
                    "path" => path.display(),
                    "error" => &e);
                e
            })?;
            Ok(config)
        }
        None => Ok(RuntimeConfig::default()),
    }
}

/// Read and scan one file
pub fn scan_file<P: AsRef<Path>>(
    file_path: P,
    config: &RuntimeConfig,
) -> Result<ScanResult, PipelineError> {
    let start_time = Instant::now();
    let file_path = file_path.as_ref();

    logging::with_source_context(file_path.display().to_string(), || {
        crate::log_info!("Scanning file", "file" => file_path.display());

        let processor = FileProcessor::from_preferences(&config.file_processor);
        let mut scanner = Scanner::with_preferences(config.scanner.clone());
        let file_metadata = scanner.cut_file(file_path, &processor)?;

        let metrics = scanner.metrics().clone();
        let result = ScanResult {
            store: scanner.into_store(),
            metrics,
            file_metadata,
            processing_duration: start_time.elapsed(),
        };
        result.log_success();

        Ok(result)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::file_processor::FileProcessorError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_validate_pipeline() {
        assert!(validate_pipeline().is_ok());
    }

    #[test]
    fn test_scan_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prog.c");
        fs::write(&path, "a = b;\n\n'x'\n").unwrap();

        let result = scan_file(&path, &RuntimeConfig::default()).unwrap();
        assert_eq!(result.store.line_count(), 2);
        assert_eq!(result.store.token_count(), 5);
        assert_eq!(result.metrics.lines_ingested, 3);
        assert!(result.summary().contains("Tokens: 5"));
    }

    #[test]
    fn test_scan_file_keeps_lines_after_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.c");
        fs::write(&path, b"s = \"caf\xe9\";\nx = 1;\n").unwrap();

        let result = scan_file(&path, &RuntimeConfig::default()).unwrap();
        assert_eq!(result.store.line_count(), 2);
        assert_eq!(result.store.token_count(), 8);
        assert_eq!(result.file_metadata.lossy_lines, 1);
        let literal = &result.store.lines()[0].tokens()[2];
        assert_eq!(literal.contents, "caf\u{fffd}");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = scan_file(dir.path().join("nope.c"), &RuntimeConfig::default());
        assert_matches!(
            result,
            Err(PipelineError::FileProcessing(FileProcessorError::FileNotFound { .. }))
        );
    }

    #[test]
    fn test_load_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scanner.toml");
        fs::write(&path, "[display]\nbracket_tokens = false\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert!(!config.display.bracket_tokens);

        fs::write(&path, "[display\n").unwrap();
        assert_matches!(load_config(Some(&path)), Err(PipelineError::Config(_)));
    }
}
