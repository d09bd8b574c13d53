//! Line supply from files, bounded by the compile-time file limits

mod processor;

use crate::config::runtime::FileProcessorPreferences;
use std::path::Path;

pub use processor::{
    decode_line, decode_lines, FileMetadata, FileProcessor, FileProcessorError, SourceLines,
};

/// Process a file with default settings
pub fn process_file<P: AsRef<Path>>(file_path: P) -> Result<SourceLines, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

/// Create a file processor from runtime preferences
pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

/// Get the compile-time maximum file size limit
pub fn get_max_file_size() -> u64 {
    FileProcessor::max_file_size()
}
