use crate::config::ConfigError;
use crate::file_processor::FileProcessorError;
use crate::lexical::ScannerError;

/// Errors from loading configuration, reading input or scanning it
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration failed: {0}")]
    Config(#[from] ConfigError),

    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Scanning failed: {0}")]
    Scanning(#[source] ScannerError),

    #[error("Output failed: {0}")]
    Output(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ScannerError> for PipelineError {
    fn from(error: ScannerError) -> Self {
        match error {
            ScannerError::FileProcessing(e) => PipelineError::FileProcessing(e),
            other => PipelineError::Scanning(other),
        }
    }
}

impl PipelineError {
    pub fn error_code(&self) -> crate::logging::Code {
        use crate::logging::codes;
        match self {
            PipelineError::Config(e) => e.error_code(),
            PipelineError::FileProcessing(e) => e.error_code(),
            PipelineError::Scanning(e) => e.error_code(),
            PipelineError::Output(_) => codes::file_processing::IO_ERROR,
            PipelineError::Serialization(_) => codes::system::INTERNAL_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scanner_file_errors_keep_their_code() {
        let inner = FileProcessorError::FileNotFound {
            path: "x.c".to_string(),
        };
        let error = PipelineError::from(ScannerError::from(inner));
        assert!(matches!(error, PipelineError::FileProcessing(_)));
        assert_eq!(error.error_code().as_str(), "E005");
        assert!(error.to_string().contains("x.c"));
    }
}
