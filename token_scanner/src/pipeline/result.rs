use crate::file_processor::FileMetadata;
use crate::lexical::ScanMetrics;
use crate::tokens::{TokenLine, TokenStore};
use serde::Serialize;
use std::time::Duration;

/// Store and metrics from scanning one file
#[derive(Debug)]
pub struct ScanResult {
    pub store: TokenStore,
    pub metrics: ScanMetrics,
    pub file_metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl ScanResult {
    pub fn log_success(&self) {
        crate::log_success!(
            crate::logging::codes::success::TOKENIZATION_COMPLETE,
            "File scan succeeded",
            "file" => self.file_metadata.path.display(),
            "tokens" => self.store.token_count(),
            "duration_ms" => format!("{:.2}", self.processing_duration.as_secs_f64() * 1000.0)
        );
    }

    /// Serializable view of the scanned lines and counters
    pub fn output(&self) -> ScanOutput<'_> {
        ScanOutput {
            file: self.file_metadata.path.display().to_string(),
            lines: self.store.lines(),
            metrics: &self.metrics,
        }
    }

    /// Category counts plus the most used operators, one entry per line
    pub fn summary(&self) -> String {
        let mut report = format!(
            "Lines: {} read, {} with tokens\nTokens: {}\n",
            self.metrics.lines_ingested,
            self.metrics.lines_stored,
            self.store.token_count()
        );
        for line in self.metrics.summary_lines() {
            report.push_str(&format!("  {}\n", line));
        }
        if self.metrics.unterminated_literals > 0 {
            report.push_str(&format!(
                "Unterminated literals: {}\n",
                self.metrics.unterminated_literals
            ));
        }
        let top = self.metrics.most_used_operators(5);
        if !top.is_empty() {
            let ops: Vec<String> = top.iter().map(|(op, n)| format!("{} x{}", op, n)).collect();
            report.push_str(&format!("Top operators: {}\n", ops.join(", ")));
        }
        report
    }
}

#[derive(Debug, Serialize)]
pub struct ScanOutput<'a> {
    pub file: String,
    pub lines: &'a [TokenLine],
    pub metrics: &'a ScanMetrics,
}
