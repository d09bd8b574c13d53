//! Writing scan results in the requested form

use super::{PipelineError, ScanResult};
use crate::config::DisplayPreferences;
use crate::display;
use std::io::Write;

/// Output form selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render `result` to `out`. Text output follows the display preferences;
/// `summary` appends category counts.
pub fn write_result<W: Write>(
    out: &mut W,
    result: &ScanResult,
    display_prefs: &DisplayPreferences,
    format: OutputFormat,
    summary: bool,
) -> Result<(), PipelineError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &result.output())?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            if display_prefs.show_original {
                display::render_original(out, &result.store, display_prefs.show_boundary)?;
            }
            display::render_tokens(
                out,
                &result.store,
                display_prefs.bracket_tokens,
                display_prefs.show_boundary,
            )?;
            if summary {
                write!(out, "{}", result.summary())?;
            }
        }
    }
    Ok(())
}
