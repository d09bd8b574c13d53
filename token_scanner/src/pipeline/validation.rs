use crate::logging::codes;

/// Check that every code the scanner emits is registered and the limits are sane
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating scanner configuration");

    let emitted = [
        codes::file_processing::FILE_NOT_FOUND,
        codes::file_processing::EMPTY_FILE,
        codes::file_processing::FILE_TOO_LARGE,
        codes::file_processing::INVALID_ENCODING,
        codes::file_processing::TOO_MANY_LINES,
        codes::file_processing::LINE_TOO_LONG,
        codes::lexical::UNTERMINATED_LITERAL,
        codes::lexical::LINE_READ_FAILURE,
    ];
    for code in emitted {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Error code {} has no registered metadata", code));
        }
    }

    crate::logging::config::validate_config()?;

    if crate::file_processor::get_max_file_size() == 0 {
        return Err("Maximum file size cannot be zero".to_string());
    }

    crate::log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Scanner configuration validated",
        "codes_checked" => emitted.len()
    );

    Ok(())
}
