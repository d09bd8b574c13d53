//! Events the scanner reports through the global logging service.
//!
//! This file runs as its own process, so it owns the global logger.

use std::io::Cursor;
use std::sync::{Arc, OnceLock};

use token_scanner::lexical::{scan_str, Scanner};
use token_scanner::logging::{
    self, codes, LogEvent, LogLevel, LoggingService, MemoryLogger,
};

fn memory() -> &'static MemoryLogger {
    static MEMORY: OnceLock<Arc<MemoryLogger>> = OnceLock::new();
    MEMORY.get_or_init(|| {
        let memory = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(memory.clone(), LogLevel::Debug);
        logging::init_global_logging_with_service(Arc::new(service))
            .expect("global logger installed once");
        memory
    })
}

fn debug_events(message: &str) -> Vec<LogEvent> {
    memory()
        .get_events()
        .into_iter()
        .filter(|e| e.is_debug() && e.message == message)
        .collect()
}

fn context<'a>(event: &'a LogEvent, key: &str) -> Option<&'a str> {
    event.context.get(key).map(String::as_str)
}

#[test]
fn rewinding_the_cursor_is_logged() {
    memory();
    assert!(logging::is_initialized());
    let mut store = scan_str("alpha beta\ngamma\ndelta");
    store.next_token();
    store.back_to_beginning();

    let events = debug_events("Token cursor rewound");
    assert!(events.iter().any(|e| context(e, "lines") == Some("3")));
}

#[test]
fn clearing_the_store_is_logged() {
    memory();
    let mut store = scan_str("one\ntwo\nthree\nfour");
    store.clear();

    let events = debug_events("Token store cleared");
    assert!(events.iter().any(|e| context(e, "dropped_lines") == Some("4")));
    assert!(store.is_empty());
}

#[test]
fn replaced_bytes_are_reported_as_a_warning() {
    memory();
    let mut scanner = Scanner::new();
    scanner
        .cut_reader(Cursor::new(b"ok\n\xe9t\xe9\n".to_vec()))
        .unwrap();

    let warnings = memory().get_events_with_code(codes::file_processing::INVALID_ENCODING);
    assert!(warnings
        .iter()
        .any(|e| e.is_warning() && context(e, "lines") == Some("1")));
    assert!(memory().has_success_with_code(codes::success::TOKENIZATION_COMPLETE));
}
