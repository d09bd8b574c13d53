//! Line-oriented lexical scanner for C-family source text.
//!
//! Text is fed one line at a time into a [`Scanner`], which classifies every
//! token and appends the line's tokens to a [`TokenStore`]. The store keeps a
//! cursor for sequential, peeked and bulk retrieval.

pub mod config;
pub mod display;
pub mod file_processor;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod tokens;
pub mod utils;

pub use lexical::{Scanner, ScannerError};
pub use pipeline::{PipelineError, ScanResult};
pub use tokens::{Token, TokenCategory, TokenStore};
