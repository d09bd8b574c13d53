//! Token types and the line-structured token store

pub mod store;
pub mod token;

pub use store::{Cursor, TokenLine, TokenStore};
pub use token::{Token, TokenCategory};
