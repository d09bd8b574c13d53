//! Shared primitive types used by the scanner and its consumers.

pub mod span;

pub use span::{Position, Span};
