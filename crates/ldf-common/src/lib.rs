//! Common utilities and data structures for the LDF parser.
//!
//! This crate provides foundational types used across the workspace:
//! - `Span`: Source code location tracking
//! - `LineIndex`: Byte offset to line/column lookup for diagnostics

mod line_index;
mod span;

pub use line_index::LineIndex;
pub use span::{BytePos, Span};
