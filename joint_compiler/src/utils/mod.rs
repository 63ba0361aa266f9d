//! Shared types and utilities for the Joint lexer and parser
//!
//! Position snapshots, spans, and the source map used to render
//! diagnostics against the original text.

pub mod span;

pub use span::{SourceMap, SourcePosition, Span};
