//! Token system for Joint lexical analysis
//!
//! The lexer turns source text into a [`TokenStream`]: an ordered list of
//! [`Token`]s terminated by exactly one end-of-input token. Every token
//! carries its decoded text and the start/end [`SourcePosition`] snapshots
//! taken while it was scanned.
//!
//! ## Token kinds
//!
//! - Comments (`# ...` up to the end of the line)
//! - Keywords: `let`, `import`, `from`
//! - Identifiers: an ASCII letter followed by letters or digits
//! - Punctuators, matched longest first (`>>>`, then `!=` and doubled
//!   `< > & | =`, then single bytes)
//! - Literals: numeric (digit runs), boolean, character, string, `null`
//! - End of input
//!
//! The parser consumes the stream with one-token lookahead and never moves
//! past the end-of-input token.

pub mod token;
pub mod token_stream;

// Re-export key types for convenience
pub use token::{Token, TokenKind, KEYWORDS};
pub use token_stream::{TokenStream, TokenStreamError};

// Re-export span types from utils
pub use crate::utils::{SourceMap, SourcePosition, Span};
