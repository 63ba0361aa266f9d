//! Token stream consumed by the parser
//!
//! The stream is never empty and always ends with exactly one end-of-input
//! token. Navigation stops on that token: advancing at the end is a no-op,
//! so lookahead is always available.

use crate::{
    tokens::token::{Token, TokenKind},
    utils::{SourceMap, SourcePosition},
};

/// Ordered tokens of one tokenizer pass with a parser cursor
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    /// Index of the lookahead token
    position: usize,
    /// Source map for error reporting
    source_map: Option<SourceMap>,
}

impl TokenStream {
    /// Create a stream, checking the end-of-input invariant
    pub fn new(tokens: Vec<Token>) -> Result<Self, TokenStreamError> {
        let eof_count = tokens.iter().filter(|t| t.is_eof()).count();

        match tokens.last() {
            None => return Err(TokenStreamError::Empty),
            Some(last) if !last.is_eof() => {
                return Err(TokenStreamError::MissingEndOfInput {
                    last: last.kind.as_str().to_string(),
                })
            }
            _ => {}
        }

        if eof_count != 1 {
            return Err(TokenStreamError::DuplicateEndOfInput { count: eof_count });
        }

        crate::log_debug!("Token stream assembled",
            "token_count" => tokens.len()
        );

        Ok(Self {
            tokens,
            position: 0,
            source_map: None,
        })
    }

    /// Create stream with source map for enhanced error reporting
    pub fn with_source_map(tokens: Vec<Token>, source: &str) -> Result<Self, TokenStreamError> {
        let mut stream = Self::new(tokens)?;
        stream.source_map = Some(SourceMap::new(source));
        Ok(stream)
    }

    // === CORE NAVIGATION ===

    /// The lookahead token. Always present.
    pub fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Peek ahead by n positions; `peek_ahead(0)` is the current token
    pub fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    /// Move to the next token unless already on the last one. Returns the
    /// token that was current before the move.
    pub fn advance(&mut self) -> &Token {
        let consumed = self.position;
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
        &self.tokens[consumed]
    }

    /// True once the lookahead is the end-of-input token
    pub fn is_at_end(&self) -> bool {
        self.current().is_eof()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// A valid stream holds at least the end-of-input token
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining_count(&self) -> usize {
        self.tokens.len() - self.position
    }

    /// Consume the current token if it has the expected kind
    pub fn expect_kind(&mut self, expected: TokenKind) -> Result<Token, TokenStreamError> {
        let current = self.current();
        if current.kind == expected {
            let token = current.clone();
            self.advance();
            Ok(token)
        } else {
            Err(TokenStreamError::UnexpectedToken {
                expected: expected.describe().to_string(),
                found: current.describe(),
                position: current.start.clone(),
            })
        }
    }

    // === ACCESS ===

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn source_map(&self) -> Option<&SourceMap> {
        self.source_map.as_ref()
    }

    // === DIAGNOSTICS ===

    /// Format an error with source context when a source map is attached
    pub fn format_error(&self, position: &SourcePosition, message: &str) -> String {
        match self.source_map {
            Some(ref source_map) => source_map.format_error(position, message),
            None => format!("error at {}: {}", position, message),
        }
    }

    pub fn diagnostic(&self) -> String {
        format!(
            "TokenStream(pos: {}/{}, current: {})",
            self.position,
            self.tokens.len(),
            self.current()
        )
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Token stream construction and expectation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TokenStreamError {
    #[error("Token stream is empty")]
    Empty,

    #[error("Token stream must end with EOF_TOKEN, found {last}")]
    MissingEndOfInput { last: String },

    #[error("Token stream must contain exactly one EOF_TOKEN, found {count}")]
    DuplicateEndOfInput { count: usize },

    #[error("Expected {expected}, found {found} at {position}")]
    UnexpectedToken {
        expected: String,
        found: String,
        position: SourcePosition,
    },
}
