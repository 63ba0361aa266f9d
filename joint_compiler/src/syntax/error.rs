//! Syntax errors raised while building the tree from a token stream
//!
//! Parsing stops at the first error. Every variant except `Internal` carries
//! the start position of the offending token; messages leave the location
//! to the diagnostic renderer.

use crate::config::compile_time::syntax::MAX_CALL_CHAIN_DEPTH;
use crate::logging::{codes, Code};
use crate::tokens::TokenStreamError;
use crate::utils::SourcePosition;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    #[error("Unexpected token: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        position: SourcePosition,
    },

    #[error("Expected primary expression, found {found}")]
    ExpectedPrimaryExpression {
        found: String,
        position: SourcePosition,
    },

    #[error("Unexpected keyword '{keyword}'")]
    UnexpectedKeyword {
        keyword: String,
        position: SourcePosition,
    },

    #[error("Invalid literal '{text}'")]
    InvalidLiteral {
        text: String,
        position: SourcePosition,
    },

    #[error("Call chain too deep: {depth} calls (max {MAX_CALL_CHAIN_DEPTH})")]
    CallChainTooDeep {
        depth: usize,
        position: SourcePosition,
    },

    #[error("Internal parser error: {message}")]
    Internal { message: String },
}

impl SyntaxError {
    pub fn unexpected_token(expected: &str, found: &str, position: &SourcePosition) -> Self {
        Self::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
            position: position.clone(),
        }
    }

    pub fn expected_primary(found: &str, position: &SourcePosition) -> Self {
        Self::ExpectedPrimaryExpression {
            found: found.to_string(),
            position: position.clone(),
        }
    }

    pub fn unexpected_keyword(keyword: &str, position: &SourcePosition) -> Self {
        Self::UnexpectedKeyword {
            keyword: keyword.to_string(),
            position: position.clone(),
        }
    }

    pub fn invalid_literal(text: &str, position: &SourcePosition) -> Self {
        Self::InvalidLiteral {
            text: text.to_string(),
            position: position.clone(),
        }
    }

    pub fn call_chain_too_deep(depth: usize, position: &SourcePosition) -> Self {
        Self::CallChainTooDeep {
            depth,
            position: position.clone(),
        }
    }

    pub fn internal(message: &str) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::ExpectedPrimaryExpression { .. } => codes::syntax::EXPECTED_PRIMARY_EXPRESSION,
            Self::UnexpectedKeyword { .. } => codes::syntax::UNEXPECTED_KEYWORD,
            Self::InvalidLiteral { .. } => codes::syntax::INVALID_LITERAL,
            Self::CallChainTooDeep { .. } => codes::syntax::CALL_CHAIN_TOO_DEEP,
            Self::Internal { .. } => codes::syntax::INTERNAL_PARSER_ERROR,
        }
    }

    pub fn position(&self) -> Option<&SourcePosition> {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::ExpectedPrimaryExpression { position, .. }
            | Self::UnexpectedKeyword { position, .. }
            | Self::InvalidLiteral { position, .. }
            | Self::CallChainTooDeep { position, .. } => Some(position),
            Self::Internal { .. } => None,
        }
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }
}

impl From<TokenStreamError> for SyntaxError {
    fn from(error: TokenStreamError) -> Self {
        match error {
            TokenStreamError::UnexpectedToken {
                expected,
                found,
                position,
            } => Self::UnexpectedToken {
                expected,
                found,
                position,
            },
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::Arc;

    fn at(offset: usize) -> SourcePosition {
        SourcePosition::new(Arc::from("t.jnt"), offset, 0, offset as u32)
    }

    #[test]
    fn test_error_codes() {
        let position = at(4);
        assert_eq!(
            SyntaxError::unexpected_token("':'", "'='", &position).error_code().as_str(),
            "E040"
        );
        assert_eq!(SyntaxError::expected_primary("';'", &position).error_code().as_str(), "E041");
        assert_eq!(SyntaxError::unexpected_keyword("from", &position).error_code().as_str(), "E042");
        assert_eq!(SyntaxError::invalid_literal("x", &position).error_code().as_str(), "E043");
        assert_eq!(SyntaxError::call_chain_too_deep(9, &position).error_code().as_str(), "E044");
        assert_eq!(SyntaxError::internal("bad").error_code().as_str(), "E045");
    }

    #[test]
    fn test_position_and_metadata() {
        let error = SyntaxError::unexpected_keyword("from", &at(7));
        assert_eq!(error.position().map(|p| p.offset), Some(7));
        assert_eq!(error.category(), "Syntax");
        assert!(!error.requires_halt());

        let internal = SyntaxError::internal("stack corrupted");
        assert!(internal.position().is_none());
        assert!(internal.requires_halt());
    }

    #[test]
    fn test_from_token_stream_error() {
        let error: SyntaxError = TokenStreamError::UnexpectedToken {
            expected: "identifier".to_string(),
            found: "'='".to_string(),
            position: at(2),
        }
        .into();
        assert_matches!(error, SyntaxError::UnexpectedToken { ref found, .. } if found == "'='");

        let error: SyntaxError = TokenStreamError::Empty.into();
        assert_matches!(error, SyntaxError::Internal { .. });
    }

    #[test]
    fn test_display() {
        let error = SyntaxError::unexpected_token("':'", "'='", &at(5));
        assert_eq!(
            error.to_string(),
            "Unexpected token: expected ':', found '='"
        );
    }
}
