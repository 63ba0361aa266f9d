//! Token kinds and the token value produced by the lexer
use crate::utils::{SourcePosition, Span};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved words that lex as [`TokenKind::Keyword`]
pub const KEYWORDS: [&str; 3] = ["let", "import", "from"];

/// Closed set of lexical categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    #[serde(rename = "COMMENT_TOKEN")]
    Comment,
    #[serde(rename = "KEYWORD_TOKEN")]
    Keyword,
    #[serde(rename = "IDENTIFIER_TOKEN")]
    Identifier,
    #[serde(rename = "PUNCTUATOR_TOKEN")]
    Punctuator,
    #[serde(rename = "NUMERIC_LITERAL_TOKEN")]
    NumericLiteral,
    #[serde(rename = "BOOLEAN_LITERAL_TOKEN")]
    BooleanLiteral,
    #[serde(rename = "CHARACTER_LITERAL_TOKEN")]
    CharacterLiteral,
    #[serde(rename = "STRING_LITERAL_TOKEN")]
    StringLiteral,
    #[serde(rename = "NULL_LITERAL_TOKEN")]
    NullLiteral,
    #[serde(rename = "EOF_TOKEN")]
    EndOfInput,
}

impl TokenKind {
    /// Name used by the token printer
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comment => "COMMENT_TOKEN",
            Self::Keyword => "KEYWORD_TOKEN",
            Self::Identifier => "IDENTIFIER_TOKEN",
            Self::Punctuator => "PUNCTUATOR_TOKEN",
            Self::NumericLiteral => "NUMERIC_LITERAL_TOKEN",
            Self::BooleanLiteral => "BOOLEAN_LITERAL_TOKEN",
            Self::CharacterLiteral => "CHARACTER_LITERAL_TOKEN",
            Self::StringLiteral => "STRING_LITERAL_TOKEN",
            Self::NullLiteral => "NULL_LITERAL_TOKEN",
            Self::EndOfInput => "EOF_TOKEN",
        }
    }

    /// Short human description for diagnostics
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::Keyword => "keyword",
            Self::Identifier => "identifier",
            Self::Punctuator => "punctuator",
            Self::NumericLiteral => "numeric literal",
            Self::BooleanLiteral => "boolean literal",
            Self::CharacterLiteral => "character literal",
            Self::StringLiteral => "string literal",
            Self::NullLiteral => "null literal",
            Self::EndOfInput => "end of input",
        }
    }

    /// Token kinds that can begin a primary expression
    pub fn is_primary(&self) -> bool {
        matches!(
            self,
            Self::Identifier
                | Self::NumericLiteral
                | Self::BooleanLiteral
                | Self::CharacterLiteral
                | Self::StringLiteral
                | Self::NullLiteral
        )
    }

    /// Classify a fully scanned identifier-shaped word
    pub fn classify_word(word: &str) -> Self {
        match word {
            w if KEYWORDS.contains(&w) => Self::Keyword,
            "true" | "false" => Self::BooleanLiteral,
            "null" => Self::NullLiteral,
            _ => Self::Identifier,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified lexeme with its source range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact lexeme; decoded payload for character and string literals
    pub text: String,
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        start: SourcePosition,
        end: SourcePosition,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            start,
            end,
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.start.clone(), self.end.clone())
    }

    pub fn is_punctuator(&self, punctuator: &str) -> bool {
        self.kind == TokenKind::Punctuator && self.text == punctuator
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == keyword
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }

    /// Description used in "expected X, found Y" messages
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::EndOfInput => "end of input".to_string(),
            TokenKind::Keyword => format!("keyword '{}'", self.text),
            TokenKind::Punctuator => format!("'{}'", self.text),
            TokenKind::StringLiteral => format!("string literal \"{}\"", self.text),
            TokenKind::CharacterLiteral => format!("character literal '{}'", self.text),
            kind => format!("{} '{}'", kind.describe(), self.text),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} at {}", self.kind, self.text, self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn token(kind: TokenKind, text: &str) -> Token {
        let path: Arc<str> = Arc::from("t.jnt");
        Token::new(
            kind,
            text,
            SourcePosition::new(path.clone(), 0, 0, 0),
            SourcePosition::new(path, text.len(), 0, text.len() as u32),
        )
    }

    #[test]
    fn test_classify_word_is_exact_match() {
        assert_eq!(TokenKind::classify_word("let"), TokenKind::Keyword);
        assert_eq!(TokenKind::classify_word("import"), TokenKind::Keyword);
        assert_eq!(TokenKind::classify_word("from"), TokenKind::Keyword);
        assert_eq!(TokenKind::classify_word("lets"), TokenKind::Identifier);
        assert_eq!(TokenKind::classify_word("Let"), TokenKind::Identifier);
        assert_eq!(TokenKind::classify_word("false"), TokenKind::BooleanLiteral);
        assert_eq!(TokenKind::classify_word("null"), TokenKind::NullLiteral);
        assert_eq!(TokenKind::classify_word("nullable"), TokenKind::Identifier);
    }

    #[test]
    fn test_printer_names() {
        assert_eq!(TokenKind::EndOfInput.as_str(), "EOF_TOKEN");
        assert_eq!(
            TokenKind::CharacterLiteral.to_string(),
            "CHARACTER_LITERAL_TOKEN"
        );
    }

    #[test]
    fn test_token_predicates() {
        let semicolon = token(TokenKind::Punctuator, ";");
        assert!(semicolon.is_punctuator(";"));
        assert!(!semicolon.is_punctuator(","));
        assert!(!semicolon.is_keyword(";"));

        let from = token(TokenKind::Keyword, "from");
        assert!(from.is_keyword("from"));
        assert_eq!(from.describe(), "keyword 'from'");
        assert_eq!(from.span().len(), 4);
    }

    #[test]
    fn test_kind_serializes_as_printer_name() {
        let json = serde_json::to_string(&TokenKind::NullLiteral).unwrap();
        assert_eq!(json, "\"NULL_LITERAL_TOKEN\"");
    }
}
