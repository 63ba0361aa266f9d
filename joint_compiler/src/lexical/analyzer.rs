//! Core lexical analyzer
//!
//! Single left-to-right pass over the source bytes. Every token's range
//! starts before the whitespace preceding it, so consecutive token ranges
//! tile the whole input.

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::file_processor::FileProcessingResult;
use crate::logging::codes;
use crate::tokens::{Token, TokenKind, TokenStream, TokenStreamError};
use crate::utils::{SourcePosition, Span};
use crate::{log_debug, log_error, log_success};
use std::sync::Arc;

/// Punctuators that are always a single byte
const SINGLE_PUNCTUATORS: &[u8] = b"%()*+,-./:;?[]^{}~";
/// Operators that form a two-byte token when doubled
const DOUBLED_OPERATORS: &[u8] = b"<>&|=";
/// Operators that stand alone when no longer form matches
const SINGLE_OPERATORS: &[u8] = b"<>=!&|";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexerError {
    #[error("Unexpected character {found:?}, expected {expected} at {position}")]
    UnexpectedCharacter {
        found: char,
        expected: String,
        position: SourcePosition,
    },

    #[error("Unterminated string literal starting at {position}")]
    UnterminatedString { position: SourcePosition },

    #[error("Malformed character literal {found} at {position}")]
    MalformedCharacterLiteral {
        found: String,
        position: SourcePosition,
    },

    #[error("Identifier too long: {length} bytes (max {MAX_IDENTIFIER_LENGTH}) at {position}")]
    IdentifierTooLong {
        length: usize,
        position: SourcePosition,
    },

    #[error("String too large: {size} bytes (max {MAX_STRING_SIZE}) at {position}")]
    StringTooLarge {
        size: usize,
        position: SourcePosition,
    },

    #[error("Comment too long: {length} bytes (max {MAX_COMMENT_LENGTH}) at {position}")]
    CommentTooLong {
        length: usize,
        position: SourcePosition,
    },

    #[error("Too many tokens: more than {MAX_TOKEN_COUNT} at {position}")]
    TooManyTokens { position: SourcePosition },

    #[error("Invalid token stream: {0}")]
    InvalidTokenStream(#[from] TokenStreamError),
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::UnexpectedCharacter { .. } => codes::lexical::INVALID_CHARACTER,
            LexerError::UnterminatedString { .. } => codes::lexical::UNTERMINATED_STRING,
            LexerError::MalformedCharacterLiteral { .. } => {
                codes::lexical::MALFORMED_CHARACTER_LITERAL
            }
            LexerError::IdentifierTooLong { .. } => codes::lexical::IDENTIFIER_TOO_LONG,
            LexerError::StringTooLarge { .. } => codes::lexical::STRING_TOO_LARGE,
            LexerError::CommentTooLong { .. } => codes::lexical::COMMENT_TOO_LONG,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
            LexerError::InvalidTokenStream(_) => codes::lexical::INVALID_TOKEN_STREAM,
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

    /// Where the offending lexeme starts
    pub fn position(&self) -> Option<&SourcePosition> {
        match self {
            LexerError::UnexpectedCharacter { position, .. }
            | LexerError::UnterminatedString { position }
            | LexerError::MalformedCharacterLiteral { position, .. }
            | LexerError::IdentifierTooLong { position, .. }
            | LexerError::StringTooLarge { position, .. }
            | LexerError::CommentTooLong { position, .. }
            | LexerError::TooManyTokens { position } => Some(position),
            LexerError::InvalidTokenStream(TokenStreamError::UnexpectedToken {
                position, ..
            }) => Some(position),
            LexerError::InvalidTokenStream(_) => None,
        }
    }
}

/// Per-pass token statistics
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub keyword_tokens: usize,
    pub identifier_tokens: usize,
    pub punctuator_tokens: usize,
    pub literal_tokens: usize,
    pub comment_count: usize,
    pub max_string_length: usize,
    pub max_comment_length: usize,
    pub line_count: u32,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token) {
        self.total_tokens += 1;
        self.line_count = self.line_count.max(token.end.line + 1);

        match token.kind {
            TokenKind::Keyword => self.keyword_tokens += 1,
            TokenKind::Identifier => self.identifier_tokens += 1,
            TokenKind::Punctuator => self.punctuator_tokens += 1,
            TokenKind::Comment => {
                self.comment_count += 1;
                self.max_comment_length = self.max_comment_length.max(token.text.len());
            }
            TokenKind::StringLiteral => {
                self.literal_tokens += 1;
                self.max_string_length = self.max_string_length.max(token.text.len());
            }
            TokenKind::NumericLiteral
            | TokenKind::BooleanLiteral
            | TokenKind::CharacterLiteral
            | TokenKind::NullLiteral => self.literal_tokens += 1,
            TokenKind::EndOfInput => {}
        }
    }
}

/// Mutable cursor of one tokenizer pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    pub offset: usize,
    pub line: u32,
    /// Offset of the first byte of the current line
    pub line_start: usize,
}

impl ScanState {
    pub fn snapshot(&self, path: &Arc<str>) -> SourcePosition {
        SourcePosition::new(
            path.clone(),
            self.offset,
            self.line,
            (self.offset - self.line_start) as u32,
        )
    }

    /// Record a newline that has just been consumed
    pub fn advance_line(&mut self) {
        self.line += 1;
        self.line_start = self.offset;
    }
}

pub struct LexicalAnalyzer {
    state: ScanState,
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self::with_preferences(LexicalPreferences::default())
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            state: ScanState::default(),
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    /// Tokenize a loaded source file
    pub fn tokenize_file_result(
        &mut self,
        file_result: &FileProcessingResult,
    ) -> Result<TokenStream, LexerError> {
        let path = file_result.display_path();

        log_debug!("Starting lexical analysis",
            "file" => path.as_str(),
            "file_size_bytes" => file_result.metadata.size,
            "line_count" => file_result.metadata.line_count,
            "max_tokens_allowed" => MAX_TOKEN_COUNT
        );

        self.tokenize(&file_result.source, &path)
    }

    /// Tokenize `source`, stamping `path` into every position
    pub fn tokenize(&mut self, source: &str, path: &str) -> Result<TokenStream, LexerError> {
        let start_time = std::time::Instant::now();
        let path: Arc<str> = Arc::from(path);

        self.state = ScanState::default();
        self.metrics = LexicalMetrics::default();

        let mut tokens = Vec::new();
        loop {
            if tokens.len() >= MAX_TOKEN_COUNT {
                let error = LexerError::TooManyTokens {
                    position: self.state.snapshot(&path),
                };
                self.report(&error);
                return Err(error);
            }

            let token = match self.next_token(source, &path) {
                Ok(token) => token,
                Err(error) => {
                    self.report(&error);
                    return Err(error);
                }
            };

            if self.preferences.track_metrics {
                self.metrics.record_token(&token);
            }
            if self.preferences.log_token_details {
                log_debug!("Token scanned",
                    "kind" => token.kind,
                    "text" => format!("{:?}", token.text),
                    "start" => token.start.triple(),
                    "end" => token.end.triple()
                );
            }

            let done = token.is_eof();
            tokens.push(token);
            if done {
                break;
            }
        }

        let token_stream = TokenStream::with_source_map(tokens, source).map_err(|e| {
            let error = LexerError::from(e);
            self.report(&error);
            error
        })?;

        log_success!(codes::success::TOKENIZATION_COMPLETE,
            "Lexical analysis completed successfully",
            "file" => &*path,
            "token_count" => token_stream.len(),
            "keywords" => self.metrics.keyword_tokens,
            "identifiers" => self.metrics.identifier_tokens,
            "punctuators" => self.metrics.punctuator_tokens,
            "literals" => self.metrics.literal_tokens,
            "comments" => self.metrics.comment_count,
            "duration_ms" => format!("{:.3}", start_time.elapsed().as_secs_f64() * 1000.0)
        );

        Ok(token_stream)
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    fn report(&self, error: &LexerError) {
        match error.position() {
            Some(position) => log_error!(error.error_code(), &error.to_string(),
                span = Span::point(position.clone()),
                "line" => position.line + 1,
                "column" => position.column + 1
            ),
            None => log_error!(error.error_code(), &error.to_string()),
        }
    }

    // ========================================================================
    // Scanning
    // ========================================================================

    fn next_token(&mut self, source: &str, path: &Arc<str>) -> Result<Token, LexerError> {
        let bytes = source.as_bytes();
        let start = self.state.snapshot(path);

        self.skip_whitespace(bytes);

        let Some(&byte) = bytes.get(self.state.offset) else {
            return Ok(Token::new(
                TokenKind::EndOfInput,
                "",
                start,
                self.state.snapshot(path),
            ));
        };

        let lexeme_start = self.state.snapshot(path);
        let (kind, text) = match byte {
            b'#' => self.scan_comment(source, &lexeme_start)?,
            b if b.is_ascii_alphabetic() => self.scan_word(source, &lexeme_start)?,
            b if b.is_ascii_digit() => self.scan_number(source),
            b'\'' => self.scan_character(source, &lexeme_start)?,
            b'"' => self.scan_string(source, &lexeme_start)?,
            _ => self.scan_punctuator(source, &lexeme_start)?,
        };

        Ok(Token::new(kind, text, start, self.state.snapshot(path)))
    }

    fn skip_whitespace(&mut self, bytes: &[u8]) {
        while let Some(&byte) = bytes.get(self.state.offset) {
            match byte {
                b' ' => self.state.offset += 1,
                b'\n' => {
                    self.state.offset += 1;
                    self.state.advance_line();
                }
                _ => break,
            }
        }
    }

    fn scan_comment(
        &mut self,
        source: &str,
        position: &SourcePosition,
    ) -> Result<(TokenKind, String), LexerError> {
        let content_start = self.state.offset + 1;
        let content_end = source[content_start..]
            .find('\n')
            .map_or(source.len(), |i| content_start + i);

        let length = content_end - content_start;
        if length > MAX_COMMENT_LENGTH {
            return Err(LexerError::CommentTooLong {
                length,
                position: position.clone(),
            });
        }

        self.state.offset = content_end;
        Ok((TokenKind::Comment, source[content_start..content_end].to_string()))
    }

    fn scan_word(
        &mut self,
        source: &str,
        position: &SourcePosition,
    ) -> Result<(TokenKind, String), LexerError> {
        let start = self.state.offset;
        let end = self.scan_while(source.as_bytes(), |b| b.is_ascii_alphanumeric());

        let length = end - start;
        if length > MAX_IDENTIFIER_LENGTH {
            return Err(LexerError::IdentifierTooLong {
                length,
                position: position.clone(),
            });
        }

        let word = &source[start..end];
        Ok((TokenKind::classify_word(word), word.to_string()))
    }

    fn scan_number(&mut self, source: &str) -> (TokenKind, String) {
        let start = self.state.offset;
        let end = self.scan_while(source.as_bytes(), |b| b.is_ascii_digit());
        (TokenKind::NumericLiteral, source[start..end].to_string())
    }

    /// Advance past bytes matching `accept`, returning the new offset
    fn scan_while(&mut self, bytes: &[u8], accept: impl Fn(u8) -> bool) -> usize {
        while bytes.get(self.state.offset).is_some_and(|&b| accept(b)) {
            self.state.offset += 1;
        }
        self.state.offset
    }

    fn scan_character(
        &mut self,
        source: &str,
        position: &SourcePosition,
    ) -> Result<(TokenKind, String), LexerError> {
        let quote = self.state.offset;
        let payload_start = quote + 1;

        let malformed = |upto: usize| LexerError::MalformedCharacterLiteral {
            found: source[quote..upto].to_string(),
            position: position.clone(),
        };

        let payload = match source[payload_start..].chars().next() {
            Some(c) if c != '\'' => c,
            Some(c) => return Err(malformed(payload_start + c.len_utf8())),
            None => return Err(malformed(payload_start)),
        };

        let closing = payload_start + payload.len_utf8();
        match source[closing..].chars().next() {
            Some('\'') => {}
            Some(c) => return Err(malformed(closing + c.len_utf8())),
            None => return Err(malformed(closing)),
        }

        self.state.offset = payload_start + payload.len_utf8();
        if payload == '\n' {
            self.state.advance_line();
        }
        self.state.offset += 1;

        Ok((TokenKind::CharacterLiteral, payload.to_string()))
    }

    fn scan_string(
        &mut self,
        source: &str,
        position: &SourcePosition,
    ) -> Result<(TokenKind, String), LexerError> {
        let bytes = source.as_bytes();
        let content_start = self.state.offset + 1;
        self.state.offset = content_start;

        // Multi-byte UTF-8 sequences never contain '"' or '\n', so a byte scan
        // keeps every slice on a char boundary
        loop {
            match bytes.get(self.state.offset) {
                None => {
                    return Err(LexerError::UnterminatedString {
                        position: position.clone(),
                    })
                }
                Some(b'"') => break,
                Some(b'\n') => {
                    self.state.offset += 1;
                    self.state.advance_line();
                }
                Some(_) => self.state.offset += 1,
            }
        }

        let content_end = self.state.offset;
        self.state.offset += 1;

        let size = content_end - content_start;
        if size > MAX_STRING_SIZE {
            return Err(LexerError::StringTooLarge {
                size,
                position: position.clone(),
            });
        }

        Ok((TokenKind::StringLiteral, source[content_start..content_end].to_string()))
    }

    fn scan_punctuator(
        &mut self,
        source: &str,
        position: &SourcePosition,
    ) -> Result<(TokenKind, String), LexerError> {
        let start = self.state.offset;
        let rest = &source.as_bytes()[start..];
        let first = rest[0];

        let length = if SINGLE_PUNCTUATORS.contains(&first) {
            1
        } else if rest.starts_with(b">>>") {
            3
        } else if rest.starts_with(b"!=")
            || (rest.len() >= 2 && rest[1] == first && DOUBLED_OPERATORS.contains(&first))
        {
            2
        } else if SINGLE_OPERATORS.contains(&first) {
            1
        } else {
            let found = source[start..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
            return Err(LexerError::UnexpectedCharacter {
                found,
                expected: "a comment, identifier, literal or punctuator".to_string(),
                position: position.clone(),
            });
        };

        self.state.offset += length;
        Ok((TokenKind::Punctuator, source[start..start + length].to_string()))
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn lex(source: &str) -> Vec<Token> {
        LexicalAnalyzer::new()
            .tokenize(source, "test.jnt")
            .unwrap()
            .into_tokens()
    }

    fn lex_err(source: &str) -> LexerError {
        LexicalAnalyzer::new()
            .tokenize(source, "test.jnt")
            .unwrap_err()
    }

    fn kinds_and_texts(source: &str) -> Vec<(TokenKind, String)> {
        lex(source).into_iter().map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn test_empty_source_yields_single_eof() {
        let tokens = lex("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::EndOfInput);
        assert_eq!(tokens[0].text, "");
        assert_eq!(tokens[0].start.offset, 0);
        assert_eq!(tokens[0].end.offset, 0);
    }

    #[test]
    fn test_tokenizing_is_deterministic_and_ends_with_one_eof() {
        let source = "import { a, b } from \"mod\";\nlet x: Int? = 'c';\nf(1, 2)();\n";
        let first = lex(source);
        let second = lex(source);

        assert_eq!(first, second);
        assert!(first.last().unwrap().is_eof());
        assert_eq!(first.iter().filter(|t| t.is_eof()).count(), 1);
    }

    #[test]
    fn test_variable_declaration_tokens() {
        use TokenKind::*;
        assert_eq!(
            kinds_and_texts("let x: Int = 5;"),
            vec![
                (Keyword, "let".to_string()),
                (Identifier, "x".to_string()),
                (Punctuator, ":".to_string()),
                (Identifier, "Int".to_string()),
                (Punctuator, "=".to_string()),
                (NumericLiteral, "5".to_string()),
                (Punctuator, ";".to_string()),
                (EndOfInput, String::new()),
            ]
        );
    }

    #[test]
    fn test_token_ranges_include_leading_whitespace() {
        let tokens = lex("let  x\n  y");

        assert_eq!((tokens[0].start.offset, tokens[0].end.offset), (0, 3));
        assert_eq!((tokens[1].start.offset, tokens[1].end.offset), (3, 6));
        assert_eq!(tokens[1].start.column, 3);

        // 'y' starts right after 'x', before the newline
        assert_eq!(tokens[2].start.offset, 6);
        assert_eq!(tokens[2].start.line, 0);
        assert_eq!(tokens[2].end.offset, 10);
        assert_eq!(tokens[2].end.line, 1);
        assert_eq!(tokens[2].end.column, 3);

        // Ranges tile the input
        for pair in tokens.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(tokens.last().unwrap().end.offset, 10);
    }

    #[test]
    fn test_end_offset_counts_raw_bytes() {
        for token in lex(" \"ab\" 'é' # done\n\"x\ny\" 42") {
            assert!(token.start.offset <= token.end.offset);
        }

        let tokens = lex("'é'");
        assert_eq!(tokens[0].text, "é");
        assert_eq!(tokens[0].end.offset, 4);

        let tokens = lex(" \"ab\"");
        assert_eq!(tokens[0].text, "ab");
        assert_eq!(tokens[0].end.offset, 5);
    }

    #[test]
    fn test_reclassification_is_exact_match() {
        use TokenKind::*;
        let kinds: Vec<_> = lex("lets let letx import from fromage true truely false null nulls")
            .into_iter()
            .map(|t| t.kind)
            .collect();

        assert_eq!(
            kinds,
            vec![
                Identifier,
                Keyword,
                Identifier,
                Keyword,
                Keyword,
                Identifier,
                BooleanLiteral,
                Identifier,
                BooleanLiteral,
                NullLiteral,
                Identifier,
                EndOfInput,
            ]
        );
    }

    #[test]
    fn test_identifiers_split_at_non_alphanumeric() {
        use TokenKind::*;
        assert_eq!(
            kinds_and_texts("abc9 9abc"),
            vec![
                (Identifier, "abc9".to_string()),
                (NumericLiteral, "9".to_string()),
                (Identifier, "abc".to_string()),
                (EndOfInput, String::new()),
            ]
        );
        // Underscore is not an identifier character
        assert_matches!(lex_err("a_b"), LexerError::UnexpectedCharacter { found: '_', .. });
    }

    #[test]
    fn test_longest_match_punctuators() {
        let texts: Vec<String> = lex(">>> != << >> && || == >>>> => !! <")
            .into_iter()
            .filter(|t| !t.is_eof())
            .map(|t| t.text)
            .collect();

        assert_eq!(
            texts,
            vec![">>>", "!=", "<<", ">>", "&&", "||", "==", ">>>", ">", "=", ">", "!", "!", "<"]
        );

        let tokens = lex(">>>");
        assert_eq!(tokens[0].end.offset - tokens[0].start.offset, 3);
        let tokens = lex("!=");
        assert_eq!(tokens[0].end.offset - tokens[0].start.offset, 2);
    }

    #[test]
    fn test_single_byte_punctuators() {
        let source = "% ( ) * + , - . / : ; ? [ ] ^ { } ~";
        let tokens = lex(source);
        assert_eq!(tokens.len(), 19);
        assert!(tokens[..18].iter().all(|t| t.kind == TokenKind::Punctuator));
        // '--' is two tokens: '-' is never doubled
        assert_eq!(lex("--").len(), 3);
    }

    #[test]
    fn test_comment_stops_at_newline() {
        let tokens = lex("# hello world\nf");
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].text, " hello world");
        assert_eq!(tokens[0].end.offset, 13);
        assert_eq!(tokens[0].end.line, 0);
        assert_eq!(tokens[1].text, "f");
        assert_eq!(tokens[1].end.line, 1);

        let tokens = lex("#tail");
        assert_eq!(tokens[0].text, "tail");
        assert!(tokens[1].is_eof());
    }

    #[test]
    fn test_multiline_string_advances_following_line_by_one() {
        let tokens = lex("\"first\nsecond\" x");

        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].text, "first\nsecond");
        assert_eq!(tokens[0].start.line, 0);
        assert_eq!(tokens[0].end.line, 1);
        assert_eq!(tokens[0].end.column, 7);

        assert_eq!(tokens[1].text, "x");
        assert_eq!(tokens[1].end.line, tokens[0].start.line + 1);
        assert_eq!(tokens[1].end.column, 9);
    }

    #[test]
    fn test_unterminated_string_reports_opening_quote() {
        let error = lex_err("f(\n  \"abc");
        assert_matches!(
            error,
            LexerError::UnterminatedString { ref position }
                if position.offset == 5 && position.line == 1 && position.column == 2
        );
        assert_eq!(error.error_code().as_str(), "E021");
    }

    #[test]
    fn test_character_literals() {
        let tokens = lex("'a' 'é'");
        assert_eq!(tokens[0].kind, TokenKind::CharacterLiteral);
        assert_eq!(tokens[0].text, "a");
        assert_eq!(tokens[1].text, "é");

        let tokens = lex("'\n' x");
        assert_eq!(tokens[0].text, "\n");
        assert_eq!(tokens[0].end.line, 1);
        assert_eq!(tokens[0].end.column, 1);
        assert_eq!(tokens[1].end.line, 1);
    }

    #[test]
    fn test_malformed_character_literals() {
        assert_matches!(
            lex_err("''"),
            LexerError::MalformedCharacterLiteral { ref found, .. } if found == "''"
        );
        assert_matches!(
            lex_err("'ab'"),
            LexerError::MalformedCharacterLiteral { ref found, .. } if found == "'ab"
        );
        assert_matches!(
            lex_err("x 'a"),
            LexerError::MalformedCharacterLiteral { ref found, ref position }
                if found == "'a" && position.offset == 2
        );
    }

    #[test]
    fn test_control_characters_are_rejected() {
        assert_matches!(
            lex_err("let\tx"),
            LexerError::UnexpectedCharacter { found: '\t', ref position, .. }
                if position.offset == 3
        );
        assert_matches!(
            lex_err("f();\r\n"),
            LexerError::UnexpectedCharacter { found: '\r', .. }
        );
    }

    #[test]
    fn test_non_ascii_outside_literals_is_rejected() {
        let error = lex_err("let é");
        assert_matches!(
            error,
            LexerError::UnexpectedCharacter { found: 'é', ref position, .. }
                if position.offset == 4 && position.column == 4
        );
        assert_eq!(error.error_code().as_str(), "E020");

        // Fine inside comments and strings
        assert_eq!(lex("# é\n\"ü\"").len(), 3);
    }

    #[test]
    fn test_identifier_length_limit() {
        let long = "a".repeat(MAX_IDENTIFIER_LENGTH + 1);
        assert_matches!(
            lex_err(&long),
            LexerError::IdentifierTooLong { length, .. } if length == MAX_IDENTIFIER_LENGTH + 1
        );
        assert_eq!(lex(&"a".repeat(MAX_IDENTIFIER_LENGTH)).len(), 2);
    }

    #[test]
    fn test_metrics() {
        let mut analyzer = LexicalAnalyzer::new();
        analyzer
            .tokenize("# c\nlet x: Int = \"str\";\nf(1, null);", "m.jnt")
            .unwrap();

        let metrics = analyzer.metrics();
        assert_eq!(metrics.keyword_tokens, 1);
        assert_eq!(metrics.identifier_tokens, 3);
        assert_eq!(metrics.literal_tokens, 3);
        assert_eq!(metrics.comment_count, 1);
        assert_eq!(metrics.max_string_length, 3);
        assert_eq!(metrics.line_count, 3);
    }

    #[test]
    fn test_positions_carry_path() {
        let stream = LexicalAnalyzer::new().tokenize("f", "dir/main.jnt").unwrap();
        assert_eq!(&*stream.current().start.path, "dir/main.jnt");
        assert!(stream.source_map().is_some());
    }

    #[test]
    fn test_scan_state_snapshot() {
        let path: Arc<str> = Arc::from("s.jnt");
        let mut state = ScanState::default();
        state.offset = 4;
        state.advance_line();
        state.offset = 7;

        let position = state.snapshot(&path);
        assert_eq!((position.offset, position.line, position.column), (7, 1, 3));
    }
}
