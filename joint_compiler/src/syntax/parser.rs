//! Recursive-descent parser over a complete token stream
//!
//! `JointParser` owns the stream and implements the builders' `Parser`
//! trait. There is no backtracking and no error recovery: the first
//! mismatch ends the parse.

use crate::config::compile_time::syntax::*;
use crate::config::runtime::SyntaxPreferences;
use crate::grammar::ast::nodes::Node;
use crate::grammar::builders::{self, Parser};
use crate::logging::codes;
use crate::syntax::error::{SyntaxError, SyntaxResult};
use crate::tokens::{Token, TokenKind, TokenStream};
use crate::utils::Span;
use crate::{log_debug, log_error, log_success};
use std::collections::VecDeque;

pub struct JointParser {
    tokens: TokenStream,
    preferences: SyntaxPreferences,
    error_history: VecDeque<SyntaxError>,
}

impl JointParser {
    pub fn new(tokens: TokenStream) -> Self {
        Self::with_preferences(tokens, SyntaxPreferences::default())
    }

    pub fn with_preferences(tokens: TokenStream, preferences: SyntaxPreferences) -> Self {
        log_debug!("Creating Joint parser", "tokens" => tokens.len());

        Self {
            tokens,
            preferences,
            error_history: VecDeque::new(),
        }
    }

    /// Parse the whole stream into the Program root
    pub fn parse_program(&mut self) -> SyntaxResult<Node> {
        match builders::parse_program(self) {
            Ok(program) => {
                log_success!(codes::success::AST_CONSTRUCTION_COMPLETE,
                    "Program parsed successfully",
                    "statements" => program.children.len(),
                    "tokens" => self.tokens.len()
                );
                Ok(program)
            }
            Err(error) => {
                match error.position() {
                    Some(position) => log_error!(error.error_code(), &error.to_string(),
                        span = Span::point(position.clone()),
                        "token_index" => self.tokens.position()
                    ),
                    None => log_error!(error.error_code(), &error.to_string()),
                }
                self.record_error(error.clone());
                Err(error)
            }
        }
    }

    fn record_error(&mut self, error: SyntaxError) {
        if self.error_history.len() >= MAX_ERROR_HISTORY {
            self.error_history.pop_front();
        }
        self.error_history.push_back(error);
    }

    pub fn error_history(&self) -> Vec<&SyntaxError> {
        self.error_history.iter().collect()
    }

    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    pub fn preferences(&self) -> &SyntaxPreferences {
        &self.preferences
    }

    /// Caret excerpt for an error, when the stream still has its source
    pub fn format_error(&self, error: &SyntaxError) -> String {
        match error.position() {
            Some(position) => self.tokens.format_error(position, &error.to_string()),
            None => error.to_string(),
        }
    }

    pub fn diagnostic_info(&self) -> String {
        format!(
            "Parser State:\n{}\nError History: {}/{}",
            self.tokens.diagnostic(),
            self.error_history.len(),
            MAX_ERROR_HISTORY
        )
    }

    fn mismatch(&self, expected: &str) -> SyntaxError {
        let current = self.tokens.current();
        SyntaxError::unexpected_token(expected, &current.describe(), &current.start)
    }
}

impl Parser for JointParser {
    fn current(&self) -> &Token {
        self.tokens.current()
    }

    fn advance(&mut self) -> Token {
        self.tokens.advance().clone()
    }

    fn expect_kind(&mut self, kind: TokenKind) -> SyntaxResult<Token> {
        Ok(self.tokens.expect_kind(kind)?)
    }

    fn expect_punctuator(&mut self, punctuator: &str) -> SyntaxResult<Token> {
        if self.tokens.current().is_punctuator(punctuator) {
            Ok(self.advance())
        } else {
            Err(self.mismatch(&format!("'{}'", punctuator)))
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> SyntaxResult<Token> {
        if self.tokens.current().is_keyword(keyword) {
            Ok(self.advance())
        } else {
            Err(self.mismatch(&format!("keyword '{}'", keyword)))
        }
    }

    fn trace_rule(&self, rule: &'static str) {
        if self.preferences.log_parse_steps {
            log_debug!("Entering grammar rule",
                "rule" => rule,
                "token_index" => self.tokens.position(),
                "lookahead" => self.tokens.current().describe()
            );
        }
    }
}

pub fn create_parser(tokens: TokenStream) -> JointParser {
    JointParser::new(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::ast::nodes::NodeKind;
    use crate::lexical::tokenize;
    use assert_matches::assert_matches;

    fn parser_for(source: &str) -> JointParser {
        create_parser(tokenize(source, "t.jnt").unwrap())
    }

    #[test]
    fn test_expect_punctuator_consumes_on_match() {
        let mut parser = parser_for("( )");
        let open = parser.expect_punctuator("(").unwrap();
        assert_eq!(open.text, "(");
        assert!(parser.current().is_punctuator(")"));
    }

    #[test]
    fn test_expect_keyword_mismatch_points_at_token() {
        let mut parser = parser_for("  from");
        let error = parser.expect_keyword("import").unwrap_err();
        assert_matches!(error, SyntaxError::UnexpectedToken { ref expected, ref found, ref position }
            if expected == "keyword 'import'" && found == "keyword 'from'" && position.offset == 0);
        assert_eq!(parser.tokens().position(), 0);
    }

    #[test]
    fn test_advance_stays_on_end_of_input() {
        let mut parser = parser_for("");
        assert!(parser.advance().is_eof());
        assert!(parser.advance().is_eof());
        assert!(parser.current().is_eof());
    }

    #[test]
    fn test_parse_and_error_history() {
        let mut parser = parser_for("f();");
        assert_eq!(parser.parse_program().unwrap().kind, NodeKind::Program);
        assert!(parser.error_history().is_empty());

        let mut parser = parser_for("from");
        assert!(parser.parse_program().is_err());
        assert_eq!(parser.error_history().len(), 1);
        assert!(parser.diagnostic_info().contains("Error History: 1/"));
    }

    #[test]
    fn test_format_error_uses_source_excerpt() {
        let mut parser = parser_for("let x = 5;");
        let error = parser.parse_program().unwrap_err();
        let rendered = parser.format_error(&error);
        assert!(rendered.contains("--> t.jnt:1:7"));
        assert!(rendered.contains("1 | let x = 5;"));
    }

    #[test]
    fn test_trace_rule_respects_preferences() {
        let tokens = tokenize("f();", "t.jnt").unwrap();
        let mut parser = JointParser::with_preferences(
            tokens,
            SyntaxPreferences {
                log_parse_steps: true,
            },
        );
        assert!(parser.preferences().log_parse_steps);
        assert!(parser.parse_program().is_ok());
    }
}
