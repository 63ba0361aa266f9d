//! Parser trait and the leaf builders: identifiers, literals, primary expressions
//!
//! Builders take `&mut dyn Parser` and consume exactly the tokens of their
//! production. Any mismatch aborts with a `SyntaxError` at the offending
//! token's start.

use crate::grammar::ast::nodes::{Node, NodeKind};
use crate::syntax::{SyntaxError, SyntaxResult};
use crate::tokens::{Token, TokenKind};

/// Cursor interface the builders drive
pub trait Parser {
    // === BASIC NAVIGATION ===

    /// One-token lookahead; the end-of-input token once the stream is exhausted
    fn current(&self) -> &Token;

    /// Consume the lookahead and return it. Never moves past end of input.
    fn advance(&mut self) -> Token;

    // === EXPECTATION METHODS ===
    fn expect_kind(&mut self, kind: TokenKind) -> SyntaxResult<Token>;
    fn expect_punctuator(&mut self, punctuator: &str) -> SyntaxResult<Token>;
    fn expect_keyword(&mut self, keyword: &str) -> SyntaxResult<Token>;

    /// Called on entry to each grammar rule
    fn trace_rule(&self, _rule: &'static str) {}
}

/// Identifier leaf with the name as its `value`
pub fn identifier_node(token: &Token) -> Node {
    let mut node = Node::new(NodeKind::Identifier, token.start.clone(), token.end.clone());
    node.attach_string("value", token.text.as_str());
    node
}

pub fn parse_identifier(parser: &mut dyn Parser) -> SyntaxResult<Node> {
    let token = parser.expect_kind(TokenKind::Identifier)?;
    Ok(identifier_node(&token))
}

/// Literal leaf holding the decoded scalar of the lookahead token
pub fn parse_literal(parser: &mut dyn Parser) -> SyntaxResult<Node> {
    let token = parser.current();
    let mut node = Node::new(NodeKind::Literal, token.start.clone(), token.end.clone());

    match token.kind {
        TokenKind::NumericLiteral => {
            let value = token
                .text
                .parse::<f64>()
                .ok()
                // Digit runs past f64 range parse to infinity
                .filter(|value| value.is_finite())
                .ok_or_else(|| SyntaxError::invalid_literal(&token.text, &token.start))?;
            node.attach_number("value", value);
        }
        TokenKind::BooleanLiteral => node.attach_boolean("value", token.text == "true"),
        TokenKind::CharacterLiteral => {
            let mut chars = token.text.chars();
            match (chars.next(), chars.next()) {
                (Some(value), None) => node.attach_character("value", value),
                _ => return Err(SyntaxError::invalid_literal(&token.text, &token.start)),
            }
        }
        TokenKind::StringLiteral => node.attach_string("value", token.text.as_str()),
        TokenKind::NullLiteral => node.attach_null("value"),
        _ => return Err(SyntaxError::expected_primary(&token.describe(), &token.start)),
    }

    parser.advance();
    Ok(node)
}

/// PrimaryExpr := Identifier | NumericLiteral | BooleanLiteral
///              | CharacterLiteral | StringLiteral | NullLiteral
pub fn parse_primary(parser: &mut dyn Parser) -> SyntaxResult<Node> {
    parser.trace_rule("primary_expression");

    let kind = parser.current().kind;
    match kind {
        TokenKind::Identifier => parse_identifier(parser),
        _ if kind.is_primary() => parse_literal(parser),
        _ => {
            let token = parser.current();
            Err(SyntaxError::expected_primary(&token.describe(), &token.start))
        }
    }
}
