//! Program and statement builders
//!
//! ```text
//! Program    := (Comment | ImportDecl | VarDecl | CallStmt)* EOF
//! ImportDecl := 'import' '{' Identifier (',' Identifier)* '}' 'from' StringLiteral ';'
//! VarDecl    := 'let' Identifier ':' Identifier '?'? '=' PrimaryExpr ';'
//! CallStmt   := LeftHandSideExpr ';'
//! ```

use super::atomic::{parse_identifier, parse_primary, Parser};
use super::expressions::parse_left_hand_side;
use crate::grammar::ast::nodes::{ChildValue, Node, NodeKind};
use crate::syntax::{SyntaxError, SyntaxResult};
use crate::tokens::TokenKind;

/// Parse statements until end of input into the Program root
pub fn parse_program(parser: &mut dyn Parser) -> SyntaxResult<Node> {
    parser.trace_rule("program");

    let first = parser.current();
    let mut program = Node::new(NodeKind::Program, first.start.clone(), first.end.clone());

    while !parser.current().is_eof() {
        let statement = parse_statement(parser)?;
        program.attach_node("body", statement);
    }

    let end = match program.children.last().map(|child| &child.value) {
        Some(ChildValue::Node(last)) => last.end.clone(),
        _ => parser.current().end.clone(),
    };
    program.set_end(end);

    Ok(program)
}

/// Pick the production from the lookahead's kind and text
pub fn parse_statement(parser: &mut dyn Parser) -> SyntaxResult<Node> {
    let token = parser.current().clone();

    match token.kind {
        TokenKind::Comment => parse_comment(parser),
        TokenKind::Keyword if token.text == "import" => parse_import_declaration(parser),
        TokenKind::Keyword if token.text == "let" => parse_variable_declaration(parser),
        TokenKind::Keyword => Err(SyntaxError::unexpected_keyword(&token.text, &token.start)),
        TokenKind::Punctuator => Err(SyntaxError::expected_primary(
            &token.describe(),
            &token.start,
        )),
        _ => parse_call_statement(parser),
    }
}

pub fn parse_comment(parser: &mut dyn Parser) -> SyntaxResult<Node> {
    let token = parser.expect_kind(TokenKind::Comment)?;
    let mut node = Node::new(NodeKind::Comment, token.start, token.end);
    node.attach_string("value", token.text);
    Ok(node)
}

pub fn parse_import_declaration(parser: &mut dyn Parser) -> SyntaxResult<Node> {
    parser.trace_rule("import_declaration");

    let keyword = parser.expect_keyword("import")?;
    let mut node = Node::new(NodeKind::ImportDeclaration, keyword.start, keyword.end);

    parser.expect_punctuator("{")?;
    node.attach_node("specifier", parse_identifier(parser)?);
    while parser.current().is_punctuator(",") {
        parser.advance();
        node.attach_node("specifier", parse_identifier(parser)?);
    }
    parser.expect_punctuator("}")?;

    parser.expect_keyword("from")?;
    let source = parser.expect_kind(TokenKind::StringLiteral)?;
    let mut literal = Node::new(NodeKind::Literal, source.start, source.end);
    literal.attach_string("value", source.text);
    node.attach_node("source", literal);

    let semicolon = parser.expect_punctuator(";")?;
    node.set_end(semicolon.end);

    Ok(node)
}

pub fn parse_variable_declaration(parser: &mut dyn Parser) -> SyntaxResult<Node> {
    parser.trace_rule("variable_declaration");

    let keyword = parser.expect_keyword("let")?;
    let mut node = Node::new(NodeKind::VariableDeclaration, keyword.start, keyword.end);

    node.attach_node("id", parse_identifier(parser)?);
    parser.expect_punctuator(":")?;
    node.attach_node("type", parse_identifier(parser)?);

    let optional = parser.current().is_punctuator("?");
    if optional {
        parser.advance();
    }
    node.attach_boolean("optional", optional);

    parser.expect_punctuator("=")?;
    node.attach_node("init", parse_primary(parser)?);

    let semicolon = parser.expect_punctuator(";")?;
    node.set_end(semicolon.end);

    Ok(node)
}

/// The statement's node is the expression itself; the `;` does not widen it
pub fn parse_call_statement(parser: &mut dyn Parser) -> SyntaxResult<Node> {
    parser.trace_rule("call_statement");

    let expression = parse_left_hand_side(parser)?;
    parser.expect_punctuator(";")?;
    Ok(expression)
}
