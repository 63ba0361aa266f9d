//! Call expression builders
//!
//! LeftHandSideExpr := PrimaryExpr ('(' Arg (',' Arg)* ')' | '(' ')')*
//!
//! Each call suffix wraps the expression built so far, so `f()(1)` is a
//! call whose callee is the call `f()`.

use super::atomic::{parse_primary, Parser};
use crate::config::compile_time::syntax::MAX_CALL_CHAIN_DEPTH;
use crate::grammar::ast::nodes::{Node, NodeKind};
use crate::syntax::{SyntaxError, SyntaxResult};

pub fn parse_left_hand_side(parser: &mut dyn Parser) -> SyntaxResult<Node> {
    parser.trace_rule("left_hand_side_expression");

    let mut expression = parse_primary(parser)?;
    let mut depth = 0;

    while parser.current().is_punctuator("(") {
        depth += 1;
        if depth > MAX_CALL_CHAIN_DEPTH {
            return Err(SyntaxError::call_chain_too_deep(
                depth,
                &parser.current().start,
            ));
        }
        expression = parse_call_expression(parser, expression)?;
    }

    Ok(expression)
}

/// One call suffix applied to `callee`. The node starts where the callee
/// starts and ends at the closing parenthesis.
pub fn parse_call_expression(parser: &mut dyn Parser, callee: Node) -> SyntaxResult<Node> {
    parser.trace_rule("call_expression");

    let mut call = Node::new(
        NodeKind::CallExpression,
        callee.start.clone(),
        callee.end.clone(),
    );
    call.attach_node("callee", callee);

    parser.expect_punctuator("(")?;
    for argument in parse_arguments(parser)? {
        call.attach_node("argument", argument);
    }
    let close = parser.expect_punctuator(")")?;
    call.set_end(close.end);

    Ok(call)
}

/// Arguments between the parentheses; the closing `)` is left for the caller
pub fn parse_arguments(parser: &mut dyn Parser) -> SyntaxResult<Vec<Node>> {
    let mut arguments = Vec::new();
    if parser.current().is_punctuator(")") {
        return Ok(arguments);
    }

    arguments.push(parse_primary(parser)?);
    while parser.current().is_punctuator(",") {
        parser.advance();
        arguments.push(parse_primary(parser)?);
    }

    Ok(arguments)
}
