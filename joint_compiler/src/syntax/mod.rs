//! Syntax analysis: TokenStream to syntax tree
//!
//! The grammar builders in `grammar::builders` define the productions;
//! this module drives them over a token stream and reports failures
//! through the global logging system.

mod error;
mod parser;

pub use crate::grammar::ast::nodes::Node;
pub use error::{SyntaxError, SyntaxResult};
pub use parser::{create_parser, JointParser};

use crate::config::compile_time::syntax::*;
use crate::logging::codes;
use crate::tokens::TokenStream;
use crate::log_debug;

/// Parse a complete token stream into the Program root
pub fn parse_program(token_stream: TokenStream) -> SyntaxResult<Node> {
    log_debug!("Starting syntax analysis", "tokens" => token_stream.len());
    JointParser::new(token_stream).parse_program()
}

/// Check that every syntax code is registered
pub fn init_syntax_logging() -> Result<(), String> {
    let test_codes = [
        codes::syntax::UNEXPECTED_TOKEN,
        codes::syntax::EXPECTED_PRIMARY_EXPRESSION,
        codes::syntax::UNEXPECTED_KEYWORD,
        codes::syntax::INVALID_LITERAL,
        codes::syntax::CALL_CHAIN_TOO_DEEP,
        codes::syntax::INTERNAL_PARSER_ERROR,
        codes::success::AST_CONSTRUCTION_COMPLETE,
    ];

    for code in &test_codes {
        if codes::get_description(code.as_str()) == "Unknown error" {
            return Err(format!(
                "Syntax error code {} has no description",
                code.as_str()
            ));
        }
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Syntax error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    log_debug!("Syntax limits initialized",
        "max_call_chain_depth" => MAX_CALL_CHAIN_DEPTH,
        "max_error_history" => MAX_ERROR_HISTORY
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::ast::nodes::{ChildValue, NodeKind};
    use crate::lexical::tokenize;
    use assert_matches::assert_matches;

    fn parse(source: &str) -> Node {
        parse_program(tokenize(source, "t.jnt").unwrap()).unwrap()
    }

    fn parse_err(source: &str) -> SyntaxError {
        parse_program(tokenize(source, "t.jnt").unwrap()).unwrap_err()
    }

    fn body(program: &Node) -> Vec<&Node> {
        program
            .children_named("body")
            .filter_map(ChildValue::as_node)
            .collect()
    }

    fn value(node: &Node) -> &ChildValue {
        node.child("value").unwrap()
    }

    #[test]
    fn test_variable_declaration() {
        let program = parse("let x: Int = 5;");
        let statements = body(&program);
        assert_eq!(statements.len(), 1);

        let decl = statements[0];
        assert_eq!(decl.kind, NodeKind::VariableDeclaration);
        assert_eq!(value(decl.node_child("id").unwrap()).as_str(), Some("x"));
        assert_eq!(value(decl.node_child("type").unwrap()).as_str(), Some("Int"));
        assert_eq!(decl.child("optional").and_then(ChildValue::as_bool), Some(false));

        let init = decl.node_child("init").unwrap();
        assert_eq!(init.kind, NodeKind::Literal);
        assert_eq!(value(init).as_number(), Some(5.0));

        let names: Vec<_> = decl.iter().map(|child| child.name).collect();
        assert_eq!(names, ["id", "type", "optional", "init"]);
        assert_eq!(decl.start.offset, 0);
        assert_eq!(decl.end.offset, 15);
    }

    #[test]
    fn test_optional_variable_declaration() {
        let program = parse("let name: String? = null;");
        let decl = body(&program)[0];
        assert_eq!(decl.child("optional").and_then(ChildValue::as_bool), Some(true));
        assert!(value(decl.node_child("init").unwrap()).is_null());
    }

    #[test]
    fn test_literal_values() {
        let program = parse("f(true, false, 'c', \"s\", null, 42);");
        let call = body(&program)[0];
        let arguments: Vec<_> = call
            .children_named("argument")
            .filter_map(ChildValue::as_node)
            .map(value)
            .collect();

        assert_eq!(arguments[0].as_bool(), Some(true));
        assert_eq!(arguments[1].as_bool(), Some(false));
        assert_eq!(arguments[2].as_char(), Some('c'));
        assert_eq!(arguments[3].as_str(), Some("s"));
        assert!(arguments[4].is_null());
        assert_eq!(arguments[5].as_number(), Some(42.0));
    }

    #[test]
    fn test_import_declaration() {
        let program = parse("import { a, b } from \"mod\";");
        let import = body(&program)[0];
        assert_eq!(import.kind, NodeKind::ImportDeclaration);

        let specifiers: Vec<_> = import
            .children_named("specifier")
            .filter_map(ChildValue::as_node)
            .map(|node| value(node).as_str().unwrap())
            .collect();
        assert_eq!(specifiers, ["a", "b"]);

        let source = import.node_child("source").unwrap();
        assert_eq!(source.kind, NodeKind::Literal);
        assert_eq!(value(source).as_str(), Some("mod"));
        assert_eq!(import.end.offset, 27);
    }

    #[test]
    fn test_import_needs_a_specifier() {
        assert_matches!(
            parse_err("import { } from \"mod\";"),
            SyntaxError::UnexpectedToken { ref expected, .. } if expected == "identifier"
        );
    }

    #[test]
    fn test_call_without_arguments() {
        let program = parse("f();");
        let call = body(&program)[0];
        assert_eq!(call.kind, NodeKind::CallExpression);
        assert_eq!(value(call.node_child("callee").unwrap()).as_str(), Some("f"));
        assert_eq!(call.children_named("argument").count(), 0);
    }

    #[test]
    fn test_call_arguments_in_order() {
        let program = parse("f(1, 2);");
        let call = body(&program)[0];
        let arguments: Vec<_> = call
            .children_named("argument")
            .filter_map(ChildValue::as_node)
            .map(|node| {
                assert_eq!(node.kind, NodeKind::Literal);
                value(node).as_number().unwrap()
            })
            .collect();
        assert_eq!(arguments, [1.0, 2.0]);
    }

    #[test]
    fn test_call_end_is_closing_paren() {
        let source = "  f(1, 2) ;";
        let tokens = tokenize(source, "t.jnt").unwrap();
        let close = tokens
            .iter()
            .find(|token| token.is_punctuator(")"))
            .unwrap()
            .end
            .clone();

        let program = parse_program(tokens).unwrap();
        let call = body(&program)[0];
        assert_eq!(call.end, close);
        assert_eq!(call.start.offset, 0);
        // The statement's ';' does not widen the call
        assert_eq!(program.end, close);
    }

    #[test]
    fn test_chained_calls_nest() {
        let program = parse("f()(1);");
        let outer = body(&program)[0];
        assert_eq!(outer.kind, NodeKind::CallExpression);
        assert_eq!(outer.end.offset, 6);

        let inner = outer.node_child("callee").unwrap();
        assert_eq!(inner.kind, NodeKind::CallExpression);
        assert_eq!(inner.end.offset, 3);
        assert_eq!(value(inner.node_child("callee").unwrap()).as_str(), Some("f"));
    }

    #[test]
    fn test_call_chain_depth_limit() {
        let mut source = String::from("f");
        for _ in 0..MAX_CALL_CHAIN_DEPTH {
            source.push_str("()");
        }
        source.push(';');
        assert!(parse_program(tokenize(&source, "t.jnt").unwrap()).is_ok());

        source.insert_str(source.len() - 1, "()");
        let error = parse_err(&source);
        assert_matches!(error, SyntaxError::CallChainTooDeep { depth, .. } if depth == MAX_CALL_CHAIN_DEPTH + 1);
        assert_eq!(error.error_code().as_str(), "E044");
    }

    #[test]
    fn test_comments_become_nodes() {
        let program = parse("# note\nf();");
        let statements = body(&program);
        assert_eq!(statements[0].kind, NodeKind::Comment);
        assert_eq!(value(statements[0]).as_str(), Some(" note"));
        assert_eq!(statements[1].kind, NodeKind::CallExpression);
    }

    #[test]
    fn test_empty_program() {
        let program = parse("  \n");
        assert_eq!(program.kind, NodeKind::Program);
        assert!(program.children.is_empty());
        assert_eq!(program.start.offset, 0);
        assert_eq!(program.end.offset, 3);
    }

    #[test]
    fn test_program_spans_statements() {
        let program = parse("f();\nlet x: T = 1;");
        assert_eq!(program.start.offset, 0);
        assert_eq!(program.end.offset, 18);
        assert_eq!(body(&program).len(), 2);
    }

    #[test]
    fn test_missing_type_is_rejected_at_equals() {
        let source = "let x = 5;";
        let tokens = tokenize(source, "t.jnt").unwrap();
        let equals = tokens
            .iter()
            .find(|token| token.is_punctuator("="))
            .unwrap()
            .start
            .clone();

        let error = parse_program(tokens).unwrap_err();
        assert_matches!(error, SyntaxError::UnexpectedToken { ref expected, ref found, .. }
            if expected == "':'" && found == "'='");
        assert_eq!(error.position(), Some(&equals));
        assert_eq!(error.error_code().as_str(), "E040");
    }

    #[test]
    fn test_from_cannot_start_a_statement() {
        let error = parse_err("f();\nfrom");
        assert_matches!(error, SyntaxError::UnexpectedKeyword { ref keyword, .. } if keyword == "from");
        assert_eq!(error.position().map(|p| p.offset), Some(4));
    }

    #[test]
    fn test_punctuator_cannot_start_a_statement() {
        assert_matches!(
            parse_err(";"),
            SyntaxError::ExpectedPrimaryExpression { ref found, .. } if found == "';'"
        );
    }

    #[test]
    fn test_missing_semicolon() {
        assert_matches!(
            parse_err("f()"),
            SyntaxError::UnexpectedToken { ref found, .. } if found == "end of input"
        );
    }

    #[test]
    fn test_out_of_range_number_is_invalid_literal() {
        let digits = "9".repeat(400);
        let error = parse_err(&format!("f({});", digits));
        assert_matches!(error, SyntaxError::InvalidLiteral { ref text, .. } if *text == digits);
        assert_eq!(error.error_code().as_str(), "E043");
        assert_eq!(error.position().map(|p| p.offset), Some(2));

        // Large but finite values are still accepted
        let program = parse(&format!("f({});", "9".repeat(300)));
        let argument = body(&program)[0].node_child("argument").unwrap();
        assert!(value(argument).as_number().unwrap().is_finite());
    }

    #[test]
    fn test_init_must_be_primary() {
        assert_matches!(
            parse_err("let x: T = ;"),
            SyntaxError::ExpectedPrimaryExpression { .. }
        );
    }

    #[test]
    fn test_multiline_string_shifts_following_line() {
        let program = parse("let s: String = \"a\nb\";\nf();");
        let statements = body(&program);
        let literal = statements[0].node_child("init").unwrap();
        assert_eq!(value(literal).as_str(), Some("a\nb"));
        assert_eq!(literal.end.line, 1);
        // The call sits on the line after the string ends
        assert_eq!(statements[1].node_child("callee").unwrap().end.line, 2);
    }

    #[test]
    fn test_init_syntax_logging() {
        assert!(init_syntax_logging().is_ok());
    }
}
