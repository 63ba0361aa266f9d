//! Line-oriented text dumps of tokens and trees
//!
//! Positions print as `p <offset> l <line> c <column>`, all 0-based.
//! Text payloads are written verbatim; embedded newlines are not escaped.

use crate::grammar::ast::nodes::{ChildValue, Node};
use crate::tokens::{Token, TokenStream};

const INDENT_WIDTH: usize = 4;

pub fn format_token(token: &Token) -> String {
    format!(
        "TYPE: {}\nVALUE: \"{}\"\nSTART: {}\nEND: {}\n---\n",
        token.kind,
        token.text,
        token.start.triple(),
        token.end.triple()
    )
}

/// One block per token, end-of-input included
pub fn format_tokens(tokens: &TokenStream) -> String {
    tokens.iter().map(format_token).collect()
}

pub fn format_node(node: &Node) -> String {
    let mut output = String::new();
    write_node(&mut output, node, 0);
    output
}

fn write_node(output: &mut String, node: &Node, level: usize) {
    let indent = " ".repeat(level * INDENT_WIDTH);

    output.push_str(&format!("{}TYPE: {}\n", indent, node.kind));
    output.push_str(&format!("{}START: {}\n", indent, node.start.triple()));
    output.push_str(&format!("{}END: {}\n", indent, node.end.triple()));

    if node.children.is_empty() {
        output.push_str(&format!("{}CHILDRENS: ~\n", indent));
        return;
    }

    output.push_str(&format!("{}CHILDRENS:\n", indent));
    for child in node {
        output.push_str(&format!("{}    {}:", indent, child.name));
        match &child.value {
            ChildValue::Node(inner) => {
                output.push('\n');
                write_node(output, inner, level + 2);
            }
            ChildValue::Number(value) => output.push_str(&format!(" {:.6}\n", value)),
            ChildValue::Boolean(value) => output.push_str(&format!(" {}\n", value)),
            ChildValue::Character(value) => output.push_str(&format!(" '{}'\n", value)),
            ChildValue::String(value) => output.push_str(&format!(" \"{}\"\n", value)),
            ChildValue::Null => output.push_str(" null\n"),
        }
    }
}
