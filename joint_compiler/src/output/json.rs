//! Pretty JSON dumps over the serde-derived token and node types

use crate::grammar::ast::nodes::Node;
use crate::tokens::TokenStream;

pub fn tokens_to_json(tokens: &TokenStream) -> serde_json::Result<String> {
    serde_json::to_string_pretty(tokens.tokens())
}

pub fn node_to_json(node: &Node) -> serde_json::Result<String> {
    serde_json::to_string_pretty(node)
}
