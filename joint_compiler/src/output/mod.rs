//! Printers for the token stream and the syntax tree
//!
//! Everything printed here goes to stdout; diagnostics and log events
//! stay on stderr.

pub mod json;
pub mod text;

pub use json::{node_to_json, tokens_to_json};
pub use text::{format_node, format_token, format_tokens};

use crate::grammar::ast::nodes::Node;
use crate::tokens::TokenStream;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub fn render_tokens(tokens: &TokenStream, format: OutputFormat) -> Result<String, OutputError> {
    match format {
        OutputFormat::Text => Ok(format_tokens(tokens)),
        OutputFormat::Json => Ok(tokens_to_json(tokens)?),
    }
}

pub fn render_tree(node: &Node, format: OutputFormat) -> Result<String, OutputError> {
    match format {
        OutputFormat::Text => Ok(format_node(node)),
        OutputFormat::Json => Ok(node_to_json(node)?),
    }
}
