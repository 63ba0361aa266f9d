// Internal modules
pub mod config;
pub mod file_processor;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use grammar::ast::{Node, NodeKind};
pub use output::OutputFormat;
pub use pipeline::{parse_source, process_file, process_source, PipelineError, PipelineResult};
pub use tokens::{Token, TokenKind, TokenStream};
