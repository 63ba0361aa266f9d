//! Builder functions for Joint grammar productions

pub mod atomic;
pub mod expressions;
pub mod statements;

pub use atomic::{identifier_node, parse_identifier, parse_literal, parse_primary, Parser};
pub use expressions::{parse_arguments, parse_call_expression, parse_left_hand_side};
pub use statements::{
    parse_call_statement, parse_comment, parse_import_declaration, parse_program,
    parse_statement, parse_variable_declaration,
};
