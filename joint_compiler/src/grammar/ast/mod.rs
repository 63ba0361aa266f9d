//! Syntax tree produced by the parser

pub mod nodes;

pub use nodes::{Child, ChildValue, Node, NodeKind};
