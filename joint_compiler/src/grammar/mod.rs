//! Joint grammar: the syntax tree model and one builder per production

pub mod ast;
pub mod builders;

pub use ast::{Child, ChildValue, Node, NodeKind};
pub use builders::*;
