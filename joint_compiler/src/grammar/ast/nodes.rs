//! Generic labeled syntax tree for Joint programs
//!
//! Every node carries a kind tag, its start/end positions and an ordered
//! list of named children. Attachment order is grammar order; printers and
//! consumers rely on it.

use crate::utils::{SourcePosition, Span};
use serde::Serialize;
use std::fmt;

/// Closed set of node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    #[serde(rename = "PROGRAM_NODE")]
    Program,
    #[serde(rename = "COMMENT_NODE")]
    Comment,
    #[serde(rename = "IDENTIFIER_NODE")]
    Identifier,
    #[serde(rename = "LITERAL_NODE")]
    Literal,
    #[serde(rename = "CALL_EXPRESSION_NODE")]
    CallExpression,
    #[serde(rename = "IMPORT_DECLARATION_NODE")]
    ImportDeclaration,
    #[serde(rename = "VARIABLE_DECLARATION_NODE")]
    VariableDeclaration,
}

impl NodeKind {
    /// Name used by the tree printer
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Program => "PROGRAM_NODE",
            Self::Comment => "COMMENT_NODE",
            Self::Identifier => "IDENTIFIER_NODE",
            Self::Literal => "LITERAL_NODE",
            Self::CallExpression => "CALL_EXPRESSION_NODE",
            Self::ImportDeclaration => "IMPORT_DECLARATION_NODE",
            Self::VariableDeclaration => "VARIABLE_DECLARATION_NODE",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of one named child
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildValue {
    Node(Box<Node>),
    Number(f64),
    Boolean(bool),
    Character(char),
    String(String),
    Null,
}

impl ChildValue {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Character(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Child {
    pub name: &'static str,
    pub value: ChildValue,
}

/// One syntax tree node; children are owned, so dropping the root frees the tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub kind: NodeKind,
    pub start: SourcePosition,
    pub end: SourcePosition,
    pub children: Vec<Child>,
}

impl Node {
    pub fn new(kind: NodeKind, start: SourcePosition, end: SourcePosition) -> Self {
        Self {
            kind,
            start,
            end,
            children: Vec::new(),
        }
    }

    fn attach(&mut self, name: &'static str, value: ChildValue) {
        self.children.push(Child { name, value });
    }

    pub fn attach_node(&mut self, name: &'static str, node: Node) {
        self.attach(name, ChildValue::Node(Box::new(node)));
    }

    pub fn attach_number(&mut self, name: &'static str, value: f64) {
        self.attach(name, ChildValue::Number(value));
    }

    pub fn attach_boolean(&mut self, name: &'static str, value: bool) {
        self.attach(name, ChildValue::Boolean(value));
    }

    pub fn attach_character(&mut self, name: &'static str, value: char) {
        self.attach(name, ChildValue::Character(value));
    }

    pub fn attach_string(&mut self, name: &'static str, value: impl Into<String>) {
        self.attach(name, ChildValue::String(value.into()));
    }

    pub fn attach_null(&mut self, name: &'static str) {
        self.attach(name, ChildValue::Null);
    }

    /// Re-stamp the end position once the closing token is consumed
    pub fn set_end(&mut self, end: SourcePosition) {
        self.end = end;
    }

    pub fn span(&self) -> Span {
        Span::new(self.start.clone(), self.end.clone())
    }

    /// First child with the given name
    pub fn child(&self, name: &str) -> Option<&ChildValue> {
        self.children
            .iter()
            .find(|child| child.name == name)
            .map(|child| &child.value)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ChildValue> + 'a {
        self.children
            .iter()
            .filter(move |child| child.name == name)
            .map(|child| &child.value)
    }

    pub fn node_child(&self, name: &str) -> Option<&Node> {
        self.child(name).and_then(ChildValue::as_node)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Child> {
        self.children.iter()
    }

    /// True when no child is itself a node
    pub fn is_leaf(&self) -> bool {
        !self
            .children
            .iter()
            .any(|child| matches!(child.value, ChildValue::Node(_)))
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = &'a Child;
    type IntoIter = std::slice::Iter<'a, Child>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn position(offset: usize) -> SourcePosition {
        SourcePosition::new(Arc::from("t.jnt"), offset, 0, offset as u32)
    }

    fn identifier(name: &str, offset: usize) -> Node {
        let mut node = Node::new(
            NodeKind::Identifier,
            position(offset),
            position(offset + name.len()),
        );
        node.attach_string("value", name);
        node
    }

    #[test]
    fn test_children_keep_attachment_order() {
        let mut call = Node::new(NodeKind::CallExpression, position(0), position(1));
        call.attach_node("callee", identifier("f", 0));
        call.attach_number("argument", 1.0);
        call.attach_number("argument", 2.0);

        let names: Vec<_> = call.iter().map(|child| child.name).collect();
        assert_eq!(names, ["callee", "argument", "argument"]);

        let arguments: Vec<_> = call
            .children_named("argument")
            .filter_map(ChildValue::as_number)
            .collect();
        assert_eq!(arguments, [1.0, 2.0]);
    }

    #[test]
    fn test_accessors() {
        let mut decl = Node::new(NodeKind::VariableDeclaration, position(0), position(10));
        decl.attach_node("id", identifier("x", 4));
        decl.attach_boolean("optional", true);
        decl.attach_character("init", 'c');
        decl.attach_null("extra");

        assert_eq!(
            decl.node_child("id").and_then(|id| id.child("value")).and_then(ChildValue::as_str),
            Some("x")
        );
        assert_eq!(decl.child("optional").and_then(ChildValue::as_bool), Some(true));
        assert_eq!(decl.child("init").and_then(ChildValue::as_char), Some('c'));
        assert!(decl.child("extra").is_some_and(ChildValue::is_null));
        assert!(decl.node_child("optional").is_none());
        assert!(decl.child("missing").is_none());
    }

    #[test]
    fn test_is_leaf() {
        let leaf = identifier("a", 0);
        assert!(leaf.is_leaf());

        let mut program = Node::new(NodeKind::Program, position(0), position(0));
        assert!(program.is_leaf());
        program.attach_node("body", leaf);
        assert!(!program.is_leaf());
    }

    #[test]
    fn test_set_end() {
        let mut call = Node::new(NodeKind::CallExpression, position(0), position(1));
        call.set_end(position(3));
        assert_eq!(call.end.offset, 3);
        assert_eq!(call.span().len(), 3);
    }

    #[test]
    fn test_serializes_kind_names() {
        let json = serde_json::to_value(identifier("a", 0)).unwrap();
        assert_eq!(json["kind"], "IDENTIFIER_NODE");
        assert_eq!(json["children"][0]["name"], "value");
        assert_eq!(json["children"][0]["value"]["string"], "a");
    }
}
