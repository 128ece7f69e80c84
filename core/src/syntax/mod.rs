//! Generic block-structured syntax tree
//!
//! The tree knows nothing about actions or workflows: it is a nested list of
//! `key... = value` / `key... { ... }` items whose values are literals, lists or
//! objects. Every node carries the position it was read from, so later passes
//! can point diagnostics at the offending text.

mod reader;


pub use reader::read;

use crate::diagnostics::Position;

/// Scalar literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(i64),
    Float(f64),
    Bool(bool),
}

impl Literal {
    /// Name of the literal type, as used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::String(_) => "string",
            Literal::Number(_) => "number",
            Literal::Float(_) => "float",
            Literal::Bool(_) => "bool",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralNode {
    pub value: Literal,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListNode {
    pub items: Vec<Node>,
    /// Position of the opening bracket
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectNode {
    pub list: ObjectList,
    /// Position of the opening brace
    pub position: Position,
}

/// Any value on the right-hand side of an item
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Literal(LiteralNode),
    List(ListNode),
    Object(ObjectNode),
}

impl Node {
    pub fn position(&self) -> &Position {
        match self {
            Node::Literal(literal) => &literal.position,
            Node::List(list) => &list.position,
            Node::Object(object) => &object.position,
        }
    }

    /// Name of the node type, as used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Literal(literal) => literal.value.type_name(),
            Node::List(_) => "list",
            Node::Object(_) => "object",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Bare identifier, e.g. `uses`
    Ident,
    /// Double-quoted string, e.g. `"uses"`
    String,
}

/// One key of an item
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectKey {
    pub kind: KeyKind,
    /// Decoded key (quotes removed, escapes resolved)
    pub name: String,
    /// Key exactly as written in the source
    pub text: String,
    pub position: Position,
}

/// `key... = value` or `key... { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectItem {
    pub keys: Vec<ObjectKey>,
    /// Position of the `=`, if the item is an assignment
    pub assign: Option<Position>,
    pub value: Node,
}

impl ObjectItem {
    /// A plain `key = value` item
    pub fn is_assignment(&self) -> bool {
        self.keys.len() == 1 && self.assign.is_some()
    }

    /// Position of the first key, falling back to the value
    pub fn key_position(&self) -> &Position {
        self.keys
            .first()
            .map(|key| &key.position)
            .unwrap_or_else(|| self.value.position())
    }
}

/// Ordered list of items: the root of a file, or the inside of `{ ... }`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectList {
    pub items: Vec<ObjectItem>,
}
