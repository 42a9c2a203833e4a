//! Positional syntax tree for parsed template documents.
//!
//! A [`Node`] is a faithful, low-level mirror of a YAML/JSON document: null,
//! boolean, number, string, list, and object literals. Every node optionally
//! carries a [`Syntax`] handle that records where it came from so later
//! stages can attach diagnostics to the right place in the source.
//!
//! No validation happens here. Objects may contain duplicate keys and nulls
//! may appear anywhere; the binder that consumes the tree decides what is
//! legal.
//!
//! # Example
//!
//! ```
//! use stackform_core::syntax::{Node, ObjectPropertyDef, StringNode};
//!
//! let doc = Node::object(vec![
//!     ObjectPropertyDef::new(StringNode::new("name"), Node::string("web")),
//!     ObjectPropertyDef::new(
//!         StringNode::new("ports"),
//!         Node::list(vec![Node::number(80.0), Node::number(443.0)]),
//!     ),
//! ]);
//!
//! assert_eq!(doc.to_string(), "{ name: web, ports: [ 80, 443 ] }");
//! ```

use std::fmt;

/// A position in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pos {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
    /// 0-based byte offset.
    pub byte: usize,
}

impl Pos {
    pub const fn new(line: usize, column: usize, byte: usize) -> Self {
        Self { line, column, byte }
    }
}

/// A span of text in a named source file.
///
/// # Examples
///
/// ```
/// use stackform_core::syntax::{Pos, Range};
///
/// let single = Range::new("Pulumi.yaml", Pos::new(3, 5, 20), Pos::new(3, 9, 24));
/// assert_eq!(single.to_string(), "Pulumi.yaml:3,5-9");
///
/// let multi = Range::new("Pulumi.yaml", Pos::new(3, 5, 20), Pos::new(4, 2, 30));
/// assert_eq!(multi.to_string(), "Pulumi.yaml:3,5-4,2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Range {
    pub filename: String,
    pub start: Pos,
    pub end: Pos,
}

impl Range {
    pub fn new(filename: impl Into<String>, start: Pos, end: Pos) -> Self {
        Self {
            filename: filename.into(),
            start,
            end,
        }
    }

    /// A zero-width range at a single position.
    pub fn at(filename: impl Into<String>, pos: Pos) -> Self {
        Self::new(filename, pos, pos)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{},{}-{}",
                self.filename, self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(
                f,
                "{}:{},{}-{},{}",
                self.filename, self.start.line, self.start.column, self.end.line, self.end.column
            )
        }
    }
}

/// Source provenance for a node: its range and, when available, the
/// original text it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Syntax {
    pub range: Range,
    pub text: Option<String>,
}

impl Syntax {
    pub fn new(range: Range) -> Self {
        Self { range, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// A null literal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NullNode {
    syntax: Option<Syntax>,
}

impl NullNode {
    pub fn with_syntax(syntax: Option<Syntax>) -> Self {
        Self { syntax }
    }

    pub fn syntax(&self) -> Option<&Syntax> {
        self.syntax.as_ref()
    }
}

/// A boolean literal.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanNode {
    syntax: Option<Syntax>,
    value: bool,
}

impl BooleanNode {
    pub fn new(value: bool) -> Self {
        Self::with_syntax(None, value)
    }

    pub fn with_syntax(syntax: Option<Syntax>, value: bool) -> Self {
        Self { syntax, value }
    }

    pub fn syntax(&self) -> Option<&Syntax> {
        self.syntax.as_ref()
    }

    pub fn value(&self) -> bool {
        self.value
    }
}

/// A number literal. All numbers are 64-bit floats at this layer.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberNode {
    syntax: Option<Syntax>,
    value: f64,
}

impl NumberNode {
    pub fn new(value: f64) -> Self {
        Self::with_syntax(None, value)
    }

    pub fn with_syntax(syntax: Option<Syntax>, value: f64) -> Self {
        Self { syntax, value }
    }

    pub fn syntax(&self) -> Option<&Syntax> {
        self.syntax.as_ref()
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// A string literal.
#[derive(Debug, Clone, PartialEq)]
pub struct StringNode {
    syntax: Option<Syntax>,
    value: String,
}

impl StringNode {
    pub fn new(value: impl Into<String>) -> Self {
        Self::with_syntax(None, value)
    }

    pub fn with_syntax(syntax: Option<Syntax>, value: impl Into<String>) -> Self {
        Self {
            syntax,
            value: value.into(),
        }
    }

    pub fn syntax(&self) -> Option<&Syntax> {
        self.syntax.as_ref()
    }

    pub fn range(&self) -> Option<&Range> {
        self.syntax.as_ref().map(|s| &s.range)
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// An ordered, possibly heterogeneous list of nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListNode {
    syntax: Option<Syntax>,
    elements: Vec<Node>,
}

impl ListNode {
    pub fn new(elements: Vec<Node>) -> Self {
        Self::with_syntax(None, elements)
    }

    pub fn with_syntax(syntax: Option<Syntax>, elements: Vec<Node>) -> Self {
        Self { syntax, elements }
    }

    pub fn syntax(&self) -> Option<&Syntax> {
        self.syntax.as_ref()
    }

    /// Returns the number of elements in the list.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the `i`th element.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn index(&self, i: usize) -> &Node {
        &self.elements[i]
    }

    pub fn elements(&self) -> impl ExactSizeIterator<Item = &Node> {
        self.elements.iter()
    }
}

/// A single `key: value` definition inside an [`ObjectNode`].
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPropertyDef {
    /// Syntax of the whole property, if any.
    pub syntax: Option<Syntax>,
    pub key: StringNode,
    pub value: Node,
}

impl ObjectPropertyDef {
    pub fn new(key: StringNode, value: Node) -> Self {
        Self::with_syntax(None, key, value)
    }

    pub fn with_syntax(syntax: Option<Syntax>, key: StringNode, value: Node) -> Self {
        Self { syntax, key, value }
    }
}

/// An ordered list of key/value definitions. Keys are neither deduplicated
/// nor reordered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectNode {
    syntax: Option<Syntax>,
    entries: Vec<ObjectPropertyDef>,
}

impl ObjectNode {
    pub fn new(entries: Vec<ObjectPropertyDef>) -> Self {
        Self::with_syntax(None, entries)
    }

    pub fn with_syntax(syntax: Option<Syntax>, entries: Vec<ObjectPropertyDef>) -> Self {
        Self { syntax, entries }
    }

    pub fn syntax(&self) -> Option<&Syntax> {
        self.syntax.as_ref()
    }

    /// Returns the number of properties in the object.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the `i`th property.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn index(&self, i: usize) -> &ObjectPropertyDef {
        &self.entries[i]
    }

    pub fn entries(&self) -> impl ExactSizeIterator<Item = &ObjectPropertyDef> {
        self.entries.iter()
    }
}

/// A single node in a parsed document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null(NullNode),
    Boolean(BooleanNode),
    Number(NumberNode),
    String(StringNode),
    List(ListNode),
    Object(ObjectNode),
}

impl Node {
    pub fn null() -> Self {
        Node::Null(NullNode::default())
    }

    pub fn boolean(value: bool) -> Self {
        Node::Boolean(BooleanNode::new(value))
    }

    pub fn number(value: f64) -> Self {
        Node::Number(NumberNode::new(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Node::String(StringNode::new(value))
    }

    pub fn list(elements: Vec<Node>) -> Self {
        Node::List(ListNode::new(elements))
    }

    pub fn object(entries: Vec<ObjectPropertyDef>) -> Self {
        Node::Object(ObjectNode::new(entries))
    }

    /// Returns the syntax this node was constructed with, if any.
    pub fn syntax(&self) -> Option<&Syntax> {
        match self {
            Node::Null(n) => n.syntax(),
            Node::Boolean(n) => n.syntax(),
            Node::Number(n) => n.syntax(),
            Node::String(n) => n.syntax(),
            Node::List(n) => n.syntax(),
            Node::Object(n) => n.syntax(),
        }
    }

    /// Returns the source range of this node, if any.
    pub fn range(&self) -> Option<&Range> {
        self.syntax().map(|s| &s.range)
    }

    /// Short human label for the node's shape, used in binder messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Null(_) => "null",
            Node::Boolean(_) => "boolean",
            Node::Number(_) => "number",
            Node::String(_) => "string",
            Node::List(_) => "list",
            Node::Object(_) => "object",
        }
    }
}

impl From<StringNode> for Node {
    fn from(node: StringNode) -> Self {
        Node::String(node)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null(_) => f.write_str("null"),
            Node::Boolean(n) => write!(f, "{}", n.value),
            Node::Number(n) => write!(f, "{}", n.value),
            Node::String(n) => f.write_str(&n.value),
            Node::List(n) => {
                if n.elements.is_empty() {
                    return f.write_str("[ ]");
                }
                f.write_str("[ ")?;
                for (i, e) in n.elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{e}")?;
                }
                f.write_str(" ]")
            }
            Node::Object(n) => {
                if n.entries.is_empty() {
                    return f.write_str("{ }");
                }
                f.write_str("{ ")?;
                for (i, e) in n.entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", e.key.value, e.value)?;
                }
                f.write_str(" }")
            }
        }
    }
}
