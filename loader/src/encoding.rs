//! Decodes YAML and JSON text into a [`Node`] tree.
//!
//! Both formats are read by the same event-driven YAML parser, JSON being a
//! subset of YAML. Every node records its source range, and scalars also
//! keep the exact text they were written as. Mappings keep every entry in
//! document order, repeated keys included: what a repeated key means is up
//! to the binder.

use serde::de::IgnoredAny;
use stackform_core::syntax::{
    BooleanNode, ListNode, NullNode, NumberNode, ObjectNode, ObjectPropertyDef, Pos, StringNode,
    Syntax,
};
use stackform_core::{Diagnostic, Diagnostics, Node, Range};
use tracing::debug;
use yaml_rust2::Yaml;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser, Tag};
use yaml_rust2::scanner::{Marker, TScalarStyle};

/// Decodes a YAML document. Only the first document of a stream is read.
///
/// # Examples
///
/// ```
/// use stackform_loader::encoding::decode_yaml;
///
/// let (node, diags) = decode_yaml("Pulumi.yaml", "name: web\nports: [80, 443]\n");
/// assert!(diags.is_empty());
/// let node = node.unwrap();
/// assert_eq!(node.to_string(), "{ name: web, ports: [ 80, 443 ] }");
/// assert_eq!(node.range().unwrap().to_string(), "Pulumi.yaml:1,1-2,17");
///
/// let (node, diags) = decode_yaml("Pulumi.yaml", "name: [unclosed\n");
/// assert!(node.is_none());
/// assert!(diags.has_errors());
/// ```
pub fn decode_yaml(filename: &str, text: &str) -> (Option<Node>, Diagnostics) {
    decode(filename, text, "YAML")
}

/// Decodes a JSON document.
///
/// The text must be valid JSON; it is then read with the YAML parser so
/// that nodes carry the same positions and repeated keys survive.
///
/// # Examples
///
/// ```
/// use stackform_loader::encoding::decode_json;
///
/// let (node, diags) = decode_json("Pulumi.json", r#"{"name": "web", "outputs": {}}"#);
/// assert!(diags.is_empty());
/// assert_eq!(node.unwrap().to_string(), "{ name: web, outputs: { } }");
/// ```
pub fn decode_json(filename: &str, text: &str) -> (Option<Node>, Diagnostics) {
    if let Err(err) = serde_json::from_str::<IgnoredAny>(text) {
        debug!(filename, error = %err, "JSON decode failed");
        let subject = (err.line() > 0)
            .then(|| Range::at(filename, Pos::new(err.line(), err.column(), 0)));
        let mut diags = Diagnostics::new();
        diags.push(Diagnostic::error(subject, "invalid JSON", err.to_string()));
        return (None, diags);
    }
    decode(filename, text, "JSON")
}

fn decode(filename: &str, text: &str, format: &str) -> (Option<Node>, Diagnostics) {
    let mut builder = NodeBuilder::new(filename, text);
    let mut parser = Parser::new_from_str(text);
    if let Err(err) = parser.load(&mut builder, false) {
        debug!(filename, format, error = %err, "decode failed");
        let subject = Range::at(filename, builder.pos(err.marker()));
        let mut diags = builder.diags;
        diags.push(Diagnostic::error(
            Some(subject),
            format!("invalid {format}"),
            err.to_string(),
        ));
        return (None, diags);
    }

    let (node, diags) = builder.finish();
    (Some(node), diags)
}

/// A collection whose end event has not arrived yet.
enum Frame {
    List {
        start: Pos,
        elements: Vec<Node>,
    },
    Object {
        start: Pos,
        entries: Vec<ObjectPropertyDef>,
        key: Option<StringNode>,
    },
}

/// Assembles parser events into a node tree.
struct NodeBuilder<'a> {
    filename: &'a str,
    text: &'a str,
    /// Byte offset of the start of each line.
    line_starts: Vec<usize>,
    stack: Vec<Frame>,
    root: Option<Node>,
    diags: Diagnostics,
}

impl<'a> NodeBuilder<'a> {
    fn new(filename: &'a str, text: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            filename,
            text,
            line_starts,
            stack: Vec::new(),
            root: None,
            diags: Diagnostics::new(),
        }
    }

    fn finish(self) -> (Node, Diagnostics) {
        // An empty stream has no document at all.
        (self.root.unwrap_or_else(Node::null), self.diags)
    }

    /// Converts a parser marker (1-based line, 0-based character column)
    /// to a position.
    fn pos(&self, mark: &Marker) -> Pos {
        let line = mark.line().max(1);
        let line_start = self
            .line_starts
            .get(line - 1)
            .copied()
            .unwrap_or(self.text.len());
        let byte = line_start
            + self.text[line_start..]
                .chars()
                .take(mark.col())
                .map(char::len_utf8)
                .sum::<usize>();
        Pos::new(line, mark.col() + 1, byte)
    }

    fn syntax(&self, start: Pos, end: Pos) -> Syntax {
        Syntax::new(Range::new(self.filename, start, end))
    }

    fn scalar(&mut self, value: String, style: TScalarStyle, tag: Option<&Tag>, mark: &Marker) {
        let start = self.pos(mark);
        let text = self.text;
        let raw = raw_scalar(&text[start.byte..], &value, style);
        let end = match raw {
            Some(raw) => advance(start, raw),
            None if matches!(style, TScalarStyle::Literal | TScalarStyle::Folded) => {
                advance(start, value.trim_end_matches('\n'))
            }
            None => start,
        };
        let mut syntax = self.syntax(start, end);
        if let Some(raw) = raw {
            syntax = syntax.with_text(raw);
        }
        self.check_tag(tag, &syntax.range);

        let forced_string = tag.and_then(core_tag) == Some("str");
        let node = if style == TScalarStyle::Plain && !forced_string {
            plain_scalar(Some(syntax), value)
        } else {
            Node::String(StringNode::with_syntax(Some(syntax), value))
        };
        self.complete(node);
    }

    /// Warns about tags other than the YAML core schema ones; the tagged
    /// value is decoded as if it were untagged.
    fn check_tag(&mut self, tag: Option<&Tag>, range: &Range) {
        let Some(tag) = tag else {
            return;
        };
        if core_tag(tag).is_some() {
            return;
        }
        self.diags.push(Diagnostic::warning(
            Some(range.clone()),
            format!("unsupported YAML tag '{}{}'", tag.handle, tag.suffix),
            "the tag is ignored",
        ));
    }

    fn open(&mut self, mark: &Marker, tag: Option<&Tag>, object: bool) {
        let start = self.pos(mark);
        self.check_tag(tag, &Range::at(self.filename, start));
        self.stack.push(if object {
            Frame::Object {
                start,
                entries: Vec::new(),
                key: None,
            }
        } else {
            Frame::List {
                start,
                elements: Vec::new(),
            }
        });
    }

    fn close(&mut self, mark: &Marker) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let node = match frame {
            Frame::List { start, elements } => {
                let end = self.collection_end(start, elements.last().and_then(Node::range), mark);
                Node::List(ListNode::with_syntax(
                    Some(self.syntax(start, end)),
                    elements,
                ))
            }
            Frame::Object { start, entries, .. } => {
                let last = entries.last().and_then(|e| e.value.range());
                let end = self.collection_end(start, last, mark);
                Node::Object(ObjectNode::with_syntax(
                    Some(self.syntax(start, end)),
                    entries,
                ))
            }
        };
        self.complete(node);
    }

    /// Flow collections end after their closing bracket. Block collections
    /// end with their last child, since the end event is only reported at
    /// the token that follows them.
    fn collection_end(&self, start: Pos, last: Option<&Range>, end_mark: &Marker) -> Pos {
        if matches!(self.text.as_bytes().get(start.byte), Some(b'[' | b'{')) {
            let mut end = self.pos(end_mark);
            end.column += 1;
            end.byte += 1;
            return end;
        }
        last.map_or(start, |r| r.end)
    }

    fn alias(&mut self, mark: &Marker) {
        let range = Range::at(self.filename, self.pos(mark));
        self.diags.push(Diagnostic::error(
            Some(range.clone()),
            "alias nodes are not supported",
            "",
        ));
        self.complete(Node::Null(NullNode::with_syntax(Some(Syntax::new(range)))));
    }

    /// Attaches a finished node to whatever is waiting for it.
    fn complete(&mut self, node: Node) {
        if matches!(self.stack.last(), Some(Frame::Object { key: None, .. })) {
            let key = self.mapping_key(node);
            if let Some(Frame::Object { key: slot, .. }) = self.stack.last_mut() {
                *slot = Some(key);
            }
            return;
        }

        match self.stack.last_mut() {
            Some(Frame::List { elements, .. }) => elements.push(node),
            Some(Frame::Object { entries, key, .. }) => {
                if let Some(key) = key.take() {
                    entries.push(property(key, node));
                }
            }
            None => {
                if self.root.is_none() {
                    self.root = Some(node);
                }
            }
        }
    }

    fn mapping_key(&mut self, node: Node) -> StringNode {
        if let Node::String(key) = node {
            return key;
        }
        self.diags.push(Diagnostic::node_error(
            &node,
            "mapping keys must be strings",
            format!("found key '{node}'"),
        ));
        StringNode::with_syntax(node.syntax().cloned(), node.to_string())
    }
}

impl MarkedEventReceiver for NodeBuilder<'_> {
    fn on_event(&mut self, event: Event, mark: Marker) {
        match event {
            Event::Scalar(value, style, _, tag) => self.scalar(value, style, tag.as_ref(), &mark),
            Event::SequenceStart(_, tag) => self.open(&mark, tag.as_ref(), false),
            Event::MappingStart(_, tag) => self.open(&mark, tag.as_ref(), true),
            Event::SequenceEnd | Event::MappingEnd => self.close(&mark),
            Event::Alias(_) => self.alias(&mark),
            _ => {}
        }
    }
}

/// A mapping entry spans from its key to the end of its value.
fn property(key: StringNode, value: Node) -> ObjectPropertyDef {
    let syntax = match (key.range(), value.range()) {
        (Some(k), Some(v)) => Some(Syntax::new(Range::new(k.filename.clone(), k.start, v.end))),
        _ => None,
    };
    ObjectPropertyDef::with_syntax(syntax, key, value)
}

/// Resolves an untagged plain scalar the way the YAML core schema does.
fn plain_scalar(syntax: Option<Syntax>, value: String) -> Node {
    let resolved = Yaml::from_str(&value);
    match resolved {
        Yaml::Null => Node::Null(NullNode::with_syntax(syntax)),
        Yaml::Boolean(b) => Node::Boolean(BooleanNode::with_syntax(syntax, b)),
        Yaml::Integer(i) => Node::Number(NumberNode::with_syntax(syntax, i as f64)),
        Yaml::Real(_) => match resolved.as_f64() {
            Some(n) => Node::Number(NumberNode::with_syntax(syntax, n)),
            None => Node::String(StringNode::with_syntax(syntax, value)),
        },
        _ => Node::String(StringNode::with_syntax(syntax, value)),
    }
}

/// The suffix of a `tag:yaml.org,2002:` tag such as `!!str`.
fn core_tag(tag: &Tag) -> Option<&str> {
    if tag.handle != "!!" && tag.handle != "tag:yaml.org,2002:" {
        return None;
    }
    matches!(
        tag.suffix.as_str(),
        "str" | "int" | "float" | "bool" | "null" | "seq" | "map"
    )
    .then_some(tag.suffix.as_str())
}

/// The source text of a scalar starting at `rest`, when it can be found.
/// Block scalars and plain scalars folded over several lines are not.
fn raw_scalar<'t>(rest: &'t str, value: &str, style: TScalarStyle) -> Option<&'t str> {
    let len = match style {
        TScalarStyle::Plain => rest.starts_with(value).then_some(value.len())?,
        TScalarStyle::SingleQuoted => quoted_len(rest, '\'')?,
        TScalarStyle::DoubleQuoted => quoted_len(rest, '"')?,
        _ => return None,
    };
    Some(&rest[..len])
}

/// Byte length of a quoted scalar, quotes included.
fn quoted_len(rest: &str, quote: char) -> Option<usize> {
    let mut chars = rest.char_indices();
    if chars.next()?.1 != quote {
        return None;
    }
    while let Some((i, c)) = chars.next() {
        if quote == '"' && c == '\\' {
            chars.next();
        } else if c == quote {
            // '' is an escaped quote inside single quotes.
            if quote == '\'' && rest[i + 1..].starts_with('\'') {
                chars.next();
                continue;
            }
            return Some(i + 1);
        }
    }
    None
}

/// The position just past `text` when it starts at `start`.
fn advance(start: Pos, text: &str) -> Pos {
    let mut pos = start;
    for c in text.chars() {
        if c == '\n' {
            pos.line += 1;
            pos.column = 1;
        } else {
            pos.column += 1;
        }
    }
    pos.byte += text.len();
    pos
}
