//! Template declaration AST.
//!
//! Expressions keep the syntax of the node they were parsed from, so
//! diagnostics raised against a declaration point back at the source.

use std::fmt;

use stackform_core::syntax::{Node, ObjectPropertyDef, Range, StringNode, Syntax};
use stackform_core::{Diagnostic, Diagnostics};

macro_rules! expr_syntax {
    ($($ty:ident),* $(,)?) => {
        $(
            impl $ty {
                pub fn syntax(&self) -> Option<&Syntax> {
                    self.syntax.as_ref()
                }

                pub fn range(&self) -> Option<&Range> {
                    self.syntax.as_ref().map(|s| &s.range)
                }
            }
        )*
    };
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NullExpr {
    syntax: Option<Syntax>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanExpr {
    syntax: Option<Syntax>,
    pub value: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberExpr {
    syntax: Option<Syntax>,
    pub value: f64,
}

/// A string literal with any `$$` escapes already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct StringExpr {
    syntax: Option<Syntax>,
    pub value: String,
}

/// One piece of an interpolated string: literal text followed by an
/// optional `${...}` property access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpolation {
    pub text: String,
    pub access: Option<String>,
}

/// A string mixing literal text and property accesses, e.g. `"${host}:80"`.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolateExpr {
    syntax: Option<Syntax>,
    pub parts: Vec<Interpolation>,
}

/// A string that is exactly one property access, e.g. `"${bucket.arn}"`.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    syntax: Option<Syntax>,
    pub access: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListExpr {
    syntax: Option<Syntax>,
    pub elements: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProperty {
    pub key: Expr,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectExpr {
    syntax: Option<Syntax>,
    pub entries: Vec<ObjectProperty>,
}

expr_syntax!(
    NullExpr,
    BooleanExpr,
    NumberExpr,
    StringExpr,
    InterpolateExpr,
    SymbolExpr,
    ListExpr,
    ObjectExpr,
);

impl BooleanExpr {
    pub fn new(value: bool) -> Self {
        Self {
            syntax: None,
            value,
        }
    }
}

impl NumberExpr {
    pub fn new(value: f64) -> Self {
        Self {
            syntax: None,
            value,
        }
    }
}

impl StringExpr {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            syntax: None,
            value: value.into(),
        }
    }

    /// A string expression carrying the key node's syntax, used for map keys.
    pub fn from_key(node: &StringNode) -> Self {
        Self {
            syntax: node.syntax().cloned(),
            value: node.value().to_string(),
        }
    }
}

/// An expression in a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Null(NullExpr),
    Boolean(BooleanExpr),
    Number(NumberExpr),
    String(StringExpr),
    Interpolate(InterpolateExpr),
    Symbol(SymbolExpr),
    List(ListExpr),
    Object(ObjectExpr),
}

impl Expr {
    pub fn string(value: impl Into<String>) -> Self {
        Expr::String(StringExpr::new(value))
    }

    pub fn number(value: f64) -> Self {
        Expr::Number(NumberExpr::new(value))
    }

    pub fn boolean(value: bool) -> Self {
        Expr::Boolean(BooleanExpr::new(value))
    }

    pub fn syntax(&self) -> Option<&Syntax> {
        match self {
            Expr::Null(x) => x.syntax(),
            Expr::Boolean(x) => x.syntax(),
            Expr::Number(x) => x.syntax(),
            Expr::String(x) => x.syntax(),
            Expr::Interpolate(x) => x.syntax(),
            Expr::Symbol(x) => x.syntax(),
            Expr::List(x) => x.syntax(),
            Expr::Object(x) => x.syntax(),
        }
    }

    pub fn range(&self) -> Option<&Range> {
        self.syntax().map(|s| &s.range)
    }

    /// Describes the expression's shape the way messages refer to it:
    /// "a string", "an interpolated string", and so on.
    pub fn describe(&self) -> &'static str {
        match self {
            Expr::Null(_) => "null",
            Expr::Boolean(_) => "a boolean value",
            Expr::Number(_) => "a number",
            Expr::String(_) => "a string",
            Expr::Interpolate(_) => "an interpolated string",
            Expr::Symbol(_) => "a symbol",
            Expr::List(_) => "a list",
            Expr::Object(_) => "an object",
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Null(_) => f.write_str("null"),
            Expr::Boolean(x) => write!(f, "{}", x.value),
            Expr::Number(x) => write!(f, "{}", x.value),
            Expr::String(x) => f.write_str(&x.value),
            Expr::Interpolate(x) => {
                for part in &x.parts {
                    f.write_str(&part.text.replace('$', "$$"))?;
                    if let Some(access) = &part.access {
                        write!(f, "${{{access}}}")?;
                    }
                }
                Ok(())
            }
            Expr::Symbol(x) => write!(f, "${{{}}}", x.access),
            Expr::List(x) => {
                f.write_str("[")?;
                for (i, e) in x.elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{e}")?;
                }
                f.write_str("]")
            }
            Expr::Object(x) => {
                f.write_str("{")?;
                for (i, e) in x.entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", e.key, e.value)?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Splits a string literal into text and `${...}` accesses. `$$` is an
/// escaped dollar sign.
fn parse_interpolation(value: &str) -> Result<Vec<Interpolation>, &'static str> {
    let mut parts = Vec::new();
    let mut text = String::new();
    let mut rest = value;

    while let Some(idx) = rest.find('$') {
        text.push_str(&rest[..idx]);
        let after = &rest[idx + 1..];
        if let Some(tail) = after.strip_prefix('$') {
            text.push('$');
            rest = tail;
        } else if let Some(tail) = after.strip_prefix('{') {
            let Some(close) = tail.find('}') else {
                return Err("unterminated interpolation");
            };
            let access = &tail[..close];
            if access.trim().is_empty() {
                return Err("Property access expressions cannot be empty");
            }
            parts.push(Interpolation {
                text: std::mem::take(&mut text),
                access: Some(access.to_string()),
            });
            rest = &tail[close + 1..];
        } else {
            text.push('$');
            rest = after;
        }
    }
    text.push_str(rest);

    if !text.is_empty() || parts.is_empty() {
        parts.push(Interpolation { text, access: None });
    }
    Ok(parts)
}

fn parse_string(node: &StringNode) -> (Expr, Option<Diagnostic>) {
    let syntax = node.syntax().cloned();
    let parts = match parse_interpolation(node.value()) {
        Ok(parts) => parts,
        Err(summary) => {
            let diag = Diagnostic::error(node.range().cloned(), summary, "");
            let expr = Expr::String(StringExpr {
                syntax,
                value: node.value().to_string(),
            });
            return (expr, Some(diag));
        }
    };

    let expr = match parts.as_slice() {
        [Interpolation { text, access: None }] => Expr::String(StringExpr {
            syntax,
            value: text.clone(),
        }),
        [Interpolation {
            text,
            access: Some(access),
        }] if text.is_empty() => Expr::Symbol(SymbolExpr {
            syntax,
            access: access.clone(),
        }),
        _ => Expr::Interpolate(InterpolateExpr { syntax, parts }),
    };
    (expr, None)
}

/// Parses an expression from a syntax node.
///
/// Strings become string literals, symbols (`"${a.b}"`), or interpolations;
/// every other node maps to the expression of the same shape.
///
/// # Examples
///
/// ```
/// use stackform_core::Node;
/// use stackform_schema::ast::{Expr, parse_expr};
///
/// let (expr, diags) = parse_expr(&Node::string("${bucket.arn}"));
/// assert!(diags.is_empty());
/// assert!(matches!(expr, Expr::Symbol(ref s) if s.access == "bucket.arn"));
///
/// let (expr, _) = parse_expr(&Node::string("cost: $$5"));
/// assert_eq!(expr, Expr::string("cost: $5"));
/// ```
pub fn parse_expr(node: &Node) -> (Expr, Diagnostics) {
    let mut diags = Diagnostics::new();
    let expr = match node {
        Node::Null(n) => Expr::Null(NullExpr {
            syntax: n.syntax().cloned(),
        }),
        Node::Boolean(n) => Expr::Boolean(BooleanExpr {
            syntax: n.syntax().cloned(),
            value: n.value(),
        }),
        Node::Number(n) => Expr::Number(NumberExpr {
            syntax: n.syntax().cloned(),
            value: n.value(),
        }),
        Node::String(n) => {
            let (expr, diag) = parse_string(n);
            diags.extend([diag]);
            expr
        }
        Node::List(n) => {
            let elements = n
                .elements()
                .map(|e| {
                    let (x, xdiags) = parse_expr(e);
                    diags.append(xdiags);
                    x
                })
                .collect();
            Expr::List(ListExpr {
                syntax: n.syntax().cloned(),
                elements,
            })
        }
        Node::Object(n) => {
            let entries = n
                .entries()
                .map(|ObjectPropertyDef { key, value, .. }| {
                    let (k, kdiags) = parse_string(key);
                    diags.extend([kdiags]);
                    let (v, vdiags) = parse_expr(value);
                    diags.append(vdiags);
                    ObjectProperty { key: k, value: v }
                })
                .collect();
            Expr::Object(ObjectExpr {
                syntax: n.syntax().cloned(),
                entries,
            })
        }
    };
    (expr, diags)
}

/// A `key: value` expression entry, as found in `variables` and `outputs`.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEntry {
    pub key: StringExpr,
    pub value: Expr,
}

/// A configuration parameter: its declared type, default, and secrecy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigParamDecl {
    syntax: Option<Syntax>,
    pub type_: Option<StringExpr>,
    pub default: Option<Expr>,
    pub secret: Option<BooleanExpr>,
}

impl ConfigParamDecl {
    pub fn new(
        type_: Option<StringExpr>,
        default: Option<Expr>,
        secret: Option<BooleanExpr>,
    ) -> Self {
        Self {
            syntax: None,
            type_,
            default,
            secret,
        }
    }

    pub fn range(&self) -> Option<&Range> {
        self.syntax.as_ref().map(|s| &s.range)
    }

    pub(crate) fn set_syntax(&mut self, syntax: Option<Syntax>) {
        self.syntax = syntax;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigEntry {
    pub key: StringExpr,
    pub value: ConfigParamDecl,
}

/// A resource declaration. Only the shape is bound here; properties and
/// options are kept as expressions for later stages.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourceDecl {
    pub type_: Option<StringExpr>,
    pub properties: Vec<PropertyEntry>,
    pub options: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceEntry {
    pub key: StringExpr,
    pub value: ResourceDecl,
}

/// A bound template.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemplateDecl {
    syntax: Option<Syntax>,
    pub name: Option<StringExpr>,
    pub runtime: Option<StringExpr>,
    pub description: Option<StringExpr>,
    pub configuration: Vec<ConfigEntry>,
    pub variables: Vec<PropertyEntry>,
    pub resources: Vec<ResourceEntry>,
    pub outputs: Vec<PropertyEntry>,
}

impl TemplateDecl {
    /// An empty template with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(StringExpr::new(name)),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(StringExpr::new(description));
        self
    }

    pub fn with_config(mut self, key: impl Into<String>, param: ConfigParamDecl) -> Self {
        self.configuration.push(ConfigEntry {
            key: StringExpr::new(key),
            value: param,
        });
        self
    }

    pub fn with_output(mut self, key: impl Into<String>, value: Expr) -> Self {
        self.outputs.push(PropertyEntry {
            key: StringExpr::new(key),
            value,
        });
        self
    }

    pub fn range(&self) -> Option<&Range> {
        self.syntax.as_ref().map(|s| &s.range)
    }

    pub(crate) fn set_syntax(&mut self, syntax: Option<Syntax>) {
        self.syntax = syntax;
    }
}
