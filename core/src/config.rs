//! Configuration value types.
//!
//! Template configuration is deliberately shallow: four primitives, lists of
//! those primitives, and nothing else. Types are plain tags, so a
//! `List<String>` parsed from a template annotation is equal to one inferred
//! from a default value.
//!
//! # Example
//!
//! ```
//! use stackform_core::config::{self, ConfigValue, Type};
//!
//! assert_eq!(config::parse("List< string >"), Some(Type::StringList));
//! assert_eq!(
//!     config::type_value(&ConfigValue::List(vec![ConfigValue::Int(1), ConfigValue::Int(2)])),
//!     Ok(Type::IntList),
//! );
//! ```

use std::fmt;

use thiserror::Error;

use crate::package::TypeSpec;

/// A configuration type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    String,
    Number,
    Int,
    Boolean,
    StringList,
    NumberList,
    IntList,
    BooleanList,
    /// Syntactically well-formed but not a configuration type, such as a
    /// list of lists.
    Invalid,
}

/// The primitive configuration types.
pub const PRIMITIVES: [Type; 4] = [Type::String, Type::Number, Type::Int, Type::Boolean];

/// Every valid configuration type.
pub const CONFIG_TYPES: [Type; 8] = [
    Type::String,
    Type::StringList,
    Type::Number,
    Type::NumberList,
    Type::Int,
    Type::IntList,
    Type::Boolean,
    Type::BooleanList,
];

impl Type {
    /// The list type whose elements are `element`, or `Invalid` when
    /// `element` is not a primitive.
    pub fn list_of(element: Type) -> Type {
        match element {
            Type::String => Type::StringList,
            Type::Number => Type::NumberList,
            Type::Int => Type::IntList,
            Type::Boolean => Type::BooleanList,
            _ => Type::Invalid,
        }
    }

    /// The element type of a list type.
    pub fn element(self) -> Option<Type> {
        match self {
            Type::StringList => Some(Type::String),
            Type::NumberList => Some(Type::Number),
            Type::IntList => Some(Type::Int),
            Type::BooleanList => Some(Type::Boolean),
            _ => None,
        }
    }

    pub fn is_list(self) -> bool {
        self.element().is_some()
    }

    pub fn is_primitive(self) -> bool {
        PRIMITIVES.contains(&self)
    }

    /// The structural schema type for this configuration type.
    pub fn type_spec(self) -> TypeSpec {
        match self {
            Type::String => TypeSpec::primitive("string"),
            Type::Number => TypeSpec::primitive("number"),
            Type::Int => TypeSpec::primitive("integer"),
            Type::Boolean => TypeSpec::primitive("boolean"),
            Type::Invalid => TypeSpec::any(),
            list => match list.element() {
                Some(element) => TypeSpec::array(element.type_spec()),
                None => TypeSpec::any(),
            },
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::String => f.write_str("String"),
            Type::Number => f.write_str("Number"),
            Type::Int => f.write_str("Int"),
            Type::Boolean => f.write_str("Boolean"),
            Type::Invalid => f.write_str("Invalid"),
            list => match list.element() {
                Some(element) => write!(f, "List<{element}>"),
                None => f.write_str("Invalid"),
            },
        }
    }
}

/// Displays a slice of types as a comma separated list.
pub struct Types<'a>(pub &'a [Type]);

impl fmt::Display for Types<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, t) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{t}")?;
        }
        Ok(())
    }
}

/// Returns true if `t` is one of [`CONFIG_TYPES`].
pub fn is_valid_type(t: Type) -> bool {
    CONFIG_TYPES.contains(&t)
}

/// Parses a type annotation such as `String` or `List<Int>`.
///
/// Matching is case-insensitive and tolerates whitespace inside the list
/// brackets. A list of lists parses as [`Type::Invalid`]; anything else
/// unrecognized returns `None`.
///
/// # Examples
///
/// ```
/// use stackform_core::config::{Type, parse};
///
/// assert_eq!(parse("Number"), Some(Type::Number));
/// assert_eq!(parse("List<Boolean>"), Some(Type::BooleanList));
/// assert_eq!(parse("List"), None);
/// assert_eq!(parse("List<>"), None);
/// ```
pub fn parse(s: &str) -> Option<Type> {
    let lowered = s.trim().to_ascii_lowercase();
    if let Some(inner) = lowered
        .strip_prefix("list<")
        .and_then(|rest| rest.strip_suffix('>'))
    {
        let inner = parse(inner.trim())?;
        return Some(Type::list_of(inner));
    }

    match lowered.as_str() {
        "string" => Some(Type::String),
        "boolean" => Some(Type::Boolean),
        "number" => Some(Type::Number),
        "int" => Some(Type::Int),
        _ => None,
    }
}

/// A literal configuration value whose type is to be inferred.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    /// A number with a fractional representation.
    Number(f64),
    /// A number supplied as an integer.
    Int(i64),
    Boolean(bool),
    List(Vec<ConfigValue>),
    /// Any other shape; the payload names it for error messages.
    Unsupported(String),
}

impl ConfigValue {
    /// Converts a JSON value, mapping integral numbers to [`ConfigValue::Int`].
    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => ConfigValue::Unsupported("null".to_string()),
            Value::Bool(b) => ConfigValue::Boolean(*b),
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => ConfigValue::Int(i),
                (None, Some(f)) => ConfigValue::Number(f),
                (None, None) => ConfigValue::Unsupported(n.to_string()),
            },
            Value::String(s) => ConfigValue::String(s.clone()),
            Value::Array(items) => ConfigValue::List(items.iter().map(Self::from_json).collect()),
            Value::Object(_) => ConfigValue::Unsupported("object".to_string()),
        }
    }

    fn shape_name(&self) -> String {
        match self {
            ConfigValue::String(_) => "string".to_string(),
            ConfigValue::Number(_) => "number".to_string(),
            ConfigValue::Int(_) => "int".to_string(),
            ConfigValue::Boolean(_) => "boolean".to_string(),
            ConfigValue::List(_) => "list".to_string(),
            ConfigValue::Unsupported(found) => found.clone(),
        }
    }
}

/// Why a value could not be assigned a configuration type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeValueError {
    /// An empty list has no element type to infer.
    #[error("empty list")]
    EmptyList,
    /// A list mixes element types.
    #[error("heterogeneous typed lists are not allowed: found types {first} and {second}")]
    HeterogeneousList { first: Type, second: Type },
    /// The value is not a configuration shape.
    #[error("unexpected configuration type '{found}': valid types are {}", Types(&CONFIG_TYPES))]
    UnexpectedType { found: String },
}

/// Infers the configuration type of a literal value.
///
/// # Errors
///
/// - [`TypeValueError::EmptyList`] for `[]`.
/// - [`TypeValueError::HeterogeneousList`] when list elements disagree,
///   including integers mixed with fractional numbers.
/// - [`TypeValueError::UnexpectedType`] for unsupported shapes and nested
///   lists.
///
/// # Examples
///
/// ```
/// use stackform_core::config::{ConfigValue, Type, TypeValueError, type_value};
///
/// assert_eq!(type_value(&ConfigValue::Number(3.14)), Ok(Type::Number));
/// assert_eq!(
///     type_value(&ConfigValue::List(vec![])),
///     Err(TypeValueError::EmptyList),
/// );
/// ```
pub fn type_value(value: &ConfigValue) -> Result<Type, TypeValueError> {
    match value {
        ConfigValue::String(_) => Ok(Type::String),
        ConfigValue::Boolean(_) => Ok(Type::Boolean),
        ConfigValue::Int(_) => Ok(Type::Int),
        ConfigValue::Number(_) => Ok(Type::Number),
        ConfigValue::List(items) => {
            let mut expected: Option<Type> = None;
            for item in items {
                if let ConfigValue::List(_) = item {
                    return Err(TypeValueError::UnexpectedType {
                        found: "list of lists".to_string(),
                    });
                }
                let found = type_value(item)?;
                match expected {
                    None => expected = Some(found),
                    Some(first) if first != found => {
                        return Err(TypeValueError::HeterogeneousList {
                            first,
                            second: found,
                        });
                    }
                    Some(_) => {}
                }
            }
            expected
                .map(Type::list_of)
                .ok_or(TypeValueError::EmptyList)
        }
        ConfigValue::Unsupported(_) => Err(TypeValueError::UnexpectedType {
            found: value.shape_name(),
        }),
    }
}
