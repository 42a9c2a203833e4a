//! Core frontend primitives for stackform templates.
//!
//! This crate defines the pieces every later compilation stage builds on:
//!
//! - [`syntax`] - the positional [`Node`] tree a YAML/JSON document is
//!   decoded into.
//! - [`diags`] - [`Diagnostic`]s and the ordered [`Diagnostics`] list every
//!   stage reports into.
//! - [`suggest`] - edit-distance ranking and "did you mean" messages via
//!   [`NonExistentFieldFormatter`].
//! - [`config`] - the configuration [`Type`] system: annotation parsing and
//!   type inference for literal values.
//! - [`PackageSchema`] - the structural package schema synthesized from a
//!   component template, plus [`validate_package`].
//!
//! # Example
//!
//! ```
//! use stackform_core::*;
//!
//! let formatter = NonExistentFieldFormatter {
//!     parent_label: "configuration 'size'".into(),
//!     fields: vec!["type".into(), "default".into(), "secret".into()],
//!     max_elements: 5,
//!     fields_are_properties: false,
//! };
//! let (summary, detail) = formatter.message_with_detail("defualt", "Field 'defualt'");
//!
//! let mut diags = Diagnostics::new();
//! diags.push(Diagnostic::warning(None, summary, detail));
//! assert!(!diags.has_errors());
//! assert_eq!(config::parse("List<Int>"), Some(Type::IntList));
//! ```

pub mod config;
pub mod diags;
mod package;
pub mod suggest;
pub mod syntax;
mod validate;

pub use config::{ConfigValue, Type, TypeValueError};
pub use diags::{Diagnostic, Diagnostics, Severity, ShownSet};
pub use package::{
    ANY_TYPE_REF, DefaultSpec, PackageSchema, PropertySpec, ResourceSpec, TypeSpec,
    component_token,
};
pub use suggest::{AndList, NonExistentFieldFormatter, OrList};
pub use syntax::{Node, Range, Syntax};
pub use validate::{ValidationError, validate_package};
