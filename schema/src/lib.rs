//! Template binding and component schema synthesis.
//!
//! A decoded [`Node`](stackform_core::Node) tree is bound to a
//! [`TemplateDecl`] with [`parse_template`], checked with
//! [`check_component`], and projected into a
//! [`PackageSchema`](stackform_core::PackageSchema) with [`schema`].
//!
//! # Example
//!
//! ```
//! use stackform_core::Node;
//! use stackform_core::syntax::{ObjectPropertyDef, StringNode};
//! use stackform_schema::{BindOptions, check_component, parse_template, schema};
//!
//! let param = Node::object(vec![
//!     ObjectPropertyDef::new(StringNode::new("type"), Node::string("String")),
//!     ObjectPropertyDef::new(StringNode::new("default"), Node::string("dev")),
//! ]);
//! let root = Node::object(vec![
//!     ObjectPropertyDef::new(StringNode::new("name"), Node::string("webapp")),
//!     ObjectPropertyDef::new(
//!         StringNode::new("configuration"),
//!         Node::object(vec![ObjectPropertyDef::new(StringNode::new("stage"), param)]),
//!     ),
//! ]);
//!
//! let (decl, diags) = parse_template(&root, &BindOptions::default());
//! assert!(diags.is_empty());
//! assert!(check_component(&decl).is_empty());
//!
//! let package = schema(&decl).unwrap();
//! assert_eq!(package.resources["webapp:index:Component"].input_properties.len(), 1);
//! ```

pub mod ast;
pub mod bind;
mod error;
pub mod synth;

pub use ast::{Expr, TemplateDecl};
pub use bind::{BindOptions, parse_template};
pub use error::{Result, SynthesisError};
pub use synth::{check_component, schema};
