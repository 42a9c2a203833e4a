//! Loads template sources and drives them through the frontend.
//!
//! This crate is the entry point for callers holding template text: it
//! decodes YAML or JSON, binds the template, and synthesizes the component's
//! package schema, collecting diagnostics from every stage.
//!
//! # Quick start
//!
//! ```
//! use stackform_loader::{FrontendConfig, SourceFormat, compile};
//!
//! let source = r#"
//! name: webapp
//! description: A small web app
//! configuration:
//!   stage:
//!     type: String
//!     default: dev
//! outputs:
//!   url: ${lb.dnsName}
//! "#;
//!
//! let config = FrontendConfig::default();
//! let compilation = compile("Pulumi.yaml", source, SourceFormat::Yaml, &config).unwrap();
//! assert!(!compilation.has_errors());
//!
//! let json = compilation.schema_json().unwrap().unwrap();
//! assert!(json.contains("webapp:index:Component"));
//! ```

mod config;
pub mod encoding;
mod error;
mod pipeline;

pub use config::FrontendConfig;
pub use error::{LoaderError, Result};
pub use pipeline::{Compilation, SourceFormat, compile};
