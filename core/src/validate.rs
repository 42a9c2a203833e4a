//! Package schema validation.
//!
//! Checks the structural invariants a synthesized [`PackageSchema`] must
//! hold before it is handed to a provider runtime: a single component
//! resource keyed by its own token, and required inputs that name real,
//! default-less input properties.
//!
//! # Examples
//!
//! ```
//! use stackform_core::*;
//!
//! let mut package = PackageSchema::new("app", "");
//! let token = component_token("app");
//! package.resources.insert(token.clone(), ResourceSpec::component(&token, ""));
//! assert!(validate_package(&package).is_empty());
//!
//! // Missing resource
//! let empty = PackageSchema::new("app", "");
//! assert_eq!(validate_package(&empty), vec![ValidationError::ResourceCount(0)]);
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{PackageSchema, ResourceSpec};

/// Package schema validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A template package holds exactly one resource.
    #[error("package must define exactly one resource, found {0}")]
    ResourceCount(usize),
    /// The map key and the resource's own token disagree.
    #[error("resource key '{key}' does not match its type token '{token}'")]
    TokenMismatch { key: String, token: String },
    /// The resource is not marked as a component.
    #[error("resource '{0}' must be a component")]
    NotComponent(String),
    /// A required input has no matching input property.
    #[error("required input '{0}' is not an input property")]
    UnknownRequiredInput(String),
    /// A required input also declares a default, so it can never be missing.
    #[error("required input '{0}' has a default value")]
    RequiredInputHasDefault(String),
    /// The same input is listed as required twice.
    #[error("duplicate required input: {0}")]
    DuplicateRequiredInput(String),
}

/// Validates a synthesized package schema.
///
/// Stops at the first structural problem with the resource set; collects
/// every problem with a resource's inputs.
pub fn validate_package(package: &PackageSchema) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if package.resources.len() != 1 {
        errors.push(ValidationError::ResourceCount(package.resources.len()));
        return errors;
    }

    for (key, resource) in &package.resources {
        if key != &resource.token {
            errors.push(ValidationError::TokenMismatch {
                key: key.clone(),
                token: resource.token.clone(),
            });
            return errors;
        }
        if !resource.is_component {
            errors.push(ValidationError::NotComponent(key.clone()));
            return errors;
        }
        errors.extend(validate_inputs(resource));
    }

    errors
}

fn validate_inputs(resource: &ResourceSpec) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for name in &resource.required_inputs {
        if !seen.insert(name.as_str()) {
            errors.push(ValidationError::DuplicateRequiredInput(name.clone()));
            continue;
        }
        match resource.input_properties.get(name) {
            None => errors.push(ValidationError::UnknownRequiredInput(name.clone())),
            Some(prop) if prop.default.is_some() => {
                errors.push(ValidationError::RequiredInputHasDefault(name.clone()));
            }
            Some(_) => {}
        }
    }

    errors
}
